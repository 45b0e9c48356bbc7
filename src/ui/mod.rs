// Text formatting module

pub mod formatters;

// Re-export commonly used items for cleaner imports
pub use formatters::{format_bit_rate, format_byte_rate, format_hours_minutes};
