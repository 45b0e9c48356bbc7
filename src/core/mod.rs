// Core business logic module

pub mod config;
pub mod status_bar;

// Re-export commonly used items
pub use config::BarConfig;
pub use status_bar::{BarRuntime, BlockKind};
