// dwmbar Library - Public API

// Re-export error types
pub mod error;
pub use error::{BarError, Result};

// Module declarations
pub mod core;
pub mod platform;
pub mod ui;

// Re-export commonly used types
pub use crate::core::config::BarConfig;

// Initialize logging (RUST_LOG overrides the default level)
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}
