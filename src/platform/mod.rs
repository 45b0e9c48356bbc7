// Platform-specific code module

pub mod root_window;

pub use root_window::RootWindowSink;
