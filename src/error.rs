use std::io;
use thiserror::Error;

/// Custom error type for dwmbar
#[derive(Error, Debug)]
pub enum BarError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Display sink error: {0}")]
    Sink(String),

    #[error("Runtime error: {0}")]
    Runtime(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for dwmbar
pub type Result<T> = std::result::Result<T, BarError>;

impl BarError {
    /// Create a parse error
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        BarError::Parse(msg.into())
    }

    /// Create a display sink error
    pub fn sink<S: Into<String>>(msg: S) -> Self {
        BarError::Sink(msg.into())
    }

    pub fn runtime<S: Into<String>>(msg: S) -> Self {
        BarError::Runtime(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        BarError::Other(msg.into())
    }
}

impl From<x11rb::errors::ConnectError> for BarError {
    fn from(err: x11rb::errors::ConnectError) -> Self {
        BarError::Sink(format!("cannot connect to X server: {}", err))
    }
}

impl From<x11rb::errors::ConnectionError> for BarError {
    fn from(err: x11rb::errors::ConnectionError) -> Self {
        BarError::Sink(format!("X connection failed: {}", err))
    }
}

impl From<x11rb::errors::ReplyError> for BarError {
    fn from(err: x11rb::errors::ReplyError) -> Self {
        BarError::Sink(format!("X request rejected: {}", err))
    }
}
