use std::io;
use thiserror::Error;

use crate::core::source::DeviceKey;

/// Custom error type for the tablet debugger
#[derive(Error, Debug)]
pub enum TabletError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("System call failed: {0}")]
    Nix(#[from] nix::Error),

    #[error("Device {0} is already registered")]
    DuplicateDevice(DeviceKey),

    #[error("Device {0} is not registered")]
    UnknownDevice(DeviceKey),

    #[error("Protocol violation from the device-event source: {0}")]
    Protocol(String),

    #[error("Device source error: {0}")]
    DeviceSource(String),

    #[error("Signal handling error: {0}")]
    Signal(String),

    #[error("Render error: {0}")]
    Render(String),
}

/// Result type alias for the tablet debugger
pub type Result<T> = std::result::Result<T, TabletError>;

impl TabletError {
    /// Create a protocol error
    pub fn protocol<S: Into<String>>(msg: S) -> Self {
        TabletError::Protocol(msg.into())
    }

    /// Create a device source error
    pub fn device_source<S: Into<String>>(msg: S) -> Self {
        TabletError::DeviceSource(msg.into())
    }

    pub fn signal<S: Into<String>>(msg: S) -> Self {
        TabletError::Signal(msg.into())
    }

    pub fn render<S: Into<String>>(msg: S) -> Self {
        TabletError::Render(msg.into())
    }

    /// Registry and protocol faults mean an internal invariant or the event
    /// source contract is broken; nothing downstream can recover from them.
    pub fn is_fatal_fault(&self) -> bool {
        matches!(
            self,
            TabletError::DuplicateDevice(_)
                | TabletError::UnknownDevice(_)
                | TabletError::Protocol(_)
        )
    }
}
