// Platform-specific code module

pub mod libinput;
pub mod signals;

// Re-exports for cleaner imports
pub use libinput::{LibinputDevice, LibinputSource};
pub use signals::{PendingSignal, SignalSource};
