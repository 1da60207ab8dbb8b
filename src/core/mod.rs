// Core device tracking and dispatch logic

pub mod config;
pub mod context;
pub mod dispatcher;
pub mod fixed;
pub mod record;
pub mod registry;
pub mod source;

// Re-export commonly used items
pub use config::Config;
pub use context::TabletContext;
pub use dispatcher::{dispatch_events, handle_event, DispatchStats, Outcome};
pub use fixed::Fixed;
pub use record::{DeviceRecord, Field, Tool};
pub use registry::DeviceRegistry;
pub use source::{DeviceKey, EventKind, EventSource, FieldUpdate, InputDevice, RawEvent};
