//! Terminal User Interface for tablet diagnostics.
//!
//! One full-screen surface per connected tablet, composited with ratatui.

mod app;
mod event_handler;
mod render;
mod surface;

pub use app::{
    apply_command, apply_keys, handle_device_events, handle_signal, initial_scan, run_tablet_app, Flow,
    NO_DEVICES_WARNING,
};
pub use event_handler::{command_for_key, TabletCommand};
pub use render::{render_context, Display};
pub use surface::{Surface, SurfaceStack};
