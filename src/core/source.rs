//! The device-event source seam.
//!
//! The control loop and dispatcher only see the types in this module; the
//! libinput implementation lives in `platform::libinput`, and tests drive
//! the same code with a scripted source.

use std::fmt;
use std::os::fd::BorrowedFd;

use super::fixed::Fixed;
use crate::error::Result;

/// Non-owning lookup key for a device.
///
/// Only meaningful while some handle to the device is alive; the device
/// record holds such a handle for exactly that reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeviceKey(pub usize);

impl fmt::Display for DeviceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// A reference-counted handle to one input device.
///
/// Cloning a handle keeps the underlying device alive.
pub trait InputDevice: Clone {
    fn key(&self) -> DeviceKey;

    /// Kernel system name, e.g. `event7`
    fn sysname(&self) -> String;

    fn has_stylus(&self) -> bool;
}

/// Tool-type codes (evdev `BTN_TOOL_*`), `TOOL_NONE` when out of proximity.
pub mod tool_code {
    pub const TOOL_NONE: u32 = 0;
    pub const PEN: u32 = 0x140;
    pub const ERASER: u32 = 0x141;
    pub const BRUSH: u32 = 0x142;
    pub const PENCIL: u32 = 0x143;
    pub const AIRBRUSH: u32 = 0x144;
    pub const FINGER: u32 = 0x145;
    pub const MOUSE: u32 = 0x146;
    pub const LENS: u32 = 0x147;
}

/// Axis codes carried by `EventKind::Axis`.
pub mod axis_code {
    pub const SCROLL_VERTICAL: u32 = 0;
    pub const SCROLL_HORIZONTAL: u32 = 1;
    pub const TILT_VERTICAL: u32 = 2;
    pub const TILT_HORIZONTAL: u32 = 3;
    pub const DISTANCE: u32 = 4;
    pub const PRESSURE: u32 = 5;
}

/// Button codes (evdev).
pub mod button_code {
    pub const BTN_TOUCH: u32 = 0x14a;
    pub const BTN_STYLUS: u32 = 0x14b;
    pub const BTN_STYLUS2: u32 = 0x14c;
}

/// Payload of an event that updates fields of an existing device record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldUpdate {
    MotionAbsolute { x: Fixed, y: Fixed },
    ToolUpdate { tool: u32 },
    Axis { axis: u32, value: Fixed },
    Button { button: u32, pressed: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Empty or unnameable event; never legitimately emitted.
    None,
    DeviceAdded,
    DeviceRemoved,
    Field(FieldUpdate),
}

/// One event as delivered by the source, with the device it belongs to.
#[derive(Debug, Clone)]
pub struct RawEvent<D> {
    pub device: D,
    pub kind: EventKind,
}

impl<D> RawEvent<D> {
    pub fn new(device: D, kind: EventKind) -> Self {
        Self { device, kind }
    }
}

/// Source of device hotplug and tablet events.
pub trait EventSource {
    type Device: InputDevice;

    /// Readiness handle for the control loop's wait.
    fn poll_fd(&self) -> BorrowedFd<'_>;

    /// Read whatever the kernel has pending into the event queue.
    fn dispatch(&mut self) -> Result<()>;

    /// Pop the next queued event, in delivery order.
    fn next_event(&mut self) -> Option<RawEvent<Self::Device>>;
}
