//! libinput / udev implementation of the device-event source.

use std::collections::VecDeque;
use std::fs::{File, OpenOptions};
use std::os::fd::{AsFd, BorrowedFd, OwnedFd};
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;

use input::event::device::DeviceEvent;
use input::event::pointer::ButtonState;
use input::event::tablet_tool::{
    ProximityState, TabletToolEvent, TabletToolEventTrait, TabletToolType, TipState,
};
use input::event::{Event, EventTrait};
use input::{AsRaw, Device, DeviceCapability, Libinput, LibinputInterface};
use log::{debug, info, trace, warn};

use crate::core::fixed::Fixed;
use crate::core::source::{
    axis_code, button_code, tool_code, DeviceKey, EventKind, EventSource, FieldUpdate,
    InputDevice, RawEvent,
};
use crate::error::{Result, TabletError};

/// Opens device nodes directly; requires read access to `/dev/input/event*`.
struct DirectInterface;

impl LibinputInterface for DirectInterface {
    fn open_restricted(&mut self, path: &Path, flags: i32) -> std::result::Result<OwnedFd, i32> {
        let access = flags & libc::O_ACCMODE;
        OpenOptions::new()
            .custom_flags(flags)
            .read(access == libc::O_RDONLY || access == libc::O_RDWR)
            .write(access == libc::O_WRONLY || access == libc::O_RDWR)
            .open(path)
            .map(OwnedFd::from)
            .map_err(|err| {
                warn!("Failed to open {}: {}", path.display(), err);
                err.raw_os_error().unwrap_or(libc::EIO)
            })
    }

    fn close_restricted(&mut self, fd: OwnedFd) {
        drop(File::from(fd));
    }
}

/// libinput device handle; clones share one libinput reference each.
#[derive(Clone)]
pub struct LibinputDevice(Device);

impl InputDevice for LibinputDevice {
    fn key(&self) -> DeviceKey {
        DeviceKey(self.0.as_raw() as usize)
    }

    fn sysname(&self) -> String {
        self.0.sysname().to_string()
    }

    fn has_stylus(&self) -> bool {
        self.0.has_capability(DeviceCapability::TabletTool)
    }
}

/// Event source backed by a udev-seat libinput context.
///
/// One libinput event can carry several changes (a tablet axis event moves
/// the pen and changes pressure at once); they are split into one
/// `RawEvent` per field and queued in order by `event_kinds`.
pub struct LibinputSource {
    context: Libinput,
    pending: VecDeque<RawEvent<LibinputDevice>>,
}

impl LibinputSource {
    /// Create a libinput context for every device on `seat`.
    pub fn open(seat: &str) -> Result<Self> {
        info!("Setting up udev for seat '{}'", seat);
        let mut context = Libinput::new_with_udev(DirectInterface);
        context
            .udev_assign_seat(seat)
            .map_err(|()| TabletError::device_source(format!("failed to assign udev seat '{}'", seat)))?;

        Ok(Self {
            context,
            pending: VecDeque::new(),
        })
    }

    fn translate(&mut self, event: Event) {
        let device = LibinputDevice(event.device());
        for kind in event_kinds(classify(&event)) {
            self.pending.push_back(RawEvent::new(device.clone(), kind));
        }
    }
}

/// One tablet axis as reported on a tool event.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct AxisReading {
    changed: bool,
    value: f64,
}

impl AxisReading {
    fn new(changed: bool, value: f64) -> Self {
        Self { changed, value }
    }
}

/// Every axis libinput carries on a tablet-tool event.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct AxisSnapshot {
    x: AxisReading,
    y: AxisReading,
    tilt_vertical: AxisReading,
    tilt_horizontal: AxisReading,
    distance: AxisReading,
    pressure: AxisReading,
}

impl AxisSnapshot {
    fn of<E: TabletToolEventTrait>(event: &E) -> Self {
        Self {
            x: AxisReading::new(event.x_has_changed(), event.x()),
            y: AxisReading::new(event.y_has_changed(), event.y()),
            tilt_vertical: AxisReading::new(event.tilt_y_has_changed(), event.tilt_y()),
            tilt_horizontal: AxisReading::new(event.tilt_x_has_changed(), event.tilt_x()),
            distance: AxisReading::new(event.distance_has_changed(), event.distance()),
            pressure: AxisReading::new(event.pressure_has_changed(), event.pressure()),
        }
    }

    /// Field updates for the axes; only changed ones unless `all`.
    fn updates(&self, all: bool, out: &mut Vec<EventKind>) {
        if all || self.x.changed || self.y.changed {
            out.push(EventKind::Field(FieldUpdate::MotionAbsolute {
                x: Fixed::from_f64(self.x.value),
                y: Fixed::from_f64(self.y.value),
            }));
        }

        let axes = [
            (axis_code::TILT_VERTICAL, self.tilt_vertical),
            (axis_code::TILT_HORIZONTAL, self.tilt_horizontal),
            (axis_code::DISTANCE, self.distance),
            (axis_code::PRESSURE, self.pressure),
        ];
        for (axis, reading) in axes {
            if all || reading.changed {
                out.push(EventKind::Field(FieldUpdate::Axis {
                    axis,
                    value: Fixed::from_f64(reading.value),
                }));
            }
        }
    }
}

/// What a tablet-tool event changed.
#[derive(Debug, Clone, Copy, PartialEq)]
enum ToolChange {
    Axis(AxisSnapshot),
    ProximityIn { tool: u32, axes: AxisSnapshot },
    ProximityOut,
    Tip { down: bool, axes: AxisSnapshot },
    Button { button: u32, pressed: bool },
}

/// A libinput event reduced to what the tablet display cares about.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Classified {
    Added,
    Removed,
    Tool(ToolChange),
    /// A device or tablet event with no counterpart in the stream
    Unnamed,
    /// Keyboard, pointer, touch, gesture, switch or pad input
    Foreign,
}

fn classify(event: &Event) -> Classified {
    match event {
        Event::Device(DeviceEvent::Added(_)) => Classified::Added,
        Event::Device(DeviceEvent::Removed(_)) => Classified::Removed,
        Event::Device(_) => Classified::Unnamed,
        Event::Tablet(tablet) => classify_tablet(tablet),
        other => {
            trace!("Dropping non-tablet event {:?}", other);
            Classified::Foreign
        }
    }
}

fn classify_tablet(event: &TabletToolEvent) -> Classified {
    let change = match event {
        TabletToolEvent::Axis(axis) => ToolChange::Axis(AxisSnapshot::of(axis)),
        TabletToolEvent::Proximity(proximity) => match proximity.proximity_state() {
            ProximityState::In => ToolChange::ProximityIn {
                tool: tool_code_for(proximity.tool().tool_type()),
                axes: AxisSnapshot::of(proximity),
            },
            ProximityState::Out => ToolChange::ProximityOut,
        },
        TabletToolEvent::Tip(tip) => ToolChange::Tip {
            down: matches!(tip.tip_state(), TipState::Down),
            axes: AxisSnapshot::of(tip),
        },
        TabletToolEvent::Button(button) => ToolChange::Button {
            button: button.button(),
            pressed: matches!(button.button_state(), ButtonState::Pressed),
        },
        _ => return Classified::Unnamed,
    };
    Classified::Tool(change)
}

/// Split one classified event into the queued stream, in order.
fn event_kinds(event: Classified) -> Vec<EventKind> {
    let mut kinds = Vec::new();
    match event {
        Classified::Added => kinds.push(EventKind::DeviceAdded),
        Classified::Removed => kinds.push(EventKind::DeviceRemoved),
        Classified::Unnamed => kinds.push(EventKind::None),
        Classified::Foreign => {}
        Classified::Tool(ToolChange::Axis(axes)) => axes.updates(false, &mut kinds),
        Classified::Tool(ToolChange::ProximityIn { tool, axes }) => {
            kinds.push(EventKind::Field(FieldUpdate::ToolUpdate { tool }));
            axes.updates(true, &mut kinds);
        }
        Classified::Tool(ToolChange::ProximityOut) => {
            kinds.push(EventKind::Field(FieldUpdate::ToolUpdate {
                tool: tool_code::TOOL_NONE,
            }));
        }
        Classified::Tool(ToolChange::Tip { down, axes }) => {
            axes.updates(false, &mut kinds);
            kinds.push(EventKind::Field(FieldUpdate::Button {
                button: button_code::BTN_TOUCH,
                pressed: down,
            }));
        }
        Classified::Tool(ToolChange::Button { button, pressed }) => {
            kinds.push(EventKind::Field(FieldUpdate::Button { button, pressed }));
        }
    }
    kinds
}

/// evdev tool code for a libinput tool type; unnamed types get a code no
/// tool table knows.
fn tool_code_for(tool_type: Option<TabletToolType>) -> u32 {
    match tool_type {
        Some(TabletToolType::Pen) => tool_code::PEN,
        Some(TabletToolType::Eraser) => tool_code::ERASER,
        Some(TabletToolType::Brush) => tool_code::BRUSH,
        Some(TabletToolType::Pencil) => tool_code::PENCIL,
        Some(TabletToolType::Airbrush) => tool_code::AIRBRUSH,
        Some(TabletToolType::Mouse) => tool_code::MOUSE,
        Some(TabletToolType::Lens) => tool_code::LENS,
        other => {
            debug!("Unrecognized tablet tool type {:?}", other);
            u32::MAX
        }
    }
}

impl EventSource for LibinputSource {
    type Device = LibinputDevice;

    fn poll_fd(&self) -> BorrowedFd<'_> {
        self.context.as_fd()
    }

    fn dispatch(&mut self) -> Result<()> {
        self.context.dispatch()?;
        Ok(())
    }

    fn next_event(&mut self) -> Option<RawEvent<LibinputDevice>> {
        while self.pending.is_empty() {
            let event = self.context.next()?;
            self.translate(event);
        }
        self.pending.pop_front()
    }
}
