//! Per-device display state.

use super::fixed::Fixed;
use super::source::{tool_code, InputDevice};
use crate::ui::tablet_tui::Surface;

/// Tool currently in proximity of the tablet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    #[default]
    None,
    Pen,
    Eraser,
    Brush,
    Pencil,
    Airbrush,
    Finger,
    Mouse,
    Lens,
    Unknown,
}

impl Tool {
    /// Resolve a raw tool-type code; unrecognized codes are `Unknown`.
    pub fn from_code(code: u32) -> Self {
        match code {
            tool_code::TOOL_NONE => Tool::None,
            tool_code::PEN => Tool::Pen,
            tool_code::ERASER => Tool::Eraser,
            tool_code::BRUSH => Tool::Brush,
            tool_code::PENCIL => Tool::Pencil,
            tool_code::AIRBRUSH => Tool::Airbrush,
            tool_code::FINGER => Tool::Finger,
            tool_code::MOUSE => Tool::Mouse,
            tool_code::LENS => Tool::Lens,
            _ => Tool::Unknown,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Tool::None => "None",
            Tool::Pen => "Pen",
            Tool::Eraser => "Eraser",
            Tool::Brush => "Brush",
            Tool::Pencil => "Pencil",
            Tool::Airbrush => "Airbrush",
            Tool::Finger => "Finger",
            Tool::Mouse => "Mouse",
            Tool::Lens => "Lens",
            Tool::Unknown => "???",
        }
    }
}

/// One display line of a device surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    SystemName,
    Touching,
    Tool,
    Position,
    TiltVertical,
    TiltHorizontal,
    Distance,
    Pressure,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::SystemName,
        Field::Touching,
        Field::Tool,
        Field::Position,
        Field::TiltVertical,
        Field::TiltHorizontal,
        Field::Distance,
        Field::Pressure,
    ];

    /// Fixed row of the field on its surface
    pub fn row(self) -> usize {
        match self {
            Field::SystemName => 0,
            Field::Touching => 1,
            Field::Tool => 3,
            Field::Position => 5,
            Field::TiltVertical => 7,
            Field::TiltHorizontal => 8,
            Field::Distance => 10,
            Field::Pressure => 11,
        }
    }
}

fn bool_to_string(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

/// Accumulated state of one stylus-capable device.
///
/// Owns a handle to the device (keeping it alive for the lifetime of the
/// record) and the surface the state is painted on.
// Field order is drop order: the surface goes first, the device handle last.
pub struct DeviceRecord<D> {
    surface: Surface,
    sysname: String,
    pub touching: bool,
    pub tool: Tool,
    pub x: Fixed,
    pub y: Fixed,
    pub tilt_vertical: Fixed,
    pub tilt_horizontal: Fixed,
    pub distance: Fixed,
    pub pressure: Fixed,
    device: D,
}

impl<D: InputDevice> DeviceRecord<D> {
    /// Create a record with default fields and a fully painted surface.
    pub fn new(device: D, surface: Surface) -> Self {
        let sysname = device.sysname();
        let mut record = Self {
            surface,
            sysname,
            touching: false,
            tool: Tool::None,
            x: Fixed::ZERO,
            y: Fixed::ZERO,
            tilt_vertical: Fixed::ZERO,
            tilt_horizontal: Fixed::ZERO,
            distance: Fixed::ZERO,
            pressure: Fixed::ZERO,
            device,
        };
        record.paint();
        record
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn sysname(&self) -> &str {
        &self.sysname
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut Surface {
        &mut self.surface
    }

    /// Text of one field line from the current state
    pub fn format_field(&self, field: Field) -> String {
        match field {
            Field::SystemName => format!("System name: {}", self.sysname),
            Field::Touching => {
                format!("Stylus is touching tablet? {}", bool_to_string(self.touching))
            }
            Field::Tool => format!("Current tool: {}", self.tool.name()),
            Field::Position => format!("X: {:7.3} Y: {:7.3}", self.x, self.y),
            Field::TiltVertical => format!("Vertical tilt: {:.3}", self.tilt_vertical),
            Field::TiltHorizontal => format!("Horizontal tilt: {:.3}", self.tilt_horizontal),
            Field::Distance => format!("Distance: {:.3}", self.distance),
            Field::Pressure => format!("Pressure: {:.3}", self.pressure),
        }
    }

    fn repaint_field(&mut self, field: Field) {
        let line = self.format_field(field);
        self.surface.write_line(field.row(), &line);
    }

    /// Repaint every line; used on creation and after a resize.
    pub fn paint(&mut self) {
        for field in Field::ALL {
            self.repaint_field(field);
        }
    }

    pub fn set_position(&mut self, x: Fixed, y: Fixed) {
        self.x = x;
        self.y = y;
        self.repaint_field(Field::Position);
    }

    pub fn set_tool(&mut self, code: u32) {
        self.tool = Tool::from_code(code);
        self.repaint_field(Field::Tool);
    }

    pub fn set_touching(&mut self, touching: bool) {
        self.touching = touching;
        self.repaint_field(Field::Touching);
    }

    pub fn set_tilt_vertical(&mut self, value: Fixed) {
        self.tilt_vertical = value;
        self.repaint_field(Field::TiltVertical);
    }

    pub fn set_tilt_horizontal(&mut self, value: Fixed) {
        self.tilt_horizontal = value;
        self.repaint_field(Field::TiltHorizontal);
    }

    pub fn set_distance(&mut self, value: Fixed) {
        self.distance = value;
        self.repaint_field(Field::Distance);
    }

    pub fn set_pressure(&mut self, value: Fixed) {
        self.pressure = value;
        self.repaint_field(Field::Pressure);
    }
}
