//! State owned by the control loop.

use log::debug;
use ratatui::layout::Rect;

use super::record::DeviceRecord;
use super::registry::DeviceRegistry;
use super::source::{DeviceKey, InputDevice};
use crate::error::Result;
use crate::ui::tablet_tui::{Surface, SurfaceStack};

/// Device registry and surface stack, kept in lock-step.
///
/// Every record in the registry has exactly one entry in the stack and
/// owns exactly one surface; both are created and torn down inside a single
/// method call here.
pub struct TabletContext<D> {
    registry: DeviceRegistry<D>,
    stack: SurfaceStack,
    area: Rect,
}

impl<D: InputDevice> TabletContext<D> {
    /// Start with no devices and the placeholder showing, sized to `area`.
    pub fn new(area: Rect) -> Self {
        Self {
            registry: DeviceRegistry::new(),
            stack: SurfaceStack::new(area),
            area,
        }
    }

    pub fn registry(&self) -> &DeviceRegistry<D> {
        &self.registry
    }

    pub fn stack(&self) -> &SurfaceStack {
        &self.stack
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn device_count(&self) -> usize {
        self.registry.len()
    }

    pub fn record(&self, key: DeviceKey) -> Option<&DeviceRecord<D>> {
        self.registry.get(key)
    }

    pub fn record_mut(&mut self, key: DeviceKey) -> Option<&mut DeviceRecord<D>> {
        self.registry.get_mut(key)
    }

    /// Create the record and surface for a newly added device.
    ///
    /// The surface is painted with default values and stacked below the
    /// existing ones, so focus does not move unless this is the first device.
    pub fn create_device_surface(&mut self, device: D) -> Result<DeviceKey> {
        let key = device.key();
        let was_empty = self.registry.is_empty();

        let record = DeviceRecord::new(device, Surface::new(self.area));
        self.registry.register(record)?;
        self.stack.insert_bottom(key);

        if was_empty {
            // the startup permission hint is stale once any device appears
            self.stack.clear_advisory();
            self.stack.hide_placeholder();
        }
        debug!("Created surface for device {}", key);
        Ok(key)
    }

    /// Tear down the record and surface of a removed device.
    pub fn destroy_device_surface(&mut self, key: DeviceKey) -> Result<()> {
        let record = self.registry.unregister(key)?;
        self.stack.remove(key);
        drop(record);

        if self.registry.is_empty() {
            self.stack.show_placeholder();
        }
        debug!("Destroyed surface for device {}", key);
        Ok(())
    }

    /// Record of the surface currently shown, if a device is connected.
    pub fn focused_record(&self) -> Option<&DeviceRecord<D>> {
        self.stack.focused().and_then(|key| self.registry.get(key))
    }

    pub fn cycle_next(&mut self) {
        self.stack.cycle_next();
    }

    pub fn cycle_previous(&mut self) {
        self.stack.cycle_previous();
    }

    pub fn set_advisory(&mut self, text: impl Into<String>) {
        self.stack.set_advisory(text);
    }

    /// Resize every surface to `area` and repaint all of their lines.
    pub fn repaint_all(&mut self, area: Rect) {
        self.area = area;
        self.stack.resize_placeholder(area);
        for record in self.registry.records_mut() {
            record.surface_mut().resize(area);
            record.paint();
        }
    }
}
