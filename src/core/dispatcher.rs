//! Routes device events to the records they belong to.

use log::{debug, trace};

use super::context::TabletContext;
use super::record::DeviceRecord;
use super::source::{axis_code, button_code, EventKind, EventSource, FieldUpdate, InputDevice, RawEvent};
use crate::error::{Result, TabletError};

/// What happened to a single event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Added,
    Removed,
    Updated,
    /// Valid event that changes nothing (unknown axis, non-touch button,
    /// event for a device with no record)
    Ignored,
    /// Event from a device without stylus capability
    Skipped,
}

/// Counts for one drain of the event queue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
    pub added: usize,
    pub removed: usize,
    pub updated: usize,
    pub ignored: usize,
    pub skipped: usize,
}

impl DispatchStats {
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Added => self.added += 1,
            Outcome::Removed => self.removed += 1,
            Outcome::Updated => self.updated += 1,
            Outcome::Ignored => self.ignored += 1,
            Outcome::Skipped => self.skipped += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.added + self.removed + self.updated + self.ignored + self.skipped
    }
}

/// Drain every event the source has buffered, in delivery order.
///
/// Stops at the first fault; registry and protocol faults are not
/// recoverable and are handed back to the caller unchanged.
pub fn dispatch_events<S: EventSource>(
    ctx: &mut TabletContext<S::Device>,
    source: &mut S,
) -> Result<DispatchStats> {
    let mut stats = DispatchStats::default();

    source.dispatch()?;
    while let Some(event) = source.next_event() {
        let outcome = handle_event(ctx, event)?;
        stats.record(outcome);
    }

    trace!("Drained {} events: {:?}", stats.total(), stats);
    Ok(stats)
}

/// Apply one event to the context.
pub fn handle_event<D: InputDevice>(ctx: &mut TabletContext<D>, event: RawEvent<D>) -> Result<Outcome> {
    if !event.device.has_stylus() {
        return Ok(Outcome::Skipped);
    }
    let key = event.device.key();

    match event.kind {
        EventKind::None => Err(TabletError::protocol(format!(
            "event without a kind for device {}",
            key
        ))),
        EventKind::DeviceAdded => {
            debug!("Tablet added: {} ({})", event.device.sysname(), key);
            ctx.create_device_surface(event.device)?;
            Ok(Outcome::Added)
        }
        EventKind::DeviceRemoved => {
            debug!("Tablet removed: {} ({})", event.device.sysname(), key);
            ctx.destroy_device_surface(key)?;
            Ok(Outcome::Removed)
        }
        EventKind::Field(update) => match ctx.record_mut(key) {
            Some(record) => Ok(apply_update(record, update)),
            None => {
                debug!("Dropping {:?} for untracked device {}", update, key);
                Ok(Outcome::Ignored)
            }
        },
    }
}

fn apply_update<D: InputDevice>(record: &mut DeviceRecord<D>, update: FieldUpdate) -> Outcome {
    match update {
        FieldUpdate::MotionAbsolute { x, y } => record.set_position(x, y),
        FieldUpdate::ToolUpdate { tool } => record.set_tool(tool),
        FieldUpdate::Axis { axis, value } => match axis {
            axis_code::TILT_VERTICAL => record.set_tilt_vertical(value),
            axis_code::TILT_HORIZONTAL => record.set_tilt_horizontal(value),
            axis_code::DISTANCE => record.set_distance(value),
            axis_code::PRESSURE => record.set_pressure(value),
            _ => return Outcome::Ignored,
        },
        FieldUpdate::Button { button, pressed } => match button {
            button_code::BTN_TOUCH => record.set_touching(pressed),
            _ => return Outcome::Ignored,
        },
    }
    Outcome::Updated
}
