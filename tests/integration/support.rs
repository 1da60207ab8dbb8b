// Shared helpers: a scripted event source and screen inspection

use std::collections::VecDeque;
use std::fs::File;
use std::os::fd::{AsFd, BorrowedFd};

use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use tablet_debug::core::{DeviceKey, EventKind, EventSource, FieldUpdate, InputDevice, RawEvent};
use tablet_debug::ui::tablet_tui::Display;

#[derive(Debug, Clone)]
pub struct FakeDevice {
    pub id: usize,
    pub name: String,
    pub stylus: bool,
}

impl FakeDevice {
    pub fn tablet(id: usize, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            stylus: true,
        }
    }

    pub fn keyboard(id: usize, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            stylus: false,
        }
    }
}

impl InputDevice for FakeDevice {
    fn key(&self) -> DeviceKey {
        DeviceKey(self.id)
    }

    fn sysname(&self) -> String {
        self.name.clone()
    }

    fn has_stylus(&self) -> bool {
        self.stylus
    }
}

/// Event source fed from a script; `dispatch` releases the next batch.
///
/// The readiness handle is a scratch file that is never polled.
pub struct ScriptedSource {
    batches: VecDeque<Vec<RawEvent<FakeDevice>>>,
    queue: VecDeque<RawEvent<FakeDevice>>,
    ready: File,
    pub dispatch_calls: usize,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self {
            batches: VecDeque::new(),
            queue: VecDeque::new(),
            ready: tempfile::tempfile().unwrap(),
            dispatch_calls: 0,
        }
    }

    pub fn batch(mut self, events: Vec<RawEvent<FakeDevice>>) -> Self {
        self.batches.push_back(events);
        self
    }

    pub fn push_batch(&mut self, events: Vec<RawEvent<FakeDevice>>) {
        self.batches.push_back(events);
    }

    pub fn queued(&self) -> usize {
        self.queue.len()
    }
}

impl EventSource for ScriptedSource {
    type Device = FakeDevice;

    fn poll_fd(&self) -> BorrowedFd<'_> {
        self.ready.as_fd()
    }

    fn dispatch(&mut self) -> tablet_debug::Result<()> {
        self.dispatch_calls += 1;
        if let Some(batch) = self.batches.pop_front() {
            self.queue.extend(batch);
        }
        Ok(())
    }

    fn next_event(&mut self) -> Option<RawEvent<FakeDevice>> {
        self.queue.pop_front()
    }
}

pub fn added(device: &FakeDevice) -> RawEvent<FakeDevice> {
    RawEvent::new(device.clone(), EventKind::DeviceAdded)
}

pub fn removed(device: &FakeDevice) -> RawEvent<FakeDevice> {
    RawEvent::new(device.clone(), EventKind::DeviceRemoved)
}

pub fn update(device: &FakeDevice, update: FieldUpdate) -> RawEvent<FakeDevice> {
    RawEvent::new(device.clone(), EventKind::Field(update))
}

pub fn test_display(width: u16, height: u16) -> Display<TestBackend> {
    Display::new(TestBackend::new(width, height)).unwrap()
}

/// Text of screen row `y` with trailing blanks removed
pub fn row_text(buffer: &Buffer, y: u16) -> String {
    (0..buffer.area.width)
        .map(|x| buffer[(x, y)].symbol())
        .collect::<String>()
        .trim_end()
        .to_string()
}

pub fn screen_rows(display: &Display<TestBackend>) -> Vec<String> {
    let buffer = display.backend().buffer();
    (0..buffer.area.height).map(|y| row_text(buffer, y)).collect()
}
