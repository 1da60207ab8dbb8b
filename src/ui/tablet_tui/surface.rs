use std::collections::VecDeque;

use ratatui::layout::Rect;

use crate::core::source::DeviceKey;

const PLACEHOLDER_MESSAGE: [&str; 2] = [
    "There are no currently detected tablets.",
    "Make sure your tablet is plugged in, and that you have the right permissions.",
];

const ADVISORY_ROW: usize = 3;

/// Full-screen line buffer that can be painted independently of the terminal.
#[derive(Debug, Clone)]
pub struct Surface {
    area: Rect,
    lines: Vec<String>,
}

impl Surface {
    pub fn new(area: Rect) -> Self {
        Self {
            area,
            lines: Vec::new(),
        }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    /// Write `text` at `row` from column 0, replacing the rest of the row.
    pub fn write_line(&mut self, row: usize, text: &str) {
        if self.lines.len() <= row {
            self.lines.resize(row + 1, String::new());
        }
        self.lines[row].clear();
        self.lines[row].push_str(text);
    }

    /// Row contents, empty for rows never written.
    pub fn line(&self, row: usize) -> &str {
        self.lines.get(row).map(String::as_str).unwrap_or("")
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Take new bounds; contents are dropped and must be repainted.
    pub fn resize(&mut self, area: Rect) {
        self.area = area;
        self.lines.clear();
    }
}

/// Stacking order of device surfaces over the placeholder.
///
/// The front of `order` is the topmost (focused) device surface. The
/// placeholder sits below every device surface and is only shown or
/// hidden, never removed.
#[derive(Debug)]
pub struct SurfaceStack {
    order: VecDeque<DeviceKey>,
    placeholder: Surface,
    placeholder_visible: bool,
    advisory: Option<String>,
}

impl SurfaceStack {
    /// Create the stack with a painted, visible placeholder.
    pub fn new(area: Rect) -> Self {
        let mut stack = Self {
            order: VecDeque::new(),
            placeholder: Surface::new(area),
            placeholder_visible: true,
            advisory: None,
        };
        stack.paint_placeholder();
        stack
    }

    fn paint_placeholder(&mut self) {
        for (row, text) in PLACEHOLDER_MESSAGE.iter().enumerate() {
            self.placeholder.write_line(row, text);
        }
        if let Some(advisory) = &self.advisory {
            self.placeholder.write_line(ADVISORY_ROW, advisory);
        }
    }

    /// Show a one-line advisory under the placeholder message.
    pub fn set_advisory(&mut self, text: impl Into<String>) {
        self.advisory = Some(text.into());
        self.paint_placeholder();
    }

    pub fn clear_advisory(&mut self) {
        if self.advisory.take().is_some() {
            self.placeholder.write_line(ADVISORY_ROW, "");
        }
    }

    pub fn placeholder(&self) -> &Surface {
        &self.placeholder
    }

    pub fn placeholder_visible(&self) -> bool {
        self.placeholder_visible
    }

    pub fn show_placeholder(&mut self) {
        self.placeholder_visible = true;
    }

    pub fn hide_placeholder(&mut self) {
        self.placeholder_visible = false;
    }

    /// Resize and repaint the placeholder.
    pub fn resize_placeholder(&mut self, area: Rect) {
        self.placeholder.resize(area);
        self.paint_placeholder();
    }

    /// Place a new device surface at the bottom of the device surfaces,
    /// so it does not take focus.
    pub fn insert_bottom(&mut self, key: DeviceKey) {
        debug_assert!(!self.order.contains(&key));
        self.order.push_back(key);
    }

    /// Drop `key` from the stack; returns false if it was not stacked.
    pub fn remove(&mut self, key: DeviceKey) -> bool {
        match self.order.iter().position(|k| *k == key) {
            Some(index) => {
                self.order.remove(index);
                true
            }
            None => false,
        }
    }

    /// Device surface currently on top, if any.
    pub fn focused(&self) -> Option<DeviceKey> {
        self.order.front().copied()
    }

    /// Zero-based position of `key` from the top.
    pub fn position(&self, key: DeviceKey) -> Option<usize> {
        self.order.iter().position(|k| *k == key)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Device keys from top to bottom
    pub fn iter(&self) -> impl Iterator<Item = DeviceKey> + '_ {
        self.order.iter().copied()
    }

    /// Send the top surface to the bottom, focusing the next one.
    pub fn cycle_next(&mut self) {
        if self.order.len() > 1 {
            self.order.rotate_left(1);
        }
    }

    /// Bring the bottom surface to the top.
    pub fn cycle_previous(&mut self) {
        if self.order.len() > 1 {
            self.order.rotate_right(1);
        }
    }
}
