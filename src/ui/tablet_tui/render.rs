use ratatui::{
    backend::Backend,
    prelude::*,
    widgets::{Paragraph, Wrap},
};

use super::surface::Surface;
use crate::core::context::TabletContext;
use crate::core::record::Field;
use crate::core::source::InputDevice;
use crate::error::{Result, TabletError};

/// Composites the visible surface onto a ratatui terminal.
pub struct Display<B: Backend> {
    terminal: Terminal<B>,
}

impl<B: Backend> Display<B> {
    pub fn new(backend: B) -> Result<Self> {
        let terminal = Terminal::new(backend).map_err(|e| TabletError::render(e.to_string()))?;
        Ok(Self { terminal })
    }

    /// Full-screen bounds of the terminal
    pub fn area(&self) -> Result<Rect> {
        let size = self
            .terminal
            .size()
            .map_err(|e| TabletError::render(e.to_string()))?;
        Ok(Rect::new(0, 0, size.width, size.height))
    }

    /// Pick up new terminal dimensions and force a full redraw.
    pub fn reacquire(&mut self) -> Result<Rect> {
        self.terminal
            .autoresize()
            .map_err(|e| TabletError::render(e.to_string()))?;
        self.terminal
            .clear()
            .map_err(|e| TabletError::render(e.to_string()))?;
        self.area()
    }

    /// Draw the visible surface; only changed cells reach the terminal.
    pub fn flush<D: InputDevice>(&mut self, ctx: &TabletContext<D>) -> Result<()> {
        self.terminal
            .draw(|frame| render_context(frame, ctx))
            .map_err(|e| TabletError::render(e.to_string()))?;
        Ok(())
    }

    pub fn backend(&self) -> &B {
        self.terminal.backend()
    }

    pub fn backend_mut(&mut self) -> &mut B {
        self.terminal.backend_mut()
    }
}

/// Render whichever surface is on top: the focused device, or the
/// placeholder when no device is connected.
pub fn render_context<D: InputDevice>(frame: &mut Frame, ctx: &TabletContext<D>) {
    let area = frame.area();
    let (body, footer) = split_footer(area);

    let focused = if ctx.stack().placeholder_visible() {
        None
    } else {
        ctx.focused_record()
    };

    match focused {
        Some(record) => {
            render_surface(frame, record.surface(), body, false);
            let position = ctx
                .stack()
                .position(record.device().key())
                .map_or(0, |index| index + 1);
            let help = format!(
                " ←/→: Switch device │ q: Quit │ Device {}/{} ",
                position,
                ctx.device_count()
            );
            render_footer(frame, footer, &help);
        }
        None => {
            render_surface(frame, ctx.stack().placeholder(), body, true);
            render_footer(frame, footer, " q: Quit ");
        }
    }
}

/// Reserve the last row for the help line, unless that row would cover a
/// field line.
fn split_footer(area: Rect) -> (Rect, Option<Rect>) {
    if usize::from(area.height) <= Field::Pressure.row() + 1 {
        return (area, None);
    }
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);
    (chunks[0], Some(chunks[1]))
}

fn render_surface(frame: &mut Frame, surface: &Surface, body: Rect, wrap: bool) {
    let area = surface.area().intersection(body);
    if area.is_empty() {
        return;
    }

    let lines: Vec<Line> = surface
        .lines()
        .iter()
        .map(|line| Line::from(line.as_str()))
        .collect();

    let mut paragraph = Paragraph::new(lines);
    if wrap {
        paragraph = paragraph.wrap(Wrap { trim: false });
    }
    frame.render_widget(paragraph, area);
}

fn render_footer(frame: &mut Frame, area: Option<Rect>, help: &str) {
    if let Some(area) = area {
        let para = Paragraph::new(help.to_string()).style(Style::default().fg(Color::DarkGray));
        frame.render_widget(para, area);
    }
}
