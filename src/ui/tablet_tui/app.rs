use std::io;
use std::os::fd::BorrowedFd;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event, KeyEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{info, warn};
use nix::errno::Errno;
use nix::poll::{poll, PollFd, PollFlags};
use ratatui::backend::{Backend, CrosstermBackend};

use super::event_handler::{command_for_key, TabletCommand};
use super::render::Display;
use crate::core::context::TabletContext;
use crate::core::dispatcher::{dispatch_events, DispatchStats};
use crate::core::source::{EventSource, InputDevice};
use crate::platform::signals::{PendingSignal, SignalSource};
use crate::ui::banner::print_warning;

pub const NO_DEVICES_WARNING: &str =
    "Expected device added events on startup but got none. Maybe you don't have the right permissions?";

/// Whether the control loop keeps running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Raw mode and the alternate screen, restored on drop.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let guard = TerminalGuard;
        execute!(io::stdout(), EnterAlternateScreen, Hide)
            .context("Failed to enter alternate screen")?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = execute!(io::stdout(), LeaveAlternateScreen, Show) {
            warn!("Failed to leave alternate screen: {}", e);
        }
        if let Err(e) = disable_raw_mode() {
            warn!("Failed to disable raw mode: {}", e);
        }
    }
}

/// Which of the three inputs woke the loop up
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Readiness {
    signal: bool,
    keyboard: bool,
    keyboard_hangup: bool,
    device: bool,
}

/// The one input served on a wake-up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Wakeup {
    Signal,
    Keyboard,
    Device,
    Idle,
}

impl Readiness {
    /// Signals win over the keyboard, the keyboard over devices. Whatever
    /// is not served stays readable for the next wait.
    fn select(self) -> Wakeup {
        if self.signal {
            Wakeup::Signal
        } else if self.keyboard {
            Wakeup::Keyboard
        } else if self.device {
            Wakeup::Device
        } else {
            Wakeup::Idle
        }
    }
}

fn is_ready(fd: &PollFd) -> bool {
    fd.revents().map_or(false, |revents| !revents.is_empty())
}

/// Block until at least one source is readable. No timeout.
fn wait_for_input(device: BorrowedFd<'_>, signals: Option<BorrowedFd<'_>>) -> Result<Readiness> {
    let stdin = io::stdin();

    let mut fds = vec![
        PollFd::new(&device, PollFlags::POLLIN),
        PollFd::new(&stdin, PollFlags::POLLIN),
    ];
    if let Some(signals) = &signals {
        fds.push(PollFd::new(signals, PollFlags::POLLIN));
    }

    loop {
        match poll(&mut fds, -1) {
            Ok(_) => break,
            Err(Errno::EINTR) => continue,
            Err(e) => return Err(e).context("Failed to wait for input"),
        }
    }

    let keyboard_hangup = fds[1].revents().map_or(false, |revents| {
        revents.intersects(PollFlags::POLLHUP | PollFlags::POLLERR | PollFlags::POLLNVAL)
    });
    Ok(Readiness {
        device: is_ready(&fds[0]),
        keyboard: is_ready(&fds[1]),
        keyboard_hangup,
        signal: fds.get(2).map_or(false, is_ready),
    })
}

/// Startup drain of devices that were present before the loop started.
///
/// An empty drain is reported on the placeholder, not treated as an error.
pub fn initial_scan<S, B>(
    ctx: &mut TabletContext<S::Device>,
    display: &mut Display<B>,
    source: &mut S,
) -> Result<DispatchStats>
where
    S: EventSource,
    B: Backend,
{
    display.flush(ctx)?;

    let stats = dispatch_events(ctx, source)?;
    if stats.added == 0 {
        warn!("{}", NO_DEVICES_WARNING);
        ctx.set_advisory(NO_DEVICES_WARNING);
    }
    info!("Found {} tablet(s) on startup", ctx.device_count());

    display.flush(ctx)?;
    Ok(stats)
}

/// Drain the device source and show the result in one flush.
pub fn handle_device_events<S, B>(
    ctx: &mut TabletContext<S::Device>,
    display: &mut Display<B>,
    source: &mut S,
) -> Result<()>
where
    S: EventSource,
    B: Backend,
{
    dispatch_events(ctx, source)?;
    display.flush(ctx)?;
    Ok(())
}

/// React to a delivered signal.
pub fn handle_signal<D, B>(
    ctx: &mut TabletContext<D>,
    display: &mut Display<B>,
    signal: PendingSignal,
) -> Result<Flow>
where
    D: InputDevice,
    B: Backend,
{
    match signal {
        PendingSignal::Interrupt => {
            info!("Interrupted");
            Ok(Flow::Quit)
        }
        PendingSignal::Resize => {
            let area = display.reacquire()?;
            ctx.repaint_all(area);
            display.flush(ctx)?;
            Ok(Flow::Continue)
        }
    }
}

/// Apply a keyboard command.
pub fn apply_command<D, B>(
    ctx: &mut TabletContext<D>,
    display: &mut Display<B>,
    command: TabletCommand,
) -> Result<Flow>
where
    D: InputDevice,
    B: Backend,
{
    match command {
        TabletCommand::Quit => return Ok(Flow::Quit),
        TabletCommand::PreviousDevice => ctx.cycle_previous(),
        TabletCommand::NextDevice => ctx.cycle_next(),
        TabletCommand::None => return Ok(Flow::Continue),
    }
    display.flush(ctx)?;
    Ok(Flow::Continue)
}

/// Apply keys in arrival order, stopping at the first that quits.
pub fn apply_keys<D, B, I>(ctx: &mut TabletContext<D>, display: &mut Display<B>, keys: I) -> Result<Flow>
where
    D: InputDevice,
    B: Backend,
    I: IntoIterator<Item = KeyEvent>,
{
    for key in keys {
        if apply_command(ctx, display, command_for_key(key))? == Flow::Quit {
            return Ok(Flow::Quit);
        }
    }
    Ok(Flow::Continue)
}

/// Take every key crossterm has buffered, not just the one that woke us.
fn drain_keys() -> Result<Vec<KeyEvent>> {
    let mut keys = Vec::new();
    while event::poll(Duration::ZERO).context("Event poll failed")? {
        if let Event::Key(key) = event::read().context("Event read failed")? {
            keys.push(key);
        }
    }
    Ok(keys)
}

fn event_loop<S, B>(
    ctx: &mut TabletContext<S::Device>,
    display: &mut Display<B>,
    source: &mut S,
    mut signals: Option<&mut SignalSource>,
) -> Result<()>
where
    S: EventSource,
    B: Backend,
{
    loop {
        let ready = wait_for_input(source.poll_fd(), signals.as_ref().map(|s| s.poll_fd()))?;

        match ready.select() {
            Wakeup::Signal => {
                let Some(signals) = signals.as_deref_mut() else {
                    continue;
                };
                if let Some(signal) = signals.read()? {
                    if handle_signal(ctx, display, signal)? == Flow::Quit {
                        break;
                    }
                }
            }
            Wakeup::Keyboard => {
                if apply_keys(ctx, display, drain_keys()?)? == Flow::Quit {
                    break;
                }
                if ready.keyboard_hangup {
                    warn!("Terminal input closed");
                    break;
                }
            }
            Wakeup::Device => handle_device_events(ctx, display, source)?,
            Wakeup::Idle => {}
        }
    }
    Ok(())
}

/// Run the tablet display until `q` or SIGINT.
pub fn run_tablet_app<S: EventSource>(mut source: S) -> Result<()> {
    let mut signals = match SignalSource::new() {
        Ok(signals) => Some(signals),
        Err(e) => {
            warn!("Failed to set up signal handling: {}", e);
            print_warning("Failed to set up signal handling:", &e);
            None
        }
    };

    let guard = TerminalGuard::enter()?;
    let mut display = Display::new(CrosstermBackend::new(io::stdout()))?;
    let mut ctx = TabletContext::new(display.area()?);

    initial_scan(&mut ctx, &mut display, &mut source)?;
    let result = event_loop(&mut ctx, &mut display, &mut source, signals.as_mut());

    // Surfaces and records go before the terminal and signal mask are restored.
    drop(ctx);
    drop(display);
    drop(guard);
    drop(signals);

    info!("Shut down");
    result
}
