//! SIGINT / SIGWINCH delivered through a signalfd.

use std::os::fd::{AsFd, BorrowedFd};

use log::{debug, warn};
use nix::sys::signal::{SigSet, SigmaskHow, Signal};
use nix::sys::signalfd::{SfdFlags, SignalFd};

use crate::error::{Result, TabletError};

/// A signal the control loop reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingSignal {
    Interrupt,
    Resize,
}

impl PendingSignal {
    fn from_signo(signo: u32) -> Option<Self> {
        match Signal::try_from(signo as i32).ok()? {
            Signal::SIGINT => Some(PendingSignal::Interrupt),
            Signal::SIGWINCH => Some(PendingSignal::Resize),
            _ => None,
        }
    }
}

/// Blocks SIGINT and SIGWINCH and exposes them as a pollable fd.
///
/// The previous signal mask is restored on drop.
pub struct SignalSource {
    fd: SignalFd,
    previous_mask: SigSet,
}

impl SignalSource {
    pub fn new() -> Result<Self> {
        let mut mask = SigSet::empty();
        mask.add(Signal::SIGINT);
        mask.add(Signal::SIGWINCH);

        let previous_mask = mask
            .thread_swap_mask(SigmaskHow::SIG_BLOCK)
            .map_err(|e| TabletError::signal(format!("failed to block signals: {}", e)))?;

        match SignalFd::with_flags(&mask, SfdFlags::SFD_NONBLOCK | SfdFlags::SFD_CLOEXEC) {
            Ok(fd) => Ok(Self { fd, previous_mask }),
            Err(e) => {
                if let Err(restore) = previous_mask.thread_set_mask() {
                    warn!("Failed to restore signal mask: {}", restore);
                }
                Err(TabletError::signal(format!("failed to create signalfd: {}", e)))
            }
        }
    }

    pub fn poll_fd(&self) -> BorrowedFd<'_> {
        self.fd.as_fd()
    }

    /// Read one queued signal, `None` when nothing relevant is pending.
    pub fn read(&mut self) -> Result<Option<PendingSignal>> {
        let Some(info) = self.fd.read_signal()? else {
            return Ok(None);
        };
        let signal = PendingSignal::from_signo(info.ssi_signo);
        debug!("Received signal {} ({:?})", info.ssi_signo, signal);
        Ok(signal)
    }
}

impl Drop for SignalSource {
    fn drop(&mut self) {
        if let Err(e) = self.previous_mask.thread_set_mask() {
            warn!("Failed to restore signal mask: {}", e);
        }
    }
}
