use anyhow::{Context, Result};
use std::env;
use std::fs::{File, OpenOptions};
use std::path::PathBuf;

pub const DEFAULT_SEAT: &str = "seat0";

const SEAT_VAR: &str = "TABLET_DEBUG_SEAT";
const LOG_VAR: &str = "TABLET_DEBUG_LOG";

/// Runtime configuration, taken from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// udev seat whose devices are watched
    pub seat: String,
    /// Where log output goes while the TUI owns the terminal
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seat: DEFAULT_SEAT.to_string(),
            log_file: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from any variable lookup; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        Self {
            seat: non_empty(SEAT_VAR).unwrap_or_else(|| DEFAULT_SEAT.to_string()),
            log_file: non_empty(LOG_VAR).map(PathBuf::from),
        }
    }

    /// Open the log file for appending, if one is configured.
    pub fn open_log_file(&self) -> Result<Option<File>> {
        let Some(path) = &self.log_file else {
            return Ok(None);
        };

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file: {:?}", path))?;
        Ok(Some(file))
    }
}
