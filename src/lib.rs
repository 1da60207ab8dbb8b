// tablet-debug library - public API

// Re-export error types
pub mod error;
pub use error::{Result, TabletError};

// Module declarations
pub mod core;
pub mod platform;
pub mod ui;

// Re-export commonly used types
pub use core::config::Config;

use env_logger::Target;
use log::LevelFilter;

/// Initialize logging.
///
/// The TUI owns the terminal, so records go to the configured log file.
/// Without one, logging stays off unless `RUST_LOG` asks for it.
pub fn init_logging(config: &Config) -> anyhow::Result<()> {
    let log_file = config.open_log_file()?;
    let default_level = if log_file.is_some() {
        LevelFilter::Warn
    } else {
        LevelFilter::Off
    };

    let mut builder = env_logger::Builder::new();
    builder.filter_level(default_level).parse_default_env();
    if let Some(file) = log_file {
        builder.target(Target::Pipe(Box::new(file)));
    }
    builder.try_init()?;
    Ok(())
}
