// UI module

pub mod banner;
pub mod tablet_tui;

// Re-export commonly used items for cleaner imports
pub use banner::{print_banner, print_fatal, print_warning};
