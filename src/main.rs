use clap::Parser;
use std::process::ExitCode;

use tablet_debug::platform::LibinputSource;
use tablet_debug::ui::tablet_tui::run_tablet_app;
use tablet_debug::ui::{print_banner, print_fatal, print_warning};
use tablet_debug::{init_logging, Config};

/// Live view of every pen tablet libinput can see.
///
/// Keys: q quits, Left/Right switch between tablets.
#[derive(Parser, Debug)]
#[command(name = "tablet-debug", version, about, long_about = None)]
struct Cli {}

fn main() -> ExitCode {
    let _cli = Cli::parse();
    let config = Config::from_env();

    if let Err(e) = init_logging(&config) {
        print_warning("Warning: logging disabled:", format!("{:#}", e));
    }

    print_banner();

    println!("Setting up udev...");
    let source = match LibinputSource::open(&config.seat) {
        Ok(source) => source,
        Err(e) => {
            print_fatal("Failed to initialize the device source:", &e);
            eprintln!("Cannot continue.");
            return ExitCode::FAILURE;
        }
    };

    match run_tablet_app(source) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_fatal("Error:", format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}
