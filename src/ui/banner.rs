// Console output printed before the TUI starts and after it exits

use colored::Colorize;
use std::fmt::Display;

/// Program banner with the copying notice
pub fn print_banner() {
    println!("{}", "libinput tablet debugger".bold());
    println!(
        "{}",
        "This is free software; see the source for copying conditions. There is NO warranty; \
         not even for MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE."
            .dimmed()
    );
}

/// Report a problem the program carries on through
pub fn print_warning(context: &str, detail: impl Display) {
    eprintln!("{}", warning_line(context, detail));
}

/// Report an error that ends the program
pub fn print_fatal(context: &str, error: impl Display) {
    eprintln!("{}", fatal_line(context, error));
}

fn warning_line(context: &str, detail: impl Display) -> String {
    format!("{} {}", context.yellow(), detail)
}

fn fatal_line(context: &str, error: impl Display) -> String {
    format!("{} {}", context.red().bold(), error)
}
