// src/bin/cli.rs
use clubfeed::cli;

fn main() {
    if let Err(e) = color_eyre::install() {
        eprintln!("Could not install error reporting: {e}");
    }
    if let Err(e) = cli::run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
