//! portfolio-counter entry point
//!
//! Parses arguments and runs the selected command via `cli::run`. Any error,
//! including a failed database bootstrap, is printed to stderr and the
//! process exits with status 1.

use portfolio_counter::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
