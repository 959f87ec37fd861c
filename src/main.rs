//! Sinaxario service entry point
//!
//! Parses the command line and hands off to `cli::run`. Errors are
//! printed to stderr and the process exits non-zero.

use sinaxario::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
