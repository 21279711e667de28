//! csvdb command-line entry point
//!
//! Responses, including errors, are written to stdout as JSON by
//! `cli::run`. The error is echoed to stderr and the process exits with 1.

use csvdb::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
