//! `catalog` command-line front end.
//!
//! # Responsibility
//! - Parse arguments and merge them over the JSON config file.
//! - Print records as text or JSON; the core crate never formats output.
//! - Report any error on stderr and exit with status 1.

mod args;
mod commands;
mod errors;

use clap::Parser;

fn main() {
    let cli = args::Cli::parse();
    if let Err(err) = commands::run(cli) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
