#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! Binary entry point: parse the command line, solve, map failures to a
//! nonzero exit status.

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod command_line;

use command_line::cli::{self, Cli};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = match Cli::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match cli::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}
