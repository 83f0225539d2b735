mod cli;
mod config;
mod database;
mod error;
mod schema;

use log::{debug, error};

use crate::cli::Cli;

fn main() {
    // Must set an environment variable to use.
    // Set RUST_LOG to one of:
    // ERROR, WARN, INFO, DEBUG, TRACE
    env_logger::init();
    debug!("Command-line args: {:?}", std::env::args_os().collect::<Vec<_>>());

    if let Err(err) = Cli::handle_command_line() {
        error!("{:?}", err);
        eprintln!("{}", err);
        std::process::exit(1);
    }
}
