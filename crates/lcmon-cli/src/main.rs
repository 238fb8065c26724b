use lcmon_core::logging;

mod cli;

use crate::cli::Cli;

fn main() {
    // Initialize logging as early as possible; the report still works without it.
    if let Err(err) = logging::init_logging() {
        eprintln!("lcmon: {:#}", err);
    }

    if let Err(err) = Cli::run_from_args() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
