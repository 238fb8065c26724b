//! CLI for lcmon.

mod run;

use anyhow::Result;
use clap::Parser;
use lcmon_core::{config, Monitor};
use std::io;
use std::path::PathBuf;

use run::run_list;

/// Bundled sample list, relative to the working directory.
pub const DEFAULT_INPUT: &str = "data/leetcode75.txt";

/// Report how many users are viewing each LeetCode problem in a list.
#[derive(Debug, Parser)]
#[command(name = "lcmon")]
#[command(about = "lcmon: live viewer counts for LeetCode problems", long_about = None)]
#[command(after_help = "Examples:\n  \
    lcmon                              # Use default data/leetcode75.txt\n  \
    lcmon -i custom_problems.txt       # Use custom input file\n  \
    lcmon --input data/my_list.txt     # Use custom input file (long form)")]
pub struct Cli {
    /// Input file containing problem slugs, one per line.
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_INPUT)]
    pub input: PathBuf,
}

impl Cli {
    pub fn run_from_args() -> Result<()> {
        Cli::parse().run()
    }

    pub fn run(&self) -> Result<()> {
        let cfg = config::load()?;
        tracing::debug!("loaded config: {:?}", cfg);
        let monitor = Monitor::new(cfg.to_settings()?);

        let stdout = io::stdout();
        let mut out = stdout.lock();
        run_list(&self.input, monitor, &mut out)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests;
