//! Sequential batch over a key list.

use anyhow::Result;
use lcmon_core::retry::Sleep;
use lcmon_core::transport::Transport;
use lcmon_core::{input, report, FetchResult, Monitor};
use std::io::Write;
use std::path::Path;

/// Counts for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub available: usize,
}

impl BatchSummary {
    fn record(&mut self, result: FetchResult) {
        self.total += 1;
        if result.count().is_some() {
            self.available += 1;
        }
    }
}

/// Load keys from `input` and print one report line per key.
///
/// An unreadable list fails before any fetch; per-key failures are reported
/// as `-1` and never stop the batch.
pub fn run_list<T, S, W>(input: &Path, mut monitor: Monitor<T, S>, out: &mut W) -> Result<BatchSummary>
where
    T: Transport,
    S: Sleep,
    W: Write,
{
    let keys = input::load_keys(input)?;
    writeln!(out, "{}\n", report::loaded_banner(keys.len(), input))?;

    let mut summary = BatchSummary::default();
    for key in &keys {
        let result = monitor.online_users(key);
        report::write_line(out, key, result)?;
        summary.record(result);
    }

    tracing::info!(
        total = summary.total,
        available = summary.available,
        "run completed"
    );
    Ok(summary)
}
