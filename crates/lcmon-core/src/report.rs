//! Plain-text report lines.

use crate::key::ResourceKey;
use crate::monitor::FetchResult;
use std::io::{self, Write};
use std::path::Path;

/// Width the key column is padded to.
pub const KEY_WIDTH: usize = 50;

/// `Problem: <key padded to 50> | Online Users: <count or -1>`.
/// Longer keys are printed in full.
pub fn format_line(key: &ResourceKey, result: FetchResult) -> String {
    format!(
        "Problem: {:<width$} | Online Users: {}",
        key.as_str(),
        result,
        width = KEY_WIDTH
    )
}

pub fn loaded_banner(count: usize, path: &Path) -> String {
    format!("Loaded {} problems from {}", count, path.display())
}

/// Write one line and flush so progress is visible while later keys block.
pub fn write_line<W: Write>(out: &mut W, key: &ResourceKey, result: FetchResult) -> io::Result<()> {
    writeln!(out, "{}", format_line(key, result))?;
    out.flush()
}
