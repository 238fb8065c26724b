//! Line-oriented key lists.

use crate::key::ResourceKey;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Failure to obtain the key list. Fatal to a run.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("File '{}' not found.", path.display())]
    NotFound { path: PathBuf },

    #[error("could not read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// One key per line; surrounding whitespace trimmed, blank lines skipped.
pub fn parse_keys(text: &str) -> Vec<ResourceKey> {
    text.lines().filter_map(ResourceKey::from_line).collect()
}

/// Read and parse a key list file.
pub fn load_keys(path: &Path) -> Result<Vec<ResourceKey>, InputError> {
    let text = fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => InputError::NotFound {
            path: path.to_path_buf(),
        },
        _ => InputError::Read {
            path: path.to_path_buf(),
            source,
        },
    })?;
    Ok(parse_keys(&text))
}
