// Line reader: turns a file or stdin into the corpus.
//
// Every line is trimmed; blank lines stay in the corpus as empty strings.
// Bytes that are not valid UTF-8 are decoded lossily rather than rejected.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

/// Read the corpus from `path`, or from stdin when `path` is `None` or `-`.
pub fn read_corpus(path: Option<&Path>) -> Result<Vec<String>> {
    match path {
        Some(p) if p != Path::new("-") => {
            let bytes =
                fs::read(p).with_context(|| format!("Failed to read input file {}", p.display()))?;
            debug!(path = %p.display(), bytes = bytes.len(), "Read input file");
            Ok(split_lines(&bytes))
        }
        _ => {
            let lines = read_lines(io::stdin().lock()).context("Failed to read standard input")?;
            debug!(lines = lines.len(), "Read standard input");
            Ok(lines)
        }
    }
}

/// Read the corpus from any reader.
pub fn read_lines<R: Read>(mut reader: R) -> Result<Vec<String>> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .context("Failed to read input")?;
    Ok(split_lines(&bytes))
}

/// Split raw input into trimmed lines.
///
/// A trailing newline does not produce an extra empty line.
pub fn split_lines(bytes: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(bytes)
        .lines()
        .map(|line| line.trim().to_string())
        .collect()
}
