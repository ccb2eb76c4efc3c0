use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Read the candidate list, one URL per line, in file order. Blank lines are
/// kept; they simply fail to resolve. Bytes that are not valid UTF-8 are
/// replaced on their own line only, so one bad line never drops the batch.
pub fn read_candidates(path: &Path) -> Result<Vec<String>> {
    let content =
        fs::read(path).with_context(|| format!("Failed to read URL list: {:?}", path))?;

    let body = content.strip_suffix(b"\n").unwrap_or(&content);
    if body.is_empty() {
        return Ok(Vec::new());
    }

    Ok(body
        .split(|byte| *byte == b'\n')
        .map(|line| String::from_utf8_lossy(line).trim().to_string())
        .collect())
}
