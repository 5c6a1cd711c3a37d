//! Sequence files: a JSON list of `[note, time]` pairs.

use crate::sequence::Sequence;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const EXTENSION: &str = "json";

/// Largest event time accepted in a sequence file, in seconds (one day)
pub const MAX_TIME: f64 = 24.0 * 60.0 * 60.0;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("event {index} has time {time}, outside ±{max} seconds", max = MAX_TIME)]
    TimeOutOfRange { index: usize, time: f64 },
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Append the default extension when `path` has none.
pub fn with_default_extension(path: PathBuf) -> PathBuf {
    if path.extension().is_none() {
        path.with_extension(EXTENSION)
    } else {
        path
    }
}

pub fn save(sequence: &Sequence, path: &Path) -> Result<()> {
    check_times(sequence)?;
    let contents = serde_json::to_string(sequence)?;
    std::fs::write(path, contents)?;
    Ok(())
}

pub fn load(path: &Path) -> Result<Sequence> {
    let contents = std::fs::read_to_string(path)?;
    parse(&contents)
}

pub fn parse(contents: &str) -> Result<Sequence> {
    let sequence = serde_json::from_str(contents)?;
    check_times(&sequence)?;
    Ok(sequence)
}

/// Every time must be finite and within `MAX_TIME` so playback can schedule it.
pub fn check_times(sequence: &Sequence) -> Result<()> {
    match sequence
        .iter()
        .enumerate()
        .find(|(_, e)| !e.time.is_finite() || e.time.abs() > MAX_TIME)
    {
        Some((index, e)) => Err(StoreError::TimeOutOfRange { index, time: e.time }),
        None => Ok(()),
    }
}
