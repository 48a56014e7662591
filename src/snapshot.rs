use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::engine::{DayRecord, RunSummary};

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct DayFile<'a> {
    scenario: &'a str,
    #[serde(flatten)]
    record: &'a DayRecord,
}

#[derive(Serialize)]
struct SeriesFile<'a> {
    scenario: &'a str,
    summary: &'a RunSummary,
    days: &'a [DayRecord],
}

/// Writes a JSON checkpoint every `interval_days` simulated days. An interval
/// of zero disables checkpoints.
pub struct SnapshotWriter {
    output_dir: PathBuf,
    interval_days: u64,
}

impl SnapshotWriter {
    pub fn new(output_dir: impl AsRef<Path>, interval_days: u64) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
            interval_days,
        }
    }

    pub fn should_write(&self, day: u64) -> bool {
        self.interval_days != 0 && day != 0 && day % self.interval_days == 0
    }

    pub fn maybe_write(
        &self,
        record: &DayRecord,
        scenario_name: &str,
    ) -> Result<Option<PathBuf>, SnapshotError> {
        if !self.should_write(record.day) {
            return Ok(None);
        }

        let dir = self.output_dir.join(scenario_name);
        fs::create_dir_all(&dir)?;
        let file_path = dir.join(format!("day_{:06}.json", record.day));
        let json = serde_json::to_string_pretty(&DayFile {
            scenario: scenario_name,
            record,
        })?;
        fs::write(&file_path, json)?;
        Ok(Some(file_path))
    }
}

/// Writes the full per-day series plus the run summary as one document.
pub fn write_series(
    path: impl AsRef<Path>,
    scenario_name: &str,
    summary: &RunSummary,
    days: &[DayRecord],
) -> Result<(), SnapshotError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(&SeriesFile {
        scenario: scenario_name,
        summary,
        days,
    })?;
    fs::write(path, json)?;
    Ok(())
}
