use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::{
    snapshot::SnapshotWriter,
    tree::{Snapshot, Tree},
    weather::WeatherGenerator,
};

const DAYS_PER_YEAR: u64 = 365;

/// Calendar day (1..=365) for a 1-based simulation day. Leap years are ignored.
pub fn day_of_year(day: u64) -> u32 {
    ((day.saturating_sub(1) % DAYS_PER_YEAR) + 1) as u32
}

pub struct EngineSettings {
    pub scenario_name: String,
    pub snapshot_interval_days: u64,
    pub snapshot_dir: PathBuf,
}

pub struct EngineBuilder {
    settings: EngineSettings,
    tree: Tree,
    weather: WeatherGenerator,
}

impl EngineBuilder {
    pub fn new(settings: EngineSettings, tree: Tree, weather: WeatherGenerator) -> Self {
        Self {
            settings,
            tree,
            weather,
        }
    }

    pub fn build(self) -> Engine {
        Engine {
            snapshot_writer: SnapshotWriter::new(
                &self.settings.snapshot_dir,
                self.settings.snapshot_interval_days,
            ),
            tree: self.tree,
            weather: self.weather,
            settings: self.settings,
            day: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayRecord {
    pub day: u64,
    pub day_of_year: u32,
    pub snapshot: Snapshot,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub days: u64,
    pub total_fruit: u64,
    /// `None` for an empty run.
    pub peak_nutrients: Option<f64>,
    pub min_health: Option<f64>,
    pub last: Option<Snapshot>,
    pub generated_at: DateTime<Utc>,
}

impl RunSummary {
    fn from_records(records: &[DayRecord]) -> Self {
        let mut summary = Self {
            days: records.len() as u64,
            total_fruit: 0,
            peak_nutrients: None,
            min_health: None,
            last: records.last().map(|r| r.snapshot.clone()),
            generated_at: Utc::now(),
        };
        for record in records {
            let snapshot = &record.snapshot;
            summary.total_fruit += u64::from(snapshot.fruit_count);
            summary.peak_nutrients = Some(
                summary
                    .peak_nutrients
                    .map_or(snapshot.stored_nutrients, |peak| peak.max(snapshot.stored_nutrients)),
            );
            summary.min_health = Some(
                summary
                    .min_health
                    .map_or(snapshot.health, |min| min.min(snapshot.health)),
            );
        }
        summary
    }
}

/// Drives one tree through consecutive days of synthetic weather.
pub struct Engine {
    tree: Tree,
    weather: WeatherGenerator,
    snapshot_writer: SnapshotWriter,
    settings: EngineSettings,
    day: u64,
}

impl Engine {
    pub fn step(&mut self) -> Result<DayRecord> {
        self.day += 1;
        let day_of_year = day_of_year(self.day);
        let inputs = self.weather.inputs_for(self.day, day_of_year);
        let snapshot = self.tree.advance_one_day(&inputs);
        let record = DayRecord {
            day: self.day,
            day_of_year,
            snapshot,
        };

        let written = self
            .snapshot_writer
            .maybe_write(&record, &self.settings.scenario_name)
            .with_context(|| format!("Failed to write snapshot for day {}", self.day))?;
        if let Some(path) = written {
            debug!(day = self.day, path = %path.display(), "wrote snapshot");
        }
        Ok(record)
    }

    pub fn run(&mut self, days: u64) -> Result<(Vec<DayRecord>, RunSummary)> {
        self.run_with_hook(days, |_| {})
    }

    /// Like [`Engine::run`], calling `hook` with every day's record as it is
    /// produced.
    pub fn run_with_hook<F>(
        &mut self,
        days: u64,
        mut hook: F,
    ) -> Result<(Vec<DayRecord>, RunSummary)>
    where
        F: FnMut(&DayRecord),
    {
        info!(
            scenario = %self.settings.scenario_name,
            days,
            latitude = self.tree.latitude(),
            "starting run"
        );
        let mut records = Vec::new();
        for _ in 0..days {
            let record = self.step()?;
            hook(&record);
            records.push(record);
        }
        let summary = RunSummary::from_records(&records);
        info!(
            scenario = %self.settings.scenario_name,
            days = summary.days,
            total_fruit = summary.total_fruit,
            min_health = ?summary.min_health,
            "run complete"
        );
        Ok((records, summary))
    }

    pub fn current_day(&self) -> u64 {
        self.day
    }
}
