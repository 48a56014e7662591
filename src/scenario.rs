use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;

use crate::{
    tree::{self, Tree},
    weather::{WeatherConfig, WeatherGenerator},
};

const DAYS_PER_SIMULATED_YEAR: u64 = 365;
const MAX_YEARS: u64 = 1_000;

fn default_latitude() -> f64 {
    51.509865
}

fn default_initial_nutrients() -> f64 {
    50.0
}

fn default_years() -> u64 {
    5
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub seed: u64,
    #[serde(default = "default_latitude")]
    pub latitude: f64,
    #[serde(default = "default_initial_nutrients")]
    pub initial_nutrients: f64,
    #[serde(default = "default_years")]
    pub years: u64,
    #[serde(default)]
    pub snapshot_interval_days: u64,
    #[serde(default)]
    pub weather: WeatherConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read scenario file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse scenario file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("latitude {0} is outside [-90, 90]")]
    Latitude(f64),
    #[error("scenario must simulate at least one year")]
    NoYears,
    #[error("{0} years exceeds the limit of {max}", max = MAX_YEARS)]
    TooManyYears(u64),
    #[error("{field} must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f64 },
}

pub struct ScenarioLoader {
    base_dir: PathBuf,
}

impl ScenarioLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self, file: impl AsRef<Path>) -> Result<Scenario, ScenarioError> {
        let path = self.base_dir.join(file);
        let data = match fs::read_to_string(&path) {
            Ok(data) => data,
            Err(source) => return Err(ScenarioError::Io { path, source }),
        };
        let scenario: Scenario = match serde_yaml::from_str(&data) {
            Ok(scenario) => scenario,
            Err(source) => return Err(ScenarioError::Parse { path, source }),
        };
        scenario.validate()?;
        Ok(scenario)
    }
}

impl Scenario {
    /// Rejects inputs the tree model would silently turn into nonsense. The
    /// model itself accepts anything.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        let weather = &self.weather;
        let numbers = [
            ("latitude", self.latitude),
            ("initial_nutrients", self.initial_nutrients),
            ("weather.sunlight", weather.sunlight),
            ("weather.water", weather.water),
            ("weather.temperature_c", weather.temperature_c),
            ("weather.humidity_pct", weather.humidity_pct),
            ("weather.co2_ppm", weather.co2_ppm),
            ("weather.disease_factor", weather.disease_factor),
            ("weather.variation.temperature_c", weather.variation.temperature_c),
            ("weather.variation.humidity_pct", weather.variation.humidity_pct),
            ("weather.variation.sunlight", weather.variation.sunlight),
        ];
        for (field, value) in numbers {
            if !value.is_finite() {
                return Err(ScenarioError::NotFinite { field, value });
            }
        }
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(ScenarioError::Latitude(self.latitude));
        }
        self.days(None)?;
        Ok(())
    }

    pub fn build_tree(&self) -> Tree {
        tree::create_tree(self.latitude, self.initial_nutrients)
    }

    pub fn weather_generator(&self) -> WeatherGenerator {
        WeatherGenerator::new(self.seed, self.weather.clone())
    }

    /// Number of days to simulate, from `override_years` when given and the
    /// scenario's own `years` otherwise.
    pub fn days(&self, override_years: Option<u64>) -> Result<u64, ScenarioError> {
        let years = override_years.unwrap_or(self.years);
        if years == 0 {
            return Err(ScenarioError::NoYears);
        }
        years
            .checked_mul(DAYS_PER_SIMULATED_YEAR)
            .filter(|_| years <= MAX_YEARS)
            .ok_or(ScenarioError::TooManyYears(years))
    }
}
