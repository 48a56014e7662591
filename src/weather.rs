//! Synthetic daily weather.
//!
//! With no variation configured every day gets the same readings. Jitter is
//! drawn from a stream seeded by `(seed, day)`, so day N's weather is the same
//! no matter how many days were generated before it.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::tree::EnvironmentInputs;

fn default_sunlight() -> f64 {
    1.0
}

fn default_water() -> f64 {
    1.0
}

fn default_temperature() -> f64 {
    20.0
}

fn default_humidity() -> f64 {
    50.0
}

fn default_co2() -> f64 {
    400.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherConfig {
    #[serde(default = "default_sunlight")]
    pub sunlight: f64,
    #[serde(default = "default_water")]
    pub water: f64,
    #[serde(default = "default_temperature")]
    pub temperature_c: f64,
    #[serde(default = "default_humidity")]
    pub humidity_pct: f64,
    #[serde(default = "default_co2")]
    pub co2_ppm: f64,
    #[serde(default)]
    pub disease_factor: f64,
    #[serde(default)]
    pub variation: WeatherVariation,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            sunlight: default_sunlight(),
            water: default_water(),
            temperature_c: default_temperature(),
            humidity_pct: default_humidity(),
            co2_ppm: default_co2(),
            disease_factor: 0.0,
            variation: WeatherVariation::default(),
        }
    }
}

/// Half-widths of the uniform jitter applied around the base readings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherVariation {
    #[serde(default)]
    pub temperature_c: f64,
    #[serde(default)]
    pub humidity_pct: f64,
    #[serde(default)]
    pub sunlight: f64,
}

impl WeatherVariation {
    pub fn is_constant(&self) -> bool {
        self.temperature_c == 0.0 && self.humidity_pct == 0.0 && self.sunlight == 0.0
    }
}

pub struct WeatherGenerator {
    seed: u64,
    config: WeatherConfig,
}

impl WeatherGenerator {
    pub fn new(seed: u64, config: WeatherConfig) -> Self {
        Self { seed, config }
    }

    /// Readings for simulation day `day` (1-based) falling on `day_of_year`.
    pub fn inputs_for(&self, day: u64, day_of_year: u32) -> EnvironmentInputs {
        let base = &self.config;
        let mut inputs = EnvironmentInputs {
            sunlight: base.sunlight,
            water: base.water,
            day_of_year,
            temperature_c: base.temperature_c,
            humidity_pct: base.humidity_pct,
            co2_ppm: base.co2_ppm,
            disease_factor: base.disease_factor,
        };
        let variation = &base.variation;
        if variation.is_constant() {
            return inputs;
        }

        let mut rng = ChaCha8Rng::seed_from_u64(derive_seed(self.seed, day));
        inputs.temperature_c += jitter(&mut rng, variation.temperature_c);
        inputs.humidity_pct = (inputs.humidity_pct + jitter(&mut rng, variation.humidity_pct))
            .clamp(0.0, 100.0);
        inputs.sunlight = (inputs.sunlight + jitter(&mut rng, variation.sunlight)).clamp(0.0, 1.0);
        inputs
    }
}

fn jitter(rng: &mut ChaCha8Rng, half_width: f64) -> f64 {
    if half_width > 0.0 {
        rng.gen_range(-half_width..=half_width)
    } else {
        0.0
    }
}

fn derive_seed(seed: u64, day: u64) -> u64 {
    let mut mixed = seed;
    mixed = mixed
        .wrapping_mul(6364136223846793005)
        .wrapping_add(1442695040888963407);
    mixed ^= day.wrapping_mul(69069);
    mixed
        .wrapping_mul(6364136223846793005)
        .wrapping_add(1442695040888963407)
}
