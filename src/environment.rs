//! Daylight, solar geometry and environmental response curves.
//!
//! Everything here is a pure function of its arguments. The daylight model is
//! stylized rather than astronomically exact: it only needs to be smooth and
//! sensitive to latitude and season.

use std::f64::consts::PI;

const DAYS_PER_SOLAR_YEAR: f64 = 365.25;
const AXIAL_TILT_DEG: f64 = 23.44;

const OPTIMAL_TEMPERATURE_C: f64 = 25.0;
const TEMPERATURE_SENSITIVITY: f64 = 0.05;
const OPTIMAL_HUMIDITY_PCT: f64 = 50.0;
const HUMIDITY_SENSITIVITY: f64 = 0.01;
const BASELINE_CO2_PPM: f64 = 400.0;

/// Day-length proxy in hours for the given latitude and day of year.
pub fn daylight_length(latitude: f64, day_of_year: u32) -> f64 {
    let latitude_rad = latitude.to_radians();
    let seasonal_factor = (2.0 * PI * f64::from(day_of_year) / DAYS_PER_SOLAR_YEAR).cos();
    12.0 * (1.0 + (latitude_rad * seasonal_factor).cos())
}

/// Solar declination in degrees.
pub fn solar_declination(day_of_year: u32) -> f64 {
    AXIAL_TILT_DEG * (2.0 * PI * (f64::from(day_of_year) + 10.0) / DAYS_PER_SOLAR_YEAR).sin()
}

pub fn solar_intensity(latitude: f64, day_of_year: u32) -> f64 {
    let declination_rad = solar_declination(day_of_year).to_radians();
    (latitude.to_radians() - declination_rad).cos()
}

/// Deciduous window: no leaves from day 330 through day 60 of the next year.
pub fn has_leaves(day_of_year: u32) -> bool {
    !((330..=365).contains(&day_of_year) || (1..=60).contains(&day_of_year))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvironmentalFactor {
    Temperature,
    Humidity,
    Co2,
}

impl EnvironmentalFactor {
    /// Response multiplier for a raw reading of this kind.
    ///
    /// Temperature and humidity peak at 1.0 at their optimum and decay
    /// linearly, floored at 0. CO2 scales linearly against 400 ppm and is
    /// unbounded above.
    pub fn response(self, value: f64) -> f64 {
        match self {
            EnvironmentalFactor::Temperature => {
                (1.0 - (OPTIMAL_TEMPERATURE_C - value).abs() * TEMPERATURE_SENSITIVITY).max(0.0)
            }
            EnvironmentalFactor::Humidity => {
                (1.0 - (OPTIMAL_HUMIDITY_PCT - value).abs() * HUMIDITY_SENSITIVITY).max(0.0)
            }
            EnvironmentalFactor::Co2 => value / BASELINE_CO2_PPM,
        }
    }
}

pub fn environmental_factor(kind: EnvironmentalFactor, value: f64) -> f64 {
    kind.response(value)
}
