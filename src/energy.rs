//! Nutrient reservoir and structural size, and the daily energy budget that
//! moves them.

use serde::{Deserialize, Serialize};

use crate::environment::{self, EnvironmentalFactor};

pub const INITIAL_TREE_SIZE: f64 = 1.0;

const LEAF_AREA_PER_SIZE: f64 = 0.1;
const PHOTOSYNTHESIS_CONVERSION: f64 = 0.1;
const RESPIRATION_PER_SIZE: f64 = 0.05;
const BUD_ROOT_GROWTH_FRACTION: f64 = 0.02;
const GROWTH_NUTRIENT_THRESHOLD: f64 = 20.0;
const SIZE_INCREMENT: f64 = 0.01;

const BASE_WATER_REQUIREMENT: f64 = 40.0 / 7.0;

/// Readings consumed by [`EnergyState::generate_energy`] for one day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyInputs {
    pub sunlight: f64,
    pub water: f64,
    pub day_of_year: u32,
    pub temperature_c: f64,
    pub humidity_pct: f64,
    pub co2_ppm: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyState {
    stored_nutrients: f64,
    tree_size: f64,
}

impl EnergyState {
    pub fn new(initial_nutrients: f64) -> Self {
        Self {
            stored_nutrients: initial_nutrients,
            tree_size: INITIAL_TREE_SIZE,
        }
    }

    pub fn stored_nutrients(&self) -> f64 {
        self.stored_nutrients
    }

    pub fn tree_size(&self) -> f64 {
        self.tree_size
    }

    /// Overwrites the reservoir with a value computed elsewhere (fruiting).
    pub(crate) fn set_stored_nutrients(&mut self, nutrients: f64) {
        self.stored_nutrients = nutrients;
    }

    /// Gross photosynthetic yield for the day before sunlight and water
    /// scaling. Zero when the tree carries no leaves.
    pub fn photosynthesis_yield(
        &self,
        day_of_year: u32,
        temperature_c: f64,
        humidity_pct: f64,
        co2_ppm: f64,
        has_leaves: bool,
        latitude: f64,
    ) -> f64 {
        if !has_leaves {
            return 0.0;
        }
        let temperature_factor = EnvironmentalFactor::Temperature.response(temperature_c);
        let humidity_factor = EnvironmentalFactor::Humidity.response(humidity_pct);
        let co2_factor = EnvironmentalFactor::Co2.response(co2_ppm);
        let daylight = environment::daylight_length(latitude, day_of_year);
        let intensity = environment::solar_intensity(latitude, day_of_year);
        let leaf_area_multiplier = 1.0 + LEAF_AREA_PER_SIZE * self.tree_size;

        daylight * intensity * temperature_factor * humidity_factor * co2_factor * leaf_area_multiplier
    }

    /// Deducts the day's upkeep from the reservoir and grows the tree when
    /// enough nutrients remain afterwards. Returns the amount consumed.
    pub fn respiration_and_growth(&mut self) -> f64 {
        let respiration = RESPIRATION_PER_SIZE * self.tree_size;
        let bud_root_growth = if self.stored_nutrients > GROWTH_NUTRIENT_THRESHOLD {
            BUD_ROOT_GROWTH_FRACTION * self.stored_nutrients
        } else {
            0.0
        };
        let consumption = respiration + bud_root_growth;
        self.stored_nutrients -= consumption;

        if self.stored_nutrients > GROWTH_NUTRIENT_THRESHOLD {
            self.tree_size += SIZE_INCREMENT;
        }
        consumption
    }

    /// Runs photosynthesis (when leafed) followed by respiration and growth.
    ///
    /// Upkeep is paid every day, but a leafless day always reports a net
    /// energy of zero.
    pub fn generate_energy(&mut self, inputs: &EnergyInputs, has_leaves: bool, latitude: f64) -> f64 {
        let mut energy_generated = 0.0;
        if has_leaves {
            let gross_yield = self.photosynthesis_yield(
                inputs.day_of_year,
                inputs.temperature_c,
                inputs.humidity_pct,
                inputs.co2_ppm,
                has_leaves,
                latitude,
            );
            energy_generated = inputs.sunlight * inputs.water * PHOTOSYNTHESIS_CONVERSION * gross_yield;
            self.stored_nutrients += energy_generated;
        }

        let consumption = self.respiration_and_growth();
        if has_leaves {
            energy_generated - consumption
        } else {
            0.0
        }
    }
}

/// Daily water demand for the given temperature. Not yet coupled to the
/// nutrient budget.
pub fn water_requirement(temperature_c: f64) -> f64 {
    if temperature_c > 30.0 {
        BASE_WATER_REQUIREMENT * 1.5
    } else if temperature_c < 15.0 {
        BASE_WATER_REQUIREMENT * 0.75
    } else {
        BASE_WATER_REQUIREMENT
    }
}
