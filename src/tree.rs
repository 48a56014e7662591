//! The tree itself: owns all mutable state and advances it one day at a time.

use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::energy::{EnergyInputs, EnergyState};
use crate::environment;
use crate::growth;
use crate::health::{self, HealthStatus};

pub const DAYS_PER_YEAR: f64 = 365.0;

/// Weather and disease pressure for a single day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentInputs {
    pub sunlight: f64,
    pub water: f64,
    pub day_of_year: u32,
    pub temperature_c: f64,
    pub humidity_pct: f64,
    pub co2_ppm: f64,
    pub disease_factor: f64,
}

impl EnvironmentInputs {
    fn energy_inputs(&self) -> EnergyInputs {
        EnergyInputs {
            sunlight: self.sunlight,
            water: self.water,
            day_of_year: self.day_of_year,
            temperature_c: self.temperature_c,
            humidity_pct: self.humidity_pct,
            co2_ppm: self.co2_ppm,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeState {
    pub age_years: f64,
    pub has_leaves: bool,
    pub health: f64,
    pub energy: EnergyState,
}

/// Per-day output record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub age: f64,
    pub stored_nutrients: f64,
    pub growth_rate: f64,
    pub tree_size: f64,
    pub fruit_count: u32,
    pub health: f64,
    pub health_status: HealthStatus,
    pub has_leaves: bool,
    pub net_energy: f64,
}

#[derive(Debug, Clone)]
pub struct Tree {
    latitude: f64,
    state: TreeState,
    nutrients_depleted: bool,
}

pub fn create_tree(latitude: f64, initial_nutrients: f64) -> Tree {
    Tree::new(latitude, initial_nutrients)
}

impl Tree {
    pub fn new(latitude: f64, initial_nutrients: f64) -> Self {
        Self {
            latitude,
            state: TreeState {
                age_years: 0.0,
                has_leaves: true,
                health: 1.0,
                energy: EnergyState::new(initial_nutrients),
            },
            nutrients_depleted: false,
        }
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn state(&self) -> &TreeState {
        &self.state
    }

    /// Advances the tree by one day. The steps run in a fixed order since
    /// each one reads what the previous one wrote.
    pub fn advance_one_day(&mut self, inputs: &EnvironmentInputs) -> Snapshot {
        let state = &mut self.state;
        state.age_years += 1.0 / DAYS_PER_YEAR;
        state.has_leaves = environment::has_leaves(inputs.day_of_year);

        let net_energy =
            state
                .energy
                .generate_energy(&inputs.energy_inputs(), state.has_leaves, self.latitude);

        let nutrients = state.energy.stored_nutrients();
        let health = health::assess(nutrients, inputs.disease_factor);
        let decision = growth::decide(
            nutrients,
            inputs.day_of_year,
            state.age_years,
            state.energy.tree_size(),
            health,
        );
        state.energy.set_stored_nutrients(decision.updated_nutrients);
        state.health = health;

        if decision.updated_nutrients < 0.0 && !self.nutrients_depleted {
            warn!(
                age_years = state.age_years,
                stored_nutrients = decision.updated_nutrients,
                "stored nutrients went negative"
            );
        }
        self.nutrients_depleted = decision.updated_nutrients < 0.0;

        let snapshot = Snapshot {
            age: state.age_years,
            stored_nutrients: decision.updated_nutrients,
            growth_rate: decision.growth_rate,
            tree_size: state.energy.tree_size(),
            fruit_count: decision.fruit_count,
            health,
            health_status: health::classify(health),
            has_leaves: state.has_leaves,
            net_energy,
        };
        trace!(day_of_year = inputs.day_of_year, ?snapshot, "advanced one day");
        snapshot
    }
}
