use std::fmt;

use serde::{Deserialize, Serialize};

const FULL_HEALTH: f64 = 1.0;
const LOW_NUTRIENT_THRESHOLD: f64 = 10.0;
const LOW_NUTRIENT_PENALTY: f64 = 0.1;
const HEALTHY_AT: f64 = 0.9;
const UNHEALTHY_AT: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthStatus {
    Healthy,
    Average,
    Unhealthy,
}

impl HealthStatus {
    pub fn label(self) -> &'static str {
        match self {
            HealthStatus::Healthy => "Healthy",
            HealthStatus::Average => "Average",
            HealthStatus::Unhealthy => "Unhealthy",
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Health score from disease pressure and nutrient sufficiency. Unclamped:
/// heavy disease on a starving tree yields a negative score.
pub fn assess(stored_nutrients: f64, disease_factor: f64) -> f64 {
    let mut health = FULL_HEALTH - disease_factor;
    if stored_nutrients < LOW_NUTRIENT_THRESHOLD {
        health -= LOW_NUTRIENT_PENALTY;
    }
    health
}

pub fn classify(health: f64) -> HealthStatus {
    if health >= HEALTHY_AT {
        HealthStatus::Healthy
    } else if health <= UNHEALTHY_AT {
        HealthStatus::Unhealthy
    } else {
        HealthStatus::Average
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn classify_thresholds() {
        assert_eq!(classify(1.0), HealthStatus::Healthy);
        assert_eq!(classify(0.9), HealthStatus::Healthy);
        assert_eq!(classify(0.75), HealthStatus::Average);
        assert_eq!(classify(0.6), HealthStatus::Unhealthy);
        assert_eq!(classify(-2.0), HealthStatus::Unhealthy);
        assert_eq!(classify(1.4), HealthStatus::Healthy);
    }

    #[test]
    fn labels_match_display() {
        assert_eq!(HealthStatus::Average.to_string(), "Average");
        assert_eq!(HealthStatus::Unhealthy.label(), "Unhealthy");
    }

    #[test]
    fn low_nutrients_cost_a_tenth() {
        assert_eq!(assess(50.0, 0.0), 1.0);
        assert_relative_eq!(assess(9.99, 0.0), 0.9, epsilon = 1e-12);
        assert_eq!(assess(10.0, 0.0), 1.0);
    }

    #[test]
    fn health_is_not_clamped() {
        assert_relative_eq!(assess(-5.0, 1.5), -0.6, epsilon = 1e-12);
        assert_relative_eq!(assess(20.0, -0.25), 1.25, epsilon = 1e-12);
    }
}
