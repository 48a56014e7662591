use std::f64::consts::PI;

const BASE_GROWTH_FRACTION: f64 = 0.1;
const SIZE_GROWTH_BONUS: f64 = 0.05;
const SEASONAL_AMPLITUDE: f64 = 0.8;
const HALF_YEAR_DAYS: f64 = 182.5;

const FRUITING_DAYS: std::ops::RangeInclusive<u32> = 150..=250;
const FRUITING_AGE_YEARS: std::ops::RangeInclusive<f64> = 3.0..=5.0;
const FRUITING_NUTRIENT_THRESHOLD: f64 = 10.0;
const NUTRIENTS_PER_FRUIT_UNIT: f64 = 10.0;
const MIN_FRUIT_MULTIPLIER: f64 = 0.5;
const NUTRIENT_COST_PER_FRUIT: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthDecision {
    /// Advisory only; size changes happen in the energy budget.
    pub growth_rate: f64,
    pub updated_nutrients: f64,
    pub fruit_count: u32,
}

/// Annual growth cycle: 0.2 around the new year, 1.8 at mid-year.
pub fn seasonal_multiplier(day_of_year: u32) -> f64 {
    1.0 - SEASONAL_AMPLITUDE * (PI * f64::from(day_of_year) / HALF_YEAR_DAYS).cos()
}

/// Growth rate and fruiting for the day.
///
/// Fruit is only set between days 150 and 250, for trees aged three to five
/// years, and only while more than 10 units of nutrients are stored. Each
/// fruit costs half a unit of nutrients.
pub fn decide(
    stored_nutrients: f64,
    day_of_year: u32,
    age_years: f64,
    tree_size: f64,
    health: f64,
) -> GrowthDecision {
    let growth_multiplier = (1.0 + SIZE_GROWTH_BONUS * tree_size) * health;
    let growth_rate =
        stored_nutrients * BASE_GROWTH_FRACTION * seasonal_multiplier(day_of_year) * growth_multiplier;

    let mut fruit_count = 0;
    let mut updated_nutrients = stored_nutrients;

    if FRUITING_DAYS.contains(&day_of_year)
        && stored_nutrients > FRUITING_NUTRIENT_THRESHOLD
        && FRUITING_AGE_YEARS.contains(&age_years)
    {
        let fruit_multiplier = health.max(MIN_FRUIT_MULTIPLIER);
        let fruit_units = (stored_nutrients / NUTRIENTS_PER_FRUIT_UNIT).floor();
        fruit_count = (fruit_units * fruit_multiplier) as u32;
        updated_nutrients -= f64::from(fruit_count) * NUTRIENT_COST_PER_FRUIT;
    }

    GrowthDecision {
        growth_rate,
        updated_nutrients,
        fruit_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn seasonal_cycle_troughs_at_year_edges() {
        assert_relative_eq!(seasonal_multiplier(0), 0.2, epsilon = 1e-12);
        assert_relative_eq!(seasonal_multiplier(365), 0.2, epsilon = 1e-12);
        assert_relative_eq!(seasonal_multiplier(182), 1.8, epsilon = 1e-3);
    }

    #[test]
    fn growth_rate_scales_with_size_and_health() {
        let decision = decide(40.0, 100, 1.0, 2.0, 0.5);
        let expected = 40.0 * 0.1 * seasonal_multiplier(100) * 1.1 * 0.5;
        assert_relative_eq!(decision.growth_rate, expected, epsilon = 1e-12);
        assert_eq!(decision.fruit_count, 0);
        assert_eq!(decision.updated_nutrients, 40.0);
    }

    #[test]
    fn mature_tree_fruits_in_season() {
        let decision = decide(57.0, 200, 4.0, 1.5, 1.0);
        assert_eq!(decision.fruit_count, 5);
        assert_relative_eq!(decision.updated_nutrients, 54.5, epsilon = 1e-12);
    }

    #[test]
    fn poor_health_is_floored_for_fruiting() {
        let decision = decide(40.0, 200, 4.0, 1.0, -0.3);
        assert_eq!(decision.fruit_count, 2);
        assert!(decision.growth_rate < 0.0);
    }

    #[test]
    fn floor_happens_before_health_scaling() {
        // floor(39 / 10) = 3, then 3 * 0.9 truncates to 2
        let decision = decide(39.0, 200, 4.0, 1.0, 0.9);
        assert_eq!(decision.fruit_count, 2);
    }

    #[test]
    fn no_fruit_outside_gates() {
        assert_eq!(decide(50.0, 149, 4.0, 1.0, 1.0).fruit_count, 0);
        assert_eq!(decide(50.0, 251, 4.0, 1.0, 1.0).fruit_count, 0);
        assert_eq!(decide(50.0, 200, 2.99, 1.0, 1.0).fruit_count, 0);
        assert_eq!(decide(50.0, 200, 5.01, 1.0, 1.0).fruit_count, 0);
        assert_eq!(decide(10.0, 200, 4.0, 1.0, 1.0).fruit_count, 0);
    }

    #[test]
    fn gates_are_inclusive() {
        assert_eq!(decide(50.0, 150, 3.0, 1.0, 1.0).fruit_count, 5);
        assert_eq!(decide(50.0, 250, 5.0, 1.0, 1.0).fruit_count, 5);
    }

    #[test]
    fn decide_is_pure() {
        let first = decide(33.3, 210, 3.5, 1.7, 0.8);
        let second = decide(33.3, 210, 3.5, 1.7, 0.8);
        assert_eq!(first, second);
    }
}
