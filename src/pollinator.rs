//! Aggregate pollinator population.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Daily growth when food is plentiful
const DAILY_GROWTH: f64 = 1.03;

/// Anything that can report a pollinator head count
pub trait Pollinator {
    fn population(&self) -> f64;
}

/// Wild bee population, a single non-negative number
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BeePopulation {
    population: f64,
}

impl BeePopulation {
    pub fn new(initial_population: f64) -> Self {
        Self {
            population: non_negative(initial_population),
        }
    }

    /// In-season update from the total food on offer.
    ///
    /// Flat 3% growth while food covers the population; below that the rate
    /// falls linearly with the deficit and turns negative under half cover.
    pub fn update_daily_from_food(&mut self, total_food: f64) {
        let food = non_negative(total_food);

        if food >= self.population {
            self.population *= DAILY_GROWTH;
        } else {
            let factor = ((6.0 * food / self.population) - 3.0) / 100.0 + 1.0;
            self.population *= factor;
        }
        self.population = non_negative(self.population);
    }

    /// Winter losses: 10-30% of the colony survives
    pub fn apply_winter_mortality<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let survival = 0.1 + rng.gen::<f64>() * 0.2;
        self.population = non_negative(self.population * survival);
    }
}

impl Pollinator for BeePopulation {
    fn population(&self) -> f64 {
        self.population
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_negative_start_clamped() {
        assert_eq!(BeePopulation::new(-10.0).population(), 0.0);
        assert_eq!(BeePopulation::new(f64::NAN).population(), 0.0);
    }

    #[test]
    fn test_growth_with_plenty_of_food() {
        let mut bees = BeePopulation::new(100.0);
        bees.update_daily_from_food(100.0);
        assert_relative_eq!(bees.population(), 103.0, epsilon = 1e-9);
    }

    #[test]
    fn test_growth_rate_degrades_with_deficit() {
        // 3/4 cover: (4.5 - 3) / 100 + 1 = 1.015
        let mut bees = BeePopulation::new(100.0);
        bees.update_daily_from_food(75.0);
        assert_relative_eq!(bees.population(), 101.5, epsilon = 1e-9);

        // half cover is break-even
        let mut bees = BeePopulation::new(100.0);
        bees.update_daily_from_food(50.0);
        assert_relative_eq!(bees.population(), 100.0, epsilon = 1e-9);

        // no food: -3% per day
        let mut bees = BeePopulation::new(100.0);
        bees.update_daily_from_food(0.0);
        assert_relative_eq!(bees.population(), 97.0, epsilon = 1e-9);
    }

    #[test]
    fn test_starvation_is_monotone_and_non_negative() {
        let mut bees = BeePopulation::new(1000.0);
        let mut last = bees.population();
        for _ in 0..2000 {
            let food = bees.population() * 0.1;
            bees.update_daily_from_food(food);
            assert!(bees.population() <= last);
            assert!(bees.population() >= 0.0);
            last = bees.population();
        }
        assert!(bees.population() < 1000.0 * 0.01);
    }

    #[test]
    fn test_negative_food_treated_as_none() {
        let mut bees = BeePopulation::new(100.0);
        bees.update_daily_from_food(-50.0);
        assert_relative_eq!(bees.population(), 97.0, epsilon = 1e-9);
    }

    #[test]
    fn test_extinct_population_stays_zero() {
        let mut bees = BeePopulation::new(0.0);
        bees.update_daily_from_food(0.0);
        assert_eq!(bees.population(), 0.0);
        bees.update_daily_from_food(10.0);
        assert_eq!(bees.population(), 0.0);
    }

    #[test]
    fn test_winter_mortality_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(77);
        for _ in 0..200 {
            let mut bees = BeePopulation::new(100.0);
            bees.apply_winter_mortality(&mut rng);
            assert!(bees.population() >= 10.0 - 1e-9);
            assert!(bees.population() <= 30.0 + 1e-9);
        }
    }
}
