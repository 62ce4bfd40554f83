//! Ecosystem orchestrator: the fixed daily phase order over all species.

use crate::environment::DayWeather;
use crate::pollinator::{BeePopulation, Pollinator};
use crate::species::PlantSpecies;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Read-only view of one species at a point in time
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpeciesSnapshot {
    pub name: String,
    pub vigor: f64,
    pub bloom_fraction: f64,
    pub seed_set: f64,
    pub seeds_stored: u64,
}

impl From<&PlantSpecies> for SpeciesSnapshot {
    fn from(species: &PlantSpecies) -> Self {
        Self {
            name: species.name().to_string(),
            vigor: species.vigor(),
            bloom_fraction: species.bloom_fraction(),
            seed_set: species.seed_set(),
            seeds_stored: species.seed_bank().stored(),
        }
    }
}

/// The plant community. Membership is fixed for the whole run.
#[derive(Debug, Clone)]
pub struct Ecosystem {
    species: Vec<PlantSpecies>,
}

impl Ecosystem {
    pub fn new(species: Vec<PlantSpecies>) -> Self {
        Self { species }
    }

    /// Start a new season for every species.
    ///
    /// All species draw from the same stream in list order, so germination
    /// outcomes are correlated across species within a run.
    pub fn reset_season<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for species in &mut self.species {
            species.start_season(rng);
        }
    }

    /// Sum of every species' food supply
    pub fn total_food_today(&self) -> f64 {
        self.species.iter().map(PlantSpecies::food_supply_today).sum()
    }

    /// One day: stress -> bloom -> food -> bees -> seed set -> reproduction.
    ///
    /// Seed set sees the bee population already updated for today's food.
    /// Returns the total food used for the pollinator update.
    pub fn daily_update(&mut self, weather: &DayWeather, bees: &mut BeePopulation) -> f64 {
        for species in &mut self.species {
            species.apply_moisture_stress(weather.soil_moisture);
        }
        for species in &mut self.species {
            species.advance_bloom(weather.sun_hours_today, weather.cumulative_sun_hours);
        }

        let total_food = self.total_food_today();
        bees.update_daily_from_food(total_food);

        let population = bees.population();
        for species in &mut self.species {
            species.update_seed_set(population, total_food, weather.sun_hours_today);
            species.reproduce_daily(weather, &*bees, total_food);
        }

        total_food
    }

    /// Winter reproduction for every species, in list order
    pub fn winter_all<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for species in &mut self.species {
            species.winter_reproduce(rng);
        }
    }

    pub fn species(&self) -> &[PlantSpecies] {
        &self.species
    }

    pub fn get(&self, index: usize) -> Option<&PlantSpecies> {
        self.species.get(index)
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }

    pub fn snapshots(&self) -> Vec<SpeciesSnapshot> {
        self.species.iter().map(SpeciesSnapshot::from).collect()
    }

    pub fn mean_vigor(&self) -> f64 {
        self.mean_of(PlantSpecies::vigor)
    }

    pub fn mean_bloom_fraction(&self) -> f64 {
        self.mean_of(PlantSpecies::bloom_fraction)
    }

    pub fn mean_seed_set(&self) -> f64 {
        self.mean_of(PlantSpecies::seed_set)
    }

    fn mean_of(&self, field: fn(&PlantSpecies) -> f64) -> f64 {
        if self.species.is_empty() {
            return 0.0;
        }
        self.species.iter().map(field).sum::<f64>() / self.species.len() as f64
    }
}
