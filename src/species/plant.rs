//! Plant species phenology engine.
//!
//! Each species carries a growth state (vigor, bloom fraction, seed set) that
//! is driven daily by soil moisture, accumulated sunshine and pollinator
//! visits, and rescaled once a year by winter reproduction.

use super::reproduction::Reproduction;
use super::seed_bank::SeedBank;
use crate::environment::DayWeather;
use crate::pollinator::Pollinator;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when building a species from malformed parameters
#[derive(Debug, Error, PartialEq)]
pub enum SpeciesError {
    #[error("species '{name}': bloom rate must be positive and finite, got {value}")]
    InvalidBloomRate { name: String, value: f64 },
}

/// Construction parameters for a plant species
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesParams {
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Starting vigor
    pub initial_vigor: f64,
    /// Lower bound of the winter growth multiplier
    pub c_min: f64,
    /// Upper bound of the winter growth multiplier
    pub c_max: f64,
    /// Lower edge of the comfortable soil moisture band
    pub f_min: f64,
    /// Upper edge of the comfortable soil moisture band
    pub f_max: f64,
    /// Cumulative sun-hours at which blooming starts
    pub h_start: f64,
    /// Cumulative sun-hours at which senescence starts
    pub h_end: f64,
    /// Bloom intensity per sun-hour
    pub bloom_rate: f64,
    /// Pollination probability per sun-hour
    pub pollination_rate: f64,
    #[serde(default)]
    pub reproduction: Reproduction,
}

impl Default for SpeciesParams {
    fn default() -> Self {
        Self {
            name: "meadow sage".to_string(),
            initial_vigor: 40.0,
            c_min: 0.8,
            c_max: 1.6,
            f_min: 0.05,
            f_max: 0.6,
            h_start: 400.0,
            h_end: 1100.0,
            bloom_rate: 0.02,
            pollination_rate: 0.005,
            reproduction: Reproduction::default(),
        }
    }
}

/// Mutable per-season growth state.
///
/// `bloom_fraction` and `seed_set` only change through clamping setters and
/// never leave [0, 1]; vigor never drops below zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthState {
    vigor: f64,
    bloom_fraction: f64,
    seed_set: f64,
}

impl GrowthState {
    pub fn new(vigor: f64) -> Self {
        Self {
            vigor: floor_zero(vigor),
            bloom_fraction: 0.0,
            seed_set: 0.0,
        }
    }

    pub fn vigor(&self) -> f64 {
        self.vigor
    }

    pub fn bloom_fraction(&self) -> f64 {
        self.bloom_fraction
    }

    pub fn seed_set(&self) -> f64 {
        self.seed_set
    }

    pub(crate) fn set_vigor(&mut self, vigor: f64) {
        self.vigor = floor_zero(vigor);
    }

    pub(crate) fn add_vigor(&mut self, delta: f64) {
        self.set_vigor(self.vigor + delta);
    }

    pub(crate) fn scale_vigor(&mut self, factor: f64) {
        self.set_vigor(self.vigor * factor);
    }

    pub(crate) fn set_bloom_fraction(&mut self, value: f64) {
        self.bloom_fraction = clamp01(value);
    }

    pub(crate) fn set_seed_set(&mut self, value: f64) {
        self.seed_set = clamp01(value);
    }

    fn reset_season(&mut self) {
        self.bloom_fraction = 0.0;
        self.seed_set = 0.0;
    }
}

/// A plant species with its own seed bank and life-history strategy
#[derive(Debug, Clone)]
pub struct PlantSpecies {
    params: SpeciesParams,
    state: GrowthState,
    seed_bank: SeedBank,
}

impl PlantSpecies {
    /// Build a species, rejecting a degenerate bloom step
    pub fn new(params: SpeciesParams) -> Result<Self, SpeciesError> {
        if !(params.bloom_rate.is_finite() && params.bloom_rate > 0.0) {
            return Err(SpeciesError::InvalidBloomRate {
                name: params.name.clone(),
                value: params.bloom_rate,
            });
        }

        Ok(Self {
            state: GrowthState::new(params.initial_vigor),
            seed_bank: SeedBank::new(),
            params,
        })
    }

    /// Reset bloom and seed set, then let the strategy germinate from the bank
    pub fn start_season<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.state.reset_season();
        self.params
            .reproduction
            .start_of_season(&mut self.state, &mut self.seed_bank, rng);
    }

    /// Vigor loss from drought or waterlogging
    pub fn apply_moisture_stress(&mut self, soil_moisture: f64) {
        let f_min = self.params.f_min;
        let f_max = self.params.f_max;

        if soil_moisture <= f_min / 2.0 || soil_moisture >= 2.0 * f_max {
            self.state.scale_vigor(0.97);
        } else if (soil_moisture > f_min / 2.0 && soil_moisture < f_min)
            || (soil_moisture > f_max && soil_moisture < 2.0 * f_max)
        {
            self.state.scale_vigor(0.99);
        }
    }

    /// Grow bloom inside the sun-hour window, senesce after it
    pub fn advance_bloom(&mut self, sun_hours_today: f64, cumulative_sun_hours: f64) {
        let step = self.params.bloom_rate * (sun_hours_today + 3.0);
        let bloom = self.state.bloom_fraction();

        if cumulative_sun_hours >= self.params.h_start && cumulative_sun_hours < self.params.h_end {
            self.state.set_bloom_fraction(bloom + step);
        } else if cumulative_sun_hours >= self.params.h_end {
            self.state.set_bloom_fraction(bloom - step);
        }
    }

    /// Accumulate pollination success.
    ///
    /// Limited by food when bees outnumber it, by bees otherwise.
    pub fn update_seed_set(&mut self, bee_population: f64, total_food: f64, sun_hours_today: f64) {
        let bloom = self.state.bloom_fraction();
        if bloom <= 0.0 || total_food <= 0.0 {
            return;
        }

        let mut increment = self.params.pollination_rate * bloom * (sun_hours_today + 1.0);
        if bee_population < total_food {
            increment *= bee_population.max(0.0) / total_food;
        }
        self.state.set_seed_set(self.state.seed_set() + increment);
    }

    /// Delegate the in-season hook to the reproduction strategy
    pub fn reproduce_daily(&mut self, weather: &DayWeather, pollinator: &dyn Pollinator, total_food: f64) {
        self.params
            .reproduction
            .update_daily(&mut self.state, weather, pollinator, total_food);
    }

    /// Deposit seeds, then rescale vigor by `1 + seed_set * (c - 1)` with
    /// `c` uniform in `[c_min, c_max]`. Seed set itself is kept until the next
    /// season start.
    pub fn winter_reproduce<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.params
            .reproduction
            .end_of_season(&self.state, &mut self.seed_bank, rng);

        let c = self.params.c_min + rng.gen::<f64>() * (self.params.c_max - self.params.c_min);
        let growth = 1.0 + self.state.seed_set() * (c - 1.0);
        self.state.scale_vigor(growth);
    }

    /// Nectar and pollen on offer today
    pub fn food_supply_today(&self) -> f64 {
        self.state.vigor() * self.state.bloom_fraction()
    }

    pub fn name(&self) -> &str {
        &self.params.name
    }

    pub fn params(&self) -> &SpeciesParams {
        &self.params
    }

    pub fn state(&self) -> &GrowthState {
        &self.state
    }

    pub fn seed_bank(&self) -> &SeedBank {
        &self.seed_bank
    }

    pub fn vigor(&self) -> f64 {
        self.state.vigor()
    }

    pub fn bloom_fraction(&self) -> f64 {
        self.state.bloom_fraction()
    }

    pub fn seed_set(&self) -> f64 {
        self.state.seed_set()
    }
}

impl std::fmt::Display for PlantSpecies {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: vigor={:.2} bloom={:.3} seed={:.3}",
            self.params.name,
            self.state.vigor(),
            self.state.bloom_fraction(),
            self.state.seed_set()
        )
    }
}

fn clamp01(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

fn floor_zero(value: f64) -> f64 {
    if value.is_nan() || value < 0.0 {
        0.0
    } else {
        value
    }
}
