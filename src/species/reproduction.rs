//! Life-history strategies.
//!
//! A strategy binds a plant's seed bank to its growth state through three
//! hooks: a daily update during the season, a seed deposit at season end and
//! germination at season start. Strategies may only move the growth state
//! through [`GrowthState`]'s clamping mutators.

use super::plant::GrowthState;
use super::seed_bank::{SeedBank, SeedOutput};
use crate::environment::DayWeather;
use crate::pollinator::Pollinator;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Closed set of reproduction strategies
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Reproduction {
    /// Survives the winter; seedlings add to the standing vigor
    Perennial {
        seeds_per_vigor: f64,
        vigor_per_seedling: f64,
    },
    /// Dies back every winter; next season's stand grows only from seed
    Annual {
        seeds_per_vigor: f64,
        vigor_per_seedling: f64,
    },
}

impl Default for Reproduction {
    fn default() -> Self {
        Reproduction::perennial()
    }
}

impl Reproduction {
    pub fn perennial() -> Self {
        Reproduction::Perennial {
            seeds_per_vigor: 10.0,
            vigor_per_seedling: 0.05,
        }
    }

    pub fn annual() -> Self {
        Reproduction::Annual {
            seeds_per_vigor: 10.0,
            vigor_per_seedling: 0.05,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Reproduction::Perennial { .. } => "perennial",
            Reproduction::Annual { .. } => "annual",
        }
    }

    fn seeds_per_vigor(&self) -> f64 {
        match *self {
            Reproduction::Perennial { seeds_per_vigor, .. }
            | Reproduction::Annual { seeds_per_vigor, .. } => seeds_per_vigor.max(0.0),
        }
    }

    fn vigor_per_seedling(&self) -> f64 {
        match *self {
            Reproduction::Perennial {
                vigor_per_seedling, ..
            }
            | Reproduction::Annual {
                vigor_per_seedling, ..
            } => vigor_per_seedling.max(0.0),
        }
    }

    /// In-season hook. Neither variant reacts to daily conditions yet.
    pub fn update_daily(
        &self,
        _state: &mut GrowthState,
        _weather: &DayWeather,
        _pollinator: &dyn Pollinator,
        _total_food: f64,
    ) {
    }

    /// Deposit this season's seeds into the bank
    pub fn end_of_season<R: Rng + ?Sized>(&self, state: &GrowthState, bank: &mut SeedBank, _rng: &mut R) {
        let count = (state.vigor() * state.seed_set() * self.seeds_per_vigor()).round();
        if count.is_finite() && count > 0.0 {
            bank.add(SeedOutput::new(count as u64, state.seed_set()));
        }
    }

    /// Germinate from the bank and grow the stand accordingly
    pub fn start_of_season<R: Rng + ?Sized>(&self, state: &mut GrowthState, bank: &mut SeedBank, rng: &mut R) {
        let had_seed = !bank.is_empty();
        let germinated = bank.germinate(rng);
        let seedling_vigor = germinated as f64 * self.vigor_per_seedling() * bank.quality_avg();

        match self {
            Reproduction::Perennial { .. } => state.add_vigor(seedling_vigor),
            Reproduction::Annual { .. } => {
                if had_seed {
                    state.set_vigor(seedling_vigor);
                }
            }
        }
    }
}
