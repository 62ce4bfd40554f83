//! Simulation scheduler - the year/day loop.
//!
//! Each year runs season reset, a fixed number of days and the winter
//! transition, always in the same order so that random draws happen in the
//! same sequence for the same seed.

use crate::config::{Config, ConfigError};
use crate::ecosystem::Ecosystem;
use crate::environment::{DayWeather, Weather};
use crate::pollinator::{BeePopulation, Pollinator};
use crate::species::PlantSpecies;
use crate::stats::{Stats, StatsHistory};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Default days between history snapshots
const DEFAULT_STATS_INTERVAL: u64 = 30;

/// Scheduler state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Season reset pending
    Initializing,
    /// Growing season, `day` days already simulated
    InSeason { day: u32 },
    /// Winter mortality and reproduction pending
    WinterTransition,
    /// All configured years done
    Finished,
}

/// A multi-year run over one ecosystem, bee population and weather stream
pub struct Simulation {
    ecosystem: Ecosystem,
    bees: BeePopulation,
    weather: Weather,
    rng: ChaCha8Rng,
    seed: u64,

    years: u32,
    season_length: u32,
    year: u32,
    phase: Phase,
    total_days: u64,

    /// Latest daily statistics
    pub stats: Stats,
    /// Periodic snapshots
    pub history: StatsHistory,
}

impl Simulation {
    /// Create a simulation with the default 240-day season
    pub fn new(
        species: Vec<PlantSpecies>,
        weather: Weather,
        seed: u64,
        initial_bees: f64,
        years: u32,
    ) -> Self {
        let season_length = weather.season_length();
        Self {
            ecosystem: Ecosystem::new(species),
            bees: BeePopulation::new(initial_bees),
            weather,
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
            years,
            season_length,
            year: 0,
            phase: if years == 0 {
                Phase::Finished
            } else {
                Phase::Initializing
            },
            total_days: 0,
            stats: Stats::new(),
            history: StatsHistory::new(DEFAULT_STATS_INTERVAL),
        }
    }

    /// Build a simulation from configuration using the configured seed
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Self::from_config_with_seed(config, config.simulation.seed)
    }

    /// Build a simulation from configuration with an explicit seed.
    ///
    /// The weather stream is seeded with `seed`, the simulation stream with
    /// [`Config::simulation_seed`].
    pub fn from_config_with_seed(config: &Config, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;

        let weather = Weather::new(
            seed,
            config.weather.day_length.build(),
            config.weather.latitude,
            config.weather.day_of_year_start,
        )
        .with_season_length(config.simulation.season_length);

        let mut sim = Self::new(
            config.build_species()?,
            weather,
            Config::simulation_seed(seed),
            config.simulation.initial_bees,
            config.simulation.years,
        );
        sim.history = StatsHistory::new(config.logging.stats_interval);
        Ok(sim)
    }

    /// Perform one scheduler transition
    pub fn step(&mut self) -> Phase {
        match self.phase {
            Phase::Initializing => {
                self.year += 1;
                self.ecosystem.reset_season(&mut self.rng);
                self.weather.start_season();
                log::debug!(
                    "Year {} season start: bees={:.2} vigor={:.2}",
                    self.year,
                    self.bees.population(),
                    self.ecosystem.mean_vigor()
                );
                self.phase = if self.season_length == 0 {
                    Phase::WinterTransition
                } else {
                    Phase::InSeason { day: 0 }
                };
            }
            Phase::InSeason { day } => {
                self.advance_day(day);
            }
            Phase::WinterTransition => {
                self.bees.apply_winter_mortality(&mut self.rng);
                self.ecosystem.winter_all(&mut self.rng);
                log::info!(
                    "Year {}/{} complete: bees={:.2} vigor={:.2} seed_set={:.3}",
                    self.year,
                    self.years,
                    self.bees.population(),
                    self.ecosystem.mean_vigor(),
                    self.ecosystem.mean_seed_set()
                );
                self.phase = if self.year >= self.years {
                    Phase::Finished
                } else {
                    Phase::Initializing
                };
            }
            Phase::Finished => {}
        }
        self.phase
    }

    /// Simulate the day after `day` and move to the next phase
    fn advance_day(&mut self, day: u32) -> DayWeather {
        let weather = self.simulate_day(day + 1);
        self.phase = if day + 1 >= self.season_length {
            Phase::WinterTransition
        } else {
            Phase::InSeason { day: day + 1 }
        };
        weather
    }

    fn simulate_day(&mut self, day: u32) -> DayWeather {
        let weather = self.weather.next_day();
        let total_food = self.ecosystem.daily_update(&weather, &mut self.bees);
        self.total_days += 1;

        self.stats.year = self.year;
        self.stats.day = day;
        self.stats.total_days = self.total_days;
        self.stats
            .update(&self.ecosystem, &self.bees, &weather, total_food);
        if self.history.is_due(self.total_days) {
            self.history.record(self.stats.clone());
        }

        log::trace!("{}", self.stats.summary());
        weather
    }

    /// Run every remaining year
    pub fn run(&mut self) {
        while self.phase != Phase::Finished {
            self.step();
        }
    }

    /// Run until the current (or next) year's winter has been applied
    pub fn run_year(&mut self) {
        if self.phase == Phase::Finished {
            return;
        }
        loop {
            let before = self.phase;
            let after = self.step();
            if before == Phase::WinterTransition || after == Phase::Finished {
                break;
            }
        }
    }

    /// Run every remaining year, calling back after each simulated day
    pub fn run_with_callback<F>(&mut self, mut callback: F)
    where
        F: FnMut(&Simulation, &DayWeather),
    {
        while self.phase != Phase::Finished {
            if let Phase::InSeason { day } = self.phase {
                let weather = self.advance_day(day);
                callback(self, &weather);
            } else {
                self.step();
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current year (1-based once the first season has started)
    pub fn year(&self) -> u32 {
        self.year
    }

    pub fn years(&self) -> u32 {
        self.years
    }

    pub fn season_length(&self) -> u32 {
        self.season_length
    }

    pub fn total_days(&self) -> u64 {
        self.total_days
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn bees(&self) -> &BeePopulation {
        &self.bees
    }

    pub fn ecosystem(&self) -> &Ecosystem {
        &self.ecosystem
    }

    pub fn weather(&self) -> &Weather {
        &self.weather
    }
}
