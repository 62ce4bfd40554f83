//! # MEADOW
//!
//! Multi-year plant-pollinator ecosystem simulator.
//!
//! A stochastic weather process drives daily plant phenology (bloom, vigor,
//! seed set), which feeds a wild bee population, which in turn drives
//! pollination success and next season's growth.
//!
//! ## Features
//!
//! - **Reproducible**: every random stream is a seeded ChaCha8 generator
//! - **Deterministic ordering**: fixed daily phase order and draw order
//! - **Configurable**: YAML configuration files
//! - **Parallel scenarios**: independent runs fanned out via Rayon
//!
//! ## Quick Start
//!
//! ```rust
//! use meadow::{Config, Simulation};
//! use meadow::pollinator::Pollinator;
//!
//! let mut config = Config::default();
//! config.simulation.years = 2;
//!
//! let mut sim = Simulation::from_config(&config).unwrap();
//! sim.run();
//!
//! println!("Bees: {:.1}", sim.bees().population());
//! for species in sim.ecosystem().species() {
//!     println!("{}", species);
//! }
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use meadow::Config;
//! use meadow::environment::DayLengthModel;
//!
//! let mut config = Config::default();
//! config.weather.latitude = 60.0;
//! config.weather.day_length = DayLengthModel::Astronomical;
//! assert!(config.validate().is_ok());
//! ```

pub mod config;
pub mod ecosystem;
pub mod environment;
pub mod pollinator;
pub mod report;
pub mod scenarios;
pub mod simulation;
pub mod species;
pub mod stats;

// Re-export main types
pub use config::{Config, ConfigError};
pub use ecosystem::Ecosystem;
pub use environment::{DayWeather, Weather};
pub use pollinator::BeePopulation;
pub use simulation::{Phase, Simulation};
pub use species::PlantSpecies;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run a quick benchmark with `species_count` copies of the default meadow
pub fn benchmark(years: u32, species_count: usize) -> Result<BenchmarkResult, ConfigError> {
    use std::time::Instant;

    let mut config = Config::default();
    config.simulation.years = years.max(1);
    let templates = config.species.clone();
    config.species = templates.iter().cycle().take(species_count.max(1)).cloned().collect();

    let mut sim = Simulation::from_config(&config)?;

    let start = Instant::now();
    sim.run();
    let elapsed = start.elapsed();

    Ok(BenchmarkResult {
        years: config.simulation.years,
        species: config.species.len(),
        days: sim.total_days(),
        elapsed_secs: elapsed.as_secs_f64(),
        days_per_second: sim.total_days() as f64 / elapsed.as_secs_f64().max(f64::EPSILON),
    })
}

/// Benchmark result
#[derive(Debug, Clone)]
pub struct BenchmarkResult {
    pub years: u32,
    pub species: usize,
    pub days: u64,
    pub elapsed_secs: f64,
    pub days_per_second: f64,
}

impl std::fmt::Display for BenchmarkResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Benchmark Results ===")?;
        writeln!(f, "Years: {}", self.years)?;
        writeln!(f, "Species: {}", self.species)?;
        writeln!(f, "Days: {}", self.days)?;
        writeln!(f, "Time: {:.3}s", self.elapsed_secs)?;
        writeln!(f, "Speed: {:.1} days/s", self.days_per_second)?;
        Ok(())
    }
}
