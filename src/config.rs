//! Configuration system for the meadow simulation.
//!
//! Supports YAML configuration files with sensible defaults.

use crate::environment::DayLengthModel;
use crate::species::{PlantSpecies, Reproduction, SpeciesError, SpeciesParams};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Offset between the weather seed and the simulation's own stream
pub const SIMULATION_SEED_OFFSET: u64 = 13;

/// Errors from loading, validating or applying a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
    #[error(transparent)]
    Species(#[from] SpeciesError),
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub weather: WeatherConfig,
    pub species: Vec<SpeciesParams>,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub scenarios: ScenarioConfig,
}

/// Run length and initial conditions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of years to simulate
    pub years: u32,
    /// Days per growing season
    pub season_length: u32,
    /// Starting bee population
    pub initial_bees: f64,
    /// Base random seed
    pub seed: u64,
}

/// Weather generator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Latitude in degrees
    pub latitude: f64,
    /// Day of the year the season starts on
    pub day_of_year_start: u32,
    /// Day-length provider
    pub day_length: DayLengthModel,
}

/// Logging and statistics configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Days between stats history snapshots
    pub stats_interval: u64,
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

/// Parallel scenario runner configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// Number of independent simulations
    pub count: usize,
    /// Seed distance between consecutive scenarios
    pub seed_stride: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            weather: WeatherConfig::default(),
            species: default_species(),
            logging: LoggingConfig::default(),
            scenarios: ScenarioConfig::default(),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            years: 5,
            season_length: 240,
            initial_bees: 60.0,
            seed: 1000,
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            latitude: 48.0,
            day_of_year_start: 80,
            day_length: DayLengthModel::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            stats_interval: 30,
            log_level: "info".to_string(),
        }
    }
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            count: 4,
            seed_stride: 37,
        }
    }
}

/// A small meadow: an early and a late perennial plus an annual
fn default_species() -> Vec<SpeciesParams> {
    vec![
        SpeciesParams {
            name: "cowslip".to_string(),
            initial_vigor: 30.0,
            c_min: 0.8,
            c_max: 1.5,
            f_min: 0.05,
            f_max: 0.6,
            h_start: 150.0,
            h_end: 600.0,
            bloom_rate: 0.015,
            pollination_rate: 0.004,
            reproduction: Reproduction::perennial(),
        },
        SpeciesParams {
            name: "knapweed".to_string(),
            initial_vigor: 45.0,
            c_min: 0.85,
            c_max: 1.6,
            f_min: 0.04,
            f_max: 0.35,
            h_start: 500.0,
            h_end: 1200.0,
            bloom_rate: 0.02,
            pollination_rate: 0.006,
            reproduction: Reproduction::perennial(),
        },
        SpeciesParams {
            name: "cornflower".to_string(),
            initial_vigor: 20.0,
            c_min: 0.7,
            c_max: 1.8,
            f_min: 0.06,
            f_max: 0.5,
            h_start: 350.0,
            h_end: 900.0,
            bloom_rate: 0.04,
            pollination_rate: 0.012,
            reproduction: Reproduction::annual(),
        },
    ]
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.simulation.years == 0 {
            return Err(ConfigError::Invalid("years must be > 0".to_string()));
        }
        if self.simulation.season_length == 0 {
            return Err(ConfigError::Invalid("season_length must be > 0".to_string()));
        }
        if !self.simulation.initial_bees.is_finite() {
            return Err(ConfigError::Invalid("initial_bees must be finite".to_string()));
        }
        if self.species.is_empty() {
            return Err(ConfigError::Invalid("at least one species is required".to_string()));
        }
        if self.logging.stats_interval == 0 {
            return Err(ConfigError::Invalid("stats_interval must be > 0".to_string()));
        }
        self.build_species()?;
        Ok(())
    }

    /// Build fresh plant species from the configured parameters
    pub fn build_species(&self) -> Result<Vec<PlantSpecies>, SpeciesError> {
        self.species.iter().cloned().map(PlantSpecies::new).collect()
    }

    /// Seed of the simulation's own stream for a given weather seed
    pub fn simulation_seed(seed: u64) -> u64 {
        seed.wrapping_add(SIMULATION_SEED_OFFSET)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.build_species().unwrap().len(), 3);
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let loaded: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(config.simulation.years, loaded.simulation.years);
        assert_eq!(config.species, loaded.species);
        assert_eq!(config.weather.day_length, loaded.weather.day_length);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut config = Config::default();
        config.simulation.years = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = Config::default();
        config.simulation.season_length = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.species.clear();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.species[1].bloom_rate = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::Species(_))));
    }

    #[test]
    fn test_minimal_yaml_uses_section_defaults() {
        let yaml = r#"
simulation:
  years: 2
  season_length: 120
  initial_bees: 30.0
  seed: 7
species:
  - name: clover
    initial_vigor: 25.0
    c_min: 0.9
    c_max: 1.4
    f_min: 0.3
    f_max: 0.7
    h_start: 200.0
    h_end: 700.0
    bloom_rate: 0.02
    pollination_rate: 0.005
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.weather.latitude, 48.0);
        assert_eq!(config.logging.stats_interval, 30);
        assert_eq!(config.species[0].reproduction, Reproduction::perennial());
    }

    #[test]
    fn test_astronomical_day_length_yaml() {
        let yaml = "latitude: 60.0\nday_of_year_start: 100\nday_length:\n  model: astronomical\n";
        let weather: WeatherConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(weather.day_length, DayLengthModel::Astronomical);
    }

    #[test]
    fn test_file_roundtrip() {
        let path = std::env::temp_dir().join("meadow_test_config.yaml");
        let config = Config::default();
        config.save(&path).unwrap();
        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded.simulation.seed, config.simulation.seed);
        std::fs::remove_file(&path).ok();
    }
}
