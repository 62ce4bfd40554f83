//! Statistics tracking for the simulation.

use crate::ecosystem::Ecosystem;
use crate::environment::DayWeather;
use crate::pollinator::{BeePopulation, Pollinator};
use serde::{Deserialize, Serialize};

/// Statistics snapshot for a simulated day
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    /// Year being simulated (1-based)
    pub year: u32,
    /// Day within the season (1-based, 0 before the first day)
    pub day: u32,
    /// Days simulated since the start of the run
    pub total_days: u64,
    /// Bee population after today's update
    pub population: f64,
    /// Total food on offer today
    pub total_food: f64,
    /// Mean vigor across species
    pub vigor_mean: f64,
    /// Mean bloom fraction across species
    pub bloom_mean: f64,
    /// Mean seed set across species
    pub seed_set_mean: f64,
    /// Soil moisture today
    pub soil_moisture: f64,
    /// Sunshine accumulated this season
    pub cumulative_sun_hours: f64,
}

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refresh from the state at the end of a simulated day
    pub fn update(
        &mut self,
        ecosystem: &Ecosystem,
        bees: &BeePopulation,
        weather: &DayWeather,
        total_food: f64,
    ) {
        self.population = bees.population();
        self.total_food = total_food;
        self.vigor_mean = ecosystem.mean_vigor();
        self.bloom_mean = ecosystem.mean_bloom_fraction();
        self.seed_set_mean = ecosystem.mean_seed_set();
        self.soil_moisture = weather.soil_moisture;
        self.cumulative_sun_hours = weather.cumulative_sun_hours;
    }

    /// Format stats as a one-line summary
    pub fn summary(&self) -> String {
        format!(
            "Y:{:3} D:{:3} | Bees:{:10.2} | Food:{:9.2} | Vigor:{:8.2} | Bloom:{:.3} | Seed:{:.3} | Moist:{:.2}",
            self.year,
            self.day,
            self.population,
            self.total_food,
            self.vigor_mean,
            self.bloom_mean,
            self.seed_set_mean,
            self.soil_moisture,
        )
    }
}

/// Historical statistics tracker
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StatsHistory {
    /// All recorded stats snapshots
    pub snapshots: Vec<Stats>,
    /// Recording interval in days
    pub interval: u64,
}

impl StatsHistory {
    /// Create new history with recording interval
    pub fn new(interval: u64) -> Self {
        Self {
            snapshots: Vec::new(),
            interval: interval.max(1),
        }
    }

    /// Whether a snapshot is due after `total_days` simulated days
    pub fn is_due(&self, total_days: u64) -> bool {
        total_days > 0 && total_days % self.interval.max(1) == 0
    }

    /// Record a stats snapshot
    pub fn record(&mut self, stats: Stats) {
        self.snapshots.push(stats);
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Bee population over time
    pub fn population_series(&self) -> Vec<(u64, f64)> {
        self.snapshots
            .iter()
            .map(|s| (s.total_days, s.population))
            .collect()
    }

    /// Mean vigor over time
    pub fn vigor_series(&self) -> Vec<(u64, f64)> {
        self.snapshots
            .iter()
            .map(|s| (s.total_days, s.vigor_mean))
            .collect()
    }

    /// Total food over time
    pub fn food_series(&self) -> Vec<(u64, f64)> {
        self.snapshots
            .iter()
            .map(|s| (s.total_days, s.total_food))
            .collect()
    }

    /// Save history to file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
    }

    /// Load history from file
    pub fn load(path: &str) -> std::io::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json).map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}
