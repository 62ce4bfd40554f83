//! Stochastic daily weather generator.
//!
//! Cloud cover follows a mean-reverting AR(1) process with high persistence so
//! wet and dry spells last several days. Sunshine, rain and evaporation are
//! derived from the cloud cover and the day length provider.

use super::daylength::{DayLength, HOURS_PER_DAY};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};

/// Default season length in days
pub const SEASON_DAYS: u32 = 240;

/// Day length used to normalise evaporation
const MAX_DAY_LENGTH: f64 = 16.0;

/// Cloud persistence (higher -> longer dry/wet spells)
const CLOUD_RHO: f64 = 0.93;

/// Daily cloud volatility
const CLOUD_SIGMA: f64 = 0.10;

/// Cloud fraction above which rain becomes possible
const RAIN_THRESHOLD: f64 = 0.55;

const MIN_SOIL_MOISTURE: f64 = 0.05;
const DAYS_PER_YEAR: u32 = 365;

/// Weather snapshot for a single day
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DayWeather {
    /// Hours of sunshine today
    pub sun_hours_today: f64,
    /// Sunshine accumulated since season start
    pub cumulative_sun_hours: f64,
    /// Soil moisture in [0.05, 1]
    pub soil_moisture: f64,
}

/// Stateful weather generator with its own random stream
pub struct Weather {
    rng: ChaCha8Rng,
    day_length: Box<dyn DayLength>,
    latitude: f64,
    day_of_year_start: u32,
    season_length: u32,

    day: u32,
    day_of_year: u32,
    cumulative_sun_hours: f64,
    soil_moisture: f64,
    cloud_fraction: f64,
}

impl Weather {
    /// Create a generator seeded for reproducibility
    pub fn new(seed: u64, day_length: Box<dyn DayLength>, latitude: f64, day_of_year_start: u32) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            day_length,
            latitude,
            day_of_year_start,
            season_length: SEASON_DAYS,
            day: 0,
            day_of_year: day_of_year_start,
            cumulative_sun_hours: 0.0,
            soil_moisture: 0.5,
            cloud_fraction: 0.5,
        }
    }

    /// Override the season length used to cap the day counter
    pub fn with_season_length(mut self, season_length: u32) -> Self {
        self.season_length = season_length;
        self
    }

    /// Reset the season: fresh moisture and cloud draws, counters back to zero
    pub fn start_season(&mut self) {
        self.day = 0;
        self.cumulative_sun_hours = 0.0;
        self.soil_moisture = self.rng.gen::<f64>().clamp(MIN_SOIL_MOISTURE, 1.0);
        self.cloud_fraction = self.rng.gen::<f64>();
        self.day_of_year = self.day_of_year_start;
    }

    /// Advance one day and return its snapshot
    pub fn next_day(&mut self) -> DayWeather {
        self.day = (self.day + 1).min(self.season_length);

        let noise: f64 = self.rng.sample(StandardNormal);
        self.cloud_fraction =
            (0.5 + CLOUD_RHO * (self.cloud_fraction - 0.5) + CLOUD_SIGMA * noise).clamp(0.0, 1.0);

        if !(1..=DAYS_PER_YEAR).contains(&self.day_of_year) {
            self.day_of_year = 1;
        }
        let today = self.day_of_year;
        self.day_of_year = if today >= DAYS_PER_YEAR { 1 } else { today + 1 };

        let day_length = self
            .day_length
            .hours(today as i32, self.latitude)
            .clamp(0.0, HOURS_PER_DAY);
        let sun = (day_length * (1.0 - self.cloud_fraction)).max(0.0);
        self.cumulative_sun_hours += sun;

        // Rain only on markedly cloudy days; amount scales with the cloud excess
        let rain_chance = (self.cloud_fraction - RAIN_THRESHOLD).max(0.0);
        let rains = self.rng.gen::<f64>() < rain_chance;
        let rain = if rains {
            rain_chance * (0.02 + 0.04 * self.rng.gen::<f64>())
        } else {
            0.0
        };

        let evaporation = 0.01 + 0.04 * (sun / MAX_DAY_LENGTH);
        self.soil_moisture = (self.soil_moisture + rain - evaporation).clamp(MIN_SOIL_MOISTURE, 1.0);

        log::trace!(
            "weather day {} (doy {}): cloud={:.3} sun={:.2} moisture={:.3}",
            self.day,
            today,
            self.cloud_fraction,
            sun,
            self.soil_moisture
        );

        DayWeather {
            sun_hours_today: sun,
            cumulative_sun_hours: self.cumulative_sun_hours,
            soil_moisture: self.soil_moisture,
        }
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn day_of_year(&self) -> u32 {
        self.day_of_year
    }

    pub fn cloud_fraction(&self) -> f64 {
        self.cloud_fraction
    }

    pub fn soil_moisture(&self) -> f64 {
        self.soil_moisture
    }

    pub fn cumulative_sun_hours(&self) -> f64 {
        self.cumulative_sun_hours
    }

    pub fn season_length(&self) -> u32 {
        self.season_length
    }
}

impl std::fmt::Debug for Weather {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Weather")
            .field("day", &self.day)
            .field("day_of_year", &self.day_of_year)
            .field("cumulative_sun_hours", &self.cumulative_sun_hours)
            .field("soil_moisture", &self.soil_moisture)
            .field("cloud_fraction", &self.cloud_fraction)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::daylength::{Astronomical, Triangular};

    fn triangle_weather(seed: u64) -> Weather {
        Weather::new(seed, Box::new(Triangular::new(240, 8.0, 16.0)), 48.0, 1)
    }

    #[test]
    fn test_start_season_resets_counters() {
        let mut weather = triangle_weather(7);
        weather.start_season();
        for _ in 0..10 {
            weather.next_day();
        }
        assert_eq!(weather.day(), 10);
        assert!(weather.cumulative_sun_hours() > 0.0);

        weather.start_season();
        assert_eq!(weather.day(), 0);
        assert_eq!(weather.cumulative_sun_hours(), 0.0);
        assert_eq!(weather.day_of_year(), 1);
    }

    #[test]
    fn test_state_stays_in_range() {
        let mut weather = Weather::new(99, Box::new(Astronomical), 60.0, 300);
        for _ in 0..3 {
            weather.start_season();
            for _ in 0..SEASON_DAYS {
                let w = weather.next_day();
                assert!((0.05..=1.0).contains(&w.soil_moisture));
                assert!((0.0..=1.0).contains(&weather.cloud_fraction()));
                assert!(w.sun_hours_today >= 0.0 && w.sun_hours_today <= 24.0);
                assert!((1..=365).contains(&weather.day_of_year()));
            }
        }
    }

    #[test]
    fn test_cumulative_sun_accumulates() {
        let mut weather = triangle_weather(3);
        weather.start_season();
        let mut total = 0.0;
        for _ in 0..50 {
            let w = weather.next_day();
            total += w.sun_hours_today;
            assert!((w.cumulative_sun_hours - total).abs() < 1e-9);
        }
    }

    #[test]
    fn test_day_counter_caps_at_season_length() {
        let mut weather = triangle_weather(5).with_season_length(10);
        weather.start_season();
        for _ in 0..25 {
            weather.next_day();
        }
        assert_eq!(weather.day(), 10);
    }

    #[test]
    fn test_day_of_year_wraps() {
        let mut weather = Weather::new(5, Box::new(Astronomical), 10.0, 364);
        weather.start_season();
        weather.next_day(); // 364
        weather.next_day(); // 365
        assert_eq!(weather.day_of_year(), 1);
        weather.next_day();
        assert_eq!(weather.day_of_year(), 2);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = triangle_weather(42);
        let mut b = triangle_weather(42);
        a.start_season();
        b.start_season();
        for _ in 0..SEASON_DAYS {
            assert_eq!(a.next_day(), b.next_day());
        }
    }

    #[test]
    fn test_polar_night_has_no_sun() {
        let mut weather = Weather::new(11, Box::new(Astronomical), 89.0, 340);
        weather.start_season();
        for _ in 0..20 {
            let w = weather.next_day();
            assert_eq!(w.sun_hours_today, 0.0);
        }
        assert_eq!(weather.cumulative_sun_hours(), 0.0);
    }
}
