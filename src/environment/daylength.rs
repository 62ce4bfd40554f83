//! Day-length providers.
//!
//! The weather generator only needs the number of daylight hours for a given
//! day of the year and latitude. Two providers ship with the crate: an
//! astronomical one based on solar declination and a triangular seasonal
//! approximation.

use serde::{Deserialize, Serialize};

/// Hours in a full day
pub const HOURS_PER_DAY: f64 = 24.0;

/// Source of daylight hours for the weather generator.
///
/// Implementations must return a value in `[0, 24]` for any input.
pub trait DayLength: Send + Sync {
    fn hours(&self, day_of_year: i32, latitude: f64) -> f64;
}

/// Day length from the solar declination formula
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Astronomical;

impl DayLength for Astronomical {
    fn hours(&self, day_of_year: i32, latitude: f64) -> f64 {
        let day = if (1..=366).contains(&day_of_year) {
            day_of_year
        } else {
            1
        };
        let latitude = if latitude.is_nan() { 0.0 } else { latitude };
        let phi = latitude.clamp(-89.0, 89.0).to_radians();

        let declination = (-23.44 * ((360.0 / 365.0) * (day as f64 + 10.0)).to_radians().cos())
            .to_radians();

        // cos of the sunset hour angle
        let x = -phi.tan() * declination.tan();
        if x >= 1.0 {
            return 0.0; // polar night
        }
        if x <= -1.0 {
            return HOURS_PER_DAY; // polar day
        }

        // 15 degrees of hour angle per hour
        let daylight = 2.0 * x.acos().to_degrees() / 15.0;
        daylight.clamp(0.0, HOURS_PER_DAY)
    }
}

/// Linear rise from `min_hours` to `max_hours` over the first half of the
/// cycle, then back down.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangular {
    pub season_days: u32,
    pub min_hours: f64,
    pub max_hours: f64,
}

impl Triangular {
    pub fn new(season_days: u32, min_hours: f64, max_hours: f64) -> Self {
        Self {
            season_days: season_days.max(2),
            min_hours,
            max_hours,
        }
    }
}

impl DayLength for Triangular {
    fn hours(&self, day_of_year: i32, _latitude: f64) -> f64 {
        let season = self.season_days.max(2) as i64;
        let d = (day_of_year as i64 - 1).rem_euclid(season) + 1;
        let mid = season / 2;
        let span = self.max_hours - self.min_hours;

        let hours = if d <= mid {
            self.min_hours + span * (d as f64 / mid as f64)
        } else {
            let t = (d - mid) as f64 / mid as f64;
            self.max_hours - span * t
        };
        hours.clamp(0.0, HOURS_PER_DAY)
    }
}

/// Day-length provider selection, as stored in configuration files
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum DayLengthModel {
    Astronomical,
    Triangular {
        season_days: u32,
        min_hours: f64,
        max_hours: f64,
    },
}

impl Default for DayLengthModel {
    fn default() -> Self {
        DayLengthModel::Triangular {
            season_days: 240,
            min_hours: 8.0,
            max_hours: 16.0,
        }
    }
}

impl DayLengthModel {
    /// Build the provider this selection describes
    pub fn build(&self) -> Box<dyn DayLength> {
        match *self {
            DayLengthModel::Astronomical => Box::new(Astronomical),
            DayLengthModel::Triangular {
                season_days,
                min_hours,
                max_hours,
            } => Box::new(Triangular::new(season_days, min_hours, max_hours)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_polar_night_and_day() {
        let astro = Astronomical;
        // Midwinter in the northern hemisphere
        assert_eq!(astro.hours(355, 89.0), 0.0);
        // Midsummer
        assert_eq!(astro.hours(172, 89.0), 24.0);
    }

    #[test]
    fn test_equator_is_about_twelve_hours() {
        let astro = Astronomical;
        for day in [1, 80, 172, 266, 355] {
            assert_relative_eq!(astro.hours(day, 0.0), 12.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_astronomical_defensive_inputs() {
        let astro = Astronomical;
        assert_eq!(astro.hours(0, 48.0), astro.hours(1, 48.0));
        assert_eq!(astro.hours(400, 48.0), astro.hours(1, 48.0));
        assert_eq!(astro.hours(100, f64::NAN), astro.hours(100, 0.0));
        assert_eq!(astro.hours(172, 95.0), astro.hours(172, 89.0));
    }

    #[test]
    fn test_astronomical_bounded() {
        let astro = Astronomical;
        for lat in [-90.0, -60.0, -10.0, 0.0, 30.0, 66.0, 90.0] {
            for day in 1..=366 {
                let h = astro.hours(day, lat);
                assert!((0.0..=24.0).contains(&h), "day {} lat {} -> {}", day, lat, h);
            }
        }
    }

    #[test]
    fn test_triangle_shape() {
        let tri = Triangular::new(240, 8.0, 16.0);
        assert_relative_eq!(tri.hours(120, 0.0), 16.0);
        assert_relative_eq!(tri.hours(240, 0.0), 8.0);
        assert_relative_eq!(tri.hours(60, 0.0), 12.0);
        assert_relative_eq!(tri.hours(180, 0.0), 12.0);
        // Cycle wraps
        assert_relative_eq!(tri.hours(241, 0.0), tri.hours(1, 0.0));
    }

    #[test]
    fn test_triangle_ignores_latitude() {
        let tri = Triangular::new(240, 8.0, 16.0);
        assert_eq!(tri.hours(33, -45.0), tri.hours(33, 70.0));
    }

    #[test]
    fn test_model_build() {
        let model = DayLengthModel::default();
        let provider = model.build();
        assert_relative_eq!(provider.hours(120, 0.0), 16.0);

        let astro = DayLengthModel::Astronomical.build();
        assert_eq!(astro.hours(355, 89.0), 0.0);
    }
}
