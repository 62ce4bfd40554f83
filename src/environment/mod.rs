//! Abiotic environment: day length and daily weather.

pub mod daylength;
pub mod weather;

pub use daylength::{Astronomical, DayLength, DayLengthModel, Triangular};
pub use weather::{DayWeather, Weather, SEASON_DAYS};
