//! Dormant seed storage bridging one season's seed set to the next season's
//! germination.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// A batch of seeds deposited at the end of a season
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeedOutput {
    pub count: u64,
    /// Seed quality in [0, 1]
    pub quality: f64,
}

impl SeedOutput {
    pub fn new(count: u64, quality: f64) -> Self {
        let quality = if quality.is_nan() { 0.0 } else { quality.clamp(0.0, 1.0) };
        Self { count, quality }
    }
}

/// Per-species seed bank.
///
/// `quality_avg` is the count-weighted mean quality of everything deposited
/// and is only meaningful while `stored > 0`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SeedBank {
    stored: u64,
    quality_avg: f64,
}

impl SeedBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deposit seeds, updating the average quality weighted by count
    pub fn add(&mut self, output: SeedOutput) {
        if output.count == 0 {
            return;
        }

        let total = self.stored.saturating_add(output.count);
        self.quality_avg = (self.stored as f64 * self.quality_avg
            + output.count as f64 * output.quality)
            / total as f64;
        self.stored = total;
    }

    /// Overwinter the bank and germinate part of the survivors.
    ///
    /// 50-80% of the stored seeds survive, 10-30% of the survivors germinate.
    /// Returns the number germinated; the rest stay dormant. An empty bank
    /// consumes no random draws.
    pub fn germinate<R: Rng + ?Sized>(&mut self, rng: &mut R) -> u64 {
        if self.stored == 0 {
            return 0;
        }

        let survival = 0.5 + 0.3 * rng.gen::<f64>();
        let survivors = ((self.stored as f64 * survival).round() as u64).min(self.stored);
        let germination = 0.1 + 0.2 * rng.gen::<f64>();
        let germinated = ((survivors as f64 * germination).round() as u64).min(survivors);

        self.stored = survivors - germinated;
        germinated
    }

    pub fn stored(&self) -> u64 {
        self.stored
    }

    pub fn quality_avg(&self) -> f64 {
        self.quality_avg
    }

    pub fn is_empty(&self) -> bool {
        self.stored == 0
    }
}
