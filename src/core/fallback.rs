// Synthetic price generation for when the feed is unreachable

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Lower spread factor applied to the low threshold
pub const LOW_SPREAD: f64 = 0.85;
/// Upper spread factor applied to the high threshold
pub const HIGH_SPREAD: f64 = 1.15;

/// Interval the fallback draws from: `[low * 0.85, high * 1.15]`
pub fn fallback_bounds(low: f64, high: f64) -> (f64, f64) {
    let a = low * LOW_SPREAD;
    let b = high * HIGH_SPREAD;
    (a.min(b), a.max(b))
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Produces uniformly drawn prices that straddle the alerting band
#[derive(Debug, Clone)]
pub struct FallbackGenerator<R = StdRng> {
    rng: R,
}

impl FallbackGenerator<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Deterministic generator for reproducible runs
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> FallbackGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Draw a price from the fallback interval, rounded to 2 decimal places.
    ///
    /// Thresholds must pass `MonitorConfig::new`. The rounded value never
    /// leaves the interval unless the interval is narrower than one cent.
    pub fn synthesize(&mut self, low: f64, high: f64) -> f64 {
        let (lower, upper) = fallback_bounds(low, high);
        let draw = self.rng.gen_range(lower..=upper);
        let rounded = round_cents(draw);

        let floor = (lower * 100.0).ceil() / 100.0;
        let ceiling = (upper * 100.0).floor() / 100.0;
        if floor > ceiling {
            return rounded;
        }
        rounded.clamp(floor, ceiling)
    }
}

impl Default for FallbackGenerator<StdRng> {
    fn default() -> Self {
        Self::from_entropy()
    }
}
