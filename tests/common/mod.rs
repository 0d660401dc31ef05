//! Shared scenario samplers for integration tests

#![allow(dead_code)]

use mcstat::prelude::RngSampler;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

/// One travel-time observation `16 + 3U1 + 5U2 + 12U3 + 6U4`
pub fn trip<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    16.0 + 3.0 * rng.gen::<f64>()
        + 5.0 * rng.gen::<f64>()
        + 12.0 * rng.gen::<f64>()
        + 6.0 * rng.gen::<f64>()
}

pub const TRIP_MEAN: f64 = 29.0;
pub const TRIP_EXTREMES: (f64, f64) = (16.0, 42.0);

pub fn travel_time(seed: u64) -> RngSampler<ChaCha8Rng, fn(&mut ChaCha8Rng) -> f64> {
    RngSampler::seeded(seed, trip::<ChaCha8Rng> as fn(&mut ChaCha8Rng) -> f64)
}
