//! Shared samplers for integration tests

#![allow(dead_code)]

use mcstat_core::RngSampler;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

/// Travel time `16 + 3U1 + 5U2 + 12U3 + 6U4`, mean 29, support [16, 42]
pub fn travel_time(seed: u64) -> RngSampler<ChaCha8Rng, impl FnMut(&mut ChaCha8Rng) -> f64> {
    RngSampler::seeded(seed, |rng| {
        16.0 + 3.0 * rng.gen::<f64>()
            + 5.0 * rng.gen::<f64>()
            + 12.0 * rng.gen::<f64>()
            + 6.0 * rng.gen::<f64>()
    })
}

pub const TRAVEL_TIME_MEAN: f64 = 29.0;

/// `U^p` for `U ~ Uniform(0, 1]`, mean `1 / (1 + p)` for `p > -1`
pub fn power_of_uniform(
    exponent: f64,
    seed: u64,
) -> RngSampler<ChaCha8Rng, impl FnMut(&mut ChaCha8Rng) -> f64> {
    RngSampler::seeded(seed, move |rng| (1.0 - rng.gen::<f64>()).powf(exponent))
}

pub fn power_of_uniform_mean(exponent: f64) -> f64 {
    1.0 / (1.0 + exponent)
}
