//! Sampling function abstraction
//!
//! Estimators never own a random source. They call a [`SamplingFunction`]
//! with a requested count and receive an owned buffer of i.i.d.
//! observations. Randomness lives inside the sampler, which keeps runs
//! reproducible when the sampler is seeded.

use crate::{Error, Result};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A source of i.i.d. real-valued observations
///
/// Successive calls must be independent draws from the same distribution.
pub trait SamplingFunction {
    /// Draw `n` observations
    fn draw(&mut self, n: usize) -> Vec<f64>;

    /// Draw `n` observations and verify the sampler honoured the count
    fn draw_checked(&mut self, n: usize) -> Result<Vec<f64>> {
        if n == 0 {
            return Err(Error::InvalidParameter(
                "Sample count must be positive".to_string(),
            ));
        }
        let values = self.draw(n);
        if values.len() != n {
            return Err(Error::size_mismatch(n, values.len(), "sampling function output"));
        }
        Ok(values)
    }
}

impl<F> SamplingFunction for F
where
    F: FnMut(usize) -> Vec<f64>,
{
    fn draw(&mut self, n: usize) -> Vec<f64> {
        self(n)
    }
}

/// Sampler that owns its random generator and evaluates a per-observation closure
///
/// # Example
///
/// ```rust
/// use mcstat_core::{RngSampler, SamplingFunction};
/// use rand::Rng;
///
/// // Y = 16 + 3U1 + 5U2 + 12U3 + 6U4
/// let mut sampler = RngSampler::seeded(7, |rng| {
///     16.0 + 3.0 * rng.gen::<f64>() + 5.0 * rng.gen::<f64>()
///         + 12.0 * rng.gen::<f64>() + 6.0 * rng.gen::<f64>()
/// });
/// let draws = sampler.draw(100);
/// assert_eq!(draws.len(), 100);
/// assert!(draws.iter().all(|&y| (16.0..=42.0).contains(&y)));
/// ```
#[derive(Debug, Clone)]
pub struct RngSampler<R, F> {
    rng: R,
    observe: F,
}

impl<R, F> RngSampler<R, F>
where
    R: Rng,
    F: FnMut(&mut R) -> f64,
{
    pub fn new(rng: R, observe: F) -> Self {
        Self { rng, observe }
    }

    /// Access the underlying generator
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }
}

impl<F> RngSampler<ChaCha8Rng, F>
where
    F: FnMut(&mut ChaCha8Rng) -> f64,
{
    /// Create a reproducible sampler from a seed
    pub fn seeded(seed: u64, observe: F) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed), observe)
    }
}

impl<R, F> SamplingFunction for RngSampler<R, F>
where
    R: Rng,
    F: FnMut(&mut R) -> f64,
{
    fn draw(&mut self, n: usize) -> Vec<f64> {
        (0..n).map(|_| (self.observe)(&mut self.rng)).collect()
    }
}

/// Sampler that evaluates chunks of a draw on the rayon thread pool
///
/// Each chunk gets its own ChaCha stream derived from the seed, the call
/// number and the chunk index, so output does not depend on scheduling.
#[cfg(feature = "parallel")]
#[derive(Debug, Clone)]
pub struct ParallelSampler<F> {
    seed: u64,
    chunk_size: usize,
    calls: u64,
    observe: F,
}

#[cfg(feature = "parallel")]
impl<F> ParallelSampler<F>
where
    F: Fn(&mut ChaCha8Rng) -> f64 + Sync,
{
    /// Default number of observations per chunk
    pub const DEFAULT_CHUNK_SIZE: usize = 16_384;

    pub fn new(seed: u64, observe: F) -> Self {
        Self {
            seed,
            chunk_size: Self::DEFAULT_CHUNK_SIZE,
            calls: 0,
            observe,
        }
    }

    /// Set the number of observations generated per task
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }
}

#[cfg(feature = "parallel")]
impl<F> SamplingFunction for ParallelSampler<F>
where
    F: Fn(&mut ChaCha8Rng) -> f64 + Sync,
{
    fn draw(&mut self, n: usize) -> Vec<f64> {
        use rayon::prelude::*;

        let call = self.calls;
        self.calls += 1;

        let chunk_size = self.chunk_size;
        let n_chunks = n.div_ceil(chunk_size);
        let seed = self.seed;
        let observe = &self.observe;

        let chunks: Vec<Vec<f64>> = (0..n_chunks)
            .into_par_iter()
            .map(|chunk| {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                rng.set_stream((call << 32) | chunk as u64);
                let len = chunk_size.min(n - chunk * chunk_size);
                (0..len).map(|_| observe(&mut rng)).collect()
            })
            .collect();

        chunks.concat()
    }
}
