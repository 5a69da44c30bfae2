//! Uniform random scalars for jitter and directional sampling.
//!
//! Emitters only ever ask for one number at a time through
//! [`PointSampler::next_uniform`], so a seeded generator and a scripted
//! sequence are interchangeable.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of uniformly distributed scalars in `[0, 1)`.
pub trait PointSampler: Send {
    fn next_uniform(&mut self) -> f32;
}

/// Deterministic sampler backed by ChaCha8.
///
/// Two samplers built from the same seed produce the same sequence.
#[derive(Clone, Debug)]
pub struct SeededSampler {
    rng: ChaCha8Rng,
}

impl SeededSampler {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Default for SeededSampler {
    fn default() -> Self {
        Self::new(0)
    }
}

impl PointSampler for SeededSampler {
    fn next_uniform(&mut self) -> f32 {
        self.rng.gen::<f32>()
    }
}

/// Replays a fixed list of values, wrapping around at the end.
///
/// Values are clamped into `[0, 1)` so a script can never break the
/// sampler contract.
#[derive(Clone, Debug)]
pub struct SequenceSampler {
    values: Vec<f32>,
    cursor: usize,
}

impl SequenceSampler {
    pub fn new(values: impl Into<Vec<f32>>) -> Self {
        let values = values
            .into()
            .into_iter()
            .map(|v| v.clamp(0.0, 1.0 - f32::EPSILON))
            .collect();
        Self { values, cursor: 0 }
    }

    /// Sampler that always returns `value`.
    pub fn constant(value: f32) -> Self {
        Self::new(vec![value])
    }
}

impl PointSampler for SequenceSampler {
    fn next_uniform(&mut self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor];
        self.cursor = (self.cursor + 1) % self.values.len();
        value
    }
}
