//! Injectable randomness for the traffic simulator.
//!
//! # Determinism strategy
//!
//! Nothing in the planner touches ambient randomness.  Every random draw goes
//! through a [`RandomSource`] supplied by the caller:
//!
//! - [`SeededRandom`] wraps a `SmallRng` seeded from a `u64`.  The same seed
//!   always yields the same traffic snapshot, so whole planning requests are
//!   reproducible.
//! - [`SequenceRandom`] replays a fixed list of values, for tests that need to
//!   pin individual jitter draws exactly.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// A source of uniformly distributed values in `[0, 1)`.
pub trait RandomSource {
    /// Next value, uniform in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Next value, uniform in `[lo, hi]`.  Returns `lo` when `hi <= lo`.
    #[inline]
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        if hi <= lo {
            return lo;
        }
        lo + (hi - lo) * self.next_unit()
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    #[inline]
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

// ── SeededRandom ──────────────────────────────────────────────────────────────

/// Deterministic PRNG-backed source.
pub struct SeededRandom(SmallRng);

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        SeededRandom(SmallRng::seed_from_u64(seed))
    }

    /// Derive an independent child source, e.g. one per planning session.
    pub fn child(&mut self, offset: u64) -> SeededRandom {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SeededRandom(SmallRng::seed_from_u64(child_seed))
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }
}

impl RandomSource for SeededRandom {
    #[inline]
    fn next_unit(&mut self) -> f64 {
        self.0.r#gen::<f64>()
    }
}

// ── SequenceRandom ────────────────────────────────────────────────────────────

/// Replays a fixed sequence of values, cycling when exhausted.
///
/// Values are clamped into `[0, 1)` on construction.  An empty sequence
/// behaves like a constant `0.5`.
#[derive(Clone, Debug)]
pub struct SequenceRandom {
    values: Vec<f64>,
    pos:    usize,
}

impl SequenceRandom {
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        let values = values
            .into()
            .into_iter()
            .map(|v| if v.is_finite() { v.clamp(0.0, 1.0 - f64::EPSILON) } else { 0.5 })
            .collect();
        Self { values, pos: 0 }
    }

    /// A source that always returns `value`.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// Number of draws taken so far.
    pub fn draws(&self) -> usize {
        self.pos
    }
}

impl RandomSource for SequenceRandom {
    fn next_unit(&mut self) -> f64 {
        let v = if self.values.is_empty() {
            0.5
        } else {
            self.values[self.pos % self.values.len()]
        };
        self.pos += 1;
        v
    }
}
