//! Random sources for galaxy generation and highlighting.
//!
//! Everything that needs randomness takes a `&mut impl RandomSource` instead of
//! reaching for a global RNG, so generation can be replayed from a known
//! sequence in tests.
//!
//! ```ignore
//! use galaxy::random::{RngSource, SequenceSource};
//!
//! // Live app: fast RNG seeded from the clock
//! let mut rng = RngSource::from_entropy();
//!
//! // Tests: cycle through known values
//! let mut rng = SequenceSource::new(vec![0.5, 0.25, 0.75]);
//! ```

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Source of uniformly distributed `f32` values in `[0, 1)`.
pub trait RandomSource {
    /// Next value in `[0, 1)`.
    fn next_f32(&mut self) -> f32;
}

impl<T: RandomSource + ?Sized> RandomSource for &mut T {
    fn next_f32(&mut self) -> f32 {
        (**self).next_f32()
    }
}

/// Adapter that turns any [`rand::Rng`] into a [`RandomSource`].
#[derive(Debug, Clone)]
pub struct RngSource<R>(pub R);

impl RngSource<SmallRng> {
    /// Fast RNG seeded from the system clock.
    ///
    /// Different every program execution.
    pub fn from_entropy() -> Self {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42);
        Self::seeded(seed)
    }

    /// Fast RNG with a fixed seed, reproducible across runs.
    pub fn seeded(seed: u64) -> Self {
        Self(SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    #[inline]
    fn next_f32(&mut self) -> f32 {
        self.0.gen()
    }
}

/// Deterministic source that cycles through a fixed list of values.
///
/// Values are clamped into `[0, 1)` on construction. An empty list always
/// yields `0.0`.
#[derive(Debug, Clone)]
pub struct SequenceSource {
    values: Vec<f32>,
    cursor: usize,
}

impl SequenceSource {
    /// Create a source that replays `values` in order, wrapping around.
    pub fn new(values: Vec<f32>) -> Self {
        let values = values
            .into_iter()
            .map(|v| v.clamp(0.0, 1.0 - f32::EPSILON))
            .collect();
        Self { values, cursor: 0 }
    }

    /// Number of values drawn so far.
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for SequenceSource {
    fn next_f32(&mut self) -> f32 {
        if self.values.is_empty() {
            self.cursor += 1;
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_source_range() {
        let mut rng = RngSource::seeded(7);
        for _ in 0..1000 {
            let v = rng.next_f32();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let mut a = RngSource::seeded(1234);
        let mut b = RngSource::seeded(1234);
        for _ in 0..16 {
            assert_eq!(a.next_f32(), b.next_f32());
        }
    }

    #[test]
    fn test_sequence_wraps() {
        let mut seq = SequenceSource::new(vec![0.1, 0.2, 0.3]);
        let drawn: Vec<f32> = (0..5).map(|_| seq.next_f32()).collect();
        assert_eq!(drawn, vec![0.1, 0.2, 0.3, 0.1, 0.2]);
        assert_eq!(seq.draws(), 5);
    }

    #[test]
    fn test_sequence_clamps_one() {
        let mut seq = SequenceSource::new(vec![1.0, -3.0]);
        assert!(seq.next_f32() < 1.0);
        assert_eq!(seq.next_f32(), 0.0);
    }

    #[test]
    fn test_empty_sequence_yields_zero() {
        let mut seq = SequenceSource::new(Vec::new());
        assert_eq!(seq.next_f32(), 0.0);
        assert_eq!(seq.next_f32(), 0.0);
    }

    #[test]
    fn test_mut_ref_forwards() {
        fn draw(mut source: impl RandomSource) -> f32 {
            source.next_f32()
        }

        let mut seq = SequenceSource::new(vec![0.5]);
        assert_eq!(draw(&mut seq), 0.5);
        assert_eq!(seq.draws(), 1);
    }
}
