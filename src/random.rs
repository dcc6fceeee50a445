//! Injected random-source capability.
//!
//! Every random draw consumed by the optimizer routes through a single
//! [`RandomSource`] handle so a fixed seed reproduces a run bit-for-bit.
//! Nothing in the core falls back to an ambient/global generator; in
//! particular the curiosity subset sampling draws from the same stream as
//! the velocity update.

use rand::prelude::*;
use rand::rngs::StdRng;

/// Random-source capability consumed by particles and swarms.
///
/// Implementors supply uniform scalars in `[0, 1)`, standard-normal
/// scalars, and sampling-without-replacement of index subsets. The
/// vector form has a default implementation in terms of [`uniform`].
///
/// [`uniform`]: RandomSource::uniform
pub trait RandomSource {
    /// One uniform draw in `[0, 1)`.
    fn uniform(&mut self) -> f64;

    /// One standard-normal draw.
    fn standard_normal(&mut self) -> f64;

    /// `k` distinct indices drawn without replacement from `0..n`.
    ///
    /// Callers must ensure `k <= n`.
    fn sample_indices(&mut self, n: usize, k: usize) -> Vec<usize>;

    /// `dim` independent uniform draws in `[0, 1)`.
    fn uniform_vector(&mut self, dim: usize) -> Vec<f64> {
        (0..dim).map(|_| self.uniform()).collect()
    }
}

/// Default [`RandomSource`] backed by [`StdRng`].
///
/// # Example
///
/// ```
/// use curioso::{RandomSource, SeededSource};
///
/// let mut a = SeededSource::new(42);
/// let mut b = SeededSource::new(42);
/// assert_eq!(a.uniform(), b.uniform());
/// ```
#[derive(Debug, Clone)]
pub struct SeededSource {
    rng: StdRng,
}

impl SeededSource {
    /// Create a reproducible source from a seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create a non-reproducible source seeded from the operating system.
    #[must_use]
    pub fn from_os_rng() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl RandomSource for SeededSource {
    fn uniform(&mut self) -> f64 {
        self.rng.random()
    }

    /// Box-Muller transform; avoids a distribution-crate dependency.
    fn standard_normal(&mut self) -> f64 {
        let u1: f64 = self.rng.random::<f64>().max(1e-10);
        let u2: f64 = self.rng.random();
        (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
    }

    fn sample_indices(&mut self, n: usize, k: usize) -> Vec<usize> {
        debug_assert!(k <= n, "cannot draw {k} distinct indices from 0..{n}");
        let mut indices = Vec::with_capacity(k);
        // Rejection sampling; k is small relative to n in practice.
        while indices.len() < k {
            let idx = self.rng.random_range(0..n);
            if !indices.contains(&idx) {
                indices.push(idx);
            }
        }
        indices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_in_unit_interval() {
        let mut rng = SeededSource::new(1);
        for _ in 0..1000 {
            let x = rng.uniform();
            assert!((0.0..1.0).contains(&x));
        }
    }

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = SeededSource::new(99);
        let mut b = SeededSource::new(99);
        for _ in 0..100 {
            assert_eq!(a.uniform(), b.uniform());
        }
        assert_eq!(a.standard_normal(), b.standard_normal());
        assert_eq!(a.sample_indices(50, 10), b.sample_indices(50, 10));
    }

    #[test]
    fn test_uniform_vector_length() {
        let mut rng = SeededSource::new(3);
        assert_eq!(rng.uniform_vector(7).len(), 7);
    }

    #[test]
    fn test_sample_indices_distinct_and_in_range() {
        let mut rng = SeededSource::new(5);
        for _ in 0..50 {
            let picks = rng.sample_indices(12, 10);
            assert_eq!(picks.len(), 10);
            let mut sorted = picks.clone();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(sorted.len(), 10, "indices must be distinct");
            assert!(picks.iter().all(|&i| i < 12));
        }
    }

    #[test]
    fn test_sample_indices_full_range() {
        let mut rng = SeededSource::new(7);
        let mut picks = rng.sample_indices(10, 10);
        picks.sort_unstable();
        assert_eq!(picks, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_standard_normal_moments() {
        let mut rng = SeededSource::new(11);
        let n = 20_000;
        let samples: Vec<f64> = (0..n).map(|_| rng.standard_normal()).collect();
        let mean = samples.iter().sum::<f64>() / n as f64;
        let var = samples.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>() / n as f64;
        assert!(mean.abs() < 0.05, "mean {mean} too far from 0");
        assert!((var - 1.0).abs() < 0.1, "variance {var} too far from 1");
    }
}
