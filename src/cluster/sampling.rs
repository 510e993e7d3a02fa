//! Center retention sampling

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Draws the per-round center retention decisions.
///
/// Each previous-round center survives into the next round independently
/// with probability `n^(-1/k)`: a uniform real in `[0, 1)` is compared
/// against the precomputed threshold. The RNG does not need to be
/// cryptographically secure, but it must be seedable so runs can be
/// reproduced exactly.
pub struct CenterSampler {
    rng: SmallRng,
    retention: f64,
}

impl CenterSampler {
    /// Build a sampler for a graph of `vertex_count` vertices and stretch
    /// parameter `k`; an unseeded sampler draws its seed from OS entropy
    pub fn new(vertex_count: usize, k: u32, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        let retention = if vertex_count == 0 {
            0.0
        } else {
            (vertex_count as f64).powf(-1.0 / f64::from(k))
        };
        Self { rng, retention }
    }

    /// Retention probability `n^(-1/k)`
    pub fn retention(&self) -> f64 {
        self.retention
    }

    /// Decide whether one center survives into the next round
    pub fn keep(&mut self) -> bool {
        self.rng.gen::<f64>() < self.retention
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_yields_identical_decisions() {
        let mut a = CenterSampler::new(100, 3, Some(0xC0FFEE));
        let mut b = CenterSampler::new(100, 3, Some(0xC0FFEE));
        for _ in 0..1_000 {
            assert_eq!(a.keep(), b.keep());
        }
    }

    #[test]
    fn retention_matches_configured_probability() {
        let mut sampler = CenterSampler::new(16, 2, Some(0xBEEF));
        assert!((sampler.retention() - 0.25).abs() < 1e-9);
        let kept = (0..20_000).filter(|_| sampler.keep()).count();
        let rate = kept as f64 / 20_000.0;
        assert!((rate - 0.25).abs() < 0.02, "observed rate {rate} too far from 0.25");
    }

    #[test]
    fn single_vertex_graph_always_retains() {
        let mut sampler = CenterSampler::new(1, 4, Some(1));
        assert!((sampler.retention() - 1.0).abs() < 1e-12);
        assert!((0..100).all(|_| sampler.keep()));
    }
}
