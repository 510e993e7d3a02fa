//! Configuration for a spanner construction run

/// Parameters of one construction run
pub struct Config {
    /// Stretch parameter `k`; the spanner preserves pairwise distances
    /// within a factor of `2k - 1`
    pub k: u32,

    /// Sampler seed for reproducible runs; `None` draws from OS entropy
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self { k: 3, seed: None }
    }
}

impl Config {
    /// Create a new configuration with custom values
    pub fn new(k: u32, seed: Option<u64>) -> Self {
        Self { k, seed }
    }
}
