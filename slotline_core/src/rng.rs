use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// Session-owned random source. Seeded runs are reproducible; entropy-seeded
// runs are what players get.

#[derive(Debug, Clone)]
pub struct SpinRng {
    inner: ChaCha8Rng,
    seed: Option<u64>,
}

impl SpinRng {
    pub fn from_entropy() -> Self {
        Self {
            inner: ChaCha8Rng::from_os_rng(),
            seed: None,
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => Self::seeded(s),
            None => Self::from_entropy(),
        }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    pub fn pick_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "pick_index on empty range");
        self.inner.random_range(0..len)
    }
}

impl Default for SpinRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}
