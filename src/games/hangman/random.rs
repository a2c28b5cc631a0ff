use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of catalog indices for word selection.
///
/// Implementations should return a value in `[0, len)`, but callers never
/// trust that: an out-of-range index is clamped by the catalog.
pub trait IndexSource {
    fn next_index(&mut self, len: usize) -> usize;
}

/// Uniform random indices backed by a seedable RNG.
#[derive(Debug, Clone)]
pub struct RandomIndex {
    rng: StdRng,
}

impl RandomIndex {
    /// Deterministic sequence; the same seed picks the same words.
    pub fn from_seed(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    pub fn from_entropy() -> Self {
        Self { rng: StdRng::from_os_rng() }
    }
}

impl Default for RandomIndex {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl IndexSource for RandomIndex {
    fn next_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.rng.random_range(0..len)
    }
}

impl<S: IndexSource + ?Sized> IndexSource for &mut S {
    fn next_index(&mut self, len: usize) -> usize {
        (**self).next_index(len)
    }
}
