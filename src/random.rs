use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, RngCore, SeedableRng};

/// Randomness seam threaded through every randomized call site (pivot choice
/// in the order-statistic select, tie-breaking in SPEA-II truncation). There
/// is no global RNG state; a fixed seed reproduces a run exactly.
pub trait RandomGenerator {
    fn rng(&mut self) -> &mut dyn RngCore;

    /// Uniform draw from `min..max` (exclusive upper bound).
    fn gen_range_usize(&mut self, min: usize, max: usize) -> usize {
        self.rng().random_range(min..max)
    }

    /// Uniform choice from a slice, `None` when the slice is empty.
    fn choose_usize<'a>(&mut self, vector: &'a [usize]) -> Option<&'a usize> {
        vector.choose(self.rng())
    }
}

/// Production generator backed by `StdRng`.
pub struct SeededRandomGenerator {
    rng: StdRng,
}

impl SeededRandomGenerator {
    pub fn new(rng: StdRng) -> Self {
        Self { rng }
    }

    /// Seeded when `seed` is given, OS-entropy otherwise.
    pub fn from_seed(seed: Option<u64>) -> Self {
        Self::new(seed.map_or_else(|| StdRng::from_rng(&mut rand::rng()), StdRng::seed_from_u64))
    }
}

impl RandomGenerator for SeededRandomGenerator {
    fn rng(&mut self) -> &mut dyn RngCore {
        &mut self.rng
    }
}

/// Fixed-output `RngCore` for tests: every draw is zero, so range draws
/// collapse to their lower bound and slice choices to the first element.
pub struct TestDummyRng;

impl RngCore for TestDummyRng {
    fn next_u32(&mut self) -> u32 {
        0
    }

    fn next_u64(&mut self) -> u64 {
        0
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        dest.fill(0);
    }
}

/// Test generator that always takes the deterministic branch.
pub struct NoopRandomGenerator {
    dummy: TestDummyRng,
}

impl NoopRandomGenerator {
    pub fn new() -> Self {
        Self {
            dummy: TestDummyRng,
        }
    }
}

impl Default for NoopRandomGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomGenerator for NoopRandomGenerator {
    fn rng(&mut self) -> &mut dyn RngCore {
        &mut self.dummy
    }
}
