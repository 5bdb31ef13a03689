use rand::rngs::{StdRng, ThreadRng};
use rand::{RngCore, SeedableRng};

const DEFAULT_SEED: u64 = 3819201;

/// The generator agents use unless another one is injected through their builder.
pub type StandardRandomGenerator = ThreadRng;

/// A reproducible generator. Forked workers in parallel searches always run on one.
pub type SeededRandomGenerator = StdRng;

/// Creates a reproducible generator from `seed`.
pub fn seeded(seed: u64) -> SeededRandomGenerator {
    StdRng::seed_from_u64(seed)
}

/// Creates a reproducible generator from the crate's fixed default seed.
pub fn default_seeded() -> SeededRandomGenerator {
    seeded(DEFAULT_SEED)
}

/// Derives an independent generator from `rng`, consuming one draw from it.
pub(crate) fn fork<R: RngCore>(rng: &mut R) -> SeededRandomGenerator {
    seeded(rng.next_u64())
}

/// Derives `n` generators in order, one per task of a parallel fan-out.
pub(crate) fn fork_n<R: RngCore>(rng: &mut R, n: usize) -> Vec<SeededRandomGenerator> {
    (0..n).map(|_| fork(rng)).collect()
}
