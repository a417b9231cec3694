//! Random source construction.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates a deterministic random source from a seed.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Creates the random source for a run: seeded when `seed` is set,
/// otherwise seeded from OS entropy.
pub(crate) fn rng_for(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => create_rng(seed),
        None => create_rng(rand::random()),
    }
}
