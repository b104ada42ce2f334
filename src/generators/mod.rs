use rand::{SeedableRng, rngs::StdRng};

mod kruskal;

pub use kruskal::randomized_kruskal;

/// Get a random number generator, optionally seeded for reproducibility.
///
/// Randomness is always threaded through an explicit generator; nothing in
/// the crate draws from process-global state.
pub(crate) fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}
