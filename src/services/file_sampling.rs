use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;

/// Build the random source for sampling: reproducible when seeded, OS
/// entropy otherwise.
pub fn create_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}

/// Pick `min(count, candidates.len())` distinct candidates uniformly at
/// random, without replacement.
///
/// Candidates are sorted first, so a seeded selection does not depend on the
/// order the filesystem returned them in.
pub fn sample_files<R: Rng + ?Sized>(
    candidates: &[PathBuf],
    count: usize,
    rng: &mut R,
) -> Vec<PathBuf> {
    if candidates.is_empty() || count == 0 {
        return Vec::new();
    }

    let mut ordered: Vec<&PathBuf> = candidates.iter().collect();
    ordered.sort();
    ordered.dedup();

    let sample_size = count.min(ordered.len());
    ordered
        .choose_multiple(rng, sample_size)
        .map(|path| (*path).clone())
        .collect()
}
