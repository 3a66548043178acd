//! Uniform clip-index selection.

use rand::Rng;

/// Uniform index in `0..len`, None for an empty pool
pub fn pick_any<R: Rng + ?Sized>(rng: &mut R, len: usize) -> Option<usize> {
    (len > 0).then(|| rng.gen_range(0..len))
}

/// Uniform index in `0..len` that differs from `excluded`.
///
/// Samples from the pool minus the excluded slot, so it always terminates.
/// A single-entry pool has nothing else to offer and yields 0.
pub fn pick_excluding<R: Rng + ?Sized>(rng: &mut R, len: usize, excluded: Option<usize>) -> Option<usize> {
    match (len, excluded) {
        (0, _) => None,
        (1, _) => Some(0),
        (_, Some(skip)) if skip < len => {
            let index = rng.gen_range(0..len - 1);
            Some(if index >= skip { index + 1 } else { index })
        }
        _ => pick_any(rng, len),
    }
}
