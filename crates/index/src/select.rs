//! Top-k nearest neighbor selection.

use std::cmp::Ordering;

use crate::result::Neighbors;

/// Orders `(squared distance, index)` pairs by distance, breaking ties by index.
///
/// Tie-breaking on the index makes the selected set independent of the order
/// in which candidates were gathered.
#[inline]
fn by_distance_then_index(a: &(f64, usize), b: &(f64, usize)) -> Ordering {
    a.0.total_cmp(&b.0).then(a.1.cmp(&b.1))
}

/// Selects the `k` nearest of the `(squared distance, index)` pairs.
///
/// Partially selects with `select_nth_unstable_by` when `k` is smaller than the
/// candidate count, then sorts only the retained prefix. Distances in the
/// returned [`Neighbors`] are Euclidean (square roots).
///
/// # Panics
///
/// Debug-asserts that `k >= 1` and `k <= pairs.len()`.
pub(crate) fn select_k_nearest(pairs: &mut Vec<(f64, usize)>, k: usize) -> Neighbors {
    debug_assert!(k >= 1);
    debug_assert!(k <= pairs.len());

    if k < pairs.len() {
        pairs.select_nth_unstable_by(k - 1, by_distance_then_index);
        pairs.truncate(k);
    }
    pairs.sort_unstable_by(by_distance_then_index);

    let mut indices = Vec::with_capacity(k);
    let mut distances = Vec::with_capacity(k);
    for &(d2, idx) in pairs.iter() {
        indices.push(idx);
        distances.push(d2.sqrt());
    }
    Neighbors::new(indices, distances)
}
