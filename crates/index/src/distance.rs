//! Squared Euclidean distance and projection kernels.

/// Squared Euclidean distance between two equal-length points.
///
/// Dispatches to unrolled versions for the common 2D and 4D cases.
#[inline]
pub(crate) fn sq_distance(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    match a.len() {
        2 => {
            let d0 = a[0] - b[0];
            let d1 = a[1] - b[1];
            d0 * d0 + d1 * d1
        }
        4 => {
            let d0 = a[0] - b[0];
            let d1 = a[1] - b[1];
            let d2 = a[2] - b[2];
            let d3 = a[3] - b[3];
            d0 * d0 + d1 * d1 + d2 * d2 + d3 * d3
        }
        _ => a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum(),
    }
}

/// Dot product of a projection direction with a point.
///
/// Build and query both go through this function so that a stored point and
/// an identical query project to bitwise-identical values.
#[inline]
pub(crate) fn project(direction: &[f64], point: &[f64]) -> f64 {
    debug_assert_eq!(direction.len(), point.len());
    direction.iter().zip(point).map(|(d, p)| d * p).sum()
}

/// Fills `out` with `(squared distance, index)` pairs for the given candidate rows.
///
/// `flat` is a row-major buffer of dimension `dim`.
pub(crate) fn sq_distances_to(
    flat: &[f64],
    dim: usize,
    candidates: impl Iterator<Item = usize>,
    target: &[f64],
    out: &mut Vec<(f64, usize)>,
) {
    debug_assert_eq!(target.len(), dim);
    out.clear();
    out.extend(candidates.map(|i| {
        let row = &flat[i * dim..(i + 1) * dim];
        (sq_distance(row, target), i)
    }));
}
