//! Output type for neighbor queries.

/// Neighbors returned for one query point.
///
/// Indices point into the indexed point set; distances are Euclidean and
/// sorted ascending. Both vectors have the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct Neighbors {
    indices: Vec<usize>,
    distances: Vec<f64>,
}

impl Neighbors {
    /// Creates a new `Neighbors`.
    pub(crate) fn new(indices: Vec<usize>, distances: Vec<f64>) -> Self {
        debug_assert_eq!(indices.len(), distances.len());
        Self { indices, distances }
    }

    /// Returns the neighbor indices, nearest first.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Returns the Euclidean distances, ascending.
    pub fn distances(&self) -> &[f64] {
        &self.distances
    }

    /// Number of neighbors.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// True if no neighbors were returned.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterates over `(index, distance)` pairs, nearest first.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (usize, f64)> + '_ {
        self.indices
            .iter()
            .copied()
            .zip(self.distances.iter().copied())
    }
}
