//! Flat row-major point storage.

use crate::error::IndexError;

/// A fixed-dimension set of points stored as a flat row-major buffer.
///
/// Row `i` occupies `data[i * dim..(i + 1) * dim]`. All values are finite.
#[derive(Debug, Clone, PartialEq)]
pub struct Points {
    data: Vec<f64>,
    dim: usize,
}

impl Points {
    /// Wraps a flat row-major buffer of `data.len() / dim` points.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError`] if `dim` is zero, the buffer is empty or not a
    /// whole number of rows, or any value is non-finite.
    pub fn new(data: Vec<f64>, dim: usize) -> Result<Self, IndexError> {
        if dim == 0 {
            return Err(IndexError::InvalidDimension { dim });
        }
        if data.is_empty() {
            return Err(IndexError::EmptyPoints);
        }
        if !data.len().is_multiple_of(dim) {
            return Err(IndexError::PointsShapeMismatch {
                len: data.len(),
                dim,
            });
        }
        if data.iter().any(|v| !v.is_finite()) {
            return Err(IndexError::NonFiniteInput { input: "points" });
        }
        Ok(Self { data, dim })
    }

    /// Builds a point set from nested rows, checking every row has the same length.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::RaggedRow`] on inconsistent row lengths, plus the
    /// errors of [`Points::new`].
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, IndexError> {
        let first = rows.first().ok_or(IndexError::EmptyPoints)?;
        let dim = first.as_ref().len();
        let mut data = Vec::with_capacity(rows.len() * dim);
        for (row, r) in rows.iter().enumerate() {
            let r = r.as_ref();
            if r.len() != dim {
                return Err(IndexError::RaggedRow {
                    row,
                    len: r.len(),
                    dim,
                });
            }
            data.extend_from_slice(r);
        }
        Self::new(data, dim)
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.data.len() / self.dim
    }

    /// Always false: construction rejects empty point sets.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Dimension of every point.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Returns row `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.len()`.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.dim..(i + 1) * self.dim]
    }

    /// Iterates over rows in order.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[f64]> {
        self.data.chunks_exact(self.dim)
    }

    /// The flat row-major buffer.
    pub fn as_flat(&self) -> &[f64] {
        &self.data
    }

    /// CRC32 over the little-endian bytes of every coordinate.
    ///
    /// Stored in index files so a file built over a different pool is rejected.
    pub fn fingerprint(&self) -> u32 {
        let mut hasher = crc32fast::Hasher::new();
        for v in &self.data {
            hasher.update(&v.to_le_bytes());
        }
        hasher.finalize()
    }

    /// Checks that `query` is a finite point of matching dimension.
    pub(crate) fn check_query(&self, query: &[f64]) -> Result<(), IndexError> {
        if query.len() != self.dim {
            return Err(IndexError::QueryDimensionMismatch {
                query: query.len(),
                dim: self.dim,
            });
        }
        if query.iter().any(|v| !v.is_finite()) {
            return Err(IndexError::NonFiniteInput { input: "query" });
        }
        Ok(())
    }
}
