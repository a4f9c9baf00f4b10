//! The per-row function applied by [`augment`](crate::augment).

/// Maps one parameter row to a fixed number of derived values.
///
/// Implementations are called concurrently from several worker threads and
/// must not depend on the order in which rows are processed. A slow
/// implementation (for example one that runs an external program per row)
/// is fine; each call should only touch its own resources.
pub trait DerivedQuantity: Sync {
    /// Error returned for a row that cannot be processed at all.
    type Error: std::error::Error;

    /// Derived values for `params`. Every row must yield the same count.
    fn derive(&self, params: &[f64]) -> Result<Vec<f64>, Self::Error>;
}

impl<Q: DerivedQuantity + ?Sized> DerivedQuantity for &Q {
    type Error = Q::Error;

    fn derive(&self, params: &[f64]) -> Result<Vec<f64>, Self::Error> {
        (**self).derive(params)
    }
}
