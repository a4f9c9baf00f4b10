//! Shannon information of a weighted chain.

use crate::chain::Chain;
use crate::error::ChainError;

/// Information gained from prior to posterior, `Σ wᵢ·(-½·χ²ᵢ) - ln Z`.
///
/// Weights are column 0 and `χ²` is column 1; `ln_z` is the log-evidence
/// reported by the sampler that produced the chain.
///
/// # Errors
///
/// Returns [`ChainError::TooFewColumns`] if the chain has fewer than two
/// columns.
///
/// # Example
///
/// ```
/// use knnlike_chain::{Chain, information};
///
/// let chain = Chain::from_rows(&[[0.5, 2.0], [0.5, 4.0]]).unwrap();
/// assert_eq!(information(&chain, -3.0).unwrap(), 1.5);
/// ```
pub fn information(chain: &Chain, ln_z: f64) -> Result<f64, ChainError> {
    let (Some(weights), Some(chi_sq)) = (chain.column(0), chain.column(1)) else {
        return Err(ChainError::TooFewColumns {
            n_cols: chain.n_cols(),
            required: 2,
        });
    };
    let mean_chi_sq: f64 = weights.zip(chi_sq).map(|(w, c)| w * c).sum();
    Ok(-0.5 * mean_chi_sq - ln_z)
}
