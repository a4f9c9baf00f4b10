//! Combining neighbor log-likelihoods into one estimate.
//!
//! | weighted | average_loglike | estimate |
//! |----------|-----------------|----------|
//! | yes | no  | `log Σ wᵢ·exp(ℓᵢ)` |
//! | yes | yes | `Σ wᵢ·ℓᵢ` |
//! | no  | no  | `log mean exp(ℓᵢ)` |
//! | no  | yes | `mean ℓᵢ` |
//!
//! with `wᵢ ∝ 1/dᵢ`, normalised to sum to one. Likelihood averages are taken
//! in the log domain (log-sum-exp), so log-likelihoods far from zero neither
//! overflow nor underflow. A neighbor at distance exactly zero short-circuits
//! all of this and its log-likelihood is returned as is.

use crate::options::EstimateOptions;

/// `log Σ exp(xᵢ)`, stable for large-magnitude inputs.
///
/// Returns `-inf` for an empty input.
pub fn log_sum_exp(values: impl Iterator<Item = f64> + Clone) -> f64 {
    let max = values.clone().fold(f64::NEG_INFINITY, f64::max);
    if max == f64::NEG_INFINITY {
        return f64::NEG_INFINITY;
    }
    let sum: f64 = values.map(|v| (v - max).exp()).sum();
    max + sum.ln()
}

/// Aggregates the log-likelihoods of a neighbor set.
///
/// `indices` and `distances` describe the neighbors (any order);
/// `loglikes` is the whole pool's log-likelihood column.
///
/// # Panics
///
/// Debug-asserts that `indices` is non-empty and matches `distances` in length.
pub fn aggregate(
    indices: &[usize],
    distances: &[f64],
    loglikes: &[f64],
    options: &EstimateOptions,
) -> f64 {
    debug_assert!(!indices.is_empty());
    debug_assert_eq!(indices.len(), distances.len());

    if let Some(pos) = distances.iter().position(|&d| d == 0.0) {
        return loglikes[indices[pos]];
    }

    let ll = indices.iter().map(|&i| loglikes[i]);
    match (options.weighted(), options.average_loglike()) {
        (true, average) => {
            // log wᵢ = -log dᵢ - log Σⱼ 1/dⱼ
            let log_inv = distances.iter().map(|d| -d.ln());
            let log_norm = log_sum_exp(log_inv.clone());
            let log_w = log_inv.map(|lw| lw - log_norm);
            if average {
                log_w.zip(ll).map(|(lw, l)| lw.exp() * l).sum()
            } else {
                log_sum_exp(log_w.zip(ll).map(|(lw, l)| lw + l))
            }
        }
        (false, true) => ll.sum::<f64>() / indices.len() as f64,
        (false, false) => log_sum_exp(ll) - (indices.len() as f64).ln(),
    }
}
