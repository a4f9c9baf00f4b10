//! Appending derived columns to a chain with a bounded worker pool.

use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;
use tracing::info;

use crate::chain::{Chain, default_output_name};
use crate::config::TransformConfig;
use crate::derive::DerivedQuantity;
use crate::error::ChainError;

/// Applies `quantity` to the parameter columns of every row and appends the
/// results.
///
/// Rows are processed on a pool of [`TransformConfig::effective_workers`]
/// threads. Results are collected by row index, so the output is the same
/// for any worker count: row `i` of the result is row `i` of `chain`
/// followed by `quantity.derive(params_i)`.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the chain is too
/// narrow for the parameter columns, any row fails to derive, or rows yield
/// different numbers of values.
#[tracing::instrument(skip_all, fields(rows = chain.n_rows()))]
pub fn augment<Q: DerivedQuantity>(
    chain: &Chain,
    quantity: &Q,
    config: &TransformConfig,
) -> Result<Chain, ChainError> {
    config.validate()?;
    let lo = config.param_offset();
    let hi = lo + config.n_dim();
    if chain.n_cols() < hi {
        return Err(ChainError::TooFewColumns {
            n_cols: chain.n_cols(),
            required: hi,
        });
    }

    let workers = config.effective_workers();
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .map_err(|e| ChainError::ThreadPool {
            reason: e.to_string(),
        })?;

    info!(rows = chain.n_rows(), workers, "augmenting chain");
    let start = Instant::now();
    let derived: Vec<Vec<f64>> = pool.install(|| {
        (0..chain.n_rows())
            .into_par_iter()
            .map(|row| {
                quantity
                    .derive(&chain.row(row)[lo..hi])
                    .map_err(|e| ChainError::Derive {
                        row,
                        reason: e.to_string(),
                    })
            })
            .collect::<Result<_, _>>()
    })?;

    let out = chain.with_columns(&derived)?;
    info!(
        rows = out.n_rows(),
        added = out.n_cols() - chain.n_cols(),
        elapsed_s = start.elapsed().as_secs_f64(),
        "chain augmented"
    );
    Ok(out)
}

/// Reads the chain at `input`, augments it and writes the result.
///
/// The result goes to `output`, or to [`default_output_name`] of `input`
/// if `None`. Returns the path written.
///
/// # Errors
///
/// Returns [`ChainError::Io`] or a parse error for an unreadable input,
/// plus the errors of [`augment`].
pub fn add_to_chain<Q: DerivedQuantity>(
    quantity: &Q,
    input: &Path,
    output: Option<&Path>,
    config: &TransformConfig,
) -> Result<PathBuf, ChainError> {
    let chain = Chain::read(input)?;
    let augmented = augment(&chain, quantity, config)?;
    let path = output.map_or_else(|| default_output_name(input), Path::to_path_buf);
    augmented.write(&path)?;
    info!(path = %path.display(), "augmented chain written");
    Ok(path)
}
