//! The nearest-neighbor log-likelihood estimator.

use std::path::Path;
use std::time::Instant;

use knnlike_index::{Points, RpForest, SearchIndex};
use tracing::{info, warn};

use crate::aggregate::aggregate;
use crate::error::SurrogateError;
use crate::normalize::Normalizer;
use crate::options::EstimateOptions;
use crate::pool::SamplePool;

/// Where the estimator's index came from after [`LogLike::lazyload`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexSource {
    /// Read from the index file.
    Loaded,
    /// Built from the pool. `saved` is false if publishing the file failed.
    Built {
        /// Whether the fresh index was written to disk.
        saved: bool,
    },
}

/// Estimates log-likelihood at arbitrary points from a [`SamplePool`].
///
/// Parameters are normalised into the unit cube with bounds taken from the
/// pool, the `k` nearest stored samples are found through a [`SearchIndex`]
/// (a random-projection forest by default), and their log-likelihoods are
/// combined as described in [`aggregate`](crate::aggregate).
///
/// Queries take `&self` and never mutate, so one estimator can serve many
/// threads once its index is ready.
///
/// # Example
///
/// ```
/// use knnlike_index::{ForestConfig, Points};
/// use knnlike_surrogate::{LogLike, SamplePool};
///
/// let params = Points::from_rows(&[[0.0, 0.0], [1.0, 1.0]]).unwrap();
/// let pool = SamplePool::new(params, vec![-1.0, -2.0]).unwrap();
/// let mut loglike: LogLike = LogLike::new(pool).unwrap();
/// loglike.build(&ForestConfig::new()).unwrap();
///
/// assert_eq!(loglike.estimate(&[0.0, 0.0]).unwrap(), -1.0);
/// ```
#[derive(Debug)]
pub struct LogLike<I: SearchIndex = RpForest> {
    loglikes: Vec<f64>,
    normalizer: Normalizer,
    unit: Points,
    options: EstimateOptions,
    index: Option<I>,
}

impl<I: SearchIndex> LogLike<I> {
    /// Normalises the pool. The estimator is not queryable until
    /// [`lazyload`](Self::lazyload) or [`build`](Self::build) is called.
    ///
    /// # Errors
    ///
    /// Returns [`SurrogateError::Index`] if normalisation produces non-finite
    /// coordinates (a range overflowing `f64`).
    pub fn new(pool: SamplePool) -> Result<Self, SurrogateError> {
        let (params, loglikes) = pool.into_parts();
        let normalizer = Normalizer::fit(&params);
        let flat = normalizer.normalize_flat(&params);
        drop(params);
        let unit = Points::new(flat, normalizer.dim())?;
        Ok(Self {
            loglikes,
            normalizer,
            unit,
            options: EstimateOptions::default(),
            index: None,
        })
    }

    /// Pairs `params` with `loglikes` and normalises them.
    ///
    /// # Errors
    ///
    /// Returns [`SurrogateError::LengthMismatch`] if the counts differ, plus
    /// the errors of [`SamplePool::new`] and [`LogLike::new`].
    pub fn from_samples(params: Points, loglikes: Vec<f64>) -> Result<Self, SurrogateError> {
        Self::new(SamplePool::new(params, loglikes)?)
    }

    /// Sets the options used by [`estimate`](Self::estimate).
    ///
    /// # Errors
    ///
    /// Returns [`SurrogateError::InvalidK`] if `options.k()` is `Some(0)`.
    pub fn with_options(mut self, options: EstimateOptions) -> Result<Self, SurrogateError> {
        options.validate()?;
        self.options = options;
        Ok(self)
    }

    /// Default estimate options.
    pub fn options(&self) -> &EstimateOptions {
        &self.options
    }

    /// Normalisation bounds taken from the pool.
    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Number of samples in the pool.
    pub fn n_samples(&self) -> usize {
        self.loglikes.len()
    }

    /// Parameter-space dimension.
    pub fn dim(&self) -> usize {
        self.normalizer.dim()
    }

    /// True once an index is available for queries.
    pub fn is_ready(&self) -> bool {
        self.index.is_some()
    }

    /// The search index, if built or loaded.
    pub fn index(&self) -> Option<&I> {
        self.index.as_ref()
    }

    /// Builds the index in memory without persisting it.
    ///
    /// # Errors
    ///
    /// Returns [`SurrogateError::Index`] if the index configuration is invalid.
    pub fn build(&mut self, config: &I::Config) -> Result<(), SurrogateError> {
        self.index = Some(I::build(&self.unit, config)?);
        Ok(())
    }

    /// Loads the index from `path`, or builds and saves it there.
    ///
    /// A missing, unreadable, corrupt or stale file is not an error: the
    /// index is rebuilt from the pool (which can take minutes for millions of
    /// samples) and published atomically at `path`. If publishing fails the
    /// in-memory index is kept and a warning is logged.
    ///
    /// # Errors
    ///
    /// Returns [`SurrogateError::Index`] only if building fails, i.e. the
    /// index configuration is invalid.
    #[tracing::instrument(skip(self, config), fields(path = %path.display()))]
    pub fn lazyload(
        &mut self,
        path: &Path,
        config: &I::Config,
    ) -> Result<IndexSource, SurrogateError> {
        if path.exists() {
            info!("loading index");
            match I::load(&self.unit, path) {
                Ok(index) => {
                    self.index = Some(index);
                    info!("index loaded");
                    return Ok(IndexSource::Loaded);
                }
                Err(e) => warn!(reason = %e, "index unusable; rebuilding"),
            }
        } else {
            info!("index doesn't exist; building it from scratch, may take a few minutes");
        }

        let start = Instant::now();
        let index = I::build(&self.unit, config)?;
        info!(elapsed_s = start.elapsed().as_secs_f64(), "index built");

        let saved = match index.save(&self.unit, path) {
            Ok(()) => {
                info!("index saved");
                true
            }
            Err(e) => {
                warn!(reason = %e, "failed to save index; continuing with in-memory index");
                false
            }
        };
        self.index = Some(index);
        Ok(IndexSource::Built { saved })
    }

    /// Estimates the log-likelihood at `point` using the default options.
    ///
    /// # Errors
    ///
    /// See [`estimate_with`](Self::estimate_with).
    pub fn estimate(&self, point: &[f64]) -> Result<f64, SurrogateError> {
        self.estimate_with(point, &self.options)
    }

    /// Estimates the log-likelihood at `point`.
    ///
    /// Points outside the sampled region are not rejected; their nearest
    /// samples are used as for any other point.
    ///
    /// # Errors
    ///
    /// Returns [`SurrogateError::IndexNotReady`] before an index exists,
    /// [`SurrogateError::DimensionMismatch`] or
    /// [`SurrogateError::NonFiniteInput`] for a bad point, and
    /// [`SurrogateError::InvalidK`] for `k = Some(0)`.
    pub fn estimate_with(
        &self,
        point: &[f64],
        options: &EstimateOptions,
    ) -> Result<f64, SurrogateError> {
        let index = self.index.as_ref().ok_or(SurrogateError::IndexNotReady)?;
        options.validate()?;
        if point.len() != self.dim() {
            return Err(SurrogateError::DimensionMismatch {
                point: point.len(),
                dim: self.dim(),
            });
        }
        if point.iter().any(|v| !v.is_finite()) {
            return Err(SurrogateError::NonFiniteInput { input: "point" });
        }

        let unit = self.normalizer.normalize(point);
        let neighbors = index.query(&self.unit, &unit, options.k_for_dim(self.dim()))?;
        Ok(aggregate(
            neighbors.indices(),
            neighbors.distances(),
            &self.loglikes,
            options,
        ))
    }

    /// A view whose estimates are offset by a reference log-likelihood.
    pub fn relative_to(&self, reference: f64) -> RelativeLogLike<'_, I> {
        RelativeLogLike {
            inner: self,
            reference,
        }
    }
}

/// Log-likelihood relative to a reference value, `estimate(p) - reference`.
///
/// Created by [`LogLike::relative_to`].
#[derive(Debug)]
pub struct RelativeLogLike<'a, I: SearchIndex> {
    inner: &'a LogLike<I>,
    reference: f64,
}

impl<I: SearchIndex> RelativeLogLike<'_, I> {
    /// The subtracted reference log-likelihood.
    pub fn reference(&self) -> f64 {
        self.reference
    }

    /// Estimates `loglike(point) - reference` using the default options.
    ///
    /// # Errors
    ///
    /// See [`LogLike::estimate_with`].
    pub fn estimate(&self, point: &[f64]) -> Result<f64, SurrogateError> {
        Ok(self.inner.estimate(point)? - self.reference)
    }
}
