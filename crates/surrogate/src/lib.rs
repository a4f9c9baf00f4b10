//! Nearest-neighbor regression of log-likelihood over a sample pool.
//!
//! A [`SamplePool`] of precomputed (parameters, log-likelihood) pairs is
//! normalised into the unit hypercube by a [`Normalizer`] and indexed by a
//! [`SearchIndex`](knnlike_index::SearchIndex). [`LogLike`] then answers
//! "what is the log-likelihood here?" for any point by aggregating its
//! nearest samples, which makes it usable as the likelihood function of a
//! nested sampler. [`PriorBox`] supplies the matching unit-cube prior
//! transforms.
//!
//! # Quick start
//!
//! ```
//! use knnlike_index::{ForestConfig, Points};
//! use knnlike_surrogate::{EstimateOptions, LogLike};
//!
//! let params = Points::from_rows(&[[0.0, 0.0], [1.0, 1.0]]).unwrap();
//! let mut loglike: LogLike = LogLike::from_samples(params, vec![-1.0, -2.0]).unwrap();
//! loglike.build(&ForestConfig::new()).unwrap();
//!
//! let options = EstimateOptions::new().with_k(Some(2));
//! let est = loglike.estimate_with(&[0.5, 0.5], &options).unwrap();
//! let expected = (0.5 * (-1.0_f64).exp() + 0.5 * (-2.0_f64).exp()).ln();
//! assert!((est - expected).abs() < 1e-12);
//! ```
//!
//! # Architecture
//!
//! ```text
//! LogLike::estimate()
//!   ├─ Normalizer::normalize()     (normalize.rs)
//!   ├─ SearchIndex::query()        (knnlike-index)
//!   └─ aggregate()                 (aggregate.rs: exact match, weights, log-sum-exp)
//! ```

pub mod aggregate;
pub mod error;
pub mod loglike;
pub mod normalize;
pub mod options;
pub mod pool;
pub mod prior;

pub use aggregate::{aggregate, log_sum_exp};
pub use error::SurrogateError;
pub use loglike::{IndexSource, LogLike, RelativeLogLike};
pub use normalize::Normalizer;
pub use options::EstimateOptions;
pub use pool::SamplePool;
pub use prior::{Prior, PriorBox};
