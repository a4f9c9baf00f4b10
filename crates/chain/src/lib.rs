//! Sample chains: reading, augmentation with derived quantities, diagnostics.
//!
//! A chain is the weighted list of samples a Bayesian scan produces, stored
//! as whitespace-delimited text with columns
//! `weight, chi2, param_0 .. param_{n-1}, derived...`.
//!
//! | Item | Purpose |
//! |------|---------|
//! | [`Chain`] | Read, write and index chain files |
//! | [`augment`] / [`add_to_chain`] | Append [`DerivedQuantity`] columns in parallel |
//! | [`information`] | Shannon information given the log-evidence |
//!
//! # Quick start
//!
//! ```
//! use knnlike_chain::{Chain, DerivedQuantity, TransformConfig, augment};
//!
//! struct Sum;
//!
//! impl DerivedQuantity for Sum {
//!     type Error = std::convert::Infallible;
//!
//!     fn derive(&self, params: &[f64]) -> Result<Vec<f64>, Self::Error> {
//!         Ok(vec![params.iter().sum()])
//!     }
//! }
//!
//! let chain = Chain::from_rows(&[[1.0, 0.5, 2.0, 3.0]]).unwrap();
//! let config = TransformConfig::new().with_n_dim(2);
//! let out = augment(&chain, &Sum, &config).unwrap();
//! assert_eq!(out.row(0), &[1.0, 0.5, 2.0, 3.0, 5.0]);
//! ```

pub mod chain;
pub mod config;
pub mod derive;
pub mod error;
pub mod information;
pub mod transform;

pub use chain::{Chain, default_output_name};
pub use config::TransformConfig;
pub use derive::DerivedQuantity;
pub use error::ChainError;
pub use information::information;
pub use transform::{add_to_chain, augment};
