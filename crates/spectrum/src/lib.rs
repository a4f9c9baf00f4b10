//! Neutralino and chargino masses for the four-parameter electroweak-ino
//! model `(M1, M2, μ, tan β)`.
//!
//! | Source | Type | Notes |
//! |--------|------|-------|
//! | Tree-level mass matrices | [`TreeLevelMasses`] | Closed form, fast |
//! | External spectrum generator | [`Softsusy`] | SLHA over stdin/stdout, falls back to tree level |
//!
//! Both implement [`DerivedQuantity`](knnlike_chain::DerivedQuantity), so a
//! chain can be augmented with six mass columns (four neutralinos, then two
//! charginos, each ascending).
//!
//! # Quick start
//!
//! ```
//! use knnlike_spectrum::{ElectroweakParams, tree_level};
//!
//! let p = ElectroweakParams::from_slice(&[10.0, 100.0, 50.0, 4.0]).unwrap();
//! let m = tree_level::masses(&p);
//! assert!(m[0] <= m[1] && m[4] <= m[5]);
//! ```

pub mod error;
pub mod params;
pub mod slha;
pub mod softsusy;
pub mod tree_level;

pub use error::SpectrumError;
pub use params::ElectroweakParams;
pub use slha::{Block, Slha};
pub use softsusy::{MASS_CODES, Softsusy, SoftsusyConfig, masses_from_slha, slha_input};
pub use tree_level::TreeLevelMasses;
