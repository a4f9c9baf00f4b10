//! Nearest-neighbor search over fixed-dimension point sets.
//!
//! Two search structures share the [`SearchIndex`] capability set
//! {build, query, save, load}:
//!
//! | Index | Cost per query | Answers |
//! |-------|----------------|---------|
//! | [`RpForest`] | candidates from `n_trees` leaves | approximate |
//! | [`ExactIndex`] | `O(n)` scan | exact |
//!
//! Indices never own the points. The caller keeps one [`Points`] set and
//! passes it to every call, and index files record the set's size, dimension
//! and fingerprint so that loading against a different pool fails with
//! [`IndexError::Stale`].
//!
//! # Quick start
//!
//! ```
//! use knnlike_index::{ForestConfig, Points, RpForest, SearchIndex};
//!
//! let points = Points::from_rows(&[[0.0, 0.0], [1.0, 1.0], [0.2, 0.1]]).unwrap();
//! let forest = RpForest::build(&points, &ForestConfig::new()).unwrap();
//!
//! let neighbors = forest.query(&points, &[0.1, 0.1], 2).unwrap();
//! assert_eq!(neighbors.indices()[0], 2);
//! ```
//!
//! # Architecture
//!
//! ```text
//! RpForest::query()
//!   ├─ check_query()            (search.rs)
//!   ├─ candidates()             (forest.rs: leaves of every tree, votes)
//!   ├─ sq_distances_to()        (distance.rs)
//!   └─ select_k_nearest()       (select.rs)
//! ```

pub mod config;
pub mod error;
pub mod exact;
pub mod forest;
pub mod points;
pub mod result;
pub mod search;

pub(crate) mod distance;
pub(crate) mod persist;
pub(crate) mod select;

pub use config::ForestConfig;
pub use error::IndexError;
pub use exact::ExactIndex;
pub use forest::RpForest;
pub use points::Points;
pub use result::Neighbors;
pub use search::SearchIndex;
