//! Configuration for random-projection forest construction.

use crate::error::IndexError;

/// Construction parameters for an [`RpForest`](crate::RpForest).
///
/// Use the builder methods to customise parameters.
///
/// # Example
///
/// ```
/// use knnlike_index::ForestConfig;
///
/// let config = ForestConfig::new()
///     .with_depth(8)
///     .with_n_trees(10)
///     .with_seed(Some(7));
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ForestConfig {
    /// Levels of median splits per tree (clamped to `floor(log2(n_points))`).
    depth: usize,
    /// Number of independent trees.
    n_trees: usize,
    /// Minimum number of trees a candidate must be found in.
    votes: usize,
    /// Base seed for projection directions. `None` draws one from OS entropy.
    seed: Option<u64>,
}

impl ForestConfig {
    /// Creates a new configuration.
    ///
    /// Defaults: `depth = 10`, `n_trees = 20`, `votes = 1`, `seed = Some(0)`.
    pub fn new() -> Self {
        Self {
            depth: 10,
            n_trees: 20,
            votes: 1,
            seed: Some(0),
        }
    }

    /// Sets the tree depth.
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    /// Sets the number of trees.
    pub fn with_n_trees(mut self, n_trees: usize) -> Self {
        self.n_trees = n_trees;
        self
    }

    /// Sets the vote threshold.
    pub fn with_votes(mut self, votes: usize) -> Self {
        self.votes = votes;
        self
    }

    /// Sets the base seed.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Returns the tree depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the number of trees.
    pub fn n_trees(&self) -> usize {
        self.n_trees
    }

    /// Returns the vote threshold.
    pub fn votes(&self) -> usize {
        self.votes
    }

    /// Returns the base seed.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Validates this configuration.
    ///
    /// Returns an error if `n_trees < 1` or `votes` is outside `1..=n_trees`.
    pub fn validate(&self) -> Result<(), IndexError> {
        if self.n_trees < 1 {
            return Err(IndexError::InvalidTrees {
                n_trees: self.n_trees,
            });
        }
        if self.votes < 1 || self.votes > self.n_trees {
            return Err(IndexError::InvalidVotes {
                votes: self.votes,
                n_trees: self.n_trees,
            });
        }
        Ok(())
    }
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = ForestConfig::default();
        assert_eq!(cfg.depth(), 10);
        assert_eq!(cfg.n_trees(), 20);
        assert_eq!(cfg.votes(), 1);
        assert_eq!(cfg.seed(), Some(0));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_builder_chaining() {
        let cfg = ForestConfig::new()
            .with_depth(3)
            .with_n_trees(5)
            .with_votes(2)
            .with_seed(None);
        assert_eq!(cfg.depth(), 3);
        assert_eq!(cfg.n_trees(), 5);
        assert_eq!(cfg.votes(), 2);
        assert_eq!(cfg.seed(), None);
    }

    #[test]
    fn test_validate_invalid_trees() {
        let result = ForestConfig::new().with_n_trees(0).with_votes(0).validate();
        assert!(
            matches!(result, Err(IndexError::InvalidTrees { n_trees: 0 })),
            "tree count is checked before votes"
        );
    }

    #[test]
    fn test_validate_invalid_votes() {
        let result = ForestConfig::new().with_n_trees(4).with_votes(5).validate();
        assert!(matches!(
            result,
            Err(IndexError::InvalidVotes {
                votes: 5,
                n_trees: 4
            })
        ));
        let result = ForestConfig::new().with_votes(0).validate();
        assert!(matches!(result, Err(IndexError::InvalidVotes { votes: 0, .. })));
    }
}
