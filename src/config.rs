use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Deserialize;

use knnlike_chain::TransformConfig;
use knnlike_index::ForestConfig;
use knnlike_spectrum::SoftsusyConfig;
use knnlike_surrogate::EstimateOptions;

/// Top-level knnlike configuration.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct KnnlikeConfig {
    /// Sample pool and index locations.
    #[serde(default)]
    pub samples: SamplesToml,

    /// Search index construction.
    #[serde(default)]
    pub index: IndexToml,

    /// Estimate options.
    #[serde(default)]
    pub estimate: EstimateToml,

    /// Chain augmentation.
    #[serde(default)]
    pub augment: AugmentToml,

    /// External spectrum generator.
    #[serde(default)]
    pub softsusy: SoftsusyToml,
}

impl KnnlikeConfig {
    /// Reads `path`, or returns the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        toml::from_str(&toml_str)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }

    pub fn forest_config(&self) -> ForestConfig {
        let seed = (!self.index.random_seed).then_some(self.index.seed);
        ForestConfig::new()
            .with_depth(self.index.depth)
            .with_n_trees(self.index.n_trees)
            .with_votes(self.index.votes)
            .with_seed(seed)
    }

    pub fn estimate_options(&self) -> EstimateOptions {
        EstimateOptions::new()
            .with_k(self.estimate.k)
            .with_weighted(self.estimate.weighted)
            .with_average_loglike(self.estimate.average_loglike)
    }

    pub fn transform_config(&self) -> TransformConfig {
        TransformConfig::new()
            .with_n_dim(self.augment.n_dim)
            .with_param_offset(self.augment.param_offset)
            .with_workers(self.augment.workers)
    }

    pub fn softsusy_config(&self) -> SoftsusyConfig {
        SoftsusyConfig::new().with_program(&self.softsusy.program)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SamplesToml {
    #[serde(default = "default_params")]
    pub params: PathBuf,
    #[serde(default = "default_loglikes")]
    pub loglikes: PathBuf,
    #[serde(default = "default_index_path")]
    pub index: PathBuf,
    /// Reference log-likelihood subtracted by `estimate --relative`.
    #[serde(default = "default_loglike_ref")]
    pub loglike_ref: f64,
}

impl Default for SamplesToml {
    fn default() -> Self {
        Self {
            params: default_params(),
            loglikes: default_loglikes(),
            index: default_index_path(),
            loglike_ref: default_loglike_ref(),
        }
    }
}

fn default_params() -> PathBuf {
    PathBuf::from("param_samples.npy")
}
fn default_loglikes() -> PathBuf {
    PathBuf::from("loglike_samples.npy")
}
fn default_index_path() -> PathBuf {
    PathBuf::from("samples.index")
}
fn default_loglike_ref() -> f64 {
    4.15475279
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IndexToml {
    #[serde(default = "default_depth")]
    pub depth: usize,
    #[serde(default = "default_n_trees")]
    pub n_trees: usize,
    #[serde(default = "default_votes")]
    pub votes: usize,
    #[serde(default)]
    pub seed: u64,
    /// Draw the seed from OS entropy instead of `seed`.
    #[serde(default)]
    pub random_seed: bool,
}

impl Default for IndexToml {
    fn default() -> Self {
        Self {
            depth: default_depth(),
            n_trees: default_n_trees(),
            votes: default_votes(),
            seed: 0,
            random_seed: false,
        }
    }
}

fn default_depth() -> usize {
    10
}
fn default_n_trees() -> usize {
    20
}
fn default_votes() -> usize {
    1
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EstimateToml {
    #[serde(default)]
    pub k: Option<usize>,
    #[serde(default = "default_true")]
    pub weighted: bool,
    #[serde(default)]
    pub average_loglike: bool,
}

impl Default for EstimateToml {
    fn default() -> Self {
        Self {
            k: None,
            weighted: true,
            average_loglike: false,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Derived quantity appended by `augment`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Quantity {
    /// Tree-level neutralino and chargino masses.
    #[default]
    TreeLevel,
    /// Masses from the external spectrum generator.
    Softsusy,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AugmentToml {
    #[serde(default = "default_n_dim")]
    pub n_dim: usize,
    #[serde(default = "default_param_offset")]
    pub param_offset: usize,
    #[serde(default)]
    pub workers: Option<usize>,
    #[serde(default)]
    pub quantity: Quantity,
}

impl Default for AugmentToml {
    fn default() -> Self {
        Self {
            n_dim: default_n_dim(),
            param_offset: default_param_offset(),
            workers: None,
            quantity: Quantity::default(),
        }
    }
}

fn default_n_dim() -> usize {
    4
}
fn default_param_offset() -> usize {
    2
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SoftsusyToml {
    #[serde(default = "default_program")]
    pub program: PathBuf,
}

impl Default for SoftsusyToml {
    fn default() -> Self {
        Self {
            program: default_program(),
        }
    }
}

fn default_program() -> PathBuf {
    PathBuf::from("softpoint.x")
}
