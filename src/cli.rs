use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::Quantity;

/// Nearest-neighbour log-likelihood surrogate and chain tools.
#[derive(Parser)]
#[command(
    name = "knnlike",
    version,
    about = "Nearest-neighbour log-likelihood surrogate and chain tools"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to TOML configuration file. Defaults apply when omitted.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Append derived mass columns to a chain file.
    Augment(AugmentArgs),
    /// Load the sample pool and build (or validate) its search index.
    BuildIndex(BuildIndexArgs),
    /// Estimate the log-likelihood at one parameter point.
    Estimate(EstimateArgs),
    /// Shannon information of a chain given its log-evidence.
    Information(InformationArgs),
}

/// Arguments for the `augment` subcommand.
#[derive(clap::Args)]
pub struct AugmentArgs {
    /// Chain file to augment.
    pub chain: PathBuf,

    /// Output file. Defaults to the chain name with `_modified.txt`.
    pub output: Option<PathBuf>,

    /// Override the derived quantity from config.
    #[arg(short, long, value_enum)]
    pub quantity: Option<Quantity>,

    /// Override the worker count from config.
    #[arg(short, long)]
    pub workers: Option<usize>,
}

/// Sample-pool locations shared by `build-index` and `estimate`.
#[derive(clap::Args)]
pub struct PoolArgs {
    /// Override the parameter samples `.npy` path from config.
    #[arg(long)]
    pub params: Option<PathBuf>,

    /// Override the log-likelihood samples `.npy` path from config.
    #[arg(long)]
    pub loglikes: Option<PathBuf>,

    /// Override the index file path from config.
    #[arg(long)]
    pub index: Option<PathBuf>,
}

/// Arguments for the `build-index` subcommand.
#[derive(clap::Args)]
pub struct BuildIndexArgs {
    #[command(flatten)]
    pub pool: PoolArgs,
}

/// Prior presets for interpreting a point as unit-cube coordinates.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum PriorArg {
    /// Signed-log M1 and mu, log M2, linear tan beta.
    Log,
    /// Linear in every parameter.
    Linear,
}

/// Arguments for the `estimate` subcommand.
#[derive(clap::Args)]
pub struct EstimateArgs {
    /// Parameter values, one per dimension.
    #[arg(required = true, num_args = 1.., allow_negative_numbers = true)]
    pub point: Vec<f64>,

    #[command(flatten)]
    pub pool: PoolArgs,

    /// Number of neighbours (default: dimension + 1).
    #[arg(short, long)]
    pub k: Option<usize>,

    /// Use equal weights instead of inverse-distance weights.
    #[arg(long)]
    pub unweighted: bool,

    /// Average log-likelihoods rather than likelihoods.
    #[arg(long)]
    pub average_loglike: bool,

    /// Subtract the reference log-likelihood from config.
    #[arg(long)]
    pub relative: bool,

    /// Treat the point as unit-cube coordinates mapped through a prior.
    #[arg(long, value_enum)]
    pub prior: Option<PriorArg>,
}

/// Arguments for the `information` subcommand.
#[derive(clap::Args)]
pub struct InformationArgs {
    /// Chain file (weight in column 0, chi-square in column 1).
    pub chain: PathBuf,

    /// Log-evidence reported by the sampler.
    #[arg(allow_negative_numbers = true)]
    pub ln_z: f64,
}
