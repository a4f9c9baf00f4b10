//! Estimate and build-index commands: the nearest-neighbour surrogate.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use tracing::{info, info_span};

use knnlike_surrogate::{IndexSource, LogLike, PriorBox, SamplePool};

use crate::cli::{BuildIndexArgs, EstimateArgs, PoolArgs, PriorArg};
use crate::config::KnnlikeConfig;

/// Load or build the index for the configured sample pool.
pub fn build_index(args: BuildIndexArgs, config: &KnnlikeConfig) -> Result<()> {
    let _cmd = info_span!("build_index").entered();
    let (_, source) = load_estimator(&args.pool, config)?;
    match source {
        IndexSource::Loaded => println!("index is up to date"),
        IndexSource::Built { saved: true } => println!("index built and saved"),
        IndexSource::Built { saved: false } => bail!("index built but could not be saved"),
    }
    Ok(())
}

/// Estimate the log-likelihood at one point.
pub fn run(args: EstimateArgs, config: &KnnlikeConfig) -> Result<()> {
    let _cmd = info_span!("estimate").entered();

    let mut point = args.point;
    if let Some(prior) = args.prior {
        let priors = match prior {
            PriorArg::Log => PriorBox::electroweak_log(),
            PriorArg::Linear => PriorBox::electroweak_linear(),
        };
        priors
            .apply(&mut point)
            .context("failed to map unit-cube point through prior")?;
        info!(?point, "mapped unit-cube point");
    }

    let mut options = config.estimate_options();
    if args.k.is_some() {
        options = options.with_k(args.k);
    }
    if args.unweighted {
        options = options.with_weighted(false);
    }
    if args.average_loglike {
        options = options.with_average_loglike(true);
    }

    let (loglike, _) = load_estimator(&args.pool, config)?;
    let loglike = loglike
        .with_options(options)
        .context("invalid estimate options")?;

    let value = if args.relative {
        loglike.relative_to(config.samples.loglike_ref).estimate(&point)
    } else {
        loglike.estimate(&point)
    }
    .context("estimate failed")?;
    println!("{value}");
    Ok(())
}

fn load_estimator(pool: &PoolArgs, config: &KnnlikeConfig) -> Result<(LogLike, IndexSource)> {
    let pick = |arg: &Option<PathBuf>, default: &PathBuf| {
        arg.clone().unwrap_or_else(|| default.clone())
    };
    let params = pick(&pool.params, &config.samples.params);
    let loglikes = pick(&pool.loglikes, &config.samples.loglikes);
    let index = pick(&pool.index, &config.samples.index);

    let samples = SamplePool::from_npy(&params, &loglikes).with_context(|| {
        format!(
            "failed to load samples: {} and {}",
            params.display(),
            loglikes.display()
        )
    })?;
    let mut loglike: LogLike = LogLike::new(samples).context("failed to normalise samples")?;
    let source = loglike
        .lazyload(&index, &config.forest_config())
        .with_context(|| format!("failed to build index: {}", index.display()))?;
    Ok((loglike, source))
}
