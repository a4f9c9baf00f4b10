//! Augment command: append neutralino and chargino masses to a chain.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use knnlike_chain::{DerivedQuantity, TransformConfig, add_to_chain};
use knnlike_spectrum::{Softsusy, TreeLevelMasses};

use crate::cli::AugmentArgs;
use crate::config::{KnnlikeConfig, Quantity};

/// Run chain augmentation.
pub fn run(args: AugmentArgs, config: &KnnlikeConfig) -> Result<()> {
    let _cmd = info_span!("augment").entered();

    let mut transform = config.transform_config();
    if args.workers.is_some() {
        transform = transform.with_workers(args.workers);
    }
    let quantity = args.quantity.unwrap_or(config.augment.quantity);
    info!(chain = %args.chain.display(), ?quantity, "augmenting chain");

    let written = match quantity {
        Quantity::TreeLevel => augment_with(&TreeLevelMasses, &args, &transform)?,
        Quantity::Softsusy => {
            let runner = Softsusy::new(config.softsusy_config());
            info!(program = %runner.config().program().display(), "using spectrum generator");
            augment_with(&runner, &args, &transform)?
        }
    };
    println!("{}", written.display());
    Ok(())
}

fn augment_with<Q: DerivedQuantity>(
    quantity: &Q,
    args: &AugmentArgs,
    transform: &TransformConfig,
) -> Result<std::path::PathBuf> {
    add_to_chain(quantity, &args.chain, args.output.as_deref(), transform)
        .with_context(|| format!("failed to augment chain: {}", args.chain.display()))
}
