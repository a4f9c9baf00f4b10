//! Information command: Shannon information of a chain.

use anyhow::{Context, Result};

use knnlike_chain::{Chain, information};

use crate::cli::InformationArgs;

/// Print the information gained from prior to posterior.
pub fn run(args: InformationArgs) -> Result<()> {
    let chain = Chain::read(&args.chain)
        .with_context(|| format!("failed to read chain: {}", args.chain.display()))?;
    let info = information(&chain, args.ln_z).context("failed to compute information")?;
    println!("information = {info}");
    Ok(())
}
