// Copyright 2025, Flash Contracts Developers.
// Licensed under either of MIT or Apache-2.0 at your option.

//! Contract deployment.

use std::io::Write;

use alloy::primitives::{utils::format_units, Bytes};
use eyre::WrapErr;

use crate::{
    core::{
        artifact::ArtifactStore,
        config::CompilerConfig,
        deployment::{
            self, DeployedContract, DeploymentConfig, DeploymentError, DeploymentRequest,
            GasEstimate,
        },
        network::Connection,
    },
    utils::{color::DebugColor, format_eth},
};

/// Resolves a contract's artifact and builds its init code, without touching the network.
pub fn prepare(
    contract: &str,
    artifacts: &ArtifactStore,
    compiler: &CompilerConfig,
    config: &DeploymentConfig,
) -> Result<Bytes, DeploymentError> {
    let artifact = artifacts.resolve(contract)?;
    if let Some(pinned) = &compiler.version {
        match artifact.matches_compiler(pinned) {
            Some(false) => warn!(@yellow,
                "{} was compiled with solc {} but the configured compiler is {}",
                artifact.name,
                artifact.compiler_version.as_deref().unwrap_or_default(),
                pinned
            ),
            Some(true) => {}
            None => debug!(@grey, "{} does not record its compiler version", artifact.name),
        }
    }
    deployment::init_code(&artifact, config)
}

/// Deploys `init_code`, writing the predicted contract address and then the transaction hash to
/// `out`, one per line, as soon as the transaction is submitted. Returns once the deployment is
/// confirmed.
pub async fn deploy(
    init_code: Bytes,
    config: &DeploymentConfig,
    connection: &Connection,
    out: &mut impl Write,
) -> eyre::Result<DeployedContract> {
    let request = DeploymentRequest::new(connection.sender, init_code, config);
    let pending = request.send(&connection.provider).await?;

    writeln!(out, "{}", pending.address())?;
    writeln!(out, "{}", pending.tx_hash())?;
    out.flush().wrap_err("failed to write deployment")?;

    info!(@grey, "waiting for {} confirmation(s)", config.confirmations);
    let deployed = pending.confirm().await?;
    info!(@grey, "deployed code at address: {}", deployed.address.debug_lavender());
    info!(@grey, "deployment tx hash: {}", deployed.tx_hash.debug_lavender());
    Ok(deployed)
}

/// Estimates the gas and total cost of a deployment without submitting it.
pub async fn estimate_gas(
    init_code: Bytes,
    config: &DeploymentConfig,
    connection: &Connection,
) -> eyre::Result<GasEstimate> {
    let request = DeploymentRequest::new(connection.sender, init_code, config);
    let estimate = request.estimate(&connection.provider).await?;

    greyln!("estimates");
    greyln!("deployment tx gas: {}", estimate.gas.debug_lavender());
    greyln!(
        "gas price: {} gwei",
        format_units(estimate.max_fee_per_gas, "gwei")?.debug_lavender()
    );
    greyln!("deployment tx total cost: {}", format_eth(estimate.total_cost()));
    Ok(estimate)
}
