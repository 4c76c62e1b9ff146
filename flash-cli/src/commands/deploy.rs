// Copyright 2025, Flash Contracts Developers.
// Licensed under either of MIT or Apache-2.0 at your option.

use std::{io, time::Duration};

use alloy::primitives::{utils::parse_ether, U256};
use eyre::WrapErr;
use flash_tools::{
    core::deployment::{DeploymentConfig, DEFAULT_CONFIRMATIONS, DEFAULT_CONFIRMATION_TIMEOUT},
    ops,
};

use crate::{
    common_args::{ArtifactArgs, AuthArgs, ConfigArgs, ProviderArgs},
    error::FlashCliResult,
};

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Contract to deploy, optionally qualified by its source file (`Source.sol:Name`).
    #[arg(default_value = "ERC20FlashTest")]
    contract: String,
    /// Only perform gas estimation.
    #[arg(long)]
    estimate_gas: bool,
    /// The constructor arguments [default: `constructor_args` from the contract's configuration]
    #[arg(
        long,
        num_args(0..),
        value_name = "ARGS",
        allow_hyphen_values = true,
    )]
    constructor_args: Option<Vec<String>>,
    /// The amount of Ether sent to the contract through the constructor.
    #[arg(long, value_parser = parse_ether)]
    constructor_value: Option<U256>,
    /// Gas limit of the deployment tx, skipping estimation.
    #[arg(long)]
    gas_limit: Option<u64>,
    /// Confirmations to wait for.
    #[arg(
        long,
        default_value_t = DEFAULT_CONFIRMATIONS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    confirmations: u64,
    /// Seconds to wait for the deployment to be confirmed.
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_CONFIRMATION_TIMEOUT.as_secs())]
    confirmation_timeout: u64,

    #[command(flatten)]
    artifacts: ArtifactArgs,
    /// Wallet source to use.
    #[command(flatten)]
    auth: AuthArgs,
    #[command(flatten)]
    provider: ProviderArgs,
}

pub async fn exec(args: Args, config: &ConfigArgs) -> FlashCliResult {
    let config = config.load()?;
    let defaults = config.contract(&args.contract).cloned().unwrap_or_default();

    let constructor_value = match args.constructor_value {
        Some(value) => value,
        None => defaults
            .constructor_value
            .as_deref()
            .map(parse_ether)
            .transpose()
            .wrap_err("invalid constructor_value in configuration")?
            .unwrap_or_default(),
    };
    let deployment = DeploymentConfig::builder()
        .constructor_args(args.constructor_args.unwrap_or(defaults.constructor_args))
        .constructor_value(constructor_value)
        .gas_limit(args.gas_limit)
        .max_fee_per_gas_wei(args.auth.max_fee_per_gas_wei()?)
        .confirmations(args.confirmations)
        .confirmation_timeout(Duration::from_secs(args.confirmation_timeout))
        .build();

    // everything up to here runs offline
    let init_code = ops::prepare(
        &args.contract,
        &args.artifacts.store(&config),
        &config.compiler,
        &deployment,
    )?;
    let connection = args.provider.connect(&config, &args.auth).await?;

    if args.estimate_gas {
        ops::estimate_gas(init_code, &deployment, &connection).await?;
        return Ok(());
    }

    log::info!("deploying {} from {}", args.contract, connection.sender);
    ops::deploy(init_code, &deployment, &connection, &mut io::stdout()).await?;
    Ok(())
}
