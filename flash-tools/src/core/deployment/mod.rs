// Copyright 2025, Flash Contracts Developers.
// Licensed under either of MIT or Apache-2.0 at your option.

//! Contract deployment.
//!
//! A deployment goes through three stages: the init code is built from an [`Artifact`] without
//! touching the network, a [`DeploymentRequest`] is submitted from a sender, and the resulting
//! [`PendingDeployment`] is awaited until it is confirmed.

use std::time::Duration;

use alloy::{
    primitives::{Address, Bytes, TxHash, U256},
    rpc::types::TransactionReceipt,
    transports::TransportError,
};
use typed_builder::TypedBuilder;

use crate::{
    core::artifact::{Artifact, ArtifactError},
    utils::color::{Color, DebugColor},
};

pub use request::{DeploymentRequest, GasEstimate, PendingDeployment};

pub mod constructor;
mod request;

/// Confirmations awaited before a deployment counts as done.
pub const DEFAULT_CONFIRMATIONS: u64 = 1;

/// How long to wait for the deployment to be confirmed.
pub const DEFAULT_CONFIRMATION_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, TypedBuilder)]
#[builder(field_defaults(default, setter(into)))]
pub struct DeploymentConfig {
    pub constructor_args: Vec<String>,
    /// Wei sent along with the deployment.
    pub constructor_value: U256,
    /// Skips gas estimation when set.
    pub gas_limit: Option<u64>,
    pub max_fee_per_gas_wei: Option<u128>,
    #[builder(default = DEFAULT_CONFIRMATIONS)]
    pub confirmations: u64,
    #[builder(default = DEFAULT_CONFIRMATION_TIMEOUT)]
    pub confirmation_timeout: Duration,
}

impl Default for DeploymentConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DeploymentError {
    #[error("rpc error: {0}")]
    Rpc(#[from] TransportError),
    #[error("{0}")]
    Artifact(#[from] ArtifactError),

    #[error("invalid constructor: {0}")]
    InvalidConstructor(String),
    #[error("failed to submit deployment tx: {0}")]
    TransactionSubmission(#[source] TransportError),
    #[error(
        "not enough funds in account {} to deploy\n\
         balance {} < {}",
        .from_address.red(),
        .balance.red(),
        format!("{} wei", .required).red(),
    )]
    NotEnoughFunds {
        from_address: Address,
        balance: U256,
        required: U256,
    },
    #[error(
        "deploy tx {} was not confirmed within {}s",
        .tx_hash.debug_red(),
        .timeout.as_secs()
    )]
    ConfirmationTimeout { tx_hash: TxHash, timeout: Duration },
    #[error("deploy tx reverted {}", .tx_hash.debug_red())]
    Reverted { tx_hash: TxHash },
    #[error("tx failed to complete: {0}")]
    FailedToComplete(String),
}

/// A confirmed deployment.
#[derive(Debug)]
pub struct DeployedContract {
    pub address: Address,
    pub tx_hash: TxHash,
    pub receipt: TransactionReceipt,
}

/// Builds the creation code for `artifact`: its bytecode followed by the encoded constructor
/// arguments.
pub fn init_code(artifact: &Artifact, config: &DeploymentConfig) -> Result<Bytes, DeploymentError> {
    let args = constructor::encode_constructor_args(
        &artifact.abi,
        &config.constructor_args,
        config.constructor_value,
    )?;
    debug!(@grey, "encoded {} constructor args into {} bytes", config.constructor_args.len(), args.len());
    Ok(constructor::init_code(&artifact.bytecode, &args))
}
