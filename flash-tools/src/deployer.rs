// Copyright 2025, Flash Contracts Developers.
// Licensed under either of MIT or Apache-2.0 at your option.

use std::{io, path::PathBuf};

use alloy::primitives::{Address, TxHash, U256};
use eyre::{Result, WrapErr};
use typed_builder::TypedBuilder;

use crate::{
    core::{
        artifact::{ArtifactStore, DEFAULT_DIR},
        config::CompilerConfig,
        deployment::{DeploymentConfig, GasEstimate},
        network::{self, signer_from_key},
    },
    ops,
    utils::decode0x,
};

/// Defines the configuration for deploying a contract from its build artifact.
/// After setting the parameters, call `Deployer::deploy` to perform the deployment.
#[derive(TypedBuilder)]
#[builder(field_defaults(default, setter(into)))]
pub struct Deployer {
    #[builder(!default)]
    rpc: String,

    #[builder(!default)]
    contract: String,

    #[builder(default = DEFAULT_DIR.into())]
    artifacts: PathBuf,

    #[cfg_attr(
        feature = "integration-tests",
        builder(default = Some(crate::devnet::DEVNET_PRIVATE_KEY.to_owned()))
    )]
    private_key: Option<String>,

    constructor_value: U256,

    constructor_args: Vec<String>,

    gas_limit: Option<u64>,
}

impl Deployer {
    pub async fn estimate_gas(&self) -> Result<GasEstimate> {
        let config = self.config();
        let init_code = self.init_code(&config)?;
        let connection = self.connect().await?;
        ops::estimate_gas(init_code, &config, &connection).await
    }

    /// Deploys the contract, returning its address and the deployment tx hash.
    pub async fn deploy(&self) -> Result<(Address, TxHash)> {
        let config = self.config();
        let init_code = self.init_code(&config)?;
        let connection = self.connect().await?;
        let deployed = ops::deploy(init_code, &config, &connection, &mut io::sink()).await?;
        Ok((deployed.address, deployed.tx_hash))
    }

    fn config(&self) -> DeploymentConfig {
        DeploymentConfig::builder()
            .constructor_args(self.constructor_args.clone())
            .constructor_value(self.constructor_value)
            .gas_limit(self.gas_limit)
            .build()
    }

    fn init_code(&self, config: &DeploymentConfig) -> Result<alloy::primitives::Bytes> {
        let store = ArtifactStore::new(&self.artifacts);
        Ok(ops::prepare(
            &self.contract,
            &store,
            &CompilerConfig::default(),
            config,
        )?)
    }

    async fn connect(&self) -> Result<network::Connection> {
        let signer = match &self.private_key {
            Some(key) => {
                let bytes = decode0x(key).wrap_err("invalid private key")?;
                if bytes.len() != 32 {
                    eyre::bail!("invalid private key length: {}", bytes.len());
                }
                Some(signer_from_key(&alloy::primitives::B256::from_slice(&bytes))?)
            }
            None => None,
        };
        Ok(network::connect(&self.rpc, signer).await?)
    }
}
