// Copyright 2025, Flash Contracts Developers.
// Licensed under either of MIT or Apache-2.0 at your option.

use std::fmt;

use alloy::primitives::B256;
use serde::Deserialize;

use super::{
    env::{interpolate, Env},
    ConfigError,
};
use crate::utils::{decode0x, redact_url};

/// Name of the network profile available without any configuration.
pub const LOCALHOST: &str = "localhost";

/// RPC endpoint of the built-in [`LOCALHOST`] profile.
pub const LOCALHOST_URL: &str = "http://127.0.0.1:8545";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(super) struct TomlNetwork {
    pub url: String,
    #[serde(default)]
    pub accounts: Vec<String>,
}

/// A deployment target: an RPC endpoint and the private keys used to sign for it.
#[derive(Clone)]
pub struct NetworkProfile {
    name: String,
    url: String,
    accounts: Vec<B256>,
}

impl NetworkProfile {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            accounts: Vec::new(),
        }
    }

    pub(super) fn localhost() -> Self {
        Self::new(LOCALHOST, LOCALHOST_URL)
    }

    pub(super) fn from_toml(
        name: &str,
        network: TomlNetwork,
        env: &impl Env,
    ) -> Result<Self, ConfigError> {
        let url = interpolate(&format!("networks.{name}.url"), &network.url, env)?;
        if reqwest::Url::parse(&url).is_err() {
            return Err(ConfigError::InvalidUrl {
                network: name.to_owned(),
                url: redact_url(&url),
            });
        }

        let mut accounts = Vec::with_capacity(network.accounts.len());
        for (index, account) in network.accounts.iter().enumerate() {
            let key = format!("networks.{name}.accounts[{index}]");
            let account = interpolate(&key, account, env)?;
            // unset secrets interpolate to nothing and are not signers
            if account.trim().is_empty() {
                continue;
            }
            let bytes = decode0x(&account).map_err(|_| ConfigError::InvalidAccount {
                network: name.to_owned(),
                index,
            })?;
            if bytes.len() != 32 {
                return Err(ConfigError::InvalidAccount {
                    network: name.to_owned(),
                    index,
                });
            }
            accounts.push(B256::from_slice(&bytes));
        }

        Ok(Self {
            name: name.to_owned(),
            url,
            accounts,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Private keys configured for this network, in declaration order.
    pub fn accounts(&self) -> &[B256] {
        &self.accounts
    }
}

impl fmt::Debug for NetworkProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NetworkProfile")
            .field("name", &self.name)
            .field("url", &redact_url(&self.url))
            .field("accounts", &self.accounts.len())
            .finish()
    }
}
