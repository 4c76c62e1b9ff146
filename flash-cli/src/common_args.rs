// Copyright 2025, Flash Contracts Developers.
// Licensed under either of MIT or Apache-2.0 at your option.

use std::{fs, path::PathBuf};

use alloy::{primitives::B256, signers::local::{LocalSigner, PrivateKeySigner}};
use eyre::{bail, eyre, Context};
use flash_tools::{
    core::{
        artifact::ArtifactStore,
        config::{Config, ConfigError, NetworkProfile},
        network::{self, signer_from_key, Connection},
    },
    utils::{decode0x, redact_url},
};

use crate::utils::convert_gwei_to_wei;

#[derive(Debug, clap::Args)]
pub struct ConfigArgs {
    /// Configuration file [default: Flash.toml in the current directory, if present]
    #[arg(long = "config", value_name = "PATH", global = true)]
    path: Option<PathBuf>,
}

impl ConfigArgs {
    pub fn load(&self) -> Result<Config, ConfigError> {
        Config::discover(self.path.as_deref())
    }
}

#[derive(Debug, clap::Args)]
pub struct AuthArgs {
    /// File path to a text file containing a hex-encoded private key
    #[arg(long)]
    private_key_path: Option<PathBuf>,
    /// Private key as a hex string. Warning: this exposes your key to shell history
    #[arg(long)]
    private_key: Option<String>,
    /// Path to an Ethereum wallet keystore file (e.g. clef)
    #[arg(long)]
    keystore_path: Option<String>,
    /// Keystore password file
    #[arg(long)]
    keystore_password_path: Option<PathBuf>,
    /// Optional max fee per gas in gwei units.
    #[arg(long)]
    max_fee_per_gas_gwei: Option<String>,
}

impl AuthArgs {
    /// Signer given on the command line, if any.
    fn signer(&self) -> eyre::Result<Option<PrivateKeySigner>> {
        if let Some(key) = &self.private_key {
            if key.is_empty() {
                bail!("empty private key");
            }
            return Ok(Some(parse_private_key(key)?));
        }

        if let Some(file) = &self.private_key_path {
            let key = fs::read_to_string(file).wrap_err("could not open private key file")?;
            return Ok(Some(parse_private_key(&key)?));
        }

        let Some(keystore) = &self.keystore_path else {
            return Ok(None);
        };
        let password = self
            .keystore_password_path
            .as_ref()
            .map(fs::read_to_string)
            .unwrap_or(Ok("".into()))
            .wrap_err("could not open keystore password file")?;
        let signer = LocalSigner::decrypt_keystore(keystore, password.trim_end())
            .wrap_err("could not decrypt keystore")?;
        Ok(Some(signer))
    }

    pub fn max_fee_per_gas_wei(&self) -> eyre::Result<Option<u128>> {
        self.max_fee_per_gas_gwei
            .as_ref()
            .map(|fee_str| convert_gwei_to_wei(fee_str))
            .transpose()
    }
}

fn parse_private_key(key: &str) -> eyre::Result<PrivateKeySigner> {
    let bytes = decode0x(key).wrap_err("private key is not hex")?;
    if bytes.len() != 32 {
        return Err(eyre!("private key must be 32 bytes, got {}", bytes.len()));
    }
    Ok(signer_from_key(&B256::from_slice(&bytes))?)
}

#[derive(Debug, clap::Args)]
pub struct ProviderArgs {
    /// Network profile to deploy to [default: the configured default network]
    #[arg(short, long)]
    pub network: Option<String>,
    /// RPC endpoint, overriding the network profile's
    #[arg(short, long)]
    pub endpoint: Option<String>,
}

impl ProviderArgs {
    pub fn profile<'a>(&self, config: &'a Config) -> Result<&'a NetworkProfile, ConfigError> {
        match &self.network {
            Some(name) => config.network(name),
            None => Ok(config.default_network()),
        }
    }

    /// Connects to the selected network, signing with the command line signer or else the
    /// profile's first account.
    pub async fn connect(&self, config: &Config, auth: &AuthArgs) -> eyre::Result<Connection> {
        let profile = self.profile(config)?;
        let endpoint = self.endpoint.as_deref();
        log::debug!(
            "network {} at {}",
            profile.name(),
            redact_url(endpoint.unwrap_or(profile.url()))
        );
        Ok(network::connect_profile(profile, endpoint, auth.signer()?).await?)
    }
}

#[derive(Debug, clap::Args)]
pub struct ArtifactArgs {
    /// Directory searched for compiled artifacts [default: `paths.artifacts` from the configuration]
    #[arg(long, value_name = "DIR")]
    artifacts: Option<PathBuf>,
}

impl ArtifactArgs {
    pub fn store(&self, config: &Config) -> ArtifactStore {
        ArtifactStore::new(
            self.artifacts
                .clone()
                .unwrap_or_else(|| config.paths.artifacts.clone()),
        )
    }
}
