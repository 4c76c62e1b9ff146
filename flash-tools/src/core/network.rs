// Copyright 2025, Flash Contracts Developers.
// Licensed under either of MIT or Apache-2.0 at your option.

//! Connecting to a network profile.

use alloy::{
    network::EthereumWallet,
    primitives::{Address, B256},
    providers::{DynProvider, Provider, ProviderBuilder},
    signers::local::PrivateKeySigner,
    transports::TransportError,
};

use crate::{core::config::NetworkProfile, utils::redact_url};

#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    #[error("rpc error: {0}")]
    Rpc(#[from] TransportError),

    #[error("no signer configured and {} has no unlocked accounts", redact_url(.endpoint))]
    NoAccounts { endpoint: String },
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),
}

/// A provider together with the address transactions are sent from.
#[derive(Clone, Debug)]
pub struct Connection {
    pub provider: DynProvider,
    pub sender: Address,
}

pub fn signer_from_key(key: &B256) -> Result<PrivateKeySigner, NetworkError> {
    PrivateKeySigner::from_bytes(key).map_err(|err| NetworkError::InvalidPrivateKey(err.to_string()))
}

/// Connects to `endpoint`, signing locally with `signer` if given.
///
/// Without a signer, transactions are sent through `eth_sendTransaction` from the node's first
/// unlocked account.
pub async fn connect(
    endpoint: &str,
    signer: Option<PrivateKeySigner>,
) -> Result<Connection, NetworkError> {
    debug!(@grey, "connecting to {}", redact_url(endpoint));
    match signer {
        Some(signer) => {
            let sender = signer.address();
            let provider = ProviderBuilder::new()
                .wallet(EthereumWallet::from(signer))
                .connect(endpoint)
                .await?
                .erased();
            Ok(Connection { provider, sender })
        }
        None => {
            let provider = ProviderBuilder::new().connect(endpoint).await?.erased();
            let sender = unlocked_sender(&provider, endpoint).await?;
            debug!(@grey, "using unlocked account {}", sender);
            Ok(Connection { provider, sender })
        }
    }
}

/// Connects to a configured network.
///
/// `endpoint` replaces the profile's URL. The signer falls back to the profile's first account,
/// then to the node's first unlocked account.
pub async fn connect_profile(
    profile: &NetworkProfile,
    endpoint: Option<&str>,
    signer: Option<PrivateKeySigner>,
) -> Result<Connection, NetworkError> {
    let signer = match signer {
        Some(signer) => Some(signer),
        None => profile.accounts().first().map(signer_from_key).transpose()?,
    };
    connect(endpoint.unwrap_or(profile.url()), signer).await
}

async fn unlocked_sender(provider: &impl Provider, endpoint: &str) -> Result<Address, NetworkError> {
    provider
        .get_accounts()
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| NetworkError::NoAccounts {
            endpoint: endpoint.to_owned(),
        })
}
