// Copyright 2025, Flash Contracts Developers.
// Licensed under either of MIT or Apache-2.0 at your option.

//! Local anvil devnet for integration tests.

use alloy::{
    network::EthereumWallet,
    providers::{Provider, ProviderBuilder},
    signers::local::PrivateKeySigner,
};
use eyre::{Result, WrapErr};
use reqwest::{header::HeaderValue, Method, Response};
use testcontainers::{
    core::{wait::HttpWaitStrategy, IntoContainerPort, WaitFor},
    runners::AsyncRunner,
    ContainerAsync, GenericImage, ImageExt,
};

/// First of anvil's pre-funded dev accounts.
pub const DEVNET_PRIVATE_KEY: &str =
    "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

const ANVIL_IMAGE_NAME: &str = "ghcr.io/foundry-rs/foundry";
const ANVIL_IMAGE_TAG: &str = "stable";
const ANVIL_PORT: u16 = 8545;

pub mod addresses {
    pub use alloy::primitives::{address, Address};

    /// Address of [`DEVNET_PRIVATE_KEY`](super::DEVNET_PRIVATE_KEY).
    pub const OWNER: Address = address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
}

/// Manage a devnet node for deploying contracts.
pub struct Node {
    _container: ContainerAsync<GenericImage>,
    rpc: String,
}

impl Node {
    /// Starts a new anvil node in the background. The node is shut down when this struct is
    /// dropped.
    pub async fn new() -> Result<Self> {
        let wait_strategy = HttpWaitStrategy::new("/")
            .with_port(ANVIL_PORT.into())
            .with_method(Method::POST)
            .with_header("Content-Type", HeaderValue::from_static("application/json"))
            .with_body(r#"{"jsonrpc":"2.0","method":"eth_chainId","params":[],"id":1}"#)
            .with_response_matcher_async(anvil_response_matcher);
        let container = GenericImage::new(ANVIL_IMAGE_NAME, ANVIL_IMAGE_TAG)
            .with_exposed_port(ANVIL_PORT.tcp())
            .with_wait_for(WaitFor::Http(wait_strategy))
            .with_cmd(vec!["anvil --host 0.0.0.0"])
            .start()
            .await
            .wrap_err("failed to start anvil container")?;
        let port = container
            .get_host_port_ipv4(ANVIL_PORT)
            .await
            .wrap_err("failed to get anvil RPC port")?;
        Ok(Node {
            _container: container,
            rpc: format!("http://localhost:{port}"),
        })
    }

    /// Get the anvil node RPC.
    pub fn rpc(&self) -> &str {
        &self.rpc
    }

    /// Create a provider signing with the devnet owner key.
    pub async fn create_provider(&self) -> Result<impl Provider> {
        let signer: PrivateKeySigner = DEVNET_PRIVATE_KEY
            .parse()
            .wrap_err("failed to parse devnet private key")?;
        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .connect(self.rpc())
            .await?;
        Ok(provider)
    }
}

async fn anvil_response_matcher(response: Response) -> bool {
    let Ok(text) = response.text().await else {
        return false;
    };
    text.contains("result")
}
