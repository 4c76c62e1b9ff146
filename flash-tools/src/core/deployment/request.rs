// Copyright 2025, Flash Contracts Developers.
// Licensed under either of MIT or Apache-2.0 at your option.

//! Submit a contract creation transaction and await its confirmation.

use std::time::Duration;

use alloy::{
    network::{Ethereum, TransactionBuilder},
    primitives::{Address, Bytes, TxHash, U256},
    providers::{PendingTransactionBuilder, PendingTransactionError, Provider, WatchTxError},
    rpc::types::{BlockNumberOrTag, TransactionRequest},
};

use super::{DeployedContract, DeploymentConfig, DeploymentError};
use crate::utils::{color::DebugColor, format_gas};

/// Contract creation transaction request
#[derive(Debug)]
pub struct DeploymentRequest {
    sender: Address,
    tx: TransactionRequest,
    gas_limit: Option<u64>,
    max_fee_per_gas_wei: Option<u128>,
    confirmations: u64,
    confirmation_timeout: Duration,
}

/// Gas needed by a deployment and what it costs the sender.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GasEstimate {
    pub gas: u64,
    pub max_fee_per_gas: u128,
    pub value: U256,
}

impl GasEstimate {
    /// Upper bound on what the sender pays: gas at the max fee, plus the value sent.
    pub fn total_cost(&self) -> U256 {
        U256::from(self.gas) * U256::from(self.max_fee_per_gas) + self.value
    }
}

impl DeploymentRequest {
    pub fn new(sender: Address, init_code: Bytes, config: &DeploymentConfig) -> Self {
        Self {
            sender,
            tx: TransactionRequest::default()
                .with_from(sender)
                .with_deploy_code(init_code)
                .with_value(config.constructor_value),
            gas_limit: config.gas_limit,
            max_fee_per_gas_wei: config.max_fee_per_gas_wei,
            confirmations: config.confirmations,
            confirmation_timeout: config.confirmation_timeout,
        }
    }

    pub fn sender(&self) -> Address {
        self.sender
    }

    pub async fn estimate(&self, provider: &impl Provider) -> Result<GasEstimate, DeploymentError> {
        let gas = match self.gas_limit {
            Some(gas) => gas,
            None => provider
                .estimate_gas(self.tx.clone())
                .await
                .map_err(DeploymentError::TransactionSubmission)?,
        };
        let max_fee_per_gas = self
            .fee_per_gas(provider)
            .await
            .map_err(DeploymentError::TransactionSubmission)?;
        debug!(@grey, "deployment gas: {}", format_gas(gas.into()));
        Ok(GasEstimate {
            gas,
            max_fee_per_gas,
            value: self.tx.value.unwrap_or_default(),
        })
    }

    /// Sends the deployment without waiting for it to be mined.
    ///
    /// The contract address is derived from the sender's pending nonce, which is pinned on the
    /// transaction so the prediction holds.
    pub async fn send(self, provider: &impl Provider) -> Result<PendingDeployment, DeploymentError> {
        let nonce = provider
            .get_transaction_count(self.sender)
            .pending()
            .await
            .map_err(DeploymentError::TransactionSubmission)?;
        let address = self.sender.create(nonce);
        debug!(@grey, "sender {} nonce {}", self.sender.debug_lavender(), nonce);

        let estimate = self.estimate(provider).await?;
        let balance = provider
            .get_balance(self.sender)
            .await
            .map_err(DeploymentError::TransactionSubmission)?;
        let required = estimate.total_cost();
        if balance < required {
            return Err(DeploymentError::NotEnoughFunds {
                from_address: self.sender,
                balance,
                required,
            });
        }

        let mut tx = self.tx;
        tx.nonce = Some(nonce);
        tx.gas = Some(estimate.gas);
        if supports_eip1559(provider).await? {
            tx.max_fee_per_gas = Some(estimate.max_fee_per_gas);
            tx.max_priority_fee_per_gas = Some(0);
        } else {
            debug!(@grey, "latest block has no base fee, sending a legacy tx");
            tx.gas_price = Some(estimate.max_fee_per_gas);
        }

        let pending = provider
            .send_transaction(tx)
            .await
            .map_err(DeploymentError::TransactionSubmission)?;
        let tx_hash = *pending.tx_hash();
        debug!(@grey, "sent deploy tx: {}", tx_hash.debug_lavender());

        Ok(PendingDeployment {
            address,
            tx_hash,
            timeout: self.confirmation_timeout,
            pending: pending
                .with_required_confirmations(self.confirmations)
                .with_timeout(Some(self.confirmation_timeout)),
        })
    }

    async fn fee_per_gas(&self, provider: &impl Provider) -> Result<u128, alloy::transports::TransportError> {
        match self.max_fee_per_gas_wei {
            Some(wei) => Ok(wei),
            None => provider.get_gas_price().await,
        }
    }
}

/// Whether the chain has activated London, judged by the latest block carrying a base fee.
async fn supports_eip1559(provider: &impl Provider) -> Result<bool, DeploymentError> {
    let block = provider
        .get_block_by_number(BlockNumberOrTag::Latest)
        .await
        .map_err(DeploymentError::TransactionSubmission)?;
    Ok(block.is_some_and(|block| block.header.base_fee_per_gas.is_some()))
}

/// A submitted deployment that has not been confirmed yet.
pub struct PendingDeployment {
    address: Address,
    tx_hash: TxHash,
    timeout: Duration,
    pending: PendingTransactionBuilder<Ethereum>,
}

impl PendingDeployment {
    /// Address the contract will live at once the transaction is mined.
    pub fn address(&self) -> Address {
        self.address
    }

    pub fn tx_hash(&self) -> TxHash {
        self.tx_hash
    }

    /// Waits for the configured number of confirmations.
    pub async fn confirm(self) -> Result<DeployedContract, DeploymentError> {
        let tx_hash = self.tx_hash;
        let receipt = self.pending.get_receipt().await.map_err(|err| match err {
            PendingTransactionError::TxWatcher(WatchTxError::Timeout) => {
                DeploymentError::ConfirmationTimeout {
                    tx_hash,
                    timeout: self.timeout,
                }
            }
            PendingTransactionError::TransportError(err) => DeploymentError::Rpc(err),
            err => DeploymentError::FailedToComplete(err.to_string()),
        })?;
        if !receipt.status() {
            return Err(DeploymentError::Reverted { tx_hash });
        }

        match receipt.contract_address {
            Some(address) if address != self.address => {
                warn!(@grey, "contract deployed at {} instead of {}", address.debug_lavender(), self.address.debug_lavender());
            }
            _ => {}
        }
        debug!(@grey, "gas used: {}", format_gas(receipt.gas_used.into()));

        Ok(DeployedContract {
            address: receipt.contract_address.unwrap_or(self.address),
            tx_hash,
            receipt,
        })
    }
}
