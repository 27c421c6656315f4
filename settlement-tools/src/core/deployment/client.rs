// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Network access used by a deployment.
//!
//! [`DeploymentClient`] is the provider/signer pair handed to the runner. [`AlloyClient`] backs
//! it with an alloy provider that carries a wallet.

use std::time::Duration;

use alloy::{
    primitives::{Address, Bytes, TxHash, U256},
    providers::{PendingTransactionBuilder, Provider, WalletProvider},
    rpc::types::{TransactionReceipt, TransactionRequest},
    transports::TransportError,
};

use super::ConfirmationError;
use crate::utils::color::DebugColor;

/// Default time to wait for a deploy tx to be confirmed.
pub const DEFAULT_CONFIRMATION_TIMEOUT: Duration = Duration::from_secs(300);

/// How long, and how deep, to wait for a deploy tx.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationConfig {
    /// Blocks required on top of the inclusion block, counting it.
    pub confirmations: u64,
    pub timeout: Duration,
}

impl Default for ConfirmationConfig {
    fn default() -> Self {
        Self {
            confirmations: 1,
            timeout: DEFAULT_CONFIRMATION_TIMEOUT,
        }
    }
}

/// The parts of a transaction receipt a deployment cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentReceipt {
    pub tx_hash: TxHash,
    pub contract_address: Option<Address>,
    /// `false` when the transaction reverted.
    pub status: bool,
    pub gas_used: u64,
    pub block_number: Option<u64>,
}

impl From<&TransactionReceipt> for DeploymentReceipt {
    fn from(receipt: &TransactionReceipt) -> Self {
        Self {
            tx_hash: receipt.transaction_hash,
            contract_address: receipt.contract_address,
            status: receipt.status(),
            gas_used: receipt.gas_used,
            block_number: receipt.block_number,
        }
    }
}

/// Provider and signer used to submit a deployment.
#[allow(async_fn_in_trait)]
pub trait DeploymentClient {
    /// Address the deploy tx is sent from.
    fn sender(&self) -> Address;

    async fn balance(&self, address: Address) -> Result<U256, TransportError>;

    async fn estimate_gas(&self, tx: &TransactionRequest) -> Result<u64, TransportError>;

    async fn gas_price(&self) -> Result<u128, TransportError>;

    /// Signs and broadcasts `tx`, returning once the node has accepted it.
    async fn send_transaction(&self, tx: TransactionRequest) -> Result<TxHash, TransportError>;

    /// Blocks until `tx_hash` is confirmed per `config`.
    async fn wait_for_receipt(
        &self,
        tx_hash: TxHash,
        config: &ConfirmationConfig,
    ) -> Result<DeploymentReceipt, ConfirmationError>;

    async fn code_at(&self, address: Address) -> Result<Bytes, TransportError>;
}

/// [`DeploymentClient`] over an alloy provider with a wallet attached.
#[derive(Debug, Clone)]
pub struct AlloyClient<P> {
    provider: P,
}

impl<P> AlloyClient<P>
where
    P: Provider + WalletProvider,
{
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }
}

impl<P> DeploymentClient for AlloyClient<P>
where
    P: Provider + WalletProvider,
{
    fn sender(&self) -> Address {
        self.provider.default_signer_address()
    }

    async fn balance(&self, address: Address) -> Result<U256, TransportError> {
        self.provider.get_balance(address).await
    }

    async fn estimate_gas(&self, tx: &TransactionRequest) -> Result<u64, TransportError> {
        self.provider.estimate_gas(tx.clone()).await
    }

    async fn gas_price(&self) -> Result<u128, TransportError> {
        self.provider.get_gas_price().await
    }

    async fn send_transaction(&self, tx: TransactionRequest) -> Result<TxHash, TransportError> {
        let pending = self.provider.send_transaction(tx).await?;
        let tx_hash = *pending.tx_hash();
        debug!(@grey, "sent deploy tx: {}", tx_hash.debug_lavender());
        Ok(tx_hash)
    }

    async fn wait_for_receipt(
        &self,
        tx_hash: TxHash,
        config: &ConfirmationConfig,
    ) -> Result<DeploymentReceipt, ConfirmationError> {
        let pending = PendingTransactionBuilder::new(self.provider.root().clone(), tx_hash)
            .with_required_confirmations(config.confirmations);
        let receipt = tokio::time::timeout(config.timeout, pending.get_receipt())
            .await
            .map_err(|_| ConfirmationError::Timeout {
                tx_hash,
                timeout: config.timeout,
            })?
            .map_err(|err| ConfirmationError::Watch {
                tx_hash,
                source: Box::new(err),
            })?;
        Ok(DeploymentReceipt::from(&receipt))
    }

    async fn code_at(&self, address: Address) -> Result<Bytes, TransportError> {
        self.provider.get_code_at(address).await
    }
}
