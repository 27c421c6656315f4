// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Contract deployment.

use std::time::Duration;

use alloy::{
    primitives::{Address, TxHash, U256},
    transports::TransportError,
};
use typed_builder::TypedBuilder;

use crate::{
    core::artifact::ArtifactError,
    utils::{
        color::{Color, DebugColor},
        format_eth,
    },
};

pub mod client;
pub mod request;
pub mod runner;

pub use client::ConfirmationConfig;

/// Defines how a contract is deployed.
#[derive(Debug, Clone, TypedBuilder)]
#[builder(field_defaults(default, setter(into)))]
pub struct DeploymentConfig {
    /// Overrides the node's gas price when set.
    pub max_fee_per_gas_wei: Option<u128>,
    pub max_priority_fee_per_gas_wei: Option<u128>,
    /// Skips gas estimation when set.
    pub gas_limit: Option<u64>,
    pub constructor_args: Vec<String>,
    /// Wei sent along with the deployment; the constructor must be payable.
    pub constructor_value: U256,
    /// Check that the deployed address holds code once the receipt is in.
    #[builder(default = true)]
    pub verify_code: bool,
    pub confirmation: ConfirmationConfig,
}

impl Default for DeploymentConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Coarse classification of a failed deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Artifact,
    Submission,
    Confirmation,
}

#[derive(Debug, thiserror::Error)]
pub enum DeploymentError {
    #[error(transparent)]
    Artifact(#[from] ArtifactError),
    #[error(transparent)]
    Submission(#[from] SubmissionError),
    #[error(transparent)]
    Confirmation(#[from] ConfirmationError),
}

impl DeploymentError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Artifact(_) => ErrorKind::Artifact,
            Self::Submission(_) => ErrorKind::Submission,
            Self::Confirmation(_) => ErrorKind::Confirmation,
        }
    }
}

/// Failure to build or broadcast the deployment transaction.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("invalid constructor: {0}")]
    InvalidConstructor(String),
    #[error("deployment failed during gas estimation")]
    GasEstimation(#[source] TransportError),
    #[error("failed to get balance of {}", .0.debug_lavender())]
    FailedToGetBalance(Address, #[source] TransportError),
    #[error(
        "not enough funds in account {} to deploy\n\
         balance {} < {}",
        .from_address.red(),
        format_eth(.balance).red(),
        format_eth(.required).red(),
    )]
    NotEnoughFunds {
        from_address: Address,
        balance: U256,
        required: U256,
    },
    #[error("failed to send deploy tx")]
    Send(#[source] TransportError),
    #[error("rpc error: {0}")]
    Rpc(#[from] TransportError),
}

/// Failure after the deployment transaction was broadcast.
#[derive(Debug, thiserror::Error)]
pub enum ConfirmationError {
    #[error("deploy tx {} not confirmed within {:?}", .tx_hash.debug_red(), .timeout)]
    Timeout { tx_hash: TxHash, timeout: Duration },
    #[error("failed to watch deploy tx {}", .tx_hash.debug_red())]
    Watch {
        tx_hash: TxHash,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("deploy tx reverted {}", .tx_hash.debug_red())]
    Reverted { tx_hash: TxHash },
    #[error("missing contract address in receipt of deploy tx {}", .tx_hash.debug_red())]
    NoContractAddress { tx_hash: TxHash },
    #[error("no code found at deployed address {}", .address.red())]
    NoCode { address: Address },
    #[error("rpc error: {0}")]
    Rpc(#[from] TransportError),
}
