// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Single-contract deployment runs.

use alloy::primitives::{Address, TxHash, U256};

use super::{
    client::DeploymentClient, request::DeploymentRequest, ConfirmationError, DeploymentConfig,
    DeploymentError, SubmissionError,
};
use crate::{
    core::artifact::ArtifactResolver,
    utils::{
        color::{Color, DebugColor},
        format_eth, format_gas,
    },
};

/// A confirmed deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deployment {
    pub contract_name: String,
    pub address: Address,
    pub tx_hash: TxHash,
    pub gas_used: u64,
    pub block_number: Option<u64>,
}

/// Gas needed to deploy a contract, without sending anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GasEstimate {
    pub gas: u64,
    pub fee_per_gas_wei: u128,
}

impl GasEstimate {
    /// Upper bound of the deployment cost in wei.
    pub fn total_cost(&self) -> U256 {
        U256::from(self.gas) * U256::from(self.fee_per_gas_wei)
    }
}

/// Outcome of [`DeploymentRunner::run`].
///
/// A successful result always carries an address, a failed one always carries the error.
#[derive(Debug)]
pub struct DeploymentResult {
    contract_name: String,
    outcome: Result<Deployment, DeploymentError>,
}

impl DeploymentResult {
    pub fn success(deployment: Deployment) -> Self {
        Self {
            contract_name: deployment.contract_name.clone(),
            outcome: Ok(deployment),
        }
    }

    pub fn failure(contract_name: impl Into<String>, error: DeploymentError) -> Self {
        Self {
            contract_name: contract_name.into(),
            outcome: Err(error),
        }
    }

    pub fn contract_name(&self) -> &str {
        &self.contract_name
    }

    pub fn succeeded(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn address(&self) -> Option<Address> {
        self.outcome.as_ref().ok().map(|d| d.address)
    }

    pub fn tx_hash(&self) -> Option<TxHash> {
        self.outcome.as_ref().ok().map(|d| d.tx_hash)
    }

    pub fn error(&self) -> Option<&DeploymentError> {
        self.outcome.as_ref().err()
    }

    pub fn into_result(self) -> Result<Deployment, DeploymentError> {
        self.outcome
    }
}

/// Deploys one contract per run, with its artifact source and network client injected.
///
/// The runner reports progress on stdout and failures on stderr. It never exits the process;
/// callers decide what a failed [`DeploymentResult`] means.
#[derive(Debug)]
pub struct DeploymentRunner<R, C> {
    resolver: R,
    client: C,
    config: DeploymentConfig,
}

impl<R, C> DeploymentRunner<R, C>
where
    R: ArtifactResolver,
    C: DeploymentClient,
{
    pub fn new(resolver: R, client: C, config: DeploymentConfig) -> Self {
        Self {
            resolver,
            client,
            config,
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn config(&self) -> &DeploymentConfig {
        &self.config
    }

    /// Deploys `contract_name`, printing progress and the resulting address.
    pub async fn run(&self, contract_name: &str) -> DeploymentResult {
        greyln!("Deploying {} contract...", contract_name);
        match self.deploy(contract_name).await {
            Ok(deployment) => {
                mintln!("{} contract deployed to: {}", contract_name, deployment.address);
                DeploymentResult::success(deployment)
            }
            Err(err) => {
                print_error(&err);
                DeploymentResult::failure(contract_name, err)
            }
        }
    }

    /// Deploys `contract_name` and waits for confirmation.
    pub async fn deploy(&self, contract_name: &str) -> Result<Deployment, DeploymentError> {
        let artifact = self.resolver.resolve(contract_name)?;
        debug!(@grey, "using artifact: {}", artifact.path().display());

        let sender = self.client.sender();
        debug!(@grey, "sender address: {}", sender.debug_lavender());

        let req = DeploymentRequest::new(sender, &artifact, &self.config)?;
        let estimate = self.estimate_request(&req).await?;
        self.check_balance(sender, &req, &estimate).await?;

        let tx_hash = self
            .client
            .send_transaction(req.into_tx(estimate.gas))
            .await
            .map_err(SubmissionError::Send)?;
        info!(@grey, "deployment tx hash: {}", tx_hash.debug_lavender());

        let receipt = self
            .client
            .wait_for_receipt(tx_hash, &self.config.confirmation)
            .await?;
        if !receipt.status {
            return Err(ConfirmationError::Reverted { tx_hash }.into());
        }
        let address = receipt
            .contract_address
            .filter(|address| !address.is_zero())
            .ok_or(ConfirmationError::NoContractAddress { tx_hash })?;

        if self.config.verify_code {
            let code = self
                .client
                .code_at(address)
                .await
                .map_err(ConfirmationError::Rpc)?;
            if code.is_empty() {
                return Err(ConfirmationError::NoCode { address }.into());
            }
        }

        debug!(@grey, "gas used: {}", format_gas(receipt.gas_used));
        Ok(Deployment {
            contract_name: artifact.contract_name().to_owned(),
            address,
            tx_hash,
            gas_used: receipt.gas_used,
            block_number: receipt.block_number,
        })
    }

    /// Estimates the cost of deploying `contract_name` without sending a transaction.
    pub async fn estimate(&self, contract_name: &str) -> Result<GasEstimate, DeploymentError> {
        let artifact = self.resolver.resolve(contract_name)?;
        let req = DeploymentRequest::new(self.client.sender(), &artifact, &self.config)?;
        Ok(self.estimate_request(&req).await?)
    }

    async fn estimate_request(
        &self,
        req: &DeploymentRequest,
    ) -> Result<GasEstimate, SubmissionError> {
        let gas = req.estimate_gas(&self.client).await?;
        let fee_per_gas_wei = req.fee_per_gas(&self.client).await?;
        Ok(GasEstimate {
            gas,
            fee_per_gas_wei,
        })
    }

    async fn check_balance(
        &self,
        sender: Address,
        req: &DeploymentRequest,
        estimate: &GasEstimate,
    ) -> Result<(), SubmissionError> {
        let balance = self
            .client
            .balance(sender)
            .await
            .map_err(|err| SubmissionError::FailedToGetBalance(sender, err))?;
        let required = estimate.total_cost() + req.value();
        debug!(@grey, "estimated cost: {}", format_eth(&required));
        if balance < required {
            return Err(SubmissionError::NotEnoughFunds {
                from_address: sender,
                balance,
                required,
            });
        }
        Ok(())
    }
}

/// Prints an error and its causes to stderr.
pub fn print_error(err: &dyn std::error::Error) {
    eprintln!("{}: {err}", "error".red());
    let mut source = err.source();
    while let Some(cause) = source {
        egreyln!("  caused by: {}", cause);
        source = cause.source();
    }
}
