// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use settlement_tools::{
    utils::{color::Color, format_eth, format_gas},
    AlloyClient, ArtifactResolver, Deployment, DeploymentClient, DeploymentRunner, GasEstimate,
};

use crate::{
    common_args::{ArtifactArgs, AuthArgs, DeployArgs, ProviderArgs},
    constants::DEFAULT_CONTRACT,
    error::{DeployCliError, DeployCliResult},
};

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Contract to deploy, by name or fully qualified (`contracts/Settlement.sol:Settlement`).
    #[arg(long, env = "CONTRACT_NAME", default_value = DEFAULT_CONTRACT)]
    contract: String,
    /// Only perform gas estimation.
    #[arg(long)]
    estimate_gas: bool,

    #[command(flatten)]
    artifacts: ArtifactArgs,
    /// Wallet source to use.
    #[command(flatten)]
    auth: AuthArgs,
    #[command(flatten)]
    deploy: DeployArgs,
    #[command(flatten)]
    provider: ProviderArgs,
}

pub async fn exec(args: Args) -> DeployCliResult {
    let config = args.deploy.config()?;
    let provider = args.provider.build_provider_with_wallet(&args.auth).await?;
    let client = AlloyClient::new(provider);
    let runner = DeploymentRunner::new(args.artifacts.resolver(), client, config);

    if args.estimate_gas {
        return estimate(&runner, &args.contract).await;
    }
    deploy(&runner, &args.contract).await.map(|_| ())
}

/// The runner prints its own outcome, so failures come back already reported.
async fn deploy<R, C>(
    runner: &DeploymentRunner<R, C>,
    contract: &str,
) -> DeployCliResult<Deployment>
where
    R: ArtifactResolver,
    C: DeploymentClient,
{
    runner
        .run(contract)
        .await
        .into_result()
        .map_err(DeployCliError::reported)
}

async fn estimate<R, C>(runner: &DeploymentRunner<R, C>, contract: &str) -> DeployCliResult
where
    R: ArtifactResolver,
    C: DeploymentClient,
{
    let estimate = runner.estimate(contract).await?;
    print_gas_estimate(contract, &estimate);
    Ok(())
}

fn print_gas_estimate(contract: &str, estimate: &GasEstimate) {
    println!("{}", format!("estimates for deploying {contract}").grey());
    println!("  gas: {}", format_gas(estimate.gas));
    println!(
        "  fee per gas: {}",
        format!("{} gwei", estimate.fee_per_gas_wei as f64 / 1e9).grey()
    );
    println!("  total cost: {}", format_eth(&estimate.total_cost()).mint());
}

#[cfg(test)]
mod tests {
    use std::{fs, path::Path, process::ExitCode};

    use alloy::{
        primitives::{address, Address, Bytes, TxHash, B256, U256},
        rpc::types::TransactionRequest,
        transports::TransportError,
    };
    use settlement_tools::{
        ArtifactDir, ConfirmationConfig, ConfirmationError, DeploymentConfig, DeploymentReceipt,
    };

    use super::*;

    const SENDER: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
    const TX_HASH: B256 = B256::repeat_byte(0x11);

    const SETTLEMENT_ARTIFACT: &str = r#"{
        "_format": "hh-sol-artifact-1",
        "contractName": "Settlement",
        "sourceName": "contracts/Settlement.sol",
        "abi": [{"inputs":[],"stateMutability":"nonpayable","type":"constructor"}],
        "bytecode": "0x6080604052348015600f57600080fd5b50603f80601d6000396000f3fe6080604052600080fdfea164736f6c6343000814000a",
        "deployedBytecode": "0x6080604052600080fdfea164736f6c6343000814000a",
        "linkReferences": {},
        "deployedLinkReferences": {}
    }"#;

    /// Dev chain that mines the first deploy tx of a fresh account.
    struct DevChain;

    impl DeploymentClient for DevChain {
        fn sender(&self) -> Address {
            SENDER
        }

        async fn balance(&self, _address: Address) -> Result<U256, TransportError> {
            Ok(U256::from(10u128.pow(18)))
        }

        async fn estimate_gas(&self, _tx: &TransactionRequest) -> Result<u64, TransportError> {
            Ok(120_000)
        }

        async fn gas_price(&self) -> Result<u128, TransportError> {
            Ok(1_000_000_000)
        }

        async fn send_transaction(
            &self,
            _tx: TransactionRequest,
        ) -> Result<TxHash, TransportError> {
            Ok(TX_HASH)
        }

        async fn wait_for_receipt(
            &self,
            tx_hash: TxHash,
            _config: &ConfirmationConfig,
        ) -> Result<DeploymentReceipt, ConfirmationError> {
            Ok(DeploymentReceipt {
                tx_hash,
                contract_address: Some(SENDER.create(0)),
                status: true,
                gas_used: 100_000,
                block_number: Some(1),
            })
        }

        async fn code_at(&self, _address: Address) -> Result<Bytes, TransportError> {
            Ok(Bytes::from_static(&[0x60, 0x80]))
        }
    }

    fn write_settlement(root: &Path) {
        let dir = root.join("contracts/Settlement.sol");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("Settlement.json"), SETTLEMENT_ARTIFACT).unwrap();
    }

    fn dev_runner(root: &Path) -> DeploymentRunner<ArtifactDir, DevChain> {
        DeploymentRunner::new(ArtifactDir::new(root), DevChain, DeploymentConfig::default())
    }

    #[tokio::test]
    async fn deploy_returns_new_address() {
        let dir = tempfile::tempdir().unwrap();
        write_settlement(dir.path());

        let deployment = deploy(&dev_runner(dir.path()), "Settlement").await.unwrap();
        assert_eq!(deployment.contract_name, "Settlement");
        assert_eq!(deployment.address, SENDER.create(0));
        assert_ne!(deployment.address, Address::ZERO);
        assert_eq!(deployment.tx_hash, TX_HASH);
    }

    #[tokio::test]
    async fn failed_deploy_is_already_reported() {
        let dir = tempfile::tempdir().unwrap();
        write_settlement(dir.path());

        let err = deploy(&dev_runner(dir.path()), "Unknown").await.unwrap_err();
        assert!(err.is_reported());
        assert_eq!(err.exit_code(), ExitCode::FAILURE);
    }

    #[tokio::test]
    async fn estimate_succeeds_without_sending() {
        let dir = tempfile::tempdir().unwrap();
        write_settlement(dir.path());

        estimate(&dev_runner(dir.path()), "Settlement").await.unwrap();
        let err = estimate(&dev_runner(dir.path()), "Unknown").await.unwrap_err();
        assert!(!err.is_reported());
    }
}
