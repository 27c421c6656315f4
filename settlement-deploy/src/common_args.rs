// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::{fs, path::PathBuf, time::Duration};

use alloy::{
    network::EthereumWallet,
    primitives::{utils::parse_ether, FixedBytes, U256},
    providers::{Provider, ProviderBuilder, WalletProvider},
    signers::local::{LocalSigner, PrivateKeySigner},
};
use eyre::{bail, eyre, Context};
use settlement_tools::{
    core::network::check_endpoint, utils::decode0x, ArtifactDir, ConfirmationConfig,
    DeploymentConfig,
};

use crate::{
    constants::{DEFAULT_ARTIFACTS_DIR, DEFAULT_CONFIRMATION_TIMEOUT_SECS, DEFAULT_ENDPOINT},
    utils::convert_gwei_to_wei,
};

#[derive(Debug, clap::Args)]
pub struct ArtifactArgs {
    /// Directory holding compiled contract artifacts (Hardhat `artifacts/` or Foundry `out/`)
    #[arg(long, env = "ARTIFACTS_DIR", default_value = DEFAULT_ARTIFACTS_DIR)]
    artifacts: PathBuf,
}

impl ArtifactArgs {
    pub fn resolver(&self) -> ArtifactDir {
        ArtifactDir::new(&self.artifacts)
    }
}

#[derive(Debug, clap::Args)]
pub struct AuthArgs {
    /// File path to a text file containing a hex-encoded private key
    #[arg(long, env = "PRIVATE_KEY_PATH")]
    private_key_path: Option<PathBuf>,
    /// Private key as a hex string. Warning: this exposes your key to shell history
    #[arg(long, env = "PRIVATE_KEY", hide_env_values = true)]
    private_key: Option<String>,
    /// Path to an Ethereum wallet keystore file (e.g. clef)
    #[arg(long)]
    keystore_path: Option<String>,
    /// Keystore password file
    #[arg(long)]
    keystore_password_path: Option<PathBuf>,
}

impl AuthArgs {
    pub fn build_wallet(&self) -> eyre::Result<EthereumWallet> {
        if let Some(key) = &self.private_key {
            return Ok(EthereumWallet::new(signer_from_hex(key)?));
        }

        if let Some(file) = &self.private_key_path {
            let key = fs::read_to_string(file).wrap_err("could not open private key file")?;
            return Ok(EthereumWallet::new(signer_from_hex(&key)?));
        }

        let keystore = self.keystore_path.as_ref().ok_or(eyre!(
            "no signer configured: set PRIVATE_KEY or pass --private-key, --private-key-path or --keystore-path"
        ))?;
        let password = self
            .keystore_password_path
            .as_ref()
            .map(fs::read_to_string)
            .unwrap_or(Ok("".into()))
            .wrap_err("could not open keystore password file")?;

        let signer = LocalSigner::decrypt_keystore(keystore, password.trim_end())
            .wrap_err("could not decrypt keystore")?;
        Ok(EthereumWallet::new(signer))
    }
}

fn signer_from_hex(key: &str) -> eyre::Result<PrivateKeySigner> {
    if key.trim().is_empty() {
        bail!("empty private key");
    }
    let bytes = decode0x(key).wrap_err("private key is not valid hex")?;
    if bytes.len() != 32 {
        bail!("private key must be 32 bytes, got {}", bytes.len());
    }
    let priv_key_bytes: FixedBytes<32> = FixedBytes::from_slice(&bytes);
    Ok(PrivateKeySigner::from_bytes(&priv_key_bytes)?)
}

#[derive(Debug, clap::Args)]
pub struct ProviderArgs {
    /// JSON-RPC endpoint of the target chain
    #[arg(short, long, env = "RPC_URL", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,
}

impl ProviderArgs {
    /// Connects a wallet-backed provider. Nonce, gas and chain id are filled in by the
    /// provider when the deploy tx is sent, so nothing is requested from the node here.
    pub async fn build_provider_with_wallet(
        &self,
        auth: &AuthArgs,
    ) -> eyre::Result<impl Provider + WalletProvider> {
        check_endpoint(&self.endpoint)?;
        let wallet = auth.build_wallet()?;
        let provider = ProviderBuilder::new()
            .wallet(wallet)
            .connect(self.endpoint.trim())
            .await
            .wrap_err_with(|| format!("could not connect to {}", self.endpoint))?;
        Ok(provider)
    }
}

#[derive(Debug, clap::Args)]
pub struct DeployArgs {
    /// Optional max fee per gas in gwei units.
    #[arg(long, env = "MAX_FEE_PER_GAS_GWEI")]
    max_fee_per_gas_gwei: Option<String>,
    /// Optional max priority fee per gas in gwei units.
    #[arg(long)]
    max_priority_fee_per_gas_gwei: Option<String>,
    /// Gas limit for the deploy tx. Estimated by the node if not set.
    #[arg(long)]
    gas_limit: Option<u64>,
    /// Number of confirmations to wait for.
    #[arg(long, env = "CONFIRMATIONS", default_value_t = 1)]
    confirmations: u64,
    /// Seconds to wait for the deploy tx to be confirmed.
    #[arg(
        long,
        env = "CONFIRMATION_TIMEOUT_SECS",
        default_value = DEFAULT_CONFIRMATION_TIMEOUT_SECS
    )]
    timeout: u64,
    /// The constructor arguments.
    #[arg(
        long,
        num_args(0..),
        value_name = "ARGS",
        allow_hyphen_values = true,
    )]
    constructor_args: Vec<String>,
    /// The amount of Ether sent to the contract through the constructor.
    #[arg(long, value_parser = parse_ether, default_value = "0")]
    constructor_value: U256,
    /// Skip checking that code exists at the deployed address.
    #[arg(long)]
    no_verify_code: bool,
}

impl DeployArgs {
    pub fn config(&self) -> eyre::Result<DeploymentConfig> {
        if self.confirmations == 0 {
            bail!("--confirmations must be at least 1");
        }
        Ok(DeploymentConfig::builder()
            .max_fee_per_gas_wei(gwei_to_wei(&self.max_fee_per_gas_gwei)?)
            .max_priority_fee_per_gas_wei(gwei_to_wei(&self.max_priority_fee_per_gas_gwei)?)
            .gas_limit(self.gas_limit)
            .constructor_args(self.constructor_args.clone())
            .constructor_value(self.constructor_value)
            .verify_code(!self.no_verify_code)
            .confirmation(ConfirmationConfig {
                confirmations: self.confirmations,
                timeout: Duration::from_secs(self.timeout),
            })
            .build())
    }
}

fn gwei_to_wei(gwei: &Option<String>) -> eyre::Result<Option<u128>> {
    gwei.as_deref().map(convert_gwei_to_wei).transpose()
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    const TEST_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[derive(Debug, Parser)]
    struct TestArgs {
        #[command(flatten)]
        auth: AuthArgs,
        #[command(flatten)]
        deploy: DeployArgs,
    }

    #[test]
    fn signer_from_private_key() {
        let signer = signer_from_hex(TEST_KEY).unwrap();
        assert_eq!(
            signer.address().to_string(),
            "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"
        );
        assert!(signer_from_hex(&TEST_KEY[2..]).is_ok());
    }

    #[test]
    fn rejects_bad_private_keys() {
        assert!(signer_from_hex("").is_err());
        assert!(signer_from_hex("0x1234").is_err());
        assert!(signer_from_hex("0xzz").is_err());
    }

    #[test]
    fn wallet_from_key_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("key.txt");
        fs::write(&path, format!("{TEST_KEY}\n")).unwrap();

        let args = TestArgs::parse_from([
            "test",
            "--private-key-path",
            path.to_str().unwrap(),
        ]);
        assert!(args.auth.build_wallet().is_ok());
    }

    #[test]
    fn deploy_config_from_flags() {
        let args = TestArgs::parse_from([
            "test",
            "--max-fee-per-gas-gwei",
            "1.5",
            "--gas-limit",
            "600000",
            "--confirmations",
            "2",
            "--timeout",
            "30",
            "--constructor-value",
            "0.1",
            "--no-verify-code",
        ]);
        let config = args.deploy.config().unwrap();
        assert_eq!(config.max_fee_per_gas_wei, Some(1_500_000_000));
        assert_eq!(config.max_priority_fee_per_gas_wei, None);
        assert_eq!(config.gas_limit, Some(600_000));
        assert_eq!(config.confirmation.confirmations, 2);
        assert_eq!(config.confirmation.timeout, Duration::from_secs(30));
        assert_eq!(
            config.constructor_value,
            U256::from(100_000_000_000_000_000u128)
        );
        assert!(!config.verify_code);
    }

    #[test]
    fn zero_confirmations_rejected() {
        let args = TestArgs::parse_from(["test", "--confirmations", "0"]);
        assert!(args.deploy.config().is_err());
    }
}
