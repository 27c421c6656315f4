// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Build the contract-creation transaction for an artifact.

use alloy::{
    dyn_abi::{DynSolValue, JsonAbiExt, Specifier},
    json_abi::{Constructor, StateMutability},
    network::TransactionBuilder,
    primitives::{Address, Bytes, U256},
    rpc::types::TransactionRequest,
};

use super::{client::DeploymentClient, DeploymentConfig, SubmissionError};
use crate::core::artifact::Artifact;

/// Deployment transaction request for a compiled contract
#[derive(Debug, Clone)]
pub struct DeploymentRequest {
    tx: TransactionRequest,
    value: U256,
    gas_limit: Option<u64>,
    max_fee_per_gas_wei: Option<u128>,
    max_priority_fee_per_gas_wei: Option<u128>,
}

impl DeploymentRequest {
    pub fn new(
        sender: Address,
        artifact: &Artifact,
        config: &DeploymentConfig,
    ) -> Result<Self, SubmissionError> {
        let args = encode_constructor_args(
            artifact.constructor(),
            &config.constructor_args,
            config.constructor_value,
        )?;
        let mut code = artifact.bytecode().to_vec();
        code.extend(args);

        let mut tx = TransactionRequest::default()
            .with_from(sender)
            .with_deploy_code(Bytes::from(code));
        if !config.constructor_value.is_zero() {
            tx = tx.with_value(config.constructor_value);
        }

        Ok(Self {
            tx,
            value: config.constructor_value,
            gas_limit: config.gas_limit,
            max_fee_per_gas_wei: config.max_fee_per_gas_wei,
            max_priority_fee_per_gas_wei: config.max_priority_fee_per_gas_wei,
        })
    }

    pub fn tx(&self) -> &TransactionRequest {
        &self.tx
    }

    pub fn value(&self) -> U256 {
        self.value
    }

    /// Gas limit for the deployment, estimated by the node unless overridden.
    pub async fn estimate_gas(
        &self,
        client: &impl DeploymentClient,
    ) -> Result<u64, SubmissionError> {
        match self.gas_limit {
            Some(gas) => Ok(gas),
            None => client
                .estimate_gas(&self.tx)
                .await
                .map_err(SubmissionError::GasEstimation),
        }
    }

    pub async fn fee_per_gas(
        &self,
        client: &impl DeploymentClient,
    ) -> Result<u128, SubmissionError> {
        match self.max_fee_per_gas_wei {
            Some(wei) => Ok(wei),
            None => Ok(client.gas_price().await?),
        }
    }

    /// Finalizes the transaction. Fee fields that were not overridden are left for the
    /// provider's gas filler.
    pub fn into_tx(self, gas: u64) -> TransactionRequest {
        let mut tx = self.tx.with_gas_limit(gas);
        if let Some(max_fee) = self.max_fee_per_gas_wei {
            tx.max_fee_per_gas = Some(max_fee);
        }
        if let Some(priority_fee) = self.max_priority_fee_per_gas_wei {
            tx.max_priority_fee_per_gas = Some(priority_fee);
        }
        tx
    }
}

/// ABI-encodes `args` against the artifact's constructor.
pub fn encode_constructor_args(
    constructor: Option<&Constructor>,
    args: &[String],
    value: U256,
) -> Result<Vec<u8>, SubmissionError> {
    let Some(constructor) = constructor else {
        if !args.is_empty() {
            return Err(SubmissionError::InvalidConstructor(format!(
                "contract has no constructor but {} arguments were given",
                args.len()
            )));
        }
        if !value.is_zero() {
            return Err(SubmissionError::InvalidConstructor(
                "attempting to send Ether to non-payable constructor".to_string(),
            ));
        }
        return Ok(Vec::new());
    };

    if constructor.state_mutability != StateMutability::Payable && !value.is_zero() {
        return Err(SubmissionError::InvalidConstructor(
            "attempting to send Ether to non-payable constructor".to_string(),
        ));
    }
    if args.len() != constructor.inputs.len() {
        return Err(SubmissionError::InvalidConstructor(format!(
            "mismatch number of constructor arguments (want {}; got {})",
            constructor.inputs.len(),
            args.len(),
        )));
    }

    let mut values = Vec::<DynSolValue>::with_capacity(args.len());
    for (arg, param) in args.iter().zip(constructor.inputs.iter()) {
        let ty = param.resolve().map_err(|err| {
            SubmissionError::InvalidConstructor(format!(
                "could not resolve constructor arg {param}: {err}"
            ))
        })?;
        let value = ty.coerce_str(arg).map_err(|err| {
            SubmissionError::InvalidConstructor(format!(
                "could not parse constructor arg {param}: {err}"
            ))
        })?;
        values.push(value);
    }

    constructor
        .abi_encode_input_raw(&values)
        .map_err(|err| SubmissionError::InvalidConstructor(err.to_string()))
}

#[cfg(test)]
mod tests {
    use alloy::primitives::address;

    use super::*;
    use crate::core::artifact::{
        tests::{write_hardhat, SETTLEMENT_ABI, SETTLEMENT_BYTECODE},
        ArtifactDir, ArtifactResolver,
    };

    const SENDER: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

    const FEE_VAULT_ABI: &str = r#"[
        {"inputs":[
            {"internalType":"address","name":"owner","type":"address"},
            {"internalType":"uint256","name":"feeBps","type":"uint256"}
        ],"stateMutability":"payable","type":"constructor"}
    ]"#;

    fn fee_vault() -> Artifact {
        let dir = tempfile::tempdir().unwrap();
        write_hardhat(dir.path(), "FeeVault", FEE_VAULT_ABI, SETTLEMENT_BYTECODE);
        ArtifactDir::new(dir.path()).resolve("FeeVault").unwrap()
    }

    fn settlement() -> Artifact {
        let dir = tempfile::tempdir().unwrap();
        write_hardhat(dir.path(), "Settlement", SETTLEMENT_ABI, SETTLEMENT_BYTECODE);
        ArtifactDir::new(dir.path()).resolve("Settlement").unwrap()
    }

    #[test]
    fn no_arg_constructor_deploys_bare_bytecode() {
        let artifact = settlement();
        let req = DeploymentRequest::new(SENDER, &artifact, &DeploymentConfig::default()).unwrap();

        let input = req.tx().input.input().unwrap();
        assert_eq!(input, artifact.bytecode());
        assert_eq!(req.tx().from, Some(SENDER));
        assert!(req.tx().value.is_none());
    }

    #[test]
    fn constructor_args_are_appended() {
        let artifact = fee_vault();
        let config = DeploymentConfig::builder()
            .constructor_args(vec![
                "0x70997970C51812dc3A010C7d01b50e0d17dc79C8".to_string(),
                "25".to_string(),
            ])
            .constructor_value(U256::from(7))
            .build();
        let req = DeploymentRequest::new(SENDER, &artifact, &config).unwrap();

        let input = req.tx().input.input().unwrap();
        let code_len = artifact.bytecode().len();
        assert_eq!(input.len(), code_len + 64);
        assert_eq!(&input[..code_len], &artifact.bytecode()[..]);
        assert_eq!(
            &input[code_len + 12..code_len + 32],
            address!("70997970C51812dc3A010C7d01b50e0d17dc79C8").as_slice()
        );
        assert_eq!(input[code_len + 63], 25);
        assert_eq!(req.value(), U256::from(7));
        assert_eq!(req.tx().value, Some(U256::from(7)));
    }

    #[test]
    fn constructor_arg_count_must_match() {
        let artifact = fee_vault();
        let config = DeploymentConfig::builder()
            .constructor_args(vec!["25".to_string()])
            .build();
        let err = DeploymentRequest::new(SENDER, &artifact, &config).unwrap_err();
        assert!(err.to_string().contains("mismatch number of constructor arguments"));
    }

    #[test]
    fn constructor_args_must_parse() {
        let artifact = fee_vault();
        let config = DeploymentConfig::builder()
            .constructor_args(vec!["not-an-address".to_string(), "25".to_string()])
            .build();
        let err = DeploymentRequest::new(SENDER, &artifact, &config).unwrap_err();
        assert!(err.to_string().contains("could not parse constructor arg"));
    }

    #[test]
    fn value_requires_payable_constructor() {
        let artifact = settlement();
        let config = DeploymentConfig::builder()
            .constructor_value(U256::from(1))
            .build();
        let err = DeploymentRequest::new(SENDER, &artifact, &config).unwrap_err();
        assert!(matches!(err, SubmissionError::InvalidConstructor(_)));
    }

    #[test]
    fn missing_constructor_rejects_args() {
        let err = encode_constructor_args(None, &["1".to_string()], U256::ZERO).unwrap_err();
        assert!(err.to_string().contains("no constructor"));
        assert!(encode_constructor_args(None, &[], U256::ZERO)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn overrides_are_applied_to_tx() {
        let artifact = settlement();
        let config = DeploymentConfig::builder()
            .max_fee_per_gas_wei(Some(2_000_000_000))
            .max_priority_fee_per_gas_wei(Some(1))
            .build();
        let tx = DeploymentRequest::new(SENDER, &artifact, &config)
            .unwrap()
            .into_tx(500_000);
        assert_eq!(tx.gas, Some(500_000));
        assert_eq!(tx.max_fee_per_gas, Some(2_000_000_000));
        assert_eq!(tx.max_priority_fee_per_gas, Some(1));
    }
}
