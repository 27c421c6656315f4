// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use crate::utils::color::Color;

/// Transport prefixes the provider builder is built to connect to.
const SUPPORTED_SCHEMES: [&str; 2] = ["http://", "https://"];

#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    #[error("no RPC endpoint configured (set {} or pass --endpoint)", "RPC_URL".yellow())]
    MissingEndpoint,
    #[error("unsupported RPC endpoint {}: expected an http:// or https:// URL", .0.red())]
    UnsupportedEndpoint(String),
}

/// Rejects endpoints the provider cannot connect to before any signer material is loaded.
pub fn check_endpoint(endpoint: &str) -> Result<(), NetworkError> {
    let endpoint = endpoint.trim();
    if endpoint.is_empty() {
        return Err(NetworkError::MissingEndpoint);
    }
    let lower = endpoint.to_ascii_lowercase();
    if SUPPORTED_SCHEMES.iter().any(|s| lower.starts_with(s)) {
        Ok(())
    } else {
        Err(NetworkError::UnsupportedEndpoint(endpoint.to_owned()))
    }
}
