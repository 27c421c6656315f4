// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

/// The default endpoint, matching a local development node.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8545";

/// The contract deployed when none is named.
pub const DEFAULT_CONTRACT: &str = "Settlement";

/// Where the build step writes contract artifacts.
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

/// Seconds to wait for the deploy tx to be confirmed.
pub const DEFAULT_CONFIRMATION_TIMEOUT_SECS: &str = "300";
