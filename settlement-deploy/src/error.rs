// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::fmt;
use std::process::ExitCode;

pub type DeployCliResult<T = ()> = Result<T, DeployCliError>;

#[derive(Debug)]
pub struct DeployCliError {
    error: eyre::Error,
    exit_code: ExitCode,
    /// Already printed by the deployment runner.
    reported: bool,
}

impl DeployCliError {
    /// Wraps a failure the deployment runner has already written to stderr.
    pub fn reported(err: impl Into<eyre::Error>) -> Self {
        Self {
            error: err.into(),
            exit_code: ExitCode::FAILURE,
            reported: true,
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        self.exit_code
    }

    pub fn is_reported(&self) -> bool {
        self.reported
    }
}

impl fmt::Display for DeployCliError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.error.fmt(f)
    }
}

impl From<std::io::Error> for DeployCliError {
    fn from(err: std::io::Error) -> Self {
        Self {
            error: err.into(),
            exit_code: ExitCode::FAILURE,
            reported: false,
        }
    }
}

impl From<eyre::Error> for DeployCliError {
    fn from(error: eyre::Error) -> Self {
        Self {
            error,
            exit_code: ExitCode::FAILURE,
            reported: false,
        }
    }
}

impl From<settlement_tools::DeploymentError> for DeployCliError {
    fn from(err: settlement_tools::DeploymentError) -> Self {
        Self {
            error: err.into(),
            exit_code: ExitCode::FAILURE,
            reported: false,
        }
    }
}

impl From<settlement_tools::core::network::NetworkError> for DeployCliError {
    fn from(err: settlement_tools::core::network::NetworkError) -> Self {
        Self {
            error: err.into(),
            exit_code: ExitCode::FAILURE,
            reported: false,
        }
    }
}
