// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Tools for resolving compiled contract artifacts and deploying them to EVM chains.
//!
//! The entry point is [`DeploymentRunner`], which takes its artifact source and network client
//! as explicit dependencies and reports the outcome of a single deployment as a
//! [`DeploymentResult`] instead of terminating the process.

#[macro_use]
mod macros;

pub mod core;
pub mod utils;

pub use crate::core::artifact::{Artifact, ArtifactDir, ArtifactError, ArtifactResolver};
pub use crate::core::deployment::{
    client::{AlloyClient, ConfirmationConfig, DeploymentClient, DeploymentReceipt},
    runner::{Deployment, DeploymentResult, DeploymentRunner, GasEstimate},
    ConfirmationError, DeploymentConfig, DeploymentError, ErrorKind, SubmissionError,
};
