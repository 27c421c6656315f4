// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! CLI for `settlement-deploy`.

use std::process::ExitCode;

use clap::Parser;

use crate::error::DeployCliResult;

mod common_args;
mod constants;
mod deploy;
mod error;
mod utils;

#[derive(Debug, Parser)]
#[command(name = "settlement-deploy")]
#[command(about = "Deploy a compiled contract and print its address", long_about = None)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    deploy: deploy::Args,

    /// Whether to print debug info.
    #[arg(long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Cli::parse();

    let log_level = if args.verbose {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    simple_logger::init_with_level(log_level).expect("setting up logger");

    // A deployment is a single in-flight operation, so the current thread is enough
    let result = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(Into::into)
        .and_then(|rt| rt.block_on(deploy::exec(args.deploy)));

    exit_code(result)
}

/// Reports any error not printed yet and returns the proper exit code.
fn exit_code(result: DeployCliResult) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if !err.is_reported() {
                utils::print_error(&err);
            }
            err.exit_code()
        }
    }
}
