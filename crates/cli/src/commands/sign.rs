// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Goal signing and verification

use anyhow::{bail, Result};
use clap::Args;
use gp_core::{ExecutionContext, GoalMessage, GoalpostConfig, SystemClock};
use gp_signing::{sign_goal, GoalSigner, GoalVerifier};
use std::sync::Arc;

use crate::exit_error::{ExitError, REJECTED};
use crate::input::read_json;
use crate::output::{print_json, StdoutPublisher};

#[derive(Args)]
pub struct SignArgs {
    /// Goal JSON, `-` for stdin
    #[arg(value_name = "GOAL", default_value = "-")]
    pub goal: String,
}

#[derive(Args)]
pub struct VerifyArgs {
    /// Goal JSON, `-` for stdin
    #[arg(value_name = "GOAL", default_value = "-")]
    pub goal: String,

    /// Workspace recorded on a rejection
    #[arg(long, default_value = "")]
    pub workspace_id: String,

    /// Correlation id recorded on a rejection
    #[arg(long, default_value = "")]
    pub correlation_id: String,
}

pub fn sign(args: SignArgs, config: &GoalpostConfig) -> Result<()> {
    let Some(key) = &config.signing.signing_key else {
        bail!("no [signing] signing_key configured");
    };
    let signer = GoalSigner::from_config(key)?;
    let goal: GoalMessage = read_json(&args.goal)?;
    print_json(&sign_goal(&goal, &signer)?)
}

/// Prints the accepted goal, or the published rejection and exits non-zero.
pub async fn verify(args: VerifyArgs, config: &GoalpostConfig) -> Result<()> {
    let verifier = GoalVerifier::from_config(
        &config.signing,
        config.registration.clone(),
        Arc::new(StdoutPublisher),
        Arc::new(SystemClock),
    )?;
    if !verifier.is_enabled() {
        tracing::warn!("goal signing disabled; accepting goal unchecked");
    }

    let goal: GoalMessage = read_json(&args.goal)?;
    let context = ExecutionContext {
        workspace_id: args.workspace_id,
        workspace_name: String::new(),
        correlation_id: args.correlation_id,
    };
    match verifier.verify(&goal, &context).await {
        Ok(accepted) => print_json(&accepted),
        Err(e) => Err(ExitError::new(REJECTED, e.to_string()).into()),
    }
}
