// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::canonical::canonical_bytes;
use crate::error::SigningError;
use crate::keys::GoalSigner;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use gp_core::{GoalMessage, GoalPublisher};

/// Signed copy of `goal`; the input is left untouched.
pub fn sign_goal(goal: &GoalMessage, signer: &GoalSigner) -> Result<GoalMessage, SigningError> {
    let bytes = canonical_bytes(goal)?;
    let signature = signer.sign(&bytes);
    let mut signed = goal.clone();
    signed.signature = Some(STANDARD.encode(signature.to_bytes()));
    signed.signer_name = Some(signer.name().to_string());
    Ok(signed)
}

/// Publish `goal`, signing it first when a signer is configured.
///
/// Returns the message as published.
pub async fn publish_goal(
    publisher: &dyn GoalPublisher,
    goal: &GoalMessage,
    signer: Option<&GoalSigner>,
) -> Result<GoalMessage, SigningError> {
    let message = match signer {
        Some(signer) => sign_goal(goal, signer)?,
        None => goal.clone(),
    };
    publisher.publish(&message).await?;
    tracing::debug!(
        goal = %message.unique_name,
        state = %message.state,
        signed = message.is_signed(),
        "published goal"
    );
    Ok(message)
}

#[cfg(test)]
#[path = "sign_tests.rs"]
mod tests;
