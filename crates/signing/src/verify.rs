// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Verification of incoming goals.
//!
//! A goal is accepted when its signature validates under any trusted key.
//! A rejected goal is moved to `failure`, the rejection is published, and
//! the caller gets a [`VerifyError`], so no listener ever acts on it.

use crate::canonical::canonical_bytes;
use crate::error::{SigningError, VerifyError};
use crate::keys::{GoalSigner, TrustedKeys};
use crate::sign::publish_goal;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use ed25519_dalek::Signature;
use gp_core::{
    provenance_for, Clock, ExecutionContext, GoalMessage, GoalPublisher, GoalSigningConfig,
    GoalState, GoalUpdate, Registration,
};
use std::sync::Arc;

/// Provenance stage name of rejections.
const VERIFY_STAGE: &str = "goal-verifier";

/// Checks incoming goals against the trusted keys.
#[derive(Clone)]
pub struct GoalVerifier {
    enabled: bool,
    signer: Option<GoalSigner>,
    trusted: TrustedKeys,
    registration: Registration,
    publisher: Arc<dyn GoalPublisher>,
    clock: Arc<dyn Clock>,
}

impl GoalVerifier {
    pub fn new(
        trusted: TrustedKeys,
        registration: Registration,
        publisher: Arc<dyn GoalPublisher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { enabled: true, signer: None, trusted, registration, publisher, clock }
    }

    /// Verifier that accepts every goal.
    pub fn disabled(
        registration: Registration,
        publisher: Arc<dyn GoalPublisher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { enabled: false, ..Self::new(TrustedKeys::new(), registration, publisher, clock) }
    }

    /// Sign published rejections with `signer`.
    pub fn with_signer(mut self, signer: GoalSigner) -> Self {
        self.signer = Some(signer);
        self
    }

    /// Parse the `[signing]` key material; the signing key is trusted too.
    pub fn from_config(
        config: &GoalSigningConfig,
        registration: Registration,
        publisher: Arc<dyn GoalPublisher>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, SigningError> {
        if !config.enabled {
            return Ok(Self::disabled(registration, publisher, clock));
        }
        let signer = config.signing_key.as_ref().map(GoalSigner::from_config).transpose()?;
        let trusted = TrustedKeys::from_config(config, signer.as_ref())?;
        if trusted.is_empty() {
            tracing::warn!("goal signing enabled without any trusted key; every goal will be rejected");
        }
        let verifier = Self::new(trusted, registration, publisher, clock);
        Ok(match signer {
            Some(signer) => verifier.with_signer(signer),
            None => verifier,
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Key used for outgoing goals, if any.
    pub fn signer(&self) -> Option<&GoalSigner> {
        self.signer.as_ref()
    }

    pub fn trusted_keys(&self) -> &TrustedKeys {
        &self.trusted
    }

    /// Accept `goal` or reject it.
    ///
    /// An accepted goal is returned unchanged, enrichment included.
    pub async fn verify(
        &self,
        goal: &GoalMessage,
        context: &ExecutionContext,
    ) -> Result<GoalMessage, VerifyError> {
        if !self.enabled {
            return Ok(goal.clone());
        }
        match self.check(goal) {
            Ok(key) => {
                tracing::debug!(goal = %goal.unique_name, key, "goal signature verified");
                Ok(goal.clone())
            }
            Err(rejection) => {
                self.reject(goal, context, &rejection).await;
                Err(rejection)
            }
        }
    }

    /// Name of the key the goal's signature validates under.
    fn check(&self, goal: &GoalMessage) -> Result<&str, VerifyError> {
        let unique_name = goal.unique_name.clone();
        let Some(encoded) = goal.signature.as_deref() else {
            return Err(VerifyError::SignatureMissing { unique_name });
        };
        let invalid = || VerifyError::SignatureInvalid { unique_name: goal.unique_name.clone() };

        let raw = STANDARD.decode(encoded).map_err(|_| invalid())?;
        let signature = Signature::from_slice(&raw).map_err(|_| invalid())?;
        let bytes = canonical_bytes(goal).map_err(|_| invalid())?;
        self.trusted.verify(&bytes, &signature).ok_or_else(invalid)
    }

    async fn reject(&self, goal: &GoalMessage, context: &ExecutionContext, rejection: &VerifyError) {
        tracing::warn!(
            goal = %goal.unique_name,
            signer = goal.signer_name.as_deref().unwrap_or("<none>"),
            reason = rejection.phase(),
            "rejecting goal"
        );
        let update = GoalUpdate::state(GoalState::Failure)
            .phase(rejection.phase())
            .description(format!("Rejected: {}", goal.name));
        let provenance =
            provenance_for(&self.registration, context, VERIFY_STAGE, self.clock.as_ref());
        let rejected = goal.transition(update, provenance);

        if let Err(e) = publish_goal(self.publisher.as_ref(), &rejected, self.signer.as_ref()).await
        {
            tracing::error!(goal = %goal.unique_name, error = %e, "failed to publish goal rejection");
        }
    }
}

#[cfg(test)]
#[path = "verify_tests.rs"]
mod tests;
