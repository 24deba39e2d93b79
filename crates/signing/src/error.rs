// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use gp_core::PublishError;
use thiserror::Error;

/// Errors loading keys or producing signed goals
#[derive(Debug, Error)]
pub enum SigningError {
    #[error("invalid key {name}: {message}")]
    InvalidKey { name: String, message: String },
    #[error("goal serialization failed: {0}")]
    Canonical(#[from] serde_json::Error),
    #[error(transparent)]
    Publish(#[from] PublishError),
}

/// Why an incoming goal was rejected
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VerifyError {
    #[error("goal {unique_name} rejected: signature missing")]
    SignatureMissing { unique_name: String },
    #[error("goal {unique_name} rejected: signature invalid")]
    SignatureInvalid { unique_name: String },
}

impl VerifyError {
    /// Phase recorded on the rejected goal.
    pub fn phase(&self) -> &'static str {
        match self {
            VerifyError::SignatureMissing { .. } => "rejected because signature missing",
            VerifyError::SignatureInvalid { .. } => "rejected because signature invalid",
        }
    }
}
