// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ed25519 key material, parsed once from config.
//!
//! Private keys are PKCS#8 PEM (optionally passphrase-encrypted), public
//! keys are SubjectPublicKeyInfo PEM.

use crate::error::SigningError;
use ed25519_dalek::pkcs8::{DecodePrivateKey, DecodePublicKey};
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use gp_core::{GoalSigningConfig, SigningKeyConfig, VerificationKeyConfig};

/// Private key used to sign outgoing goals.
#[derive(Clone)]
pub struct GoalSigner {
    name: String,
    key: SigningKey,
}

impl GoalSigner {
    pub fn new(name: impl Into<String>, key: SigningKey) -> Self {
        Self { name: name.into(), key }
    }

    pub fn from_config(config: &SigningKeyConfig) -> Result<Self, SigningError> {
        let pem = config.private_key.trim();
        let key = match config.passphrase.as_deref() {
            Some(passphrase) => SigningKey::from_pkcs8_encrypted_pem(pem, passphrase),
            None => SigningKey::from_pkcs8_pem(pem),
        }
        .map_err(|e| SigningError::InvalidKey { name: config.name.clone(), message: e.to_string() })?;
        Ok(Self::new(&config.name, key))
    }

    /// Name recorded as `signerName` on signed goals.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn verifying_key(&self) -> VerifyingKey {
        self.key.verifying_key()
    }

    pub(crate) fn sign(&self, message: &[u8]) -> Signature {
        self.key.sign(message)
    }
}

impl std::fmt::Debug for GoalSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoalSigner").field("name", &self.name).finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
struct TrustedKey {
    name: String,
    key: VerifyingKey,
}

/// Public keys accepted on incoming goals, tried in order.
#[derive(Debug, Clone, Default)]
pub struct TrustedKeys {
    keys: Vec<TrustedKey>,
}

impl TrustedKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Signing key first (if any), then the configured verification keys.
    pub fn from_config(
        config: &GoalSigningConfig,
        signer: Option<&GoalSigner>,
    ) -> Result<Self, SigningError> {
        let mut trusted = Self::new();
        if let Some(signer) = signer {
            trusted.add(signer.name(), signer.verifying_key());
        }
        for key in &config.verification_keys {
            trusted.add_config(key)?;
        }
        Ok(trusted)
    }

    pub fn add(&mut self, name: impl Into<String>, key: VerifyingKey) {
        self.keys.push(TrustedKey { name: name.into(), key });
    }

    fn add_config(&mut self, config: &VerificationKeyConfig) -> Result<(), SigningError> {
        let key = VerifyingKey::from_public_key_pem(config.public_key.trim()).map_err(|e| {
            SigningError::InvalidKey { name: config.name.clone(), message: e.to_string() }
        })?;
        self.add(&config.name, key);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(|k| k.name.as_str())
    }

    /// Name of the first key `signature` validates under.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> Option<&str> {
        self.keys
            .iter()
            .find(|k| k.key.verify(message, signature).is_ok())
            .map(|k| k.name.as_str())
    }
}

#[cfg(test)]
#[path = "keys_tests.rs"]
mod tests;
