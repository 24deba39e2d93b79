// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! gp-signing: tamper-evident goal messages
//!
//! Outgoing goals are signed over a canonical form of their state; incoming
//! goals are verified against the trusted keys before anything acts on them.
//! A goal that fails verification is marked failed and republished.

pub mod canonical;
pub mod error;
pub mod keys;
pub mod sign;
pub mod verify;

pub use canonical::canonical_bytes;
pub use error::{SigningError, VerifyError};
pub use keys::{GoalSigner, TrustedKeys};
pub use sign::{publish_goal, sign_goal};
pub use verify::GoalVerifier;
