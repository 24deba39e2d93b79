// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! gp-core: goal model and collaborator seams shared by the goalpost crates

pub mod macros;

pub mod clock;
pub mod config;
pub mod env;
pub mod goal;
pub mod invocation;
pub mod listener;
pub mod publish;
pub mod push;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{
    CacheConfig, ConfigError, GoalSigningConfig, GoalpostConfig, SchedulerConfig,
    SigningKeyConfig, VerificationKeyConfig,
};
pub use env::EnvSnapshot;
#[cfg(any(test, feature = "test-support"))]
pub use goal::GoalMessageBuilder;
pub use goal::{
    ExternalUrl, Fulfillment, GoalMessage, GoalRef, GoalState, GoalUpdate, Provenance, RepoRef,
};
pub use invocation::{provenance_for, ExecutionContext, GoalInvocation, Project, Registration};
pub use listener::{
    action_fn, GoalPhase, ListenerError, NoOpAction, ProjectAction, ProjectListener,
};
#[cfg(any(test, feature = "test-support"))]
pub use publish::FakePublisher;
pub use publish::{GoalPublisher, PublishError};
pub use push::{push_test, PushContext, PushTest};
