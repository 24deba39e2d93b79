// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! gp-scheduler: runs goals as isolated Kubernetes jobs
//!
//! # Module layout
//!
//! - [`selector`]: which schedulers the environment selects
//! - [`naming`]: job and label name derivation
//! - [`job_env`]: environment handed to the isolated process
//! - [`job_spec`]: job construction from the running pod
//! - [`orchestrator`]: Kubernetes API seam
//! - [`context`]: identity of the running dispatcher
//! - [`kubernetes`]: the scheduler itself

pub mod context;
pub mod error;
pub mod job_env;
pub mod job_spec;
pub mod kubernetes;
pub mod naming;
pub mod orchestrator;
pub mod selector;

pub use context::SchedulerContext;
pub use error::SchedulerError;
pub use job_env::k8s_job_env;
pub use job_spec::create_job_spec;
pub use kubernetes::{GoalScheduler, KubernetesGoalScheduler, ScheduleOutcome};
pub use naming::{job_name, k8s_job_name};
#[cfg(any(test, feature = "test-support"))]
pub use orchestrator::{FakeOrchestrator, OrchestratorCall};
pub use orchestrator::{KubeOrchestrator, Orchestrator};
pub use selector::{configured_schedulers, is_configured_in_env};
