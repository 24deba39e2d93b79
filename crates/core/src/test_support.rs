// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::goal::GoalMessage;
use crate::invocation::{ExecutionContext, GoalInvocation, Project, Registration};
use std::path::PathBuf;

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for goal identity fields.
pub mod strategies {
    use crate::goal::GoalState;
    use proptest::prelude::*;

    pub fn arb_goal_state() -> impl Strategy<Value = GoalState> {
        prop_oneof![
            Just(GoalState::Requested),
            Just(GoalState::InProcess),
            Just(GoalState::Success),
            Just(GoalState::Failure),
            Just(GoalState::WaitingForApproval),
            Just(GoalState::WaitingForPreApproval),
            Just(GoalState::Stopped),
        ]
    }

    /// Unique names as goal definitions produce them, plus arbitrary junk.
    pub fn arb_unique_name() -> impl Strategy<Value = String> {
        prop_oneof![
            "[A-Za-z][A-Za-z0-9_.-]{0,40}(#[A-Za-z0-9.:]{1,20})?",
            any::<String>(),
            ".{100,300}",
        ]
    }

    pub fn arb_container_name() -> impl Strategy<Value = String> {
        prop_oneof!["[a-z][a-z0-9-]{0,62}", any::<String>()]
    }

    pub fn arb_goal_set_id() -> impl Strategy<Value = String> {
        prop_oneof!["[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}", any::<String>()]
    }
}

// ── Fixtures ────────────────────────────────────────────────────────────

pub fn registration() -> Registration {
    Registration { name: "@acme/rocket-sdm".to_string(), version: "1.4.0".to_string() }
}

pub fn context() -> ExecutionContext {
    ExecutionContext {
        workspace_id: "T0W0RKSP4CE".to_string(),
        workspace_name: "acme".to_string(),
        correlation_id: "corr-1234".to_string(),
    }
}

pub fn invocation() -> GoalInvocation {
    invocation_for(GoalMessage::builder().id("goal-1").build())
}

pub fn invocation_for(goal: GoalMessage) -> GoalInvocation {
    GoalInvocation::new(goal, context(), registration())
}

pub fn project(root: impl Into<PathBuf>) -> Project {
    Project::new(root)
}
