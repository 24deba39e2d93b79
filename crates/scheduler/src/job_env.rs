// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Environment handed to the isolated goal process.

use crate::naming::{job_suffix, k8s_job_name};
use gp_core::env::ISOLATED_GOAL_VAR;
use gp_core::{ExecutionContext, GoalMessage, Registration};
use k8s_openapi::api::core::v1::{EnvVar, Pod};

pub const JOB_NAME_VAR: &str = "GOALPOST_JOB_NAME";
pub const REGISTRATION_NAME_VAR: &str = "GOALPOST_REGISTRATION_NAME";
pub const WORKSPACE_ID_VAR: &str = "GOALPOST_WORKSPACE_ID";
pub const WORKSPACE_NAME_VAR: &str = "GOALPOST_WORKSPACE_NAME";
pub const GOAL_ID_VAR: &str = "GOALPOST_GOAL_ID";
pub const GOAL_SET_ID_VAR: &str = "GOALPOST_GOAL_SET_ID";
pub const GOAL_UNIQUE_NAME_VAR: &str = "GOALPOST_GOAL_UNIQUE_NAME";
pub const CORRELATION_ID_VAR: &str = "GOALPOST_CORRELATION_ID";

/// Variables identifying the goal run, in a stable order.
pub fn k8s_job_env(
    pod: &Pod,
    goal: &GoalMessage,
    registration: &Registration,
    context: &ExecutionContext,
) -> Vec<EnvVar> {
    let registration_name = format!("{}{}", registration.name, job_suffix(goal));
    vec![
        env_var(JOB_NAME_VAR, &k8s_job_name(pod, goal)),
        env_var(REGISTRATION_NAME_VAR, &registration_name),
        env_var(WORKSPACE_ID_VAR, &context.workspace_id),
        env_var(WORKSPACE_NAME_VAR, &context.workspace_name),
        env_var(GOAL_ID_VAR, goal.id_or_empty()),
        env_var(GOAL_SET_ID_VAR, &goal.goal_set_id),
        env_var(GOAL_UNIQUE_NAME_VAR, &goal.unique_name),
        env_var(CORRELATION_ID_VAR, &context.correlation_id),
        env_var(ISOLATED_GOAL_VAR, "true"),
    ]
}

fn env_var(name: &str, value: &str) -> EnvVar {
    EnvVar { name: name.to_string(), value: Some(value.to_string()), ..Default::default() }
}

#[cfg(test)]
#[path = "job_env_tests.rs"]
mod tests;
