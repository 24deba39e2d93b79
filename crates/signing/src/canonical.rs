// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Canonical byte form of a goal message.
//!
//! Field order is fixed by [`CanonicalGoal`] and absent optional fields are
//! written as `null`, so equal goal state always yields equal bytes. The
//! signature envelope and the delivery enrichment (`id`, `push`) are left
//! out: they are attached after signing.

use gp_core::{ExternalUrl, Fulfillment, GoalMessage, GoalRef, GoalState, Provenance, RepoRef};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CanonicalGoal<'a> {
    unique_name: &'a str,
    name: &'a str,
    environment: &'a str,
    goal_set_id: &'a str,
    sha: &'a str,
    branch: &'a str,
    repo: &'a RepoRef,
    state: GoalState,
    phase: Option<&'a str>,
    description: &'a str,
    url: Option<&'a str>,
    external_urls: &'a [ExternalUrl],
    pre_conditions: &'a [GoalRef],
    version: u64,
    ts: u64,
    provenance: &'a [Provenance],
    fulfillment: &'a Fulfillment,
    data: Option<&'a str>,
    retry_feasible: bool,
    approval_required: bool,
    pre_approval_required: bool,
    approval: Option<&'a Provenance>,
    pre_approval: Option<&'a Provenance>,
}

impl<'a> From<&'a GoalMessage> for CanonicalGoal<'a> {
    fn from(goal: &'a GoalMessage) -> Self {
        Self {
            unique_name: &goal.unique_name,
            name: &goal.name,
            environment: &goal.environment,
            goal_set_id: &goal.goal_set_id,
            sha: &goal.sha,
            branch: &goal.branch,
            repo: &goal.repo,
            state: goal.state,
            phase: goal.phase.as_deref(),
            description: &goal.description,
            url: goal.url.as_deref(),
            external_urls: &goal.external_urls,
            pre_conditions: &goal.pre_conditions,
            version: goal.version,
            ts: goal.ts,
            provenance: &goal.provenance,
            fulfillment: &goal.fulfillment,
            data: goal.data.as_deref(),
            retry_feasible: goal.retry_feasible,
            approval_required: goal.approval_required,
            pre_approval_required: goal.pre_approval_required,
            approval: goal.approval.as_ref(),
            pre_approval: goal.pre_approval.as_ref(),
        }
    }
}

/// Bytes covered by a goal signature.
pub fn canonical_bytes(goal: &GoalMessage) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(&CanonicalGoal::from(goal))
}

#[cfg(test)]
#[path = "canonical_tests.rs"]
mod tests;
