// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Goal message: the state of one goal instance as it travels the bus.
//!
//! A message is mutated by one processing stage at a time, always through
//! [`GoalMessage::transition`], which bumps `version` and appends exactly one
//! [`Provenance`] entry. Fields fall in three groups:
//!
//! - covered fields, which the signature protects;
//! - enrichment (`id`, `push`), attached by the bus after signing;
//! - the envelope (`signature`, `signer_name`).

use serde::{Deserialize, Serialize};

/// Lifecycle state of a goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalState {
    Planned,
    Requested,
    InProcess,
    Success,
    Failure,
    WaitingForApproval,
    Approved,
    WaitingForPreApproval,
    PreApproved,
    Stopped,
    Skipped,
    Canceled,
}

impl GoalState {
    /// No further transition is expected from this state.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            GoalState::Success
                | GoalState::Failure
                | GoalState::Stopped
                | GoalState::Skipped
                | GoalState::Canceled
        )
    }
}

crate::simple_display! {
    GoalState {
        Planned => "planned",
        Requested => "requested",
        InProcess => "in_process",
        Success => "success",
        Failure => "failure",
        WaitingForApproval => "waiting_for_approval",
        Approved => "approved",
        WaitingForPreApproval => "waiting_for_pre_approval",
        PreApproved => "pre_approved",
        Stopped => "stopped",
        Skipped => "skipped",
        Canceled => "canceled",
    }
}

/// Repository the goal's commit belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
    #[serde(default)]
    pub provider_id: String,
}

/// Reference to another goal, used for preconditions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalRef {
    pub environment: String,
    pub unique_name: String,
}

/// Link recorded by a goal (build log, deployed URL, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalUrl {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub url: String,
}

/// How the goal gets fulfilled (the implementation name and its method).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fulfillment {
    pub name: String,
    pub method: String,
}

/// One audit entry: which registration advanced the goal, and when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provenance {
    /// Registration (process identity) of the actor
    pub registration: String,
    pub version: String,
    /// Name of the stage or handler that made the change
    pub name: String,
    pub correlation_id: String,
    pub ts: u64,
}

/// Changes one stage applies to a goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalUpdate {
    pub state: GoalState,
    pub description: Option<String>,
    pub phase: Option<String>,
}

impl GoalUpdate {
    pub fn state(state: GoalState) -> Self {
        Self { state, description: None, phase: None }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn phase(mut self, phase: impl Into<String>) -> Self {
        self.phase = Some(phase.into());
        self
    }
}

/// Canonical state of one goal instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalMessage {
    pub unique_name: String,
    /// Display name
    pub name: String,
    pub environment: String,
    pub goal_set_id: String,
    pub sha: String,
    pub branch: String,
    pub repo: RepoRef,
    pub state: GoalState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub external_urls: Vec<ExternalUrl>,
    #[serde(default)]
    pub pre_conditions: Vec<GoalRef>,
    pub version: u64,
    #[serde(default)]
    pub ts: u64,
    #[serde(default)]
    pub provenance: Vec<Provenance>,
    #[serde(default)]
    pub fulfillment: Fulfillment,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(default)]
    pub retry_feasible: bool,
    #[serde(default)]
    pub approval_required: bool,
    #[serde(default)]
    pub pre_approval_required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approval: Option<Provenance>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pre_approval: Option<Provenance>,

    /// Bus-assigned goal identifier (enrichment, not signed)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Routing context attached on delivery (enrichment, not signed)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub push: Option<serde_json::Value>,

    /// Base64 signature over the canonical form
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signer_name: Option<String>,
}

impl GoalMessage {
    /// Apply one stage's update, returning the next version of the goal.
    ///
    /// The returned message carries `version + 1`, the provenance entry
    /// appended, and no signature: the old one no longer matches.
    pub fn transition(&self, update: GoalUpdate, provenance: Provenance) -> GoalMessage {
        let mut next = self.clone();
        next.state = update.state;
        if let Some(description) = update.description {
            next.description = description;
        }
        if update.phase.is_some() {
            next.phase = update.phase;
        }
        next.version = self.version.saturating_add(1);
        next.ts = provenance.ts;
        next.provenance.push(provenance);
        next.signature = None;
        next.signer_name = None;
        next
    }

    pub fn is_signed(&self) -> bool {
        self.signature.is_some()
    }

    pub fn goal_ref(&self) -> GoalRef {
        GoalRef { environment: self.environment.clone(), unique_name: self.unique_name.clone() }
    }

    /// Goal identifier, empty until the bus has assigned one.
    pub fn id_or_empty(&self) -> &str {
        self.id.as_deref().unwrap_or("")
    }
}

crate::builder! {
    pub struct GoalMessageBuilder => GoalMessage {
        into {
            unique_name: String = "build#goals.rs:12",
            name: String = "build",
            environment: String = "0-code",
            goal_set_id: String = "f1e2d3c-4b5a-6978-8a9b-0c1d2e3f4a5b",
            sha: String = "0b1c2d3e4f5a6b7c8d9e0f1a2b3c4d5e6f7a8b9c",
            branch: String = "main",
            description: String = "Planned: build",
        }
        set {
            repo: RepoRef = RepoRef {
                owner: "acme".to_string(),
                name: "rocket".to_string(),
                provider_id: "github".to_string(),
            },
            state: GoalState = GoalState::Requested,
            external_urls: Vec<ExternalUrl> = Vec::new(),
            pre_conditions: Vec<GoalRef> = Vec::new(),
            version: u64 = 1,
            ts: u64 = 1_000_000,
            provenance: Vec<Provenance> = Vec::new(),
            fulfillment: Fulfillment = Fulfillment {
                name: "cargo-build".to_string(),
                method: "sdm".to_string(),
            },
            retry_feasible: bool = false,
            approval_required: bool = false,
            pre_approval_required: bool = false,
        }
        option {
            phase: String = None,
            url: String = None,
            data: String = None,
            approval: Provenance = None,
            pre_approval: Provenance = None,
            id: String = None,
            push: serde_json::Value = None,
            signature: String = None,
            signer_name: String = None,
        }
    }
}

#[cfg(test)]
#[path = "goal_tests.rs"]
mod tests;
