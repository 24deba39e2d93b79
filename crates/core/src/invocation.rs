// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Invocation context: who runs a goal, for which workspace, on which checkout.

use crate::clock::Clock;
use crate::goal::{GoalMessage, Provenance};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Identity of the dispatching process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub name: String,
    pub version: String,
}

impl Default for Registration {
    fn default() -> Self {
        Self { name: "goalpost".to_string(), version: env!("CARGO_PKG_VERSION").to_string() }
    }
}

/// Per-event context handed in by the event-handler plumbing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionContext {
    pub workspace_id: String,
    #[serde(default)]
    pub workspace_name: String,
    pub correlation_id: String,
}

/// One request to execute a goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalInvocation {
    pub goal: GoalMessage,
    pub context: ExecutionContext,
    #[serde(default)]
    pub registration: Registration,
    /// Goal definition asks for isolated execution
    #[serde(default)]
    pub isolated: bool,
}

impl GoalInvocation {
    pub fn new(goal: GoalMessage, context: ExecutionContext, registration: Registration) -> Self {
        Self { goal, context, registration, isolated: false }
    }

    pub fn isolated(mut self, isolated: bool) -> Self {
        self.isolated = isolated;
        self
    }

    /// Provenance entry for a change this invocation makes.
    pub fn provenance(&self, stage: &str, clock: &dyn Clock) -> Provenance {
        provenance_for(&self.registration, &self.context, stage, clock)
    }
}

/// Provenance entry stamped with `registration` as the actor.
pub fn provenance_for(
    registration: &Registration,
    context: &ExecutionContext,
    stage: &str,
    clock: &dyn Clock,
) -> Provenance {
    Provenance {
        registration: registration.name.clone(),
        version: registration.version.clone(),
        name: stage.to_string(),
        correlation_id: context.correlation_id.clone(),
        ts: clock.epoch_ms(),
    }
}

/// A checked-out project on local disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    root: PathBuf,
}

impl Project {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}
