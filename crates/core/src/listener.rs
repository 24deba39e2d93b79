// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Project listeners run around goal execution (e.g. cache-miss fallbacks).
//!
//! A listener is exactly three things: an optional push-test predicate, an
//! optional lifecycle phase, and the action to run. A listener with no
//! predicate applies to every push; one with no phase applies to every phase.

use crate::invocation::{GoalInvocation, Project};
use crate::push::{PushContext, PushTest};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Point in the goal lifecycle a listener runs at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalPhase {
    Before,
    After,
}

crate::simple_display! {
    GoalPhase {
        Before => "before",
        After => "after",
    }
}

/// Errors raised by a listener action
#[derive(Debug, Error)]
pub enum ListenerError {
    #[error("listener failed: {0}")]
    Failed(String),
    #[error("listener I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Work a listener performs against the project.
#[async_trait]
pub trait ProjectAction: Send + Sync {
    async fn run(
        &self,
        project: &Project,
        invocation: &GoalInvocation,
        phase: GoalPhase,
    ) -> Result<(), ListenerError>;
}

/// Action that does nothing; the default cache-miss fallback.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpAction;

#[async_trait]
impl ProjectAction for NoOpAction {
    async fn run(
        &self,
        _project: &Project,
        _invocation: &GoalInvocation,
        _phase: GoalPhase,
    ) -> Result<(), ListenerError> {
        Ok(())
    }
}

struct FnAction<F> {
    f: F,
}

#[async_trait]
impl<F> ProjectAction for FnAction<F>
where
    F: Fn(&Project, &GoalInvocation, GoalPhase) -> Result<(), ListenerError> + Send + Sync,
{
    async fn run(
        &self,
        project: &Project,
        invocation: &GoalInvocation,
        phase: GoalPhase,
    ) -> Result<(), ListenerError> {
        (self.f)(project, invocation, phase)
    }
}

/// Wrap a synchronous closure as a [`ProjectAction`].
pub fn action_fn<F>(f: F) -> Arc<dyn ProjectAction>
where
    F: Fn(&Project, &GoalInvocation, GoalPhase) -> Result<(), ListenerError>
        + Send
        + Sync
        + 'static,
{
    Arc::new(FnAction { f })
}

/// A registered listener.
#[derive(Clone)]
pub struct ProjectListener {
    pub predicate: Option<Arc<dyn PushTest>>,
    pub phase: Option<GoalPhase>,
    pub action: Arc<dyn ProjectAction>,
}

impl ProjectListener {
    pub fn new(action: Arc<dyn ProjectAction>) -> Self {
        Self { predicate: None, phase: None, action }
    }

    pub fn with_predicate(mut self, predicate: Arc<dyn PushTest>) -> Self {
        self.predicate = Some(predicate);
        self
    }

    pub fn on_phase(mut self, phase: GoalPhase) -> Self {
        self.phase = Some(phase);
        self
    }

    /// Whether this listener should run for `push` at `phase`.
    pub async fn applies(&self, push: &PushContext<'_>, phase: GoalPhase) -> bool {
        if self.phase.is_some_and(|p| p != phase) {
            return false;
        }
        match &self.predicate {
            Some(predicate) => predicate.test(push).await,
            None => true,
        }
    }
}

impl Default for ProjectListener {
    fn default() -> Self {
        Self::new(Arc::new(NoOpAction))
    }
}

impl std::fmt::Debug for ProjectListener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectListener")
            .field("predicate", &self.predicate.as_ref().map(|p| p.name().to_string()))
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "listener_tests.rs"]
mod tests;
