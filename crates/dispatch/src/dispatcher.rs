// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dispatch of one received goal.
//!
//! Order: verify, hand off to the first scheduler that takes the goal, or
//! else run it in process between the cache restore and cache store hooks.

use crate::error::DispatchError;
use crate::executor::{ExecutionResult, GoalExecutor};
use gp_cache::GoalCache;
use gp_core::{ExecutionContext, GoalInvocation, GoalMessage, GoalPhase, Project, Registration};
use gp_scheduler::{GoalScheduler, ScheduleOutcome};
use gp_signing::GoalVerifier;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Which cache hooks wrap in-process execution.
#[derive(Clone)]
pub struct CacheHooks {
    pub cache: GoalCache,
    /// Restore before execution
    pub restore: bool,
    /// Store after a successful execution
    pub store: bool,
    /// Drop the goal set's entries after execution
    pub remove: bool,
}

impl CacheHooks {
    /// Restore before, store after.
    pub fn new(cache: GoalCache) -> Self {
        Self { cache, restore: true, store: true, remove: false }
    }

    pub fn restore(mut self, restore: bool) -> Self {
        self.restore = restore;
        self
    }

    pub fn store(mut self, store: bool) -> Self {
        self.store = store;
        self
    }

    pub fn remove(mut self, remove: bool) -> Self {
        self.remove = remove;
        self
    }
}

/// Where a dispatched goal ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Scheduled(ScheduleOutcome),
    Executed(ExecutionResult),
}

pub struct Dispatcher {
    verifier: GoalVerifier,
    schedulers: Vec<Arc<dyn GoalScheduler>>,
    cache: Option<CacheHooks>,
    executor: Arc<dyn GoalExecutor>,
    registration: Registration,
    isolated_goals: BTreeSet<String>,
}

impl Dispatcher {
    pub fn new(
        verifier: GoalVerifier,
        executor: Arc<dyn GoalExecutor>,
        registration: Registration,
    ) -> Self {
        Self {
            verifier,
            schedulers: Vec::new(),
            cache: None,
            executor,
            registration,
            isolated_goals: BTreeSet::new(),
        }
    }

    /// Register a scheduler; earlier registrations are asked first.
    pub fn with_scheduler(mut self, scheduler: Arc<dyn GoalScheduler>) -> Self {
        self.schedulers.push(scheduler);
        self
    }

    pub fn with_cache(mut self, hooks: CacheHooks) -> Self {
        self.cache = Some(hooks);
        self
    }

    /// Mark goals named `name` as requesting isolated execution.
    pub fn isolate_goal(mut self, name: impl Into<String>) -> Self {
        self.isolated_goals.insert(name.into());
        self
    }

    pub fn verifier(&self) -> &GoalVerifier {
        &self.verifier
    }

    /// Invocation for `goal` as this dispatcher would run it.
    pub fn invocation(&self, goal: GoalMessage, context: &ExecutionContext) -> GoalInvocation {
        let isolated = self.isolated_goals.contains(&goal.name);
        GoalInvocation::new(goal, context.clone(), self.registration.clone()).isolated(isolated)
    }

    pub async fn dispatch(
        &self,
        goal: &GoalMessage,
        context: &ExecutionContext,
        project: &Project,
    ) -> Result<DispatchOutcome, DispatchError> {
        let accepted = self.verifier.verify(goal, context).await?;
        let invocation = self.invocation(accepted, context);

        for scheduler in &self.schedulers {
            if scheduler.supports(&invocation).await {
                tracing::debug!(
                    goal = %invocation.goal.unique_name,
                    scheduler = scheduler.name(),
                    "goal handed to scheduler"
                );
                let outcome = scheduler.schedule(&invocation).await?;
                return Ok(DispatchOutcome::Scheduled(outcome));
            }
        }

        let result = self.execute(&invocation, project).await?;
        Ok(DispatchOutcome::Executed(result))
    }

    async fn execute(
        &self,
        invocation: &GoalInvocation,
        project: &Project,
    ) -> Result<ExecutionResult, DispatchError> {
        if let Some(hooks) = self.cache.as_ref().filter(|h| h.restore) {
            let restored =
                hooks.cache.retrieve(invocation, project, None, GoalPhase::Before).await;
            tracing::debug!(
                goal = %invocation.goal.unique_name,
                restored = restored.restored.len(),
                missed = restored.missed.len(),
                "cache restore finished"
            );
        }

        let start = std::time::Instant::now();
        let result = self.executor.execute(invocation, project).await;
        let elapsed_ms = start.elapsed().as_millis() as u64;
        let result = match result {
            Ok(result) => {
                tracing::info!(
                    goal = %invocation.goal.unique_name,
                    state = %result.state,
                    elapsed_ms,
                    "goal executed"
                );
                result
            }
            Err(source) => {
                tracing::error!(
                    goal = %invocation.goal.unique_name,
                    elapsed_ms,
                    error = %source,
                    "goal execution failed"
                );
                return Err(DispatchError::Execution {
                    unique_name: invocation.goal.unique_name.clone(),
                    source,
                });
            }
        };

        if let Some(hooks) = &self.cache {
            if hooks.store {
                hooks.cache.put(invocation, project, None).await;
            }
            if hooks.remove {
                hooks.cache.remove(invocation, project, None).await;
            }
        }
        Ok(result)
    }
}

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod tests;
