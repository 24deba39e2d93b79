// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Kubernetes goal scheduler: runs selected goals as jobs cloned from the
//! dispatcher's own pod.

use crate::context::SchedulerContext;
use crate::error::SchedulerError;
use crate::job_spec::{create_job_spec, goal_set_selector};
use crate::orchestrator::Orchestrator;
use crate::selector::is_configured_in_env;
use async_trait::async_trait;
use gp_core::{EnvSnapshot, GoalInvocation, GoalState};
use std::sync::Arc;

/// Selects the scheduler for goals marked isolated.
pub const KUBERNETES: &str = "kubernetes";

/// Selects the scheduler for every goal.
pub const KUBERNETES_ALL: &str = "kubernetes-all";

/// Result of handing a goal to a scheduler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleOutcome {
    pub job_name: String,
    pub namespace: String,
    /// State to report for the goal while the job runs
    pub state: GoalState,
    pub description: String,
}

/// Runs goals somewhere other than the current process.
#[async_trait]
pub trait GoalScheduler: Send + Sync {
    fn name(&self) -> &str;

    /// Whether this scheduler takes `invocation`.
    async fn supports(&self, invocation: &GoalInvocation) -> bool;

    async fn schedule(&self, invocation: &GoalInvocation)
        -> Result<ScheduleOutcome, SchedulerError>;
}

/// [`GoalScheduler`] submitting Kubernetes jobs.
#[derive(Clone)]
pub struct KubernetesGoalScheduler {
    orchestrator: Arc<dyn Orchestrator>,
    context: SchedulerContext,
    env: EnvSnapshot,
    isolate_all: bool,
}

impl KubernetesGoalScheduler {
    pub fn new(
        orchestrator: Arc<dyn Orchestrator>,
        context: SchedulerContext,
        env: EnvSnapshot,
    ) -> Self {
        Self { orchestrator, context, env, isolate_all: false }
    }

    /// Isolate every goal once `kubernetes` is selected.
    pub fn isolate_all(mut self, isolate_all: bool) -> Self {
        self.isolate_all = isolate_all;
        self
    }

    pub fn context(&self) -> &SchedulerContext {
        &self.context
    }

    /// Delete the jobs of a finished goal set, returning how many went.
    ///
    /// A job that fails to delete is logged and skipped.
    pub async fn cleanup_goal_set(&self, goal_set_id: &str) -> Result<usize, SchedulerError> {
        let namespace = &self.context.namespace;
        let jobs = self.orchestrator.list_jobs(namespace, &goal_set_selector(goal_set_id)).await?;

        let mut deleted = 0;
        for job in jobs {
            let Some(name) = job.metadata.name else { continue };
            match self.orchestrator.delete_job(namespace, &name).await {
                Ok(()) => {
                    tracing::info!(job = %name, %namespace, goal_set_id, "deleted goal set job");
                    deleted += 1;
                }
                Err(e) => {
                    tracing::warn!(job = %name, %namespace, error = %e, "failed to delete goal set job")
                }
            }
        }
        Ok(deleted)
    }

    async fn submit(&self, invocation: &GoalInvocation) -> Result<String, SchedulerError> {
        // Jobs are attributed to the running dispatcher
        let invocation =
            GoalInvocation { registration: self.context.registration.clone(), ..invocation.clone() };
        let job = create_job_spec(&self.context.pod, &self.context.namespace, &invocation)?;
        let name = job.metadata.name.clone().unwrap_or_default();
        let namespace = &self.context.namespace;

        tracing::info!(job = %name, %namespace, goal = %invocation.goal.unique_name, "creating isolated goal job");
        match self.orchestrator.create_job(namespace, &job).await {
            Ok(()) => Ok(name),
            Err(SchedulerError::JobExists { .. }) => {
                tracing::info!(job = %name, %namespace, "replacing existing goal job");
                self.orchestrator.delete_job(namespace, &name).await?;
                self.orchestrator.create_job(namespace, &job).await?;
                Ok(name)
            }
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl GoalScheduler for KubernetesGoalScheduler {
    fn name(&self) -> &str {
        KUBERNETES
    }

    async fn supports(&self, invocation: &GoalInvocation) -> bool {
        if self.env.is_isolated_goal() {
            return false;
        }
        if is_configured_in_env(&self.env, &[KUBERNETES_ALL]) {
            return true;
        }
        is_configured_in_env(&self.env, &[KUBERNETES]) && (invocation.isolated || self.isolate_all)
    }

    async fn schedule(
        &self,
        invocation: &GoalInvocation,
    ) -> Result<ScheduleOutcome, SchedulerError> {
        let start = std::time::Instant::now();
        let result = self.submit(invocation).await;
        let elapsed_ms = start.elapsed().as_millis() as u64;
        let job_name = match result {
            Ok(name) => {
                tracing::info!(job = %name, elapsed_ms, "goal job scheduled");
                name
            }
            Err(e) => {
                tracing::error!(elapsed_ms, error = %e, "goal job scheduling failed");
                return Err(e);
            }
        };

        let namespace = self.context.namespace.clone();
        Ok(ScheduleOutcome {
            description: format!("Scheduled {} as job {}/{}", invocation.goal.name, namespace, job_name),
            job_name,
            namespace,
            state: GoalState::InProcess,
        })
    }
}

#[cfg(test)]
#[path = "kubernetes_tests.rs"]
mod tests;
