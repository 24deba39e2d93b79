// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-process goal execution seam.

use crate::error::ExecutionError;
use async_trait::async_trait;
use gp_core::{ExternalUrl, GoalInvocation, GoalState, Project};

/// What an in-process goal run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    pub state: GoalState,
    pub description: Option<String>,
    pub external_urls: Vec<ExternalUrl>,
}

impl ExecutionResult {
    pub fn success() -> Self {
        Self { state: GoalState::Success, description: None, external_urls: Vec::new() }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_url(mut self, url: ExternalUrl) -> Self {
        self.external_urls.push(url);
        self
    }
}

/// Runs a goal in the current process.
#[async_trait]
pub trait GoalExecutor: Send + Sync {
    async fn execute(
        &self,
        invocation: &GoalInvocation,
        project: &Project,
    ) -> Result<ExecutionResult, ExecutionError>;
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{ExecutionResult, GoalExecutor};
    use crate::error::ExecutionError;
    use async_trait::async_trait;
    use gp_core::{GoalInvocation, Project};
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Default)]
    struct FakeExecutorState {
        executed: Vec<GoalInvocation>,
        failure: Option<String>,
    }

    /// Executor that records invocations and succeeds unless told to fail
    #[derive(Clone, Default)]
    pub struct FakeExecutor {
        inner: Arc<Mutex<FakeExecutorState>>,
    }

    impl FakeExecutor {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn fail_with(&self, message: &str) {
            self.inner.lock().failure = Some(message.to_string());
        }

        pub fn executed(&self) -> Vec<GoalInvocation> {
            self.inner.lock().executed.clone()
        }
    }

    #[async_trait]
    impl GoalExecutor for FakeExecutor {
        async fn execute(
            &self,
            invocation: &GoalInvocation,
            _project: &Project,
        ) -> Result<ExecutionResult, ExecutionError> {
            let mut inner = self.inner.lock();
            inner.executed.push(invocation.clone());
            match &inner.failure {
                Some(msg) => Err(ExecutionError::Failed(msg.clone())),
                None => Ok(ExecutionResult::success()
                    .with_description(format!("Executed: {}", invocation.goal.name))),
            }
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeExecutor;
