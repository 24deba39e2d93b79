// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Push tests: host-provided predicates over the push a goal belongs to.

use crate::invocation::{GoalInvocation, Project};
use async_trait::async_trait;
use std::sync::Arc;

/// What a push test gets to look at.
#[derive(Clone, Copy)]
pub struct PushContext<'a> {
    pub invocation: &'a GoalInvocation,
    pub project: &'a Project,
}

impl<'a> PushContext<'a> {
    pub fn new(invocation: &'a GoalInvocation, project: &'a Project) -> Self {
        Self { invocation, project }
    }
}

/// Predicate deciding whether something applies to a push.
///
/// Tests may inspect the checkout, so evaluation is async.
#[async_trait]
pub trait PushTest: Send + Sync {
    fn name(&self) -> &str;

    async fn test(&self, push: &PushContext<'_>) -> bool;
}

struct PredicatePushTest<F> {
    name: String,
    predicate: F,
}

#[async_trait]
impl<F> PushTest for PredicatePushTest<F>
where
    F: Fn(&PushContext<'_>) -> bool + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn test(&self, push: &PushContext<'_>) -> bool {
        (self.predicate)(push)
    }
}

/// Wrap a synchronous predicate as a [`PushTest`].
pub fn push_test<F>(name: impl Into<String>, predicate: F) -> Arc<dyn PushTest>
where
    F: Fn(&PushContext<'_>) -> bool + Send + Sync + 'static,
{
    Arc::new(PredicatePushTest { name: name.into(), predicate })
}
