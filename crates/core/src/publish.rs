// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Messaging collaborator: publishes goal messages onto the shared bus.

use crate::goal::GoalMessage;
use async_trait::async_trait;
use thiserror::Error;

/// Errors from publishing a goal message
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("publish failed: {0}")]
    SendFailed(String),
}

/// Adapter for putting goal messages on the bus
#[async_trait]
pub trait GoalPublisher: Send + Sync {
    async fn publish(&self, goal: &GoalMessage) -> Result<(), PublishError>;
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{GoalPublisher, PublishError};
    use crate::goal::GoalMessage;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Default)]
    struct FakePublisherState {
        published: Vec<GoalMessage>,
        fail: bool,
    }

    /// Fake publisher that records every message
    #[derive(Clone, Default)]
    pub struct FakePublisher {
        inner: Arc<Mutex<FakePublisherState>>,
    }

    impl FakePublisher {
        pub fn new() -> Self {
            Self::default()
        }

        /// Make every subsequent publish fail
        pub fn fail_sends(&self) {
            self.inner.lock().fail = true;
        }

        pub fn published(&self) -> Vec<GoalMessage> {
            self.inner.lock().published.clone()
        }
    }

    #[async_trait]
    impl GoalPublisher for FakePublisher {
        async fn publish(&self, goal: &GoalMessage) -> Result<(), PublishError> {
            let mut inner = self.inner.lock();
            if inner.fail {
                return Err(PublishError::SendFailed("fake publisher set to fail".to_string()));
            }
            inner.published.push(goal.clone());
            Ok(())
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakePublisher;
