// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cache backend contract.
//!
//! Entries are keyed by `(scope, classifier)`. Backends must tolerate
//! concurrent calls on distinct keys; the caller serializes calls on the
//! same key.

use crate::error::CacheError;
use async_trait::async_trait;
use gp_core::{GoalInvocation, Project};
use std::path::PathBuf;

/// Execution scope of a cache entry: one goal set within one workspace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheScope {
    pub workspace_id: String,
    pub goal_set_id: String,
}

impl CacheScope {
    pub fn for_invocation(invocation: &GoalInvocation) -> Self {
        Self {
            workspace_id: invocation.context.workspace_id.clone(),
            goal_set_id: invocation.goal.goal_set_id.clone(),
        }
    }
}

/// Storage for cached project files.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Store `files` (relative to the project root) under `classifier`,
    /// replacing any previous entry.
    async fn put(
        &self,
        scope: &CacheScope,
        classifier: &str,
        project: &Project,
        files: &[PathBuf],
    ) -> Result<(), CacheError>;

    /// Restore the entry into the project; [`CacheError::Miss`] if absent.
    async fn retrieve(
        &self,
        scope: &CacheScope,
        classifier: &str,
        project: &Project,
    ) -> Result<(), CacheError>;

    /// Delete one classifier's entry, or every entry in the scope.
    async fn remove(&self, scope: &CacheScope, classifier: Option<&str>)
        -> Result<(), CacheError>;
}

/// Inert backend used when no cache is configured: stores nothing, always misses.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpCache;

#[async_trait]
impl CacheBackend for NoOpCache {
    async fn put(
        &self,
        _scope: &CacheScope,
        _classifier: &str,
        _project: &Project,
        _files: &[PathBuf],
    ) -> Result<(), CacheError> {
        Ok(())
    }

    async fn retrieve(
        &self,
        _scope: &CacheScope,
        classifier: &str,
        _project: &Project,
    ) -> Result<(), CacheError> {
        Err(CacheError::Miss { classifier: classifier.to_string() })
    }

    async fn remove(
        &self,
        _scope: &CacheScope,
        _classifier: Option<&str>,
    ) -> Result<(), CacheError> {
        Ok(())
    }
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{CacheBackend, CacheScope};
    use crate::error::CacheError;
    use async_trait::async_trait;
    use gp_core::Project;
    use parking_lot::Mutex;
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::sync::Arc;

    /// Recorded backend call
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum CacheCall {
        Put { scope: CacheScope, classifier: String, files: Vec<PathBuf> },
        Retrieve { scope: CacheScope, classifier: String },
        Remove { scope: CacheScope, classifier: Option<String> },
    }

    #[derive(Default)]
    struct FakeCacheState {
        entries: HashMap<(CacheScope, String), Vec<PathBuf>>,
        calls: Vec<CacheCall>,
        failure: Option<String>,
    }

    /// In-memory backend for tests; records calls, never touches disk
    #[derive(Clone, Default)]
    pub struct FakeCache {
        inner: Arc<Mutex<FakeCacheState>>,
    }

    impl FakeCache {
        pub fn new() -> Self {
            Self::default()
        }

        /// Make every subsequent call fail with a backend error
        pub fn fail_with(&self, message: &str) {
            self.inner.lock().failure = Some(message.to_string());
        }

        pub fn calls(&self) -> Vec<CacheCall> {
            self.inner.lock().calls.clone()
        }

        pub fn stored(&self, scope: &CacheScope, classifier: &str) -> Option<Vec<PathBuf>> {
            self.inner.lock().entries.get(&(scope.clone(), classifier.to_string())).cloned()
        }

        pub fn seed(&self, scope: &CacheScope, classifier: &str, files: Vec<PathBuf>) {
            self.inner.lock().entries.insert((scope.clone(), classifier.to_string()), files);
        }
    }

    #[async_trait]
    impl CacheBackend for FakeCache {
        async fn put(
            &self,
            scope: &CacheScope,
            classifier: &str,
            _project: &Project,
            files: &[PathBuf],
        ) -> Result<(), CacheError> {
            let mut inner = self.inner.lock();
            inner.calls.push(CacheCall::Put {
                scope: scope.clone(),
                classifier: classifier.to_string(),
                files: files.to_vec(),
            });
            if let Some(msg) = &inner.failure {
                return Err(CacheError::Backend(msg.clone()));
            }
            inner.entries.insert((scope.clone(), classifier.to_string()), files.to_vec());
            Ok(())
        }

        async fn retrieve(
            &self,
            scope: &CacheScope,
            classifier: &str,
            _project: &Project,
        ) -> Result<(), CacheError> {
            let mut inner = self.inner.lock();
            inner
                .calls
                .push(CacheCall::Retrieve { scope: scope.clone(), classifier: classifier.to_string() });
            if let Some(msg) = &inner.failure {
                return Err(CacheError::Backend(msg.clone()));
            }
            if inner.entries.contains_key(&(scope.clone(), classifier.to_string())) {
                Ok(())
            } else {
                Err(CacheError::Miss { classifier: classifier.to_string() })
            }
        }

        async fn remove(
            &self,
            scope: &CacheScope,
            classifier: Option<&str>,
        ) -> Result<(), CacheError> {
            let mut inner = self.inner.lock();
            inner.calls.push(CacheCall::Remove {
                scope: scope.clone(),
                classifier: classifier.map(str::to_string),
            });
            if let Some(msg) = &inner.failure {
                return Err(CacheError::Backend(msg.clone()));
            }
            match classifier {
                Some(c) => {
                    inner.entries.remove(&(scope.clone(), c.to_string()));
                }
                None => inner.entries.retain(|(s, _), _| s != scope),
            }
            Ok(())
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{CacheCall, FakeCache};
