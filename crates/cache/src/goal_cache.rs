// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Goal cache: stores and restores project artifacts around goal execution.
//!
//! Caching is best-effort. Backend failures are logged and absorbed; a failed
//! restore runs the cache-miss fallbacks; nothing here ever fails a goal.

use crate::backend::{CacheBackend, CacheScope, NoOpCache};
use crate::fs::FileSystemCache;
use crate::pattern::{resolve_files, CachePattern};
use gp_core::{
    CacheConfig, GoalInvocation, GoalPhase, Project, ProjectListener, PushContext, PushTest,
};
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;

/// One cacheable artifact set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub classifier: String,
    pub pattern: CachePattern,
}

impl CacheEntry {
    pub fn new(classifier: impl Into<String>, pattern: CachePattern) -> Self {
        Self { classifier: classifier.into(), pattern }
    }
}

/// What to cache for a goal, when, and what to do on a miss.
#[derive(Clone, Default)]
pub struct GoalCacheOptions {
    pub entries: Vec<CacheEntry>,
    /// Gates every operation; `None` applies to all pushes
    pub push_test: Option<Arc<dyn PushTest>>,
    /// Cache-miss fallbacks; empty means the no-op fallback
    pub on_cache_miss: Vec<ProjectListener>,
}

impl GoalCacheOptions {
    pub fn new(entries: Vec<CacheEntry>) -> Self {
        Self { entries, ..Default::default() }
    }

    pub fn with_push_test(mut self, push_test: Arc<dyn PushTest>) -> Self {
        self.push_test = Some(push_test);
        self
    }

    pub fn on_cache_miss(mut self, listener: ProjectListener) -> Self {
        self.on_cache_miss.push(listener);
        self
    }
}

/// Classifiers restored vs. missed by one `retrieve` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RetrieveOutcome {
    pub restored: Vec<String>,
    pub missed: Vec<String>,
}

/// Classifier-keyed cache around goal execution.
#[derive(Clone)]
pub struct GoalCache {
    options: GoalCacheOptions,
    backend: Arc<dyn CacheBackend>,
    enabled: bool,
}

impl GoalCache {
    pub fn new(options: GoalCacheOptions, backend: Arc<dyn CacheBackend>, enabled: bool) -> Self {
        Self { options, backend, enabled }
    }

    /// Build from `[cache]` config: filesystem backend when enabled.
    pub fn from_config(options: GoalCacheOptions, config: &CacheConfig) -> Self {
        if !config.enabled {
            return Self::new(options, Arc::new(NoOpCache), false);
        }
        match config.root.clone().or_else(FileSystemCache::default_root) {
            Some(root) => {
                tracing::debug!(root = %root.display(), "goal cache backed by filesystem");
                Self::new(options, Arc::new(FileSystemCache::new(root)), true)
            }
            None => {
                tracing::warn!("no cache directory available, goal cache will not store anything");
                Self::new(options, Arc::new(NoOpCache), true)
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn options(&self) -> &GoalCacheOptions {
        &self.options
    }

    /// Cache files matching the configured patterns (optionally one classifier).
    pub async fn put(
        &self,
        invocation: &GoalInvocation,
        project: &Project,
        classifier: Option<&str>,
    ) {
        if !self.enabled {
            return;
        }
        let push = PushContext::new(invocation, project);
        if !self.passes_push_test(&push).await {
            return;
        }

        let scope = CacheScope::for_invocation(invocation);
        for (name, files) in self.files_by_classifier(project, classifier) {
            if files.is_empty() {
                tracing::debug!(classifier = %name, "nothing to cache");
                continue;
            }
            match self.backend.put(&scope, &name, project, &files).await {
                Ok(()) => {
                    tracing::info!(classifier = %name, files = files.len(), "cached goal artifacts")
                }
                Err(e) => tracing::warn!(classifier = %name, error = %e, "cache put failed"),
            }
        }
    }

    /// Restore cached files into the project, running fallbacks on a miss.
    ///
    /// `classifier = None` restores every configured classifier. With caching
    /// disabled the backend is never consulted and the fallbacks run once.
    pub async fn retrieve(
        &self,
        invocation: &GoalInvocation,
        project: &Project,
        classifier: Option<&str>,
        phase: GoalPhase,
    ) -> RetrieveOutcome {
        let mut outcome = RetrieveOutcome::default();
        let push = PushContext::new(invocation, project);
        if !self.passes_push_test(&push).await {
            return outcome;
        }

        if !self.enabled {
            self.run_fallbacks(&push, phase).await;
            return outcome;
        }

        let scope = CacheScope::for_invocation(invocation);
        for name in self.classifiers(classifier) {
            match self.backend.retrieve(&scope, &name, project).await {
                Ok(()) => {
                    tracing::info!(classifier = %name, "restored cached goal artifacts");
                    outcome.restored.push(name);
                }
                Err(e) => {
                    if e.is_miss() {
                        tracing::debug!(classifier = %name, "cache miss");
                    } else {
                        tracing::warn!(classifier = %name, error = %e, "cache retrieve failed");
                    }
                    self.run_fallbacks(&push, phase).await;
                    outcome.missed.push(name);
                }
            }
        }
        outcome
    }

    /// Delete cached entries for the goal set (one classifier or all).
    pub async fn remove(
        &self,
        invocation: &GoalInvocation,
        project: &Project,
        classifier: Option<&str>,
    ) {
        if !self.enabled {
            return;
        }
        let push = PushContext::new(invocation, project);
        if !self.passes_push_test(&push).await {
            return;
        }

        let scope = CacheScope::for_invocation(invocation);
        let names = match classifier {
            Some(c) => vec![c.to_string()],
            None => self.classifiers(None),
        };
        for name in names {
            if let Err(e) = self.backend.remove(&scope, Some(&name)).await {
                tracing::warn!(classifier = %name, error = %e, "cache remove failed");
            }
        }
    }

    async fn passes_push_test(&self, push: &PushContext<'_>) -> bool {
        let Some(test) = &self.options.push_test else { return true };
        let passed = test.test(push).await;
        if !passed {
            tracing::debug!(push_test = test.name(), "goal cache skipped by push test");
        }
        passed
    }

    /// Classifier names in configuration order, deduplicated.
    fn classifiers(&self, only: Option<&str>) -> Vec<String> {
        if let Some(c) = only {
            return vec![c.to_string()];
        }
        let mut seen = BTreeSet::new();
        self.options
            .entries
            .iter()
            .filter(|e| seen.insert(e.classifier.as_str()))
            .map(|e| e.classifier.clone())
            .collect()
    }

    /// Resolve matching files per classifier, merging entries that share one.
    fn files_by_classifier(
        &self,
        project: &Project,
        only: Option<&str>,
    ) -> Vec<(String, Vec<PathBuf>)> {
        let mut grouped: Vec<(String, BTreeSet<PathBuf>)> = Vec::new();
        for entry in &self.options.entries {
            if only.is_some_and(|c| c != entry.classifier) {
                continue;
            }
            let files = match resolve_files(project, &entry.pattern) {
                Ok(files) => files,
                Err(e) => {
                    tracing::warn!(classifier = %entry.classifier, error = %e, "cache pattern failed");
                    continue;
                }
            };
            match grouped.iter_mut().find(|(name, _)| *name == entry.classifier) {
                Some((_, set)) => set.extend(files),
                None => grouped.push((entry.classifier.clone(), files.into_iter().collect())),
            }
        }
        grouped.into_iter().map(|(name, set)| (name, set.into_iter().collect())).collect()
    }

    async fn run_fallbacks(&self, push: &PushContext<'_>, phase: GoalPhase) {
        let default = [ProjectListener::default()];
        let listeners: &[ProjectListener] = if self.options.on_cache_miss.is_empty() {
            &default
        } else {
            &self.options.on_cache_miss
        };

        for listener in listeners {
            if !listener.applies(push, phase).await {
                continue;
            }
            if let Err(e) = listener.action.run(push.project, push.invocation, phase).await {
                tracing::warn!(?listener, error = %e, "cache-miss fallback failed");
            }
        }
    }
}

#[cfg(test)]
#[path = "goal_cache_tests.rs"]
mod tests;
