// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! Everything that depends on the environment takes an [`EnvSnapshot`]
//! instead of reading the process environment; [`EnvSnapshot::from_process`]
//! is the only call site that does.

use std::collections::BTreeMap;
use std::path::PathBuf;

/// Path of the TOML config file.
pub const CONFIG_VAR: &str = "GOALPOST_CONFIG";

/// Overrides `[cache] enabled` from the config file.
pub const CACHE_ENABLED_VAR: &str = "GOALPOST_CACHE_ENABLED";

/// Set inside isolated jobs; marks the process as an isolated goal run.
pub const ISOLATED_GOAL_VAR: &str = "GOALPOST_ISOLATED_GOAL";

/// Namespace the dispatcher is deployed in.
pub const DEPLOYMENT_NAMESPACE_VAR: &str = "GOALPOST_DEPLOYMENT_NAMESPACE";

/// Set by Kubernetes to the name of the pod the process runs in.
pub const POD_NAME_VAR: &str = "HOSTNAME";

/// Selector variables naming the active goal scheduler(s).
pub const SCHEDULER_SELECTOR_VARS: [&str; 2] = ["GOALPOST_GOAL_SCHEDULER", "GOALPOST_GOAL_LAUNCHER"];

/// Point-in-time copy of environment variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    vars: BTreeMap<String, String>,
}

impl EnvSnapshot {
    /// Capture the current process environment.
    pub fn from_process() -> Self {
        std::env::vars().collect()
    }

    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Value of `key` unless unset or empty.
    pub fn non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.non_empty(key).is_some()
    }

    /// Config file path from `GOALPOST_CONFIG`.
    pub fn config_path(&self) -> Option<PathBuf> {
        self.non_empty(CONFIG_VAR).map(PathBuf::from)
    }

    /// `GOALPOST_CACHE_ENABLED` as a bool; unparsable values are ignored.
    pub fn cache_enabled_override(&self) -> Option<bool> {
        match self.non_empty(CACHE_ENABLED_VAR)?.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            other => {
                tracing::warn!(value = other, "ignoring unparsable {}", CACHE_ENABLED_VAR);
                None
            }
        }
    }

    /// Whether this process is itself an isolated goal job.
    pub fn is_isolated_goal(&self) -> bool {
        self.contains(ISOLATED_GOAL_VAR)
    }
}

impl FromIterator<(String, String)> for EnvSnapshot {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self { vars: iter.into_iter().collect() }
    }
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
