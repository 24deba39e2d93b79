// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scheduler selection from the environment.
//!
//! Each selector variable holds a bare token (`kubernetes`), a JSON string
//! (`"kubernetes"`) or a JSON array of strings (`["kubernetes","docker"]`).
//! Anything that is not valid JSON of those shapes is taken as a bare token.

use gp_core::env::SCHEDULER_SELECTOR_VARS;
use gp_core::EnvSnapshot;
use std::collections::BTreeSet;

/// Union of scheduler tokens across all selector variables.
pub fn configured_schedulers(env: &EnvSnapshot) -> BTreeSet<String> {
    SCHEDULER_SELECTOR_VARS
        .iter()
        .filter_map(|var| env.get(var))
        .flat_map(parse_selector)
        .collect()
}

/// Whether any of `candidates` is selected.
pub fn is_configured_in_env(env: &EnvSnapshot, candidates: &[&str]) -> bool {
    let selected = configured_schedulers(env);
    candidates.iter().any(|c| selected.contains(*c))
}

fn parse_selector(raw: &str) -> Vec<String> {
    let tokens = match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(serde_json::Value::String(s)) => vec![s],
        Ok(serde_json::Value::Array(items)) => {
            items.into_iter().filter_map(|v| v.as_str().map(str::to_string)).collect()
        }
        _ => vec![raw.to_string()],
    };
    tokens.into_iter().map(|t| t.trim().to_string()).filter(|t| !t.is_empty()).collect()
}

#[cfg(test)]
#[path = "selector_tests.rs"]
mod tests;
