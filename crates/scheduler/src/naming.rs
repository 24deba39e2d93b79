// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Kubernetes name derivation for isolated jobs.
//!
//! Job names are `<container>-job-<goal set prefix>-<goal>`, at most 63
//! characters drawn from `[a-z0-9.-]`. Only the trailing goal segment is
//! shortened to fit; the result never ends in `-` or `.`. The job's
//! container takes the job name with dots mapped to `-`.

use gp_core::GoalMessage;
use k8s_openapi::api::core::v1::Pod;

/// Kubernetes limit for job and label names.
pub const MAX_NAME_LEN: usize = 63;

/// Characters of the goal set id kept in job names.
pub const GOAL_SET_PREFIX_LEN: usize = 7;

/// Container name used when the pod gives nothing usable.
pub const DEFAULT_CONTAINER_NAME: &str = "goalpost";

/// Job name for running `goal` cloned from `pod`.
pub fn k8s_job_name(pod: &Pod, goal: &GoalMessage) -> String {
    let container = pod
        .spec
        .as_ref()
        .and_then(|spec| spec.containers.first())
        .map(|c| c.name.as_str())
        .unwrap_or(DEFAULT_CONTAINER_NAME);
    job_name(container, &goal.goal_set_id, &goal.unique_name)
}

/// Job name from its three parts.
pub fn job_name(container: &str, goal_set_id: &str, unique_name: &str) -> String {
    let container = resource_name(container);
    let container =
        if container.is_empty() { DEFAULT_CONTAINER_NAME.to_string() } else { container };
    let prefix = format!("{}-job-{}-", container, goal_set_prefix(goal_set_id));

    let name = if prefix.len() >= MAX_NAME_LEN {
        short(&prefix, MAX_NAME_LEN).to_string()
    } else {
        let goal = goal_segment(unique_name);
        let room = MAX_NAME_LEN - prefix.len();
        format!("{}{}", prefix, short(&goal, room))
    };
    name.trim_end_matches(['-', '.']).to_string()
}

/// `-job-<goal set prefix>-<goal>` suffix shared by job and registration names.
pub fn job_suffix(goal: &GoalMessage) -> String {
    format!(
        "-job-{}-{}",
        goal_set_prefix(&goal.goal_set_id),
        goal_segment(&goal.unique_name)
    )
}

/// Container name for a job: the job name with `.` replaced, since
/// container names are DNS labels (`[a-z0-9-]`, at most 63).
pub fn container_name(job_name: &str) -> String {
    let name: String = job_name.chars().map(|c| if c == '.' { '-' } else { c }).collect();
    name.trim_matches('-').to_string()
}

/// First characters of the goal set id, cut before sanitizing.
fn goal_set_prefix(goal_set_id: &str) -> String {
    resource_name(short(goal_set_id, GOAL_SET_PREFIX_LEN))
}

/// Unique name with its `#…` source marker removed, in resource-name form.
pub fn goal_segment(unique_name: &str) -> String {
    let base = unique_name.split('#').next().unwrap_or_default();
    resource_name(base)
}

/// Lowercase `raw` and keep only `[a-z0-9.-]`.
pub fn resource_name(raw: &str) -> String {
    raw.chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '.'))
        .collect()
}

/// Map `raw` to a valid label value (`[A-Za-z0-9]` at both ends, `-_.` inside, ≤ 63).
pub fn label_value(raw: &str) -> String {
    let mapped: String = raw
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') { c } else { '-' })
        .collect();
    let trimmed = mapped.trim_matches(|c: char| !c.is_ascii_alphanumeric());
    short(trimmed, MAX_NAME_LEN).trim_end_matches(|c: char| !c.is_ascii_alphanumeric()).to_string()
}

/// First `n` characters of `s`.
fn short(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

#[cfg(test)]
#[path = "naming_tests.rs"]
mod tests;
