// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job construction from the running dispatcher pod.
//!
//! The job's pod template is a copy of the running pod's spec with the
//! first container renamed and given the goal environment. Everything the
//! job does not override (probes, resources, volumes, tolerations, security
//! context) is kept as is.

use crate::error::SchedulerError;
use crate::job_env::k8s_job_env;
use crate::naming::{container_name, k8s_job_name, label_value};
use gp_core::GoalInvocation;
use k8s_openapi::api::batch::v1::{Job, JobSpec};
use k8s_openapi::api::core::v1::{
    Affinity, Pod, PodAffinity, PodAffinityTerm, PodSpec, PodTemplateSpec,
    WeightedPodAffinityTerm,
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{
    LabelSelector, LabelSelectorRequirement, ObjectMeta,
};
use serde::Serialize;
use std::collections::BTreeMap;

pub const CREATOR_LABEL: &str = "goalpost.dev/creator";
pub const GOAL_ID_LABEL: &str = "goalpost.dev/goal-id";
pub const GOAL_SET_ID_LABEL: &str = "goalpost.dev/goal-set-id";
pub const WORKSPACE_ID_LABEL: &str = "goalpost.dev/workspace-id";
pub const DISPATCH_ANNOTATION: &str = "goalpost.dev/dispatch";

const AFFINITY_WEIGHT: i32 = 100;
const HOSTNAME_TOPOLOGY: &str = "kubernetes.io/hostname";
const BACKOFF_LIMIT: i32 = 1;

/// Audit record stored in the dispatch annotation.
#[derive(Serialize)]
struct DispatchRecord<'a> {
    dispatcher: DispatcherRecord<'a>,
    goal: GoalRecord<'a>,
}

#[derive(Serialize)]
struct DispatcherRecord<'a> {
    name: &'a str,
    version: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GoalRecord<'a> {
    goal_id: &'a str,
    goal_set_id: &'a str,
    unique_name: &'a str,
}

/// Build the job that runs `invocation` in isolation.
pub fn create_job_spec(
    pod: &Pod,
    namespace: &str,
    invocation: &GoalInvocation,
) -> Result<Job, SchedulerError> {
    let pod_name = pod.metadata.name.clone().unwrap_or_default();
    let goal = &invocation.goal;
    let mut spec: PodSpec =
        pod.spec.clone().ok_or_else(|| SchedulerError::NoPodSpec(pod_name.clone()))?;

    let job_name = k8s_job_name(pod, goal);
    let env = k8s_job_env(pod, goal, &invocation.registration, &invocation.context);
    let container =
        spec.containers.first_mut().ok_or_else(|| SchedulerError::NoContainers(pod_name))?;
    container.name = container_name(&job_name);
    container.env.get_or_insert_with(Vec::new).extend(env);

    spec.restart_policy = Some("Never".to_string());
    spec.node_name = None;
    add_goal_set_affinity(&mut spec, &goal.goal_set_id);

    let labels = job_labels(invocation);
    let annotations = job_annotations(invocation);

    Ok(Job {
        metadata: ObjectMeta {
            name: Some(job_name),
            namespace: Some(namespace.to_string()),
            labels: Some(labels.clone()),
            annotations: Some(annotations.clone()),
            ..Default::default()
        },
        spec: Some(JobSpec {
            template: PodTemplateSpec {
                metadata: Some(ObjectMeta {
                    labels: Some(labels),
                    annotations: Some(annotations),
                    ..Default::default()
                }),
                spec: Some(spec),
            },
            backoff_limit: Some(BACKOFF_LIMIT),
            ..Default::default()
        }),
        ..Default::default()
    })
}

/// Label selector matching every job of one goal set.
pub fn goal_set_selector(goal_set_id: &str) -> String {
    format!("{}={}", GOAL_SET_ID_LABEL, label_value(goal_set_id))
}

fn job_labels(invocation: &GoalInvocation) -> BTreeMap<String, String> {
    [
        (CREATOR_LABEL, label_value(&invocation.registration.name)),
        (GOAL_ID_LABEL, label_value(invocation.goal.id_or_empty())),
        (GOAL_SET_ID_LABEL, label_value(&invocation.goal.goal_set_id)),
        (WORKSPACE_ID_LABEL, label_value(&invocation.context.workspace_id)),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}

fn job_annotations(invocation: &GoalInvocation) -> BTreeMap<String, String> {
    let goal = &invocation.goal;
    let registration = &invocation.registration;
    let record = DispatchRecord {
        dispatcher: DispatcherRecord { name: &registration.name, version: &registration.version },
        goal: GoalRecord {
            goal_id: goal.id_or_empty(),
            goal_set_id: &goal.goal_set_id,
            unique_name: &goal.unique_name,
        },
    };
    // A struct of strings always serializes
    let record = serde_json::to_string(&record).unwrap_or_default();

    [
        (CREATOR_LABEL, registration.name.clone()),
        (GOAL_ID_LABEL, goal.id_or_empty().to_string()),
        (GOAL_SET_ID_LABEL, goal.goal_set_id.clone()),
        (WORKSPACE_ID_LABEL, invocation.context.workspace_id.clone()),
        (DISPATCH_ANNOTATION, record),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}

/// Prefer nodes already running pods of the same goal set.
fn add_goal_set_affinity(spec: &mut PodSpec, goal_set_id: &str) {
    let term = WeightedPodAffinityTerm {
        weight: AFFINITY_WEIGHT,
        pod_affinity_term: PodAffinityTerm {
            topology_key: HOSTNAME_TOPOLOGY.to_string(),
            label_selector: Some(LabelSelector {
                match_expressions: Some(vec![LabelSelectorRequirement {
                    key: GOAL_SET_ID_LABEL.to_string(),
                    operator: "In".to_string(),
                    values: Some(vec![label_value(goal_set_id)]),
                }]),
                ..Default::default()
            }),
            ..Default::default()
        },
    };

    spec.affinity
        .get_or_insert_with(Affinity::default)
        .pod_affinity
        .get_or_insert_with(PodAffinity::default)
        .preferred_during_scheduling_ignored_during_execution
        .get_or_insert_with(Vec::new)
        .push(term);
}

#[cfg(test)]
#[path = "job_spec_tests.rs"]
mod tests;
