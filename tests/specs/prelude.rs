// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared fixtures for the dispatch specs.

#![allow(dead_code, unused_imports)]

pub use ed25519_dalek::SigningKey;
pub use gp_cache::{CacheEntry, CachePattern, FileSystemCache, GoalCache, GoalCacheOptions};
pub use gp_core::{
    EnvSnapshot, ExecutionContext, FakeClock, FakePublisher, GoalInvocation, GoalMessage,
    GoalState, Project, Registration,
};
pub use gp_dispatch::{
    CacheHooks, DispatchError, DispatchOutcome, Dispatcher, ExecutionError, ExecutionResult,
    FakeExecutor, GoalExecutor,
};
pub use gp_scheduler::{FakeOrchestrator, KubernetesGoalScheduler, SchedulerContext};
pub use gp_signing::{sign_goal, GoalSigner, GoalVerifier, TrustedKeys};
pub use k8s_openapi::api::core::v1::{Container, Pod, PodSpec};
pub use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
pub use std::path::Path;
pub use std::sync::Arc;
pub use tempfile::TempDir;

pub const NAMESPACE: &str = "sdm";
pub const POD: &str = "rocket-sdm-7f9c-0";
pub const GOAL_SET: &str = "f1e2d3c-4b5a-6978";

pub fn registration() -> Registration {
    Registration { name: "@acme/rocket-sdm".to_string(), version: "1.4.0".to_string() }
}

pub fn context() -> ExecutionContext {
    ExecutionContext {
        workspace_id: "T0W0RKSP4CE".to_string(),
        workspace_name: "acme".to_string(),
        correlation_id: "corr-5150".to_string(),
    }
}

pub fn signer() -> GoalSigner {
    GoalSigner::new("rocket-2026", SigningKey::from_bytes(&[42; 32]))
}

/// Verifier trusting [`signer`], signing its own rejections too.
pub fn verifier(publisher: &FakePublisher) -> GoalVerifier {
    let mut trusted = TrustedKeys::new();
    trusted.add(signer().name().to_string(), signer().verifying_key());
    GoalVerifier::new(trusted, registration(), Arc::new(publisher.clone()), Arc::new(FakeClock::new()))
        .with_signer(signer())
}

/// Signed goal as planned by another dispatcher.
pub fn planned_goal(name: &str, line: u32) -> GoalMessage {
    let goal = GoalMessage::builder()
        .id(format!("goal-{name}"))
        .name(name)
        .unique_name(format!("{name}#goals.rs:{line}"))
        .goal_set_id(GOAL_SET)
        .state(GoalState::Requested)
        .build();
    sign_goal(&goal, &signer()).unwrap()
}

pub fn dispatcher_pod() -> Pod {
    Pod {
        metadata: ObjectMeta {
            name: Some(POD.to_string()),
            namespace: Some(NAMESPACE.to_string()),
            ..Default::default()
        },
        spec: Some(PodSpec {
            node_name: Some("node-3".to_string()),
            containers: vec![Container {
                name: "rocket-sdm".to_string(),
                image: Some("acme/rocket-sdm:1.4.0".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// Environment of the long-running dispatcher pod.
pub fn dispatcher_env(selector: &str) -> EnvSnapshot {
    EnvSnapshot::from_pairs([
        ("HOSTNAME", POD),
        ("GOALPOST_DEPLOYMENT_NAMESPACE", NAMESPACE),
        ("GOALPOST_GOAL_SCHEDULER", selector),
    ])
}

/// Kubernetes scheduler whose context was loaded from the fake cluster.
pub async fn kubernetes_scheduler(
    orchestrator: &FakeOrchestrator,
    env: EnvSnapshot,
) -> Arc<KubernetesGoalScheduler> {
    orchestrator.add_pod(NAMESPACE, dispatcher_pod());
    let context =
        SchedulerContext::load(orchestrator, &env, registration(), &Default::default()).await.unwrap();
    Arc::new(KubernetesGoalScheduler::new(Arc::new(orchestrator.clone()), context, env))
}

/// Filesystem-backed cache of `target/` under `root`.
pub fn build_cache(root: &Path) -> GoalCache {
    let options = GoalCacheOptions::new(vec![CacheEntry::new(
        "build",
        CachePattern::Directory("target".to_string()),
    )]);
    GoalCache::new(options, Arc::new(FileSystemCache::new(root)), true)
}

/// Executor standing in for a compiler: writes `target/app` on success.
pub struct BuildExecutor;

#[async_trait::async_trait]
impl GoalExecutor for BuildExecutor {
    async fn execute(
        &self,
        invocation: &GoalInvocation,
        project: &Project,
    ) -> Result<ExecutionResult, ExecutionError> {
        let target = project.root().join("target");
        std::fs::create_dir_all(&target)?;
        std::fs::write(target.join("app"), invocation.goal.unique_name.as_bytes())?;
        Ok(ExecutionResult::success().with_description(format!("Built {}", invocation.goal.name)))
    }
}
