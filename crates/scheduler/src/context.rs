// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Identity of the running dispatcher: who it is, which pod it runs in,
//! and where its isolated jobs go.

use crate::error::SchedulerError;
use crate::orchestrator::Orchestrator;
use gp_core::env::{DEPLOYMENT_NAMESPACE_VAR, POD_NAME_VAR};
use gp_core::{EnvSnapshot, Registration, SchedulerConfig};
use k8s_openapi::api::core::v1::Pod;
use std::path::Path;

/// Namespace file mounted into every pod with a service account.
pub const SERVICE_ACCOUNT_NAMESPACE_PATH: &str =
    "/var/run/secrets/kubernetes.io/serviceaccount/namespace";

const DEFAULT_NAMESPACE: &str = "default";

/// Read-only context injected into scheduling calls.
#[derive(Debug, Clone, PartialEq)]
pub struct SchedulerContext {
    pub registration: Registration,
    /// The running pod; template for isolated jobs
    pub pod: Pod,
    /// Namespace isolated jobs are created in
    pub namespace: String,
}

impl SchedulerContext {
    pub fn new(registration: Registration, pod: Pod, namespace: impl Into<String>) -> Self {
        Self { registration, pod, namespace: namespace.into() }
    }

    /// Read the running pod through `orchestrator`.
    pub async fn load(
        orchestrator: &dyn Orchestrator,
        env: &EnvSnapshot,
        registration: Registration,
        config: &SchedulerConfig,
    ) -> Result<Self, SchedulerError> {
        Self::load_with(
            orchestrator,
            env,
            registration,
            config,
            Path::new(SERVICE_ACCOUNT_NAMESPACE_PATH),
        )
        .await
    }

    async fn load_with(
        orchestrator: &dyn Orchestrator,
        env: &EnvSnapshot,
        registration: Registration,
        config: &SchedulerConfig,
        namespace_file: &Path,
    ) -> Result<Self, SchedulerError> {
        let pod_name = env.non_empty(POD_NAME_VAR).ok_or(SchedulerError::MissingPodName)?;
        let pod_namespace = deployment_namespace(env, namespace_file).await;
        let pod = orchestrator.read_pod(&pod_namespace, pod_name).await?;
        let namespace = config.namespace.clone().unwrap_or(pod_namespace);
        tracing::debug!(pod = pod_name, %namespace, "loaded scheduler context");
        Ok(Self { registration, pod, namespace })
    }
}

/// Namespace the dispatcher runs in: env, then service account, then `default`.
async fn deployment_namespace(env: &EnvSnapshot, namespace_file: &Path) -> String {
    if let Some(ns) = env.non_empty(DEPLOYMENT_NAMESPACE_VAR) {
        return ns.to_string();
    }
    match tokio::fs::read_to_string(namespace_file).await {
        Ok(ns) if !ns.trim().is_empty() => ns.trim().to_string(),
        _ => DEFAULT_NAMESPACE.to_string(),
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
