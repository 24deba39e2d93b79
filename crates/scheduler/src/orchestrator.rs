// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Kubernetes API seam for the scheduler.

use crate::error::SchedulerError;
use async_trait::async_trait;
use k8s_openapi::api::batch::v1::Job;
use k8s_openapi::api::core::v1::Pod;
use kube::api::{Api, DeleteParams, ListParams, PostParams};
use kube::Client;

/// The orchestrator operations isolated scheduling needs.
#[async_trait]
pub trait Orchestrator: Send + Sync {
    async fn read_pod(&self, namespace: &str, name: &str) -> Result<Pod, SchedulerError>;

    /// Submit a job; [`SchedulerError::JobExists`] if the name is taken.
    async fn create_job(&self, namespace: &str, job: &Job) -> Result<(), SchedulerError>;

    async fn delete_job(&self, namespace: &str, name: &str) -> Result<(), SchedulerError>;

    async fn list_jobs(
        &self,
        namespace: &str,
        label_selector: &str,
    ) -> Result<Vec<Job>, SchedulerError>;
}

/// [`Orchestrator`] backed by the kube-rs client.
#[derive(Clone)]
pub struct KubeOrchestrator {
    client: Client,
}

impl KubeOrchestrator {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Client from the in-cluster service account or local kubeconfig.
    pub async fn try_default() -> Result<Self, SchedulerError> {
        let client = Client::try_default().await.map_err(|e| {
            SchedulerError::Client(format!("failed to create kube client: {}", e))
        })?;
        Ok(Self::new(client))
    }

    fn jobs(&self, namespace: &str) -> Api<Job> {
        Api::namespaced(self.client.clone(), namespace)
    }
}

#[async_trait]
impl Orchestrator for KubeOrchestrator {
    async fn read_pod(&self, namespace: &str, name: &str) -> Result<Pod, SchedulerError> {
        let pods: Api<Pod> = Api::namespaced(self.client.clone(), namespace);
        pods.get(name).await.map_err(|e| SchedulerError::PodUnreadable {
            namespace: namespace.to_string(),
            name: name.to_string(),
            message: e.to_string(),
        })
    }

    async fn create_job(&self, namespace: &str, job: &Job) -> Result<(), SchedulerError> {
        let name = job.metadata.name.clone().unwrap_or_default();
        match self.jobs(namespace).create(&PostParams::default(), job).await {
            Ok(_) => Ok(()),
            Err(kube::Error::Api(resp)) if resp.code == 409 => {
                Err(SchedulerError::JobExists { namespace: namespace.to_string(), name })
            }
            Err(e) => {
                Err(SchedulerError::Orchestrator(format!("job {} creation failed: {}", name, e)))
            }
        }
    }

    async fn delete_job(&self, namespace: &str, name: &str) -> Result<(), SchedulerError> {
        // Background propagation also removes the job's pods
        self.jobs(namespace)
            .delete(name, &DeleteParams::background())
            .await
            .map(|_| ())
            .map_err(|e| SchedulerError::Orchestrator(format!("job {} deletion failed: {}", name, e)))
    }

    async fn list_jobs(
        &self,
        namespace: &str,
        label_selector: &str,
    ) -> Result<Vec<Job>, SchedulerError> {
        let lp = ListParams::default().labels(label_selector);
        self.jobs(namespace)
            .list(&lp)
            .await
            .map(|list| list.items)
            .map_err(|e| SchedulerError::Orchestrator(format!("job listing failed: {}", e)))
    }
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::Orchestrator;
    use crate::error::SchedulerError;
    use async_trait::async_trait;
    use k8s_openapi::api::batch::v1::Job;
    use k8s_openapi::api::core::v1::Pod;
    use parking_lot::Mutex;
    use std::collections::{BTreeMap, HashSet};
    use std::sync::Arc;

    /// Recorded orchestrator call
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum OrchestratorCall {
        ReadPod { namespace: String, name: String },
        CreateJob { namespace: String, name: String },
        DeleteJob { namespace: String, name: String },
        ListJobs { namespace: String, label_selector: String },
    }

    #[derive(Default)]
    struct FakeOrchestratorState {
        pods: BTreeMap<(String, String), Pod>,
        jobs: BTreeMap<(String, String), Job>,
        calls: Vec<OrchestratorCall>,
        failing_deletes: HashSet<String>,
        create_failure: Option<String>,
    }

    /// In-memory orchestrator for tests
    #[derive(Clone, Default)]
    pub struct FakeOrchestrator {
        inner: Arc<Mutex<FakeOrchestratorState>>,
    }

    impl FakeOrchestrator {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn add_pod(&self, namespace: &str, pod: Pod) {
            let name = pod.metadata.name.clone().unwrap_or_default();
            self.inner.lock().pods.insert((namespace.to_string(), name), pod);
        }

        pub fn add_job(&self, namespace: &str, job: Job) {
            let name = job.metadata.name.clone().unwrap_or_default();
            self.inner.lock().jobs.insert((namespace.to_string(), name), job);
        }

        pub fn job(&self, namespace: &str, name: &str) -> Option<Job> {
            self.inner.lock().jobs.get(&(namespace.to_string(), name.to_string())).cloned()
        }

        pub fn job_names(&self, namespace: &str) -> Vec<String> {
            self.inner
                .lock()
                .jobs
                .keys()
                .filter(|(ns, _)| ns == namespace)
                .map(|(_, name)| name.clone())
                .collect()
        }

        /// Make deletion of the named job fail
        pub fn fail_delete(&self, name: &str) {
            self.inner.lock().failing_deletes.insert(name.to_string());
        }

        /// Make every job creation fail
        pub fn fail_creates(&self, message: &str) {
            self.inner.lock().create_failure = Some(message.to_string());
        }

        pub fn calls(&self) -> Vec<OrchestratorCall> {
            self.inner.lock().calls.clone()
        }
    }

    /// Equality-based selector (`k=v,k2=v2`) match against job labels.
    fn matches_selector(job: &Job, selector: &str) -> bool {
        let labels = job.metadata.labels.clone().unwrap_or_default();
        selector.split(',').map(str::trim).filter(|s| !s.is_empty()).all(|term| {
            match term.split_once('=') {
                Some((k, v)) => labels.get(k.trim()).is_some_and(|actual| actual == v.trim()),
                None => labels.contains_key(term),
            }
        })
    }

    #[async_trait]
    impl Orchestrator for FakeOrchestrator {
        async fn read_pod(&self, namespace: &str, name: &str) -> Result<Pod, SchedulerError> {
            let mut inner = self.inner.lock();
            inner.calls.push(OrchestratorCall::ReadPod {
                namespace: namespace.to_string(),
                name: name.to_string(),
            });
            inner.pods.get(&(namespace.to_string(), name.to_string())).cloned().ok_or_else(|| {
                SchedulerError::PodUnreadable {
                    namespace: namespace.to_string(),
                    name: name.to_string(),
                    message: "pods not found".to_string(),
                }
            })
        }

        async fn create_job(&self, namespace: &str, job: &Job) -> Result<(), SchedulerError> {
            let name = job.metadata.name.clone().unwrap_or_default();
            let mut inner = self.inner.lock();
            inner
                .calls
                .push(OrchestratorCall::CreateJob { namespace: namespace.to_string(), name: name.clone() });
            if let Some(msg) = &inner.create_failure {
                return Err(SchedulerError::Orchestrator(msg.clone()));
            }
            let key = (namespace.to_string(), name.clone());
            if inner.jobs.contains_key(&key) {
                return Err(SchedulerError::JobExists { namespace: namespace.to_string(), name });
            }
            inner.jobs.insert(key, job.clone());
            Ok(())
        }

        async fn delete_job(&self, namespace: &str, name: &str) -> Result<(), SchedulerError> {
            let mut inner = self.inner.lock();
            inner.calls.push(OrchestratorCall::DeleteJob {
                namespace: namespace.to_string(),
                name: name.to_string(),
            });
            if inner.failing_deletes.contains(name) {
                return Err(SchedulerError::Orchestrator(format!("job {} deletion failed", name)));
            }
            match inner.jobs.remove(&(namespace.to_string(), name.to_string())) {
                Some(_) => Ok(()),
                None => Err(SchedulerError::Orchestrator(format!("job {} not found", name))),
            }
        }

        async fn list_jobs(
            &self,
            namespace: &str,
            label_selector: &str,
        ) -> Result<Vec<Job>, SchedulerError> {
            let mut inner = self.inner.lock();
            inner.calls.push(OrchestratorCall::ListJobs {
                namespace: namespace.to_string(),
                label_selector: label_selector.to_string(),
            });
            Ok(inner
                .jobs
                .iter()
                .filter(|((ns, _), job)| ns == namespace && matches_selector(job, label_selector))
                .map(|(_, job)| job.clone())
                .collect())
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeOrchestrator, OrchestratorCall};
