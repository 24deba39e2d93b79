// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

/// Errors from isolated goal scheduling
#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("HOSTNAME is not set; cannot identify the running pod")]
    MissingPodName,
    #[error("pod {namespace}/{name} is unreadable: {message}")]
    PodUnreadable { namespace: String, name: String, message: String },
    #[error("pod {0} has no spec")]
    NoPodSpec(String),
    #[error("pod {0} has no containers")]
    NoContainers(String),
    #[error("job {namespace}/{name} already exists")]
    JobExists { namespace: String, name: String },
    #[error("kubernetes client unavailable: {0}")]
    Client(String),
    #[error("orchestrator request failed: {0}")]
    Orchestrator(String),
}
