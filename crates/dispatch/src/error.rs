// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use gp_scheduler::SchedulerError;
use gp_signing::VerifyError;
use thiserror::Error;

/// Errors raised by a goal executor
#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("{0}")]
    Failed(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from dispatching one goal
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Rejected(#[from] VerifyError),
    #[error("scheduling failed: {0}")]
    Scheduling(#[from] SchedulerError),
    #[error("goal {unique_name} failed: {source}")]
    Execution {
        unique_name: String,
        #[source]
        source: ExecutionError,
    },
}
