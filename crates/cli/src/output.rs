// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use async_trait::async_trait;
use gp_core::{GoalMessage, GoalPublisher, PublishError};
use serde::Serialize;

pub fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Publisher writing each goal as one JSON line on stdout.
pub struct StdoutPublisher;

#[async_trait]
impl GoalPublisher for StdoutPublisher {
    async fn publish(&self, goal: &GoalMessage) -> Result<(), PublishError> {
        let line =
            serde_json::to_string(goal).map_err(|e| PublishError::SendFailed(e.to_string()))?;
        println!("{line}");
        Ok(())
    }
}
