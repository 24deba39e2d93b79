// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-cluster job submission and cleanup

use anyhow::Result;
use clap::Args;
use gp_core::{EnvSnapshot, GoalInvocation, GoalpostConfig};
use gp_scheduler::{
    GoalScheduler, KubeOrchestrator, KubernetesGoalScheduler, SchedulerContext,
};
use std::sync::Arc;

use crate::input::read_json;
use crate::output::print_json;

#[derive(Args)]
pub struct ScheduleArgs {
    /// Goal invocation JSON, `-` for stdin
    #[arg(value_name = "INVOCATION", default_value = "-")]
    pub invocation: String,
}

#[derive(Args)]
pub struct CleanupArgs {
    #[arg(long)]
    pub goal_set_id: String,
}

async fn connect(config: &GoalpostConfig, env: EnvSnapshot) -> Result<KubernetesGoalScheduler> {
    let orchestrator = KubeOrchestrator::try_default().await?;
    let context =
        SchedulerContext::load(&orchestrator, &env, config.registration.clone(), &config.scheduler)
            .await?;
    Ok(KubernetesGoalScheduler::new(Arc::new(orchestrator), context, env)
        .isolate_all(config.scheduler.isolate_all))
}

pub async fn schedule(args: ScheduleArgs, config: &GoalpostConfig, env: EnvSnapshot) -> Result<()> {
    let invocation: GoalInvocation = read_json(&args.invocation)?;
    let scheduler = connect(config, env).await?;
    if !scheduler.supports(&invocation).await {
        tracing::warn!(
            goal = %invocation.goal.unique_name,
            "goal not selected for isolation by environment; scheduling anyway"
        );
    }
    let outcome = scheduler.schedule(&invocation).await?;
    print_json(&serde_json::json!({
        "jobName": outcome.job_name,
        "namespace": outcome.namespace,
        "state": outcome.state,
        "description": outcome.description,
    }))
}

pub async fn cleanup(args: CleanupArgs, config: &GoalpostConfig, env: EnvSnapshot) -> Result<()> {
    let scheduler = connect(config, env).await?;
    let deleted = scheduler.cleanup_goal_set(&args.goal_set_id).await?;
    println!("Deleted {deleted} job(s) of goal set {}", args.goal_set_id);
    Ok(())
}
