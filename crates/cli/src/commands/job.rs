// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Offline job naming and manifest rendering

use anyhow::Result;
use clap::Args;
use gp_core::GoalInvocation;
use gp_scheduler::{create_job_spec, job_name as render_job_name};
use k8s_openapi::api::core::v1::Pod;

use crate::input::read_json;
use crate::output::print_json;

#[derive(Args)]
pub struct JobNameArgs {
    /// Container the job is cloned from
    #[arg(long)]
    pub container: String,

    #[arg(long)]
    pub goal_set_id: String,

    /// Unique name of the goal
    #[arg(long)]
    pub unique_name: String,
}

#[derive(Args)]
pub struct JobSpecArgs {
    /// Pod manifest (JSON) the job is cloned from
    #[arg(long, value_name = "PATH")]
    pub pod: String,

    /// Namespace of the job
    #[arg(long, default_value = "default")]
    pub namespace: String,

    /// Goal invocation JSON, `-` for stdin
    #[arg(value_name = "INVOCATION", default_value = "-")]
    pub invocation: String,
}

pub fn job_name(args: JobNameArgs) -> Result<()> {
    println!("{}", render_job_name(&args.container, &args.goal_set_id, &args.unique_name));
    Ok(())
}

pub fn job_spec(args: JobSpecArgs) -> Result<()> {
    let pod: Pod = read_json(&args.pod)?;
    let invocation: GoalInvocation = read_json(&args.invocation)?;
    let job = create_job_spec(&pod, &args.namespace, &invocation)?;
    print_json(&job)
}
