// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! gp: operator tooling for goal dispatch

mod commands;
mod exit_error;
mod input;
mod output;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use commands::{job, schedule, sign};
use exit_error::ExitError;
use gp_core::{EnvSnapshot, GoalpostConfig};
use std::path::{Path, PathBuf};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gp", version, about = "Goal dispatch: job naming, signing, isolated scheduling")]
struct Cli {
    /// Config file (defaults to $GOALPOST_CONFIG)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// More logging (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the job name for a goal
    JobName(job::JobNameArgs),
    /// Print the job manifest that would run a goal in isolation
    JobSpec(job::JobSpecArgs),
    /// Sign a goal with the configured signing key
    Sign(sign::SignArgs),
    /// Check a goal's signature against the trusted keys
    Verify(sign::VerifyArgs),
    /// Submit a goal as a job in the current cluster
    Schedule(schedule::ScheduleArgs),
    /// Delete the jobs of a goal set
    Cleanup(schedule::CleanupArgs),
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

fn load_config(path: Option<&Path>, env: &EnvSnapshot) -> Result<GoalpostConfig> {
    let config = match path {
        Some(path) => GoalpostConfig::load(path)?.with_env_overrides(env),
        None => GoalpostConfig::from_env(env)?,
    };
    Ok(config)
}

async fn run(cli: Cli) -> Result<()> {
    let env = EnvSnapshot::from_process();
    match cli.command {
        Commands::JobName(args) => job::job_name(args),
        Commands::JobSpec(args) => job::job_spec(args),
        Commands::Sign(args) => {
            let config = load_config(cli.config.as_deref(), &env)?;
            sign::sign(args, &config)
        }
        Commands::Verify(args) => {
            let config = load_config(cli.config.as_deref(), &env)?;
            sign::verify(args, &config).await
        }
        Commands::Schedule(args) => {
            let config = load_config(cli.config.as_deref(), &env)?;
            schedule::schedule(args, &config, env).await
        }
        Commands::Cleanup(args) => {
            let config = load_config(cli.config.as_deref(), &env)?;
            schedule::cleanup(args, &config, env).await
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("error: failed to start runtime: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = runtime.block_on(run(cli)) {
        if let Some(exit) = e.downcast_ref::<ExitError>() {
            eprintln!("{}", exit.message);
            std::process::exit(exit.code);
        }
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
