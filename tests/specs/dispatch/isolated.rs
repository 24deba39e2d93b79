// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Isolated goals leave the dispatcher as jobs and execute inside them.

use crate::prelude::*;
use gp_scheduler::OrchestratorCall;

fn project() -> (TempDir, Project) {
    let dir = TempDir::new().unwrap();
    let project = Project::new(dir.path());
    (dir, project)
}

/// Environment the job's container starts with.
fn job_env(orchestrator: &FakeOrchestrator, job_name: &str, selector: &str) -> EnvSnapshot {
    let job = orchestrator.job(NAMESPACE, job_name).unwrap();
    let spec = job.spec.unwrap().template.spec.unwrap();
    let mut vars: Vec<(String, String)> = spec.containers[0]
        .env
        .clone()
        .unwrap_or_default()
        .into_iter()
        .map(|var| (var.name, var.value.unwrap_or_default()))
        .collect();
    vars.push(("GOALPOST_GOAL_SCHEDULER".to_string(), selector.to_string()));
    EnvSnapshot::from_pairs(vars)
}

#[tokio::test]
async fn isolated_goal_is_scheduled_then_executed_inside_job() {
    let orchestrator = FakeOrchestrator::new();
    let scheduler = kubernetes_scheduler(&orchestrator, dispatcher_env("kubernetes")).await;
    let dispatcher_executor = FakeExecutor::new();
    let dispatcher = Dispatcher::new(
        verifier(&FakePublisher::new()),
        Arc::new(dispatcher_executor.clone()),
        registration(),
    )
    .with_scheduler(scheduler)
    .isolate_goal("deploy");
    let (_dir, checkout) = project();
    let goal = planned_goal("deploy", 88);

    let outcome = dispatcher.dispatch(&goal, &context(), &checkout).await.unwrap();

    let DispatchOutcome::Scheduled(scheduled) = outcome else { panic!("deploy should be isolated") };
    assert_eq!(scheduled.namespace, NAMESPACE);
    assert_eq!(scheduled.job_name, "rocket-sdm-job-f1e2d3c-deploy");
    assert_eq!(scheduled.state, GoalState::InProcess);
    assert!(dispatcher_executor.executed().is_empty());

    // Inside the job the same dispatcher code runs the goal itself
    let env = job_env(&orchestrator, &scheduled.job_name, "kubernetes");
    assert_eq!(env.get("GOALPOST_GOAL_UNIQUE_NAME"), Some("deploy#goals.rs:88"));
    assert_eq!(env.get("GOALPOST_CORRELATION_ID"), Some("corr-5150"));
    let job_scheduler = Arc::new(KubernetesGoalScheduler::new(
        Arc::new(orchestrator.clone()),
        SchedulerContext::new(registration(), dispatcher_pod(), NAMESPACE),
        env,
    ));
    let job_executor = FakeExecutor::new();
    let in_job = Dispatcher::new(
        verifier(&FakePublisher::new()),
        Arc::new(job_executor.clone()),
        registration(),
    )
    .with_scheduler(job_scheduler)
    .isolate_goal("deploy");

    let outcome = in_job.dispatch(&goal, &context(), &checkout).await.unwrap();

    assert!(matches!(outcome, DispatchOutcome::Executed(_)));
    assert_eq!(job_executor.executed()[0].goal.unique_name, "deploy#goals.rs:88");
    assert_eq!(orchestrator.job_names(NAMESPACE).len(), 1);
}

#[tokio::test]
async fn job_is_pinned_near_its_goal_set_and_off_the_dispatcher_node() {
    let orchestrator = FakeOrchestrator::new();
    let scheduler = kubernetes_scheduler(&orchestrator, dispatcher_env("kubernetes-all")).await;
    let dispatcher =
        Dispatcher::new(verifier(&FakePublisher::new()), Arc::new(FakeExecutor::new()), registration())
            .with_scheduler(scheduler);
    let (_dir, checkout) = project();

    let DispatchOutcome::Scheduled(scheduled) =
        dispatcher.dispatch(&planned_goal("build", 12), &context(), &checkout).await.unwrap()
    else {
        panic!("kubernetes-all isolates every goal")
    };

    let job = orchestrator.job(NAMESPACE, &scheduled.job_name).unwrap();
    let spec = job.spec.unwrap().template.spec.unwrap();
    assert_eq!(spec.node_name, None);
    assert_eq!(spec.restart_policy.as_deref(), Some("Never"));
    let preferred = spec
        .affinity
        .and_then(|a| a.pod_affinity)
        .and_then(|a| a.preferred_during_scheduling_ignored_during_execution)
        .unwrap();
    assert_eq!(preferred.last().unwrap().pod_affinity_term.topology_key, "kubernetes.io/hostname");
}

#[tokio::test]
async fn rescheduling_a_goal_replaces_its_job() {
    let orchestrator = FakeOrchestrator::new();
    let scheduler = kubernetes_scheduler(&orchestrator, dispatcher_env("kubernetes-all")).await;
    let dispatcher =
        Dispatcher::new(verifier(&FakePublisher::new()), Arc::new(FakeExecutor::new()), registration())
            .with_scheduler(scheduler);
    let (_dir, checkout) = project();
    let goal = planned_goal("build", 12);

    dispatcher.dispatch(&goal, &context(), &checkout).await.unwrap();
    dispatcher.dispatch(&goal, &context(), &checkout).await.unwrap();

    assert_eq!(orchestrator.job_names(NAMESPACE).len(), 1);
    let deletes = orchestrator
        .calls()
        .into_iter()
        .filter(|c| matches!(c, OrchestratorCall::DeleteJob { .. }))
        .count();
    assert_eq!(deletes, 1);
}

#[tokio::test]
async fn finished_goal_set_jobs_are_cleaned_up() {
    let orchestrator = FakeOrchestrator::new();
    let scheduler = kubernetes_scheduler(&orchestrator, dispatcher_env("kubernetes-all")).await;
    let dispatcher = Dispatcher::new(
        verifier(&FakePublisher::new()),
        Arc::new(FakeExecutor::new()),
        registration(),
    )
    .with_scheduler(scheduler.clone());
    let (_dir, checkout) = project();
    for (name, line) in [("build", 12), ("test", 20)] {
        dispatcher.dispatch(&planned_goal(name, line), &context(), &checkout).await.unwrap();
    }
    assert_eq!(orchestrator.job_names(NAMESPACE).len(), 2);

    assert_eq!(scheduler.cleanup_goal_set(GOAL_SET).await.unwrap(), 2);
    assert!(orchestrator.job_names(NAMESPACE).is_empty());
}
