// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Goals that fail verification are failed on the bus and go nowhere.

use crate::prelude::*;
use gp_signing::VerifyError;

async fn dispatch_rejected(goal: &GoalMessage) -> (VerifyError, FakePublisher, FakeOrchestrator) {
    let orchestrator = FakeOrchestrator::new();
    let scheduler = kubernetes_scheduler(&orchestrator, dispatcher_env("kubernetes-all")).await;
    let publisher = FakePublisher::new();
    let dispatcher =
        Dispatcher::new(verifier(&publisher), Arc::new(FakeExecutor::new()), registration())
            .with_scheduler(scheduler);
    let dir = TempDir::new().unwrap();

    let err = dispatcher.dispatch(goal, &context(), &Project::new(dir.path())).await.unwrap_err();
    match err {
        DispatchError::Rejected(rejection) => (rejection, publisher, orchestrator),
        other => panic!("expected a rejection, got {other}"),
    }
}

#[tokio::test]
async fn tampered_goal_is_failed_and_never_scheduled() {
    let mut goal = planned_goal("deploy", 88);
    goal.fulfillment.name = "curl-pipe-sh".to_string();

    let (rejection, publisher, orchestrator) = dispatch_rejected(&goal).await;

    assert!(matches!(rejection, VerifyError::SignatureInvalid { .. }));
    assert!(orchestrator.job_names(NAMESPACE).is_empty());
    let published = publisher.published();
    assert_eq!(published.len(), 1);
    let failed = &published[0];
    assert_eq!(failed.state, GoalState::Failure);
    assert_eq!(failed.description, "Rejected: deploy");
    assert_eq!(failed.provenance.last().unwrap().correlation_id, "corr-5150");

    // The failure notice is itself trustworthy
    verifier(&FakePublisher::new()).verify(failed, &context()).await.unwrap();
}

#[tokio::test]
async fn goal_signed_by_unknown_key_is_rejected() {
    let intruder = GoalSigner::new("rocket-2026", SigningKey::from_bytes(&[7; 32]));
    let goal = sign_goal(&GoalMessage::builder().name("deploy").build(), &intruder).unwrap();

    let (rejection, publisher, _) = dispatch_rejected(&goal).await;

    assert!(matches!(rejection, VerifyError::SignatureInvalid { .. }));
    assert_eq!(publisher.published()[0].phase.as_deref(), Some("rejected because signature invalid"));
}

#[tokio::test]
async fn unsigned_goal_is_rejected() {
    let (rejection, publisher, _) = dispatch_rejected(&GoalMessage::builder().build()).await;

    assert!(matches!(rejection, VerifyError::SignatureMissing { .. }));
    assert!(publisher.published()[0].is_signed());
}
