// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-process execution wrapped by the goal cache.

use crate::prelude::*;

fn checkout() -> (TempDir, Project) {
    let dir = TempDir::new().unwrap();
    let project = Project::new(dir.path());
    (dir, project)
}

fn dispatcher(executor: Arc<dyn GoalExecutor>, hooks: CacheHooks) -> Dispatcher {
    Dispatcher::new(verifier(&FakePublisher::new()), executor, registration()).with_cache(hooks)
}

#[tokio::test]
async fn artifacts_of_one_goal_are_restored_for_the_next() {
    let cache_root = TempDir::new().unwrap();
    let (_build_dir, build_checkout) = checkout();
    let builder = dispatcher(Arc::new(BuildExecutor), CacheHooks::new(build_cache(cache_root.path())));

    let outcome =
        builder.dispatch(&planned_goal("build", 12), &context(), &build_checkout).await.unwrap();
    let DispatchOutcome::Executed(result) = outcome else { panic!("build should run in process") };
    assert_eq!(result.description.as_deref(), Some("Built build"));

    let (_test_dir, test_checkout) = checkout();
    let tester = dispatcher(
        Arc::new(FakeExecutor::new()),
        CacheHooks::new(build_cache(cache_root.path())).store(false),
    );
    tester.dispatch(&planned_goal("test", 20), &context(), &test_checkout).await.unwrap();

    let restored = std::fs::read_to_string(test_checkout.root().join("target/app")).unwrap();
    assert_eq!(restored, "build#goals.rs:12");
}

#[tokio::test]
async fn other_goal_sets_do_not_share_entries() {
    let cache_root = TempDir::new().unwrap();
    let (_build_dir, build_checkout) = checkout();
    dispatcher(Arc::new(BuildExecutor), CacheHooks::new(build_cache(cache_root.path())))
        .dispatch(&planned_goal("build", 12), &context(), &build_checkout)
        .await
        .unwrap();

    let mut unrelated = planned_goal("test", 20);
    unrelated.goal_set_id = "0a0b0c0-ffff".to_string();
    let unrelated = sign_goal(&unrelated, &signer()).unwrap();
    let (_test_dir, test_checkout) = checkout();
    dispatcher(Arc::new(FakeExecutor::new()), CacheHooks::new(build_cache(cache_root.path())))
        .dispatch(&unrelated, &context(), &test_checkout)
        .await
        .unwrap();

    assert!(!test_checkout.root().join("target/app").exists());
}

#[tokio::test]
async fn last_goal_of_set_removes_entries() {
    let cache_root = TempDir::new().unwrap();
    let (_build_dir, build_checkout) = checkout();
    dispatcher(Arc::new(BuildExecutor), CacheHooks::new(build_cache(cache_root.path())))
        .dispatch(&planned_goal("build", 12), &context(), &build_checkout)
        .await
        .unwrap();

    let (_publish_dir, publish_checkout) = checkout();
    dispatcher(
        Arc::new(FakeExecutor::new()),
        CacheHooks::new(build_cache(cache_root.path())).store(false).remove(true),
    )
    .dispatch(&planned_goal("publish", 30), &context(), &publish_checkout)
    .await
    .unwrap();
    assert!(publish_checkout.root().join("target/app").exists());

    let (_late_dir, late_checkout) = checkout();
    dispatcher(Arc::new(FakeExecutor::new()), CacheHooks::new(build_cache(cache_root.path())))
        .dispatch(&planned_goal("audit", 40), &context(), &late_checkout)
        .await
        .unwrap();
    assert!(!late_checkout.root().join("target/app").exists());
}

#[tokio::test]
async fn failed_build_leaves_cache_empty() {
    let cache_root = TempDir::new().unwrap();
    let (_dir, project) = checkout();
    let executor = FakeExecutor::new();
    executor.fail_with("linker error");

    let err = dispatcher(Arc::new(executor), CacheHooks::new(build_cache(cache_root.path())))
        .dispatch(&planned_goal("build", 12), &context(), &project)
        .await
        .unwrap_err();

    assert!(matches!(err, DispatchError::Execution { .. }));
    let (_later_dir, later_checkout) = checkout();
    dispatcher(Arc::new(FakeExecutor::new()), CacheHooks::new(build_cache(cache_root.path())))
        .dispatch(&planned_goal("retry", 13), &context(), &later_checkout)
        .await
        .unwrap();
    assert!(!later_checkout.root().join("target").exists());
}
