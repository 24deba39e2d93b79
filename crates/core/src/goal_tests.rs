// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn provenance(ts: u64) -> Provenance {
    Provenance {
        registration: "goalpost".to_string(),
        version: "0.1.0".to_string(),
        name: "executor".to_string(),
        correlation_id: "corr-1".to_string(),
        ts,
    }
}

#[yare::parameterized(
    in_process     = { GoalState::InProcess, "\"in_process\"" },
    pre_approval   = { GoalState::WaitingForPreApproval, "\"waiting_for_pre_approval\"" },
    failure        = { GoalState::Failure, "\"failure\"" },
)]
fn goal_state_wire_form(state: GoalState, json: &str) {
    assert_eq!(serde_json::to_string(&state).unwrap(), json);
    assert_eq!(format!("\"{state}\""), json);
}

#[test]
fn terminal_states() {
    assert!(GoalState::Success.is_terminal());
    assert!(GoalState::Failure.is_terminal());
    assert!(!GoalState::Requested.is_terminal());
    assert!(!GoalState::WaitingForApproval.is_terminal());
}

#[test]
fn transition_bumps_version_and_appends_provenance() {
    let goal = GoalMessage::builder().version(4).build();
    let next = goal.transition(
        GoalUpdate::state(GoalState::InProcess).description("Building"),
        provenance(2_000_000),
    );

    assert_eq!(next.version, 5);
    assert_eq!(next.state, GoalState::InProcess);
    assert_eq!(next.description, "Building");
    assert_eq!(next.ts, 2_000_000);
    assert_eq!(next.provenance.len(), goal.provenance.len() + 1);
    // Input untouched
    assert_eq!(goal.version, 4);
    assert_eq!(goal.state, GoalState::Requested);
}

#[test]
fn transition_drops_stale_signature() {
    let goal = GoalMessage::builder().signature("c2ln").signer_name("ci").build();
    assert!(goal.is_signed());

    let next = goal.transition(GoalUpdate::state(GoalState::Success), provenance(1));
    assert!(!next.is_signed());
    assert!(next.signer_name.is_none());
}

#[test]
fn transition_keeps_phase_unless_given() {
    let goal = GoalMessage::builder().phase("compiling").build();
    let next = goal.transition(GoalUpdate::state(GoalState::InProcess), provenance(1));
    assert_eq!(next.phase.as_deref(), Some("compiling"));

    let next = next.transition(GoalUpdate::state(GoalState::Failure).phase("tests"), provenance(2));
    assert_eq!(next.phase.as_deref(), Some("tests"));
}

#[test]
fn wire_format_is_camel_case_with_envelope() {
    let goal =
        GoalMessage::builder().id("goal-77").signature("c2ln").signer_name("release-key").build();
    let json = serde_json::to_value(&goal).unwrap();

    assert_eq!(json["uniqueName"], "build#goals.rs:12");
    assert_eq!(json["goalSetId"], "f1e2d3c-4b5a-6978-8a9b-0c1d2e3f4a5b");
    assert_eq!(json["signerName"], "release-key");
    assert_eq!(json["signature"], "c2ln");
    assert_eq!(json["id"], "goal-77");
    assert!(json.get("push").is_none());
}

#[test]
fn deserializes_minimal_message() {
    let json = r#"{
        "uniqueName": "deploy",
        "name": "deploy",
        "environment": "2-prod",
        "goalSetId": "abc",
        "sha": "deadbeef",
        "branch": "main",
        "repo": {"owner": "acme", "name": "rocket"},
        "state": "requested",
        "version": 1
    }"#;
    let goal: GoalMessage = serde_json::from_str(json).unwrap();
    assert_eq!(goal.state, GoalState::Requested);
    assert!(goal.provenance.is_empty());
    assert!(goal.signature.is_none());
    assert_eq!(goal.id_or_empty(), "");
}
