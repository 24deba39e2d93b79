// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

const SCHEDULER: &str = "GOALPOST_GOAL_SCHEDULER";
const LAUNCHER: &str = "GOALPOST_GOAL_LAUNCHER";

#[yare::parameterized(
    bare          = { "kubernetes", true },
    json_string   = { r#""kubernetes""#, true },
    json_array    = { r#"["docker","kubernetes"]"#, true },
    padded        = { "  kubernetes \n", true },
    other_token   = { "docker", false },
    other_array   = { r#"["docker"]"#, false },
    broken_json   = { r#"["kubernetes""#, false },
    json_number   = { "42", false },
    empty         = { "", false },
)]
fn scheduler_variable_encodings(raw: &str, expected: bool) {
    let env = EnvSnapshot::from_pairs([(SCHEDULER, raw)]);
    assert_eq!(is_configured_in_env(&env, &["kubernetes"]), expected);
}

#[test]
fn no_variables_means_nothing_configured() {
    let env = EnvSnapshot::default();
    assert!(configured_schedulers(&env).is_empty());
    assert!(!is_configured_in_env(&env, &["kubernetes", "kubernetes-all"]));
}

#[test]
fn variables_are_unioned() {
    let env = EnvSnapshot::from_pairs([(SCHEDULER, "docker"), (LAUNCHER, r#"["kubernetes-all"]"#)]);

    let selected: Vec<_> = configured_schedulers(&env).into_iter().collect();
    assert_eq!(selected, vec!["docker".to_string(), "kubernetes-all".to_string()]);
    assert!(is_configured_in_env(&env, &["kubernetes-all"]));
    assert!(is_configured_in_env(&env, &["docker"]));
    assert!(!is_configured_in_env(&env, &["kubernetes"]));
}

#[test]
fn malformed_value_falls_back_to_bare_token() {
    let env = EnvSnapshot::from_pairs([(LAUNCHER, "[kubernetes")]);
    assert!(is_configured_in_env(&env, &["[kubernetes"]));
}

#[test]
fn array_ignores_non_string_items() {
    let env = EnvSnapshot::from_pairs([(SCHEDULER, r#"["kubernetes", 3, null]"#)]);
    let selected: Vec<_> = configured_schedulers(&env).into_iter().collect();
    assert_eq!(selected, vec!["kubernetes".to_string()]);
}
