// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::env::{CACHE_ENABLED_VAR, CONFIG_VAR};

#[test]
fn empty_config_uses_defaults() {
    let config = GoalpostConfig::from_toml_str("").unwrap();
    assert_eq!(config, GoalpostConfig::default());
    assert!(!config.cache.enabled);
    assert!(!config.signing.enabled);
    assert_eq!(config.registration.name, "goalpost");
}

#[test]
fn parses_all_sections() {
    let config = GoalpostConfig::from_toml_str(
        r#"
        [registration]
        name = "rocket-sdm"
        version = "1.4.0"

        [cache]
        enabled = true
        root = "/var/cache/goalpost"

        [signing]
        enabled = true
        signing_key = { name = "k1", private_key = "PEM", passphrase = "hunter2" }
        verification_keys = [{ name = "k0", public_key = "PUB" }]

        [scheduler]
        isolate_all = true
        namespace = "builds"
        "#,
    )
    .unwrap();

    assert_eq!(config.registration.name, "rocket-sdm");
    assert!(config.cache.enabled);
    assert_eq!(config.cache.root.as_deref(), Some(Path::new("/var/cache/goalpost")));
    let key = config.signing.signing_key.as_ref().unwrap();
    assert_eq!(key.name, "k1");
    assert_eq!(key.passphrase.as_deref(), Some("hunter2"));
    assert_eq!(config.signing.verification_keys[0].name, "k0");
    assert!(config.scheduler.isolate_all);
    assert_eq!(config.scheduler.namespace.as_deref(), Some("builds"));
}

#[test]
fn signing_key_debug_is_redacted() {
    let key = SigningKeyConfig {
        name: "k1".to_string(),
        private_key: "SECRET-PEM".to_string(),
        passphrase: Some("hunter2".to_string()),
    };
    let debug = format!("{key:?}");
    assert!(!debug.contains("SECRET-PEM"));
    assert!(!debug.contains("hunter2"));
}

#[test]
fn invalid_toml_is_parse_error() {
    let err = GoalpostConfig::from_toml_str("[cache]\nenabled = \"sometimes\"").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn from_env_loads_file_and_applies_override() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("goalpost.toml");
    std::fs::write(&path, "[cache]\nenabled = true\n").unwrap();

    let env = EnvSnapshot::from_pairs([
        (CONFIG_VAR, path.to_string_lossy().into_owned()),
        (CACHE_ENABLED_VAR, "false".to_string()),
    ]);
    let config = GoalpostConfig::from_env(&env).unwrap();
    assert!(!config.cache.enabled);
}

#[test]
fn from_env_missing_file_is_read_error() {
    let env = EnvSnapshot::from_pairs([(CONFIG_VAR, "/nonexistent/goalpost.toml")]);
    let err = GoalpostConfig::from_env(&env).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}
