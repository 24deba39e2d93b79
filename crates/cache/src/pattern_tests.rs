// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use tempfile::TempDir;

fn fixture() -> (TempDir, Project) {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    for file in ["Cargo.lock", "target/debug/app", "target/debug/deps/libx.rlib", "src/main.rs"] {
        let path = root.join(file);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, file).unwrap();
    }
    let project = Project::new(root);
    (dir, project)
}

fn paths(items: &[&str]) -> Vec<PathBuf> {
    items.iter().map(PathBuf::from).collect()
}

#[yare::parameterized(
    single_file   = { CachePattern::glob("Cargo.lock"), &["Cargo.lock"] },
    recursive     = { CachePattern::glob("target/**/*.rlib"), &["target/debug/deps/libx.rlib"] },
    directory     = { CachePattern::Directory("target".to_string()), &["target/debug/app", "target/debug/deps/libx.rlib"] },
    trailing_sep  = { CachePattern::Directory("target/".to_string()), &["target/debug/app", "target/debug/deps/libx.rlib"] },
    no_match      = { CachePattern::glob("node_modules/**/*"), &[] },
    several_globs = { CachePattern::Globs(vec!["src/*.rs".to_string(), "Cargo.lock".to_string()]), &["Cargo.lock", "src/main.rs"] },
)]
fn resolves_relative_sorted_files(pattern: CachePattern, expected: &[&str]) {
    let (_dir, project) = fixture();
    assert_eq!(resolve_files(&project, &pattern).unwrap(), paths(expected));
}

#[test]
fn directories_are_not_files() {
    let (_dir, project) = fixture();
    let files = resolve_files(&project, &CachePattern::glob("target/*")).unwrap();
    assert!(files.is_empty());
}

#[test]
fn overlapping_globs_are_deduplicated() {
    let (_dir, project) = fixture();
    let pattern = CachePattern::Globs(vec!["**/*.lock".to_string(), "Cargo.lock".to_string()]);
    assert_eq!(resolve_files(&project, &pattern).unwrap(), paths(&["Cargo.lock"]));
}

#[test]
fn invalid_glob_is_pattern_error() {
    let (_dir, project) = fixture();
    let err = resolve_files(&project, &CachePattern::glob("target/***")).unwrap_err();
    assert!(matches!(err, CacheError::Pattern { .. }));
}

#[test]
fn pattern_serde_shape() {
    let json = serde_json::to_string(&CachePattern::Directory("target".to_string())).unwrap();
    assert_eq!(json, r#"{"directory":"target"}"#);
}
