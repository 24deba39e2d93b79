// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resolution of cache patterns to project files.

use crate::error::CacheError;
use gp_core::Project;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Which project files belong to a cache entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CachePattern {
    /// Glob patterns relative to the project root (e.g. `target/**/*.rlib`)
    Globs(Vec<String>),
    /// Every file below a directory relative to the project root
    Directory(String),
}

impl CachePattern {
    pub fn glob(pattern: impl Into<String>) -> Self {
        CachePattern::Globs(vec![pattern.into()])
    }

    fn globs(&self) -> Vec<String> {
        match self {
            CachePattern::Globs(globs) => globs.clone(),
            CachePattern::Directory(dir) => vec![format!("{}/**/*", dir.trim_end_matches('/'))],
        }
    }
}

/// Resolve `pattern` to regular files, relative to the project root, sorted.
pub fn resolve_files(project: &Project, pattern: &CachePattern) -> Result<Vec<PathBuf>, CacheError> {
    let root = project.root();
    let escaped_root = glob::Pattern::escape(&root.to_string_lossy());
    let mut files = BTreeSet::new();

    for glob_str in pattern.globs() {
        let full = format!("{}/{}", escaped_root.trim_end_matches('/'), glob_str);
        let paths = glob::glob(&full).map_err(|e| CacheError::Pattern {
            pattern: glob_str.clone(),
            message: e.msg.to_string(),
        })?;
        for path in paths.filter_map(Result::ok) {
            if !path.is_file() {
                continue;
            }
            if let Some(rel) = relative_to(&path, root) {
                files.insert(rel);
            }
        }
    }

    Ok(files.into_iter().collect())
}

fn relative_to(path: &Path, root: &Path) -> Option<PathBuf> {
    path.strip_prefix(root).ok().map(Path::to_path_buf).filter(|p| !p.as_os_str().is_empty())
}

#[cfg(test)]
#[path = "pattern_tests.rs"]
mod tests;
