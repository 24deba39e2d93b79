// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Filesystem cache backend.
//!
//! Layout: `<root>/<workspace>/<goal-set>/<classifier>/<relative path>.zst`,
//! one zstd-compressed blob per cached file. Each `put` writes a staging
//! directory and swaps it in, so a reader never sees a half-written entry.
//! All filesystem work runs on tokio's blocking pool.

use crate::backend::{CacheBackend, CacheScope};
use crate::error::CacheError;
use async_trait::async_trait;
use gp_core::Project;
use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

const BLOB_EXT: &str = "zst";
/// Outside the `path_component` alphabet, so no classifier maps onto it.
const STAGING_PREFIX: &str = "~";
const ZSTD_LEVEL: i32 = 3;

/// Backend storing entries below a local directory.
#[derive(Debug, Clone)]
pub struct FileSystemCache {
    root: PathBuf,
}

impl FileSystemCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Platform cache directory (`~/.cache/goalpost` on Linux).
    pub fn default_root() -> Option<PathBuf> {
        dirs::cache_dir().map(|dir| dir.join("goalpost"))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn scope_dir(&self, scope: &CacheScope) -> PathBuf {
        self.root
            .join(path_component(&scope.workspace_id))
            .join(path_component(&scope.goal_set_id))
    }

    fn entry_dir(&self, scope: &CacheScope, classifier: &str) -> PathBuf {
        self.scope_dir(scope).join(path_component(classifier))
    }
}

#[async_trait]
impl CacheBackend for FileSystemCache {
    async fn put(
        &self,
        scope: &CacheScope,
        classifier: &str,
        project: &Project,
        files: &[PathBuf],
    ) -> Result<(), CacheError> {
        let entry = self.entry_dir(scope, classifier);
        let source = project.root().to_path_buf();
        let files = files.to_vec();
        blocking(move || write_entry(&entry, &source, &files)).await
    }

    async fn retrieve(
        &self,
        scope: &CacheScope,
        classifier: &str,
        project: &Project,
    ) -> Result<(), CacheError> {
        let entry = self.entry_dir(scope, classifier);
        let dest = project.root().to_path_buf();
        let classifier = classifier.to_string();
        blocking(move || {
            if !entry.is_dir() {
                return Err(CacheError::Miss { classifier });
            }
            restore_entry(&entry, &dest)
        })
        .await
    }

    async fn remove(
        &self,
        scope: &CacheScope,
        classifier: Option<&str>,
    ) -> Result<(), CacheError> {
        let dir = match classifier {
            Some(c) => self.entry_dir(scope, c),
            None => self.scope_dir(scope),
        };
        blocking(move || remove_dir_if_exists(&dir)).await
    }
}

async fn blocking<F>(f: F) -> Result<(), CacheError>
where
    F: FnOnce() -> Result<(), CacheError> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| CacheError::Backend(format!("cache task failed: {}", e)))?
}

fn write_entry(entry: &Path, source: &Path, files: &[PathBuf]) -> Result<(), CacheError> {
    let staging = staging_dir(entry);
    remove_dir_if_exists(&staging)?;
    std::fs::create_dir_all(&staging).map_err(|e| CacheError::io(&staging, e))?;

    for rel in files {
        if !is_plain_relative(rel) {
            tracing::warn!(path = %rel.display(), "skipping non-relative cache path");
            continue;
        }
        let src = source.join(rel);
        let data = std::fs::read(&src).map_err(|e| CacheError::io(&src, e))?;
        let compressed =
            zstd::encode_all(data.as_slice(), ZSTD_LEVEL).map_err(|e| CacheError::io(&src, e))?;
        let blob = with_suffix(&staging.join(rel), &format!(".{}", BLOB_EXT));
        if let Some(parent) = blob.parent() {
            std::fs::create_dir_all(parent).map_err(|e| CacheError::io(parent, e))?;
        }
        std::fs::write(&blob, compressed).map_err(|e| CacheError::io(&blob, e))?;
    }

    remove_dir_if_exists(entry)?;
    std::fs::rename(&staging, entry).map_err(|e| CacheError::io(entry, e))
}

fn restore_entry(entry: &Path, dest: &Path) -> Result<(), CacheError> {
    let mut blobs = Vec::new();
    collect_blobs(entry, &mut blobs)?;

    for blob in blobs {
        let Ok(rel) = blob.strip_prefix(entry) else { continue };
        let target = dest.join(rel.with_extension(""));
        let compressed = std::fs::read(&blob).map_err(|e| CacheError::io(&blob, e))?;
        let data =
            zstd::decode_all(compressed.as_slice()).map_err(|e| CacheError::io(&blob, e))?;
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent).map_err(|e| CacheError::io(parent, e))?;
        }
        std::fs::write(&target, data).map_err(|e| CacheError::io(&target, e))?;
    }
    Ok(())
}

fn collect_blobs(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), CacheError> {
    let entries = std::fs::read_dir(dir).map_err(|e| CacheError::io(dir, e))?;
    for entry in entries {
        let path = entry.map_err(|e| CacheError::io(dir, e))?.path();
        if path.is_dir() {
            collect_blobs(&path, out)?;
        } else if path.extension().is_some_and(|ext| ext == BLOB_EXT) {
            out.push(path);
        }
    }
    Ok(())
}

fn remove_dir_if_exists(dir: &Path) -> Result<(), CacheError> {
    match std::fs::remove_dir_all(dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(CacheError::io(dir, e)),
    }
}

fn staging_dir(entry: &Path) -> PathBuf {
    let mut name = OsString::from(STAGING_PREFIX);
    name.push(entry.file_name().unwrap_or_default());
    entry.with_file_name(name)
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

fn is_plain_relative(path: &Path) -> bool {
    path.components().all(|c| matches!(c, Component::Normal(_)))
}

/// Map an identifier to a single safe path component.
fn path_component(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') { c } else { '_' })
        .collect();
    match cleaned.as_str() {
        "" | "." | ".." => format!("_{}", cleaned),
        _ => cleaned,
    }
}

#[cfg(test)]
#[path = "fs_tests.rs"]
mod tests;
