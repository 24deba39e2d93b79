// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;
use thiserror::Error;

/// Errors from cache backends and pattern resolution
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("no cache entry for classifier '{classifier}'")]
    Miss { classifier: String },

    #[error("cache I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid cache pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },

    #[error("cache backend error: {0}")]
    Backend(String),
}

impl CacheError {
    pub fn is_miss(&self) -> bool {
        matches!(self, CacheError::Miss { .. })
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CacheError::Io { path: path.into(), source }
    }
}
