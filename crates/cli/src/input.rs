// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::io::Read;

/// Parse JSON from a file, or from stdin when `source` is `-`.
pub fn read_json<T: DeserializeOwned>(source: &str) -> Result<T> {
    let content = if source == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).context("failed to read stdin")?;
        buf
    } else {
        std::fs::read_to_string(source).with_context(|| format!("failed to read {source}"))?
    };
    serde_json::from_str(&content).with_context(|| format!("invalid JSON in {source}"))
}
