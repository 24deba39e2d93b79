// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! gp-cache: classifier-keyed artifact caching around goal execution.
//!
//! # Module layout
//!
//! - [`goal_cache`]: put/retrieve/remove with push-test gating and fallbacks
//! - [`backend`]: storage contract plus the inert default
//! - [`fs`]: zstd-compressed filesystem backend
//! - [`pattern`]: glob resolution of cacheable files

pub mod backend;
pub mod error;
pub mod fs;
pub mod goal_cache;
pub mod pattern;

pub use backend::{CacheBackend, CacheScope, NoOpCache};
#[cfg(any(test, feature = "test-support"))]
pub use backend::{CacheCall, FakeCache};
pub use error::CacheError;
pub use fs::FileSystemCache;
pub use goal_cache::{CacheEntry, GoalCache, GoalCacheOptions, RetrieveOutcome};
pub use pattern::CachePattern;
