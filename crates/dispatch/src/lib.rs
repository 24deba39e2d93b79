// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! gp-dispatch: takes a received goal from verification to execution

pub mod dispatcher;
pub mod error;
pub mod executor;

pub use dispatcher::{CacheHooks, DispatchOutcome, Dispatcher};
pub use error::{DispatchError, ExecutionError};
#[cfg(any(test, feature = "test-support"))]
pub use executor::FakeExecutor;
pub use executor::{ExecutionResult, GoalExecutor};
