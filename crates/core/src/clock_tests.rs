// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn system_clock_is_past_2020() {
    assert!(SystemClock.epoch_ms() > 1_577_836_800_000);
}

#[test]
fn fake_clock_advances_shared_time() {
    let clock = FakeClock::new();
    let other = clock.clone();
    other.advance(Duration::from_secs(2));
    assert_eq!(clock.epoch_ms(), 1_002_000);
}

#[test]
fn fake_clock_set() {
    let clock = FakeClock::default();
    clock.set_epoch_ms(42);
    assert_eq!(clock.epoch_ms(), 42);
}
