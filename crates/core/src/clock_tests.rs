// SPDX-License-Identifier: MIT

use super::*;

#[test]
fn manual_clock_counts_sleeps_without_blocking() {
    let clock = ManualClock::new();
    for _ in 0..2000 {
        clock.sleep(Duration::from_millis(1));
    }
    assert_eq!(clock.sleep_count(), 2000);
}

#[test]
fn system_clock_now_advances() {
    let clock = SystemClock;
    let a = clock.now();
    let b = clock.now();
    assert!(b >= a);
}
