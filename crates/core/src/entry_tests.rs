// SPDX-License-Identifier: MIT

use super::*;

fn work(n_start: i32, n_end: i32, n_cache: i32, n_check: i32, doc: &str, ov: bool) -> Entry {
    Entry::work(n_start, n_end, n_cache, n_check, doc, ov)
}

#[yare::parameterized(
    valid                = { 0, 5, 0, 0, "A", true },
    valid_nonzero_start   = { 3, 9, 2, 1, "B", false },
)]
fn valid_work_entries_pass(n_start: i32, n_end: i32, n_cache: i32, n_check: i32, doc: &str, ov: bool) {
    let e = work(n_start, n_end, n_cache, n_check, doc, ov);
    assert!(e.as_work().unwrap().is_valid());
}

#[yare::parameterized(
    negative_start       = { -1, 5, 0, 0, "A" },
    end_not_after_start  = { 5, 5, 0, 0, "A" },
    end_before_start     = { 5, 4, 0, 0, "A" },
    negative_cache       = { 0, 5, -1, 0, "A" },
    empty_doc            = { 0, 5, 0, 0, "" },
)]
fn invalid_work_entries_fail(n_start: i32, n_end: i32, n_cache: i32, n_check: i32, doc: &str) {
    let e = work(n_start, n_end, n_cache, n_check, doc, false);
    assert!(!e.as_work().unwrap().is_valid());
}

#[test]
fn identity_ignores_n_end_and_override() {
    let a = work(0, 5, 0, 0, "A", false);
    let b = work(0, 50, 0, 0, "A", true);
    assert_eq!(a, b);
}

#[test]
fn identity_differs_on_start_cache_check_or_doc() {
    let base = work(0, 5, 0, 0, "A", false);
    assert_ne!(base, work(1, 5, 0, 0, "A", false));
    assert_ne!(base, work(0, 5, 1, 0, "A", false));
    assert_ne!(base, work(0, 5, 0, 1, "A", false));
    assert_ne!(base, work(0, 5, 0, 0, "B", false));
}

#[test]
fn control_entries_are_never_equal() {
    assert_ne!(Entry::make_stop(), Entry::make_stop());
    assert_ne!(Entry::make_reset(), Entry::make_reset());
    assert_ne!(
        Entry::make_dispose("A"),
        Entry::make_dispose("A")
    );
}

#[test]
fn is_stop_only_true_for_stop_control() {
    assert!(Entry::make_stop().is_stop());
    assert!(!Entry::make_reset().is_stop());
    assert!(!Entry::make_dispose("A").is_stop());
    assert!(!work(0, 5, 0, 0, "A", false).is_stop());
}
