// SPDX-License-Identifier: MIT

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::entry::Entry;
use crate::id::DocId;

/// Build a valid work entry for document `doc` with the given identity
/// fields, defaulting `n_end = n_start + 1` and `override_running = false`.
pub fn work_entry(doc: &str, n_start: i32, n_cache: i32, n_check: i32) -> Entry {
    Entry::work(n_start, n_start + 1, n_cache, n_check, DocId::new(doc), false)
}

/// Like [`work_entry`] but with `override_running` set.
pub fn overriding_work_entry(doc: &str, n_start: i32, n_cache: i32, n_check: i32) -> Entry {
    Entry::work(n_start, n_start + 1, n_cache, n_check, DocId::new(doc), true)
}
