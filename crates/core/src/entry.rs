// SPDX-License-Identifier: MIT

//! Entry: a unit of check work, or a control sentinel.

use crate::id::DocId;

/// Control signal carried by a non-work [`Entry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Control {
    /// Stop the worker and tear down the queue.
    Stop,
    /// Drop pending work and re-initialize the engine on next dispatch.
    Reset,
    /// Remove every pending entry belonging to a closed document.
    Dispose(DocId),
}

/// The fields that identify a work request.
///
/// Equality of two [`Entry::Work`] values is defined over `(n_start, n_cache,
/// n_check, doc_id)` only — `n_end` and `override_running` are request
/// modifiers, not identity, per the data model's deduplication rule.
#[derive(Debug, Clone)]
pub struct WorkEntry {
    pub n_start: i32,
    pub n_end: i32,
    pub n_cache: i32,
    pub n_check: i32,
    pub doc_id: DocId,
    pub override_running: bool,
}

impl WorkEntry {
    /// `(n_start ≥ 0 ∧ n_end > n_start ∧ n_cache ≥ 0 ∧ doc_id ≠ ∅)`.
    pub fn is_valid(&self) -> bool {
        self.n_start >= 0
            && self.n_end > self.n_start
            && self.n_cache >= 0
            && !self.doc_id.is_empty()
    }

    fn identity(&self) -> (i32, i32, i32, &str) {
        (self.n_start, self.n_cache, self.n_check, self.doc_id.as_str())
    }

    /// Identity equality used for deduplication: ignores `n_end` and
    /// `override_running`.
    pub fn same_identity(&self, other: &WorkEntry) -> bool {
        self.identity() == other.identity()
    }
}

/// A request to check a paragraph range, or a control sentinel.
///
/// Modeled as a tagged sum rather than the source's single struct with an
/// internal `kind` flag, so the worker's match over entries is exhaustive.
#[derive(Debug, Clone)]
pub enum Entry {
    Work(WorkEntry),
    Control(Control),
}

impl Entry {
    pub fn work(
        n_start: i32,
        n_end: i32,
        n_cache: i32,
        n_check: i32,
        doc_id: impl Into<DocId>,
        override_running: bool,
    ) -> Self {
        Entry::Work(WorkEntry {
            n_start,
            n_end,
            n_cache,
            n_check,
            doc_id: doc_id.into(),
            override_running,
        })
    }

    pub fn make_stop() -> Self {
        Entry::Control(Control::Stop)
    }

    pub fn make_reset() -> Self {
        Entry::Control(Control::Reset)
    }

    pub fn make_dispose(doc_id: impl Into<DocId>) -> Self {
        Entry::Control(Control::Dispose(doc_id.into()))
    }

    pub fn is_stop(&self) -> bool {
        matches!(self, Entry::Control(Control::Stop))
    }

    pub fn as_work(&self) -> Option<&WorkEntry> {
        match self {
            Entry::Work(w) => Some(w),
            _ => None,
        }
    }
}

/// Equality of Entry values considers only WORK identity fields. Control
/// entries (STOP/RESET/DISPOSE) are never equal to anything, including an
/// identical control entry, mirroring "control entries are never equal to
/// anything (compared by identity)" in §4.1.
impl PartialEq for Entry {
    fn eq(&self, other: &Entry) -> bool {
        match (self, other) {
            (Entry::Work(a), Entry::Work(b)) => a.same_identity(b),
            _ => false,
        }
    }
}

#[cfg(test)]
#[path = "entry_tests.rs"]
mod tests;
