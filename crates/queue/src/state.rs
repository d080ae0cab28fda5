// SPDX-License-Identifier: MIT

//! Queue state (§3/§4.2): the ordered buffer plus the bookkeeping needed to
//! deduplicate, identify the in-flight entry, and signal the worker.
//!
//! Exposes thread-safe primitives only — callers never see the raw lock
//! guard, matching "`pushBack`, `popBack`, `removeWhere`, `clear`,
//! `isEmpty`, `snapshotIter`" in §4.2. The buffer and bookkeeping fields
//! share one `parking_lot::Mutex`; `interrupt`/`running`/`waiting` are
//! separate atomics (§5).

use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::{Condvar, Mutex, MutexGuard};

use checkqueue_core::{DocId, Entry, Language};

/// Identity of the entry most recently popped by the worker, used both to
/// suppress immediate re-submission of an identical request and to drive
/// round-robin fallback.
#[derive(Debug, Clone, Default)]
pub(crate) struct LastDispatch {
    pub n_start: i32,
    pub n_cache: i32,
    pub doc_id: Option<DocId>,
}

struct Buffer {
    entries: Vec<Entry>,
    last: LastDispatch,
    last_language: Option<Language>,
}

/// The queue's shared, lock-protected state plus its wakeup condition and
/// lifecycle atomics.
pub(crate) struct QueueState {
    buffer: Mutex<Buffer>,
    wakeup: Condvar,
    interrupt: AtomicBool,
    running: AtomicBool,
    waiting: AtomicBool,
}

impl Default for QueueState {
    fn default() -> Self {
        Self {
            buffer: Mutex::new(Buffer {
                entries: Vec::new(),
                last: LastDispatch {
                    n_start: -1,
                    n_cache: 0,
                    doc_id: None,
                },
                last_language: None,
            }),
            wakeup: Condvar::new(),
            interrupt: AtomicBool::new(false),
            running: AtomicBool::new(true),
            waiting: AtomicBool::new(false),
        }
    }
}

impl QueueState {
    pub fn new() -> Self {
        Self::default()
    }

    // ---- buffer primitives (§4.2) -----------------------------------

    /// Append to the tail; the next `pop_back` returns the most-recently
    /// pushed entry (LIFO).
    pub fn push_back(&self, entry: Entry) {
        self.buffer.lock().entries.push(entry);
    }

    /// Pop the most-recently pushed entry, if any.
    pub fn pop_back(&self) -> Option<Entry> {
        self.buffer.lock().entries.pop()
    }

    /// Remove every entry matching `predicate`.
    pub fn remove_where(&self, mut predicate: impl FnMut(&Entry) -> bool) {
        self.buffer.lock().entries.retain(|e| !predicate(e));
    }

    /// Discard all pending entries.
    pub fn clear(&self) {
        self.buffer.lock().entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.lock().entries.is_empty()
    }

    /// Scan the buffer under lock without mutating it.
    pub fn scan(&self, mut visitor: impl FnMut(&Entry) -> bool) -> bool {
        let guard = self.buffer.lock();
        guard.entries.iter().any(|e| visitor(e))
    }

    /// Find the position of the first entry equal (§4.1 identity) to
    /// `candidate` and remove it, returning whether one was removed.
    pub fn remove_first_equal(&self, candidate: &Entry) -> bool {
        let mut guard = self.buffer.lock();
        if let Some(pos) = guard.entries.iter().position(|e| e == candidate) {
            guard.entries.remove(pos);
            true
        } else {
            false
        }
    }

    pub fn any_equal(&self, candidate: &Entry) -> bool {
        self.buffer.lock().entries.iter().any(|e| e == candidate)
    }

    fn lock(&self) -> MutexGuard<'_, Buffer> {
        self.buffer.lock()
    }

    /// The `submit` dance (§4.3), performed under a single lock acquisition
    /// so a concurrent `submit` for the same identity can't interleave
    /// between the dedup scan and the append:
    ///
    /// 1. If `!override_running` and the candidate's identity equals the
    ///    most-recently-dispatched identity, reject (the running item
    ///    already covers it).
    /// 2. If an equal entry is already pending: remove it only if the
    ///    candidate's `override_running` improves on it (incoming `true`,
    ///    existing `false`); otherwise reject.
    /// 3. Clear `interrupt`, append, and report whether it was inserted.
    pub fn try_submit(&self, candidate: Entry) -> bool {
        let work = match candidate.as_work() {
            Some(w) => w,
            None => return false,
        };
        let incoming_override = work.override_running;

        let mut guard = self.lock();

        if !incoming_override
            && guard.last.n_start == work.n_start
            && guard.last.n_cache == work.n_cache
            && guard.last.doc_id.as_ref().map(|d| d.as_str()) == Some(work.doc_id.as_str())
        {
            return false;
        }

        if let Some(pos) = guard.entries.iter().position(|e| *e == candidate) {
            let existing_override = guard.entries[pos]
                .as_work()
                .map(|w| w.override_running)
                .unwrap_or(false);
            if incoming_override && !existing_override {
                guard.entries.remove(pos);
            } else {
                return false;
            }
        }

        self.interrupt.store(false, Ordering::SeqCst);
        guard.entries.push(candidate);
        true
    }

    // ---- bookkeeping (guarded by the same mutex as the buffer) ------

    pub fn last(&self) -> LastDispatch {
        self.lock().last.clone()
    }

    pub fn set_last(&self, last: LastDispatch) {
        self.lock().last = last;
    }

    pub fn clear_last_doc(&self) {
        self.lock().last.doc_id = None;
    }

    pub fn last_language(&self) -> Option<Language> {
        self.lock().last_language.clone()
    }

    pub fn set_last_language(&self, language: Option<Language>) {
        self.lock().last_language = language;
    }

    // ---- lifecycle atomics (§5) --------------------------------------

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub fn set_running(&self, value: bool) {
        self.running.store(value, Ordering::SeqCst);
    }

    pub fn is_waiting(&self) -> bool {
        self.waiting.load(Ordering::SeqCst)
    }

    pub fn set_waiting(&self, value: bool) {
        self.waiting.store(value, Ordering::SeqCst);
    }

    pub fn is_interrupted(&self) -> bool {
        self.interrupt.load(Ordering::SeqCst)
    }

    pub fn set_interrupt(&self, value: bool) {
        self.interrupt.store(value, Ordering::SeqCst);
    }

    /// The raw flag, handed to `Document::run_check` so a long-running check
    /// can poll it directly instead of going through the Controller.
    pub fn interrupt_flag(&self) -> &AtomicBool {
        &self.interrupt
    }

    // ---- wakeup condition ---------------------------------------------

    /// Wake the worker if it is blocked waiting for work.
    pub fn signal(&self) {
        self.wakeup.notify_one();
    }

    /// Block until the buffer becomes non-empty. Must be called with
    /// `waiting` already set; re-checks the predicate after each wakeup
    /// since `notify_one` carries no payload and spurious wakeups are
    /// possible.
    pub fn wait_for_wakeup(&self) {
        let mut guard = self.lock();
        while guard.entries.is_empty() {
            self.wakeup.wait(&mut guard);
        }
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
