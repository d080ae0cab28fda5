// SPDX-License-Identifier: MIT

//! The public façade (§4.3): `submit`, `stop`, `reset`, `dispose`, and the
//! status predicates.

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::thread::JoinHandle;

use checkqueue_core::{Clock, DocId, Entry, QueueConfig};

use crate::collaborators::{DocumentDirectory, EngineFactory, LanguageRegistry, Reporter};
use crate::inner::Shared;
use crate::worker;

/// Public façade over the text-check queue. Spawns its dedicated worker
/// thread at construction (§9 "Thread startup") and stops it when dropped,
/// so a `Controller` going out of scope never leaks a blocked thread.
pub struct Controller<D, L, F, R, C> {
    shared: Arc<Shared<D, L, F, R, C>>,
    worker: Option<JoinHandle<()>>,
}

impl<D, L, F, R, C> Controller<D, L, F, R, C>
where
    D: DocumentDirectory + Send + Sync + 'static,
    L: LanguageRegistry + Send + Sync + 'static,
    F: EngineFactory + Send + Sync + 'static,
    R: Reporter + Send + Sync + 'static,
    C: Clock,
{
    pub fn new(config: QueueConfig, documents: D, languages: L, engine_factory: F, reporter: R, clock: C) -> Self {
        let shared = Arc::new(Shared::new(config, documents, languages, engine_factory, reporter, clock));
        let worker_shared = Arc::clone(&shared);
        let worker = std::thread::spawn(move || worker::run(worker_shared));
        Self {
            shared,
            worker: Some(worker),
        }
    }

    /// Submit a check request (§4.3). Silently rejected if invalid (§3
    /// invariant 6); silently coalesced against pending/in-flight work.
    pub fn submit(
        &self,
        n_start: i32,
        n_end: i32,
        n_cache: i32,
        n_check: i32,
        doc_id: impl Into<DocId>,
        override_running: bool,
    ) {
        let entry = Entry::work(n_start, n_end, n_cache, n_check, doc_id, override_running);
        let Some(work) = entry.as_work() else {
            return;
        };
        if !work.is_valid() {
            self.shared
                .reporter
                .log(&format!("submit: rejecting invalid entry for {}", work.doc_id));
            return;
        }

        if self.shared.state.try_submit(entry) {
            self.shared.state.signal();
        }
    }

    /// Stop the worker (§4.3). Two separate lock acquisitions by design —
    /// see SPEC_FULL.md §9/#2 for why the race window is preserved rather
    /// than collapsed into one critical section.
    pub fn stop(&self) {
        if !self.shared.state.is_running() {
            return;
        }
        self.shared.state.clear();
        self.shared.state.set_interrupt(true);

        self.shared.state.push_back(Entry::make_stop());
        self.shared.state.signal();
    }

    /// Drop pending work and request a fresh engine on the next dispatch
    /// (§4.3). Lazy: the worker re-initializes only once it observes a
    /// language on the next WORK entry (§9/#1).
    pub fn reset(&self) {
        self.shared.state.clear();
        self.shared.needs_reset.store(true, Ordering::SeqCst);

        let last = self.shared.state.last();
        if !self.shared.state.is_waiting() && last.n_start >= 0 {
            self.shared.wait_for_interrupt();
        }

        self.shared.state.signal();
    }

    /// Remove every pending entry for `doc_id` (§4.3). If the in-flight
    /// entry belongs to `doc_id`, waits (bounded) for the worker to
    /// acknowledge an interrupt before clearing `lastDocId`. Never touches
    /// the engine.
    pub fn dispose(&self, doc_id: impl Into<DocId>) {
        let doc_id = doc_id.into();
        self.shared
            .state
            .remove_where(|e| matches!(e.as_work(), Some(w) if w.doc_id == doc_id));

        let last = self.shared.state.last();
        let in_flight_matches = !self.shared.state.is_waiting()
            && last.doc_id.as_ref().map(|d| d.as_str()) == Some(doc_id.as_str());

        if in_flight_matches {
            self.shared.wait_for_interrupt();
            self.shared.state.clear_last_doc();
        }
    }

    pub fn is_running(&self) -> bool {
        self.shared.state.is_running()
    }

    pub fn is_waiting(&self) -> bool {
        self.shared.state.is_waiting()
    }

    pub fn is_interrupted(&self) -> bool {
        self.shared.state.is_interrupted()
    }
}

impl<D, L, F, R, C> Drop for Controller<D, L, F, R, C> {
    fn drop(&mut self) {
        if self.shared.state.is_running() {
            self.shared.state.clear();
            self.shared.state.set_interrupt(true);
            self.shared.state.push_back(Entry::make_stop());
            self.shared.state.signal();
        }
        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
