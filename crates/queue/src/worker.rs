// SPDX-License-Identifier: MIT

//! The dedicated worker thread's control loop (§4.4).

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::Ordering;
use std::sync::Arc;

use checkqueue_core::{Clock, Control, Entry, EngineError, QueueError, WorkEntry};

use crate::collaborators::{
    CheckParams, DocumentDirectory, Engine, EngineFactory, LanguageRegistry, Reporter,
};
use crate::inner::Shared;
use crate::state::LastDispatch;

/// Entry point spawned by [`crate::Controller::new`]. Owns the engine
/// exclusively for the lifetime of the thread — no other code ever touches
/// it (§5, §9 "Global state").
pub(crate) fn run<D, L, F, R, C>(shared: Arc<Shared<D, L, F, R, C>>)
where
    D: DocumentDirectory,
    L: LanguageRegistry,
    F: EngineFactory,
    R: Reporter,
    C: Clock,
{
    let mut engine: Option<Box<dyn Engine>> = None;

    loop {
        shared.state.set_waiting(false);
        shared.state.set_interrupt(false);

        if shared.needs_reset.swap(false, Ordering::SeqCst) {
            tracing::debug!("worker: dropping engine for reset");
            engine = None;
            shared.state.set_last_language(None);
        }

        if shared.state.is_empty() {
            let last = shared.state.last();
            let follow_up = next_follow_up(&shared, &last);

            match follow_up {
                Some(entry) => {
                    shared.state.push_back(entry);
                    continue;
                }
                None => {
                    shared.state.set_last(LastDispatch {
                        n_start: -1,
                        n_cache: last.n_cache,
                        doc_id: last.doc_id,
                    });
                    shared.state.set_waiting(true);
                    shared.state.wait_for_wakeup();
                    continue;
                }
            }
        }

        let entry = match shared.state.pop_back() {
            Some(e) => e,
            None => continue,
        };

        match entry {
            Entry::Control(Control::Stop) => {
                shared.state.set_running(false);
                tracing::info!("worker: stop received, terminating");
                return;
            }
            // reset()/dispose() mutate the buffer and bookkeeping directly
            // rather than enqueuing a sentinel (see Controller), so these
            // never appear here in normal operation.
            Entry::Control(Control::Reset) | Entry::Control(Control::Dispose(_)) => {}
            Entry::Work(work) => {
                let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                    dispatch(&shared, &mut engine, &work)
                }));
                match outcome {
                    Ok(Ok(())) => {}
                    Ok(Err(fault)) => shared.reporter.report_error(&fault),
                    Err(payload) => {
                        let message = panic_message(&payload);
                        shared.state.set_running(false);
                        shared.reporter.report_error(&QueueError::Fatal(message));
                        return;
                    }
                }
            }
        }
    }
}

fn dispatch<D, L, F, R, C>(
    shared: &Shared<D, L, F, R, C>,
    engine: &mut Option<Box<dyn Engine>>,
    work: &WorkEntry,
) -> Result<(), QueueError>
where
    D: DocumentDirectory,
    L: LanguageRegistry,
    F: EngineFactory,
    R: Reporter,
    C: Clock,
{
    let documents = shared.documents.documents();
    let Some(document) = documents.iter().find(|d| d.doc_id() == &work.doc_id) else {
        tracing::debug!(doc_id = %work.doc_id, "worker: document gone, dropping entry");
        return Ok(());
    };

    let locale = document
        .paragraph_locale_at(work.n_start)
        .ok_or_else(|| QueueError::UnknownLocale(work.doc_id.clone()))?;
    let language = shared
        .languages
        .language_for(&locale)
        .ok_or_else(|| QueueError::UnknownLocale(work.doc_id.clone()))?;

    let last_language = shared.state.last_language();
    if last_language.as_ref() != Some(&language) {
        tracing::debug!(doc_id = %work.doc_id, %language, "worker: (re)initializing engine");
        let mut fresh = shared
            .engine_factory
            .initialize(&language, false)
            .map_err(QueueError::EngineInit)?;
        shared.engine_factory.activate_rule_set(1, fresh.as_mut());
        shared.engine_factory.warmup(fresh.as_mut(), &locale);
        *engine = Some(fresh);
        shared.state.set_last_language(Some(language));
    } else if shared.state.last().n_cache != work.n_cache {
        if let Some(active) = engine.as_mut() {
            shared
                .engine_factory
                .activate_rule_set(work.n_cache, active.as_mut());
        }
    }

    // Update before dispatch so a concurrent `submit` can suppress an exact
    // re-request of the item we're about to run (§4.4).
    shared.state.set_last(LastDispatch {
        n_start: work.n_start,
        n_cache: work.n_cache,
        doc_id: Some(work.doc_id.clone()),
    });

    let active = engine
        .as_mut()
        .ok_or_else(|| QueueError::EngineInit(EngineError::msg("engine not initialized")))?;

    let params = CheckParams {
        n_start: work.n_start,
        n_end: work.n_end,
        n_cache: work.n_cache,
        n_check: work.n_check,
        override_running: work.override_running,
    };

    document
        .run_check(params, shared.state.interrupt_flag(), active.as_mut())
        .map_err(|source| QueueError::CheckFailure {
            doc_id: work.doc_id.clone(),
            source,
        })
}

/// Round-robin probe over the live, non-disposed documents (§4.4): first the
/// current document, then forward, then wrapping back to the start.
fn next_follow_up<D, L, F, R, C>(
    shared: &Shared<D, L, F, R, C>,
    last: &LastDispatch,
) -> Option<Entry>
where
    D: DocumentDirectory,
    L: LanguageRegistry,
    F: EngineFactory,
    R: Reporter,
    C: Clock,
{
    let doc_id = last.doc_id.as_ref()?;
    let documents = shared.documents.documents();
    let current_index = documents.iter().position(|d| d.doc_id() == doc_id)?;

    if !documents[current_index].is_disposed() {
        if let Some(entry) = documents[current_index].next_queue_entry(last.n_start, last.n_cache) {
            return Some(entry);
        }
    }

    documents
        .iter()
        .skip(current_index + 1)
        .chain(documents.iter().take(current_index))
        .filter(|d| !d.is_disposed())
        .find_map(|d| d.next_queue_entry(-1, last.n_cache))
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "worker panicked with a non-string payload".to_string()
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod tests;
