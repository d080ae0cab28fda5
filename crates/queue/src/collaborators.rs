// SPDX-License-Identifier: MIT

//! Collaborator contracts consumed by the core (§6). Paragraph storage and
//! change detection, the linguistic engine itself, and the word-processor
//! binding layer are out of scope (§1) — the queue only ever talks to them
//! through these traits.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use checkqueue_core::{CheckError, DocId, EngineError, Entry, Language, Locale, QueueError};

/// The opaque linguistic engine instance. The queue never inspects an
/// engine's internals — it only creates one, activates rule sets on it, and
/// hands it to the document collaborator for the duration of a check.
pub trait Engine: Send {}

/// Parameters for a single check dispatch, grounded on the teacher's
/// `CreateJobParams`-style bundling of a dispatch's scalar fields.
#[derive(Debug, Clone, Copy)]
pub struct CheckParams {
    pub n_start: i32,
    pub n_end: i32,
    pub n_cache: i32,
    pub n_check: i32,
    pub override_running: bool,
}

/// A single open document.
pub trait Document: Send + Sync {
    fn doc_id(&self) -> &DocId;

    /// Whether the host has closed this document (`dispose` was called).
    fn is_disposed(&self) -> bool;

    /// Produce the next follow-up entry for this document, if any, used by
    /// the worker's round-robin fallback (§4.4).
    fn next_queue_entry(&self, n_start: i32, n_cache: i32) -> Option<Entry>;

    /// Resolve the locale of the paragraph at `n_start`.
    fn paragraph_locale_at(&self, n_start: i32) -> Option<Locale>;

    /// Run the check. Expected to periodically consult `interrupt` and
    /// return promptly when it is set (§4.4, §5).
    fn run_check(
        &self,
        params: CheckParams,
        interrupt: &AtomicBool,
        engine: &mut dyn Engine,
    ) -> Result<(), CheckError>;
}

/// The ordered set of currently-open documents.
pub trait DocumentDirectory: Send + Sync {
    /// Ordered list of live documents, used both to resolve a dispatch's
    /// document and to drive round-robin follow-up probing.
    fn documents(&self) -> Vec<Arc<dyn Document>>;
}

/// Resolves paragraph locales to linguistic-engine languages.
pub trait LanguageRegistry: Send + Sync {
    fn has_locale(&self, locale: &Locale) -> bool;
    fn language_for(&self, locale: &Locale) -> Option<Language>;
}

/// Creates and reconfigures the linguistic engine instance.
pub trait EngineFactory: Send + Sync {
    fn initialize(&self, language: &Language, reuse: bool) -> Result<Box<dyn Engine>, EngineError>;
    fn activate_rule_set(&self, index: i32, engine: &mut dyn Engine);
    fn warmup(&self, engine: &mut dyn Engine, locale: &Locale);
}

/// Logging / error reporting, the host's observability sink (§6). The
/// crate never picks a log destination itself (§1's "logging" non-goal) —
/// it only calls into this trait.
pub trait Reporter: Send + Sync {
    fn log(&self, message: &str);
    fn report_error(&self, error: &QueueError);
}
