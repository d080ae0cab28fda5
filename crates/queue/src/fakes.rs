// SPDX-License-Identifier: MIT

//! Fake collaborator implementations for deterministic testing, mirroring
//! the teacher's `oj-adapters::agent::fake` call-recording pattern.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use checkqueue_core::{CheckError, DocId, Entry, EngineError, Language, Locale, QueueError};

use crate::collaborators::{
    CheckParams, Document, DocumentDirectory, Engine, EngineFactory, LanguageRegistry, Reporter,
};

/// Parameters recorded by [`FakeDocument::run_check`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunCall {
    pub n_start: i32,
    pub n_end: i32,
    pub n_cache: i32,
    pub n_check: i32,
    pub override_running: bool,
}

struct FakeDocumentState {
    locale: Option<Locale>,
    disposed: bool,
    follow_ups: VecDeque<Entry>,
    run_calls: Vec<RunCall>,
    fail_next: Option<String>,
    hold: bool,
    interrupt_observed: bool,
}

/// A fake open document: reports a fixed locale, serves follow-up entries
/// from a caller-loaded queue, and records every `run_check` dispatch.
pub struct FakeDocument {
    doc_id: DocId,
    state: Mutex<FakeDocumentState>,
}

impl FakeDocument {
    pub fn new(doc_id: impl Into<DocId>, locale: impl Into<Locale>) -> Self {
        Self {
            doc_id: doc_id.into(),
            state: Mutex::new(FakeDocumentState {
                locale: Some(locale.into()),
                disposed: false,
                follow_ups: VecDeque::new(),
                run_calls: Vec::new(),
                fail_next: None,
                hold: false,
                interrupt_observed: false,
            }),
        }
    }

    pub fn set_disposed(&self, value: bool) {
        self.state.lock().disposed = value;
    }

    /// Queue an entry to be returned by the next `next_queue_entry` call.
    pub fn push_follow_up(&self, entry: Entry) {
        self.state.lock().follow_ups.push_back(entry);
    }

    pub fn run_calls(&self) -> Vec<RunCall> {
        self.state.lock().run_calls.clone()
    }

    /// Make the next `run_check` return a `CheckError` with this message.
    pub fn fail_next_check(&self, message: impl Into<String>) {
        self.state.lock().fail_next = Some(message.into());
    }

    /// Make the next `run_check` block (spinning on `interrupt`) until
    /// [`Self::release`] is called, simulating a long-running check so
    /// tests can observe interrupt/dispose/stop interleavings.
    pub fn hold_next_check(&self) {
        self.state.lock().hold = true;
    }

    pub fn release(&self) {
        self.state.lock().hold = false;
    }

    /// Whether a held `run_check` saw `interrupt` become set before release.
    pub fn interrupt_observed(&self) -> bool {
        self.state.lock().interrupt_observed
    }
}

impl Document for FakeDocument {
    fn doc_id(&self) -> &DocId {
        &self.doc_id
    }

    fn is_disposed(&self) -> bool {
        self.state.lock().disposed
    }

    fn next_queue_entry(&self, _n_start: i32, _n_cache: i32) -> Option<Entry> {
        self.state.lock().follow_ups.pop_front()
    }

    fn paragraph_locale_at(&self, _n_start: i32) -> Option<Locale> {
        self.state.lock().locale.clone()
    }

    fn run_check(
        &self,
        params: CheckParams,
        interrupt: &AtomicBool,
        _engine: &mut dyn Engine,
    ) -> Result<(), CheckError> {
        {
            let mut state = self.state.lock();
            state.run_calls.push(RunCall {
                n_start: params.n_start,
                n_end: params.n_end,
                n_cache: params.n_cache,
                n_check: params.n_check,
                override_running: params.override_running,
            });
        }

        // Simulate a long-running check that periodically polls `interrupt`,
        // as a real collaborator is expected to (§4.4, §5).
        loop {
            let mut state = self.state.lock();
            if !state.hold {
                break;
            }
            if interrupt.load(Ordering::SeqCst) {
                state.interrupt_observed = true;
                break;
            }
            drop(state);
            std::thread::yield_now();
        }

        let mut state = self.state.lock();
        if let Some(message) = state.fail_next.take() {
            return Err(CheckError::msg(message));
        }
        Ok(())
    }
}

/// An ordered, mutable set of fake documents.
#[derive(Clone, Default)]
pub struct FakeDocumentDirectory {
    documents: Arc<Mutex<Vec<Arc<dyn Document>>>>,
}

impl FakeDocumentDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, document: Arc<dyn Document>) {
        self.documents.lock().push(document);
    }
}

impl DocumentDirectory for FakeDocumentDirectory {
    fn documents(&self) -> Vec<Arc<dyn Document>> {
        self.documents.lock().clone()
    }
}

/// A fake locale-to-language mapping table.
#[derive(Clone, Default)]
pub struct FakeLanguageRegistry {
    mappings: Arc<Mutex<HashMap<Locale, Language>>>,
}

impl FakeLanguageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, locale: impl Into<Locale>, language: impl Into<Language>) {
        self.mappings.lock().insert(locale.into(), language.into());
    }
}

impl LanguageRegistry for FakeLanguageRegistry {
    fn has_locale(&self, locale: &Locale) -> bool {
        self.mappings.lock().contains_key(locale)
    }

    fn language_for(&self, locale: &Locale) -> Option<Language> {
        self.mappings.lock().get(locale).cloned()
    }
}

/// An opaque fake engine instance, tagged with the language it was created
/// for so tests can assert re-initialization happened.
pub struct FakeEngine {
    pub language: Language,
}

impl Engine for FakeEngine {}

/// A call recorded by [`FakeEngineFactory`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCall {
    Initialize { language: Language, reuse: bool },
    ActivateRuleSet { index: i32 },
    Warmup { locale: Locale },
}

struct FakeEngineFactoryState {
    calls: Vec<EngineCall>,
    init_error: Option<String>,
}

#[derive(Clone)]
pub struct FakeEngineFactory {
    inner: Arc<Mutex<FakeEngineFactoryState>>,
}

impl Default for FakeEngineFactory {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeEngineFactoryState {
                calls: Vec::new(),
                init_error: None,
            })),
        }
    }
}

impl FakeEngineFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<EngineCall> {
        self.inner.lock().calls.clone()
    }

    pub fn init_count(&self) -> usize {
        self.inner
            .lock()
            .calls
            .iter()
            .filter(|c| matches!(c, EngineCall::Initialize { .. }))
            .count()
    }

    /// Make the next `initialize` call fail with this message.
    pub fn fail_next_init(&self, message: impl Into<String>) {
        self.inner.lock().init_error = Some(message.into());
    }
}

impl EngineFactory for FakeEngineFactory {
    fn initialize(&self, language: &Language, reuse: bool) -> Result<Box<dyn Engine>, EngineError> {
        let mut inner = self.inner.lock();
        inner.calls.push(EngineCall::Initialize {
            language: language.clone(),
            reuse,
        });
        if let Some(message) = inner.init_error.take() {
            return Err(EngineError::msg(message));
        }
        Ok(Box::new(FakeEngine {
            language: language.clone(),
        }))
    }

    fn activate_rule_set(&self, index: i32, _engine: &mut dyn Engine) {
        self.inner.lock().calls.push(EngineCall::ActivateRuleSet { index });
    }

    fn warmup(&self, _engine: &mut dyn Engine, locale: &Locale) {
        self.inner.lock().calls.push(EngineCall::Warmup {
            locale: locale.clone(),
        });
    }
}

struct FakeReporterState {
    logs: Vec<String>,
    errors: Vec<String>,
}

/// Records every log line and reported error for later assertion.
#[derive(Clone)]
pub struct FakeReporter {
    inner: Arc<Mutex<FakeReporterState>>,
}

impl Default for FakeReporter {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeReporterState {
                logs: Vec::new(),
                errors: Vec::new(),
            })),
        }
    }
}

impl FakeReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn logs(&self) -> Vec<String> {
        self.inner.lock().logs.clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.inner.lock().errors.clone()
    }
}

impl Reporter for FakeReporter {
    fn log(&self, message: &str) {
        self.inner.lock().logs.push(message.to_string());
    }

    fn report_error(&self, error: &QueueError) {
        self.inner.lock().errors.push(error.to_string());
    }
}
