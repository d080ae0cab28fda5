// SPDX-License-Identifier: MIT

use std::sync::Arc;

use checkqueue_core::{test_support::work_entry, ManualClock, QueueConfig};

use super::*;
use crate::fakes::{FakeDocument, FakeDocumentDirectory, FakeEngineFactory, FakeLanguageRegistry, FakeReporter};
use crate::state::LastDispatch;

fn shared_fixture() -> Shared<FakeDocumentDirectory, FakeLanguageRegistry, FakeEngineFactory, FakeReporter, ManualClock> {
    Shared::new(
        QueueConfig::default(),
        FakeDocumentDirectory::new(),
        FakeLanguageRegistry::new(),
        FakeEngineFactory::new(),
        FakeReporter::new(),
        ManualClock::new(),
    )
}

#[test]
fn next_follow_up_prefers_current_document() {
    let shared = shared_fixture();
    let doc_a = Arc::new(FakeDocument::new("A", "en-US"));
    doc_a.push_follow_up(work_entry("A", 3, 0, 0));
    shared.documents.add(doc_a);
    shared.documents.add(Arc::new(FakeDocument::new("B", "en-US")));

    let last = LastDispatch {
        n_start: 0,
        n_cache: 0,
        doc_id: Some(checkqueue_core::DocId::new("A")),
    };
    let entry = next_follow_up(&shared, &last).expect("expected a follow-up entry");
    assert_eq!(entry.as_work().unwrap().n_start, 3);
}

#[test]
fn next_follow_up_wraps_forward_then_backward_skipping_disposed() {
    let shared = shared_fixture();
    let doc_a = Arc::new(FakeDocument::new("A", "en-US"));
    let doc_b = Arc::new(FakeDocument::new("B", "en-US"));
    let doc_c = Arc::new(FakeDocument::new("C", "en-US"));
    doc_b.set_disposed(true);
    doc_c.push_follow_up(work_entry("C", 9, 0, 0));
    shared.documents.add(doc_a);
    shared.documents.add(doc_b);
    shared.documents.add(doc_c);

    let last = LastDispatch {
        n_start: 0,
        n_cache: 0,
        doc_id: Some(checkqueue_core::DocId::new("A")),
    };
    let entry = next_follow_up(&shared, &last).expect("expected C's follow-up");
    assert_eq!(entry.as_work().unwrap().doc_id.as_str(), "C");
}

#[test]
fn next_follow_up_returns_none_when_no_document_offers_work() {
    let shared = shared_fixture();
    shared.documents.add(Arc::new(FakeDocument::new("A", "en-US")));

    let last = LastDispatch {
        n_start: 0,
        n_cache: 0,
        doc_id: Some(checkqueue_core::DocId::new("A")),
    };
    assert!(next_follow_up(&shared, &last).is_none());
}

#[test]
fn dispatch_initializes_engine_once_per_language() {
    let shared = shared_fixture();
    let doc_a = Arc::new(FakeDocument::new("A", "en-US"));
    shared.documents.add(doc_a);
    shared.languages.register("en-US", "english");

    let mut engine = None;
    let work_one = work_entry("A", 0, 0, 0);
    let work_two = work_entry("A", 5, 0, 0);

    dispatch(&shared, &mut engine, work_one.as_work().unwrap()).unwrap();
    dispatch(&shared, &mut engine, work_two.as_work().unwrap()).unwrap();

    assert_eq!(shared.engine_factory.init_count(), 1);
    assert!(engine.is_some());
}

#[test]
fn dispatch_reinitializes_on_language_change() {
    let shared = shared_fixture();
    let doc_a = Arc::new(FakeDocument::new("A", "en-US"));
    let doc_b = Arc::new(FakeDocument::new("B", "fr-FR"));
    shared.documents.add(doc_a);
    shared.documents.add(doc_b);
    shared.languages.register("en-US", "english");
    shared.languages.register("fr-FR", "french");

    let mut engine = None;
    let a = work_entry("A", 0, 0, 0);
    let b = work_entry("B", 0, 0, 0);

    dispatch(&shared, &mut engine, a.as_work().unwrap()).unwrap();
    dispatch(&shared, &mut engine, b.as_work().unwrap()).unwrap();

    assert_eq!(shared.engine_factory.init_count(), 2);
}

#[test]
fn dispatch_reports_unknown_locale() {
    let shared = shared_fixture();
    shared.documents.add(Arc::new(FakeDocument::new("A", "xx-XX")));
    // No registration for "xx-XX".

    let mut engine = None;
    let work = work_entry("A", 0, 0, 0);
    let err = dispatch(&shared, &mut engine, work.as_work().unwrap()).unwrap_err();
    assert!(matches!(err, QueueError::UnknownLocale(_)));
}
