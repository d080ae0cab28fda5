// SPDX-License-Identifier: MIT

use super::*;

#[test]
fn check_failure_displays_doc_and_source() {
    let err = QueueError::CheckFailure {
        doc_id: DocId::new("A"),
        source: CheckError::msg("engine timed out"),
    };
    let rendered = err.to_string();
    assert!(rendered.contains('A'));
    assert!(rendered.contains("engine timed out"));
}

#[test]
fn unknown_locale_displays_doc_id() {
    let err = QueueError::UnknownLocale(DocId::new("B"));
    assert!(err.to_string().contains('B'));
}
