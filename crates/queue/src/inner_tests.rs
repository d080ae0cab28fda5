// SPDX-License-Identifier: MIT

use std::sync::Arc;
use std::thread;

use checkqueue_core::{ManualClock, QueueConfig};

use super::*;
use crate::fakes::{FakeDocumentDirectory, FakeEngineFactory, FakeLanguageRegistry, FakeReporter};

fn fixture(
    ticks: u32,
) -> Shared<FakeDocumentDirectory, FakeLanguageRegistry, FakeEngineFactory, FakeReporter, ManualClock> {
    let config = QueueConfig {
        interrupt_wait_ticks: ticks,
        ..QueueConfig::default()
    };
    Shared::new(
        config,
        FakeDocumentDirectory::new(),
        FakeLanguageRegistry::new(),
        FakeEngineFactory::new(),
        FakeReporter::new(),
        ManualClock::new(),
    )
}

#[test]
fn wait_for_interrupt_returns_true_when_acknowledged_in_time() {
    let shared = Arc::new(fixture(2000));
    let acker = {
        let shared = Arc::clone(&shared);
        thread::spawn(move || {
            while !shared.state.is_interrupted() {
                thread::yield_now();
            }
            shared.state.set_interrupt(false);
        })
    };

    assert!(shared.wait_for_interrupt());
    acker.join().unwrap();
}

#[test]
fn wait_for_interrupt_reports_and_returns_false_on_timeout() {
    let shared = fixture(0);
    assert!(!shared.wait_for_interrupt());
    assert!(shared
        .reporter
        .logs()
        .iter()
        .any(|line| line.contains("bound exceeded")));
}
