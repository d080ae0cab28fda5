// SPDX-License-Identifier: MIT

//! Clock abstraction so the bounded interrupt wait (§5) can be driven
//! instantly in tests instead of sleeping in wall-clock time.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A source of "now" and a way to sleep, abstracted so tests can fast-forward.
pub trait Clock: Clone + Send + Sync + 'static {
    fn now(&self) -> Instant;
    fn sleep(&self, dur: Duration);
}

/// Real wall-clock time, used in production.
#[derive(Debug, Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, dur: Duration) {
        std::thread::sleep(dur);
    }
}

/// A clock for tests: `now()` is real (so elapsed-time assertions still
/// work), but `sleep` never actually delays — it yields the thread once and
/// counts the call — so a bounded spin-wait loop can be exercised without
/// blocking the test thread, while still giving other threads a chance to
/// run instead of monopolizing a CPU core.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    sleeps: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sleep_count(&self) -> u64 {
        self.sleeps.load(Ordering::SeqCst)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, _dur: Duration) {
        self.sleeps.fetch_add(1, Ordering::SeqCst);
        std::thread::yield_now();
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
