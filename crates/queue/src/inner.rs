// SPDX-License-Identifier: MIT

//! Shared state threaded between the [`crate::Controller`] handle and the
//! dedicated worker thread, grounded on the teacher's `Runtime<S, A, N, C>`
//! composition of adapters + shared locked state.

use std::sync::atomic::AtomicBool;

use checkqueue_core::{Clock, QueueConfig};

use crate::collaborators::{DocumentDirectory, EngineFactory, LanguageRegistry, Reporter};
use crate::state::QueueState;

pub(crate) struct Shared<D, L, F, R, C> {
    pub state: QueueState,
    pub config: QueueConfig,
    /// Set by `reset()` and consumed by the worker at the top of its loop;
    /// the worker is the engine's sole owner (§5/§9), so reset cannot drop
    /// it directly from the Controller side.
    pub needs_reset: AtomicBool,
    pub documents: D,
    pub languages: L,
    pub engine_factory: F,
    pub reporter: R,
    pub clock: C,
}

impl<D, L, F, R, C> Shared<D, L, F, R, C>
where
    D: DocumentDirectory,
    L: LanguageRegistry,
    F: EngineFactory,
    R: Reporter,
    C: Clock,
{
    pub fn new(
        config: QueueConfig,
        documents: D,
        languages: L,
        engine_factory: F,
        reporter: R,
        clock: C,
    ) -> Self {
        Self {
            state: QueueState::new(),
            config,
            needs_reset: AtomicBool::new(false),
            documents,
            languages,
            engine_factory,
            reporter,
            clock,
        }
    }

    /// §5's bounded spin-wait: set `interrupt`, signal the worker, then
    /// spin-sleep at `config.interrupt_tick` until `interrupt` is cleared by
    /// the worker or the tick bound elapses. Returns `true` if the worker
    /// acknowledged within the bound.
    pub fn wait_for_interrupt(&self) -> bool {
        self.state.set_interrupt(true);
        self.state.signal();
        for _ in 0..self.config.interrupt_wait_ticks {
            if !self.state.is_interrupted() {
                return true;
            }
            self.clock.sleep(self.config.interrupt_tick);
        }
        let acked = !self.state.is_interrupted();
        if !acked {
            self.reporter
                .log("waitForInterrupt: bound exceeded, proceeding anyway");
        }
        acked
    }
}

#[cfg(test)]
#[path = "inner_tests.rs"]
mod tests;
