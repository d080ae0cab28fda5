// SPDX-License-Identifier: MIT

//! Tunable constants from §6, plus a small config type so they can be
//! overridden (e.g. in tests) without reaching for a config file — the
//! crate has no files, no network, no CLI (§1/§6).

use std::time::Duration;

/// Default bound on `waitForInterrupt`'s spin-wait: 2000 one-millisecond
/// ticks.
pub const DEFAULT_INTERRUPT_WAIT_TICKS: u32 = 2000;
/// Default duration of a single spin-wait tick.
pub const DEFAULT_INTERRUPT_TICK: Duration = Duration::from_millis(1);

/// Construction-time tunables for a queue instance.
#[derive(Debug, Clone, Copy)]
pub struct QueueConfig {
    /// Number of ticks `waitForInterrupt` will spin for before giving up.
    pub interrupt_wait_ticks: u32,
    /// Duration of one spin-wait tick.
    pub interrupt_tick: Duration,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            interrupt_wait_ticks: DEFAULT_INTERRUPT_WAIT_TICKS,
            interrupt_tick: DEFAULT_INTERRUPT_TICK,
        }
    }
}
