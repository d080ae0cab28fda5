// SPDX-License-Identifier: MIT

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! checkqueue-queue: the single-consumer text-level check queue.
//!
//! [`Controller`] is the public façade; it owns a [`QueueState`](state::QueueState)
//! and a dedicated worker thread, and is generic over the collaborator
//! traits in [`collaborators`] so callers can plug in their own document
//! store, language registry, engine factory, and reporter.

pub mod collaborators;
mod controller;
mod inner;
mod state;
mod worker;

#[cfg(any(test, feature = "test-support"))]
pub mod fakes;

pub use collaborators::{
    CheckParams, Document, DocumentDirectory, Engine, EngineFactory, LanguageRegistry, Reporter,
};
pub use controller::Controller;

pub use checkqueue_core::{
    flags, Clock, DocId, Entry, Language, Locale, ManualClock, QueueConfig, QueueError,
    SystemClock,
};
