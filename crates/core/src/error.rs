// SPDX-License-Identifier: MIT

//! Error taxonomy for the text-check queue.
//!
//! None of these cross the public Controller API: `submit`/`stop`/`reset`/
//! `dispose` always return normally (§7). They exist so the worker loop and
//! its collaborators can distinguish fault classes and so tests can assert
//! on them.

use crate::id::DocId;
use thiserror::Error;

/// A fault raised by the linguistic engine or the document collaborator
/// while running a check. Logged via `Reporter::report_error`; the worker
/// continues.
#[derive(Debug, Error)]
#[error("check failed: {0}")]
pub struct CheckError(#[source] pub Box<dyn std::error::Error + Send + Sync>);

impl CheckError {
    pub fn new(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self(Box::new(err))
    }

    pub fn msg(message: impl Into<String>) -> Self {
        #[derive(Debug, Error)]
        #[error("{0}")]
        struct Message(String);
        Self(Box::new(Message(message.into())))
    }
}

/// A fault raised while (re-)initializing the linguistic engine.
#[derive(Debug, Error)]
#[error("engine initialization failed: {0}")]
pub struct EngineError(#[source] pub Box<dyn std::error::Error + Send + Sync>);

impl EngineError {
    pub fn new(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self(Box::new(err))
    }

    pub fn msg(message: impl Into<String>) -> Self {
        #[derive(Debug, Error)]
        #[error("{0}")]
        struct Message(String);
        Self(Box::new(Message(message.into())))
    }
}

/// Internal fault classes the worker loop reports but never propagates to
/// producers.
#[derive(Debug, Error)]
pub enum QueueError {
    /// The document's locale is not registered with the language registry;
    /// the entry is dropped without dispatch.
    #[error("unknown locale for document {0}")]
    UnknownLocale(DocId),

    /// The engine or the document collaborator failed while running a check.
    #[error("check failed for document {doc_id}: {source}")]
    CheckFailure {
        doc_id: DocId,
        #[source]
        source: CheckError,
    },

    /// Engine (re-)initialization failed.
    #[error("engine init failed: {0}")]
    EngineInit(#[source] EngineError),

    /// A panic unwound out of a dispatched check or engine call. Fatal: the
    /// worker terminates and `running` becomes `false`.
    #[error("fatal worker fault: {0}")]
    Fatal(String),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
