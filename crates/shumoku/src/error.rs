//! Error types for Shumoku operations.
//!
//! This module provides the main error type [`ShumokuError`] which wraps
//! the error conditions that can occur while parsing, laying out and
//! rendering a topology.

use std::io;

use thiserror::Error;

use shumoku_parser::{ParseError, ParseWarning};

/// The main error type for Shumoku operations.
///
/// The `Parse` variant keeps the source text next to the error so callers can
/// render the failing location. Rendering itself cannot fail: missing
/// geometry falls back to defaults.
#[derive(Debug, Error)]
pub enum ShumokuError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    /// Included files failed to resolve; the merged graph is incomplete.
    #[error("{} error(s) while resolving included files", .0.iter().filter(|w| w.is_error()).count())]
    Hierarchy(Vec<ParseWarning>),

    #[error("Unknown sheet `{0}`")]
    UnknownSheet(String),

    #[error("Layout error: {0}")]
    Layout(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ShumokuError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
