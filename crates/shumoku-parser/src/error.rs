//! Errors and warnings produced while loading topology documents.
//!
//! Two channels are kept apart:
//!
//! - [`ParseError`] is fatal for the document being loaded (malformed YAML,
//!   duplicate ids). For the root document it is returned to the caller.
//! - [`ParseWarning`] is a value collected during hierarchical resolution.
//!   A failing child file becomes a warning and the rest of the hierarchy is
//!   still merged.
//!
//! Callers decide what to do with warnings; [`Severity::Error`] warnings
//! usually mean the merged graph is incomplete and should not be rendered.

mod parse_error;
mod severity;
mod warning;

pub use parse_error::{ParseError, SourceLocation};
pub use severity::Severity;
pub use warning::{ParseWarning, WarningCode};
