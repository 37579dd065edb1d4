//! Severity levels for parse warnings.

use std::fmt;

use serde::Serialize;

/// The severity level of a warning.
///
/// - [`Severity::Error`] means part of the hierarchy is missing from the result
/// - [`Severity::Warning`] means the result is complete but something was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Part of the input could not be included.
    ///
    /// Rendering the merged graph would silently hide content.
    Error,

    /// An advisory issue; the merged graph is still consistent.
    Warning,
}

impl Severity {
    /// Returns `true` if this is an error severity.
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }

    /// Returns `true` if this is a warning severity.
    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}
