use std::fmt;

use serde::Serialize;

use super::Severity;

/// Kind of problem found while resolving a multi-file hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WarningCode {
    /// A file transitively includes itself. The offending include is skipped.
    CircularReference,

    /// A child file is missing, unreadable or malformed. Its subgraph stays empty.
    FileLoadError,

    /// A link references a pin that no file resolves to a device. The link is dropped.
    UnresolvedPin,
}

impl WarningCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CircularReference => "CIRCULAR_REFERENCE",
            Self::FileLoadError => "FILE_LOAD_ERROR",
            Self::UnresolvedPin => "UNRESOLVED_PIN",
        }
    }

    /// Severity every warning with this code carries.
    pub fn severity(&self) -> Severity {
        match self {
            Self::CircularReference | Self::FileLoadError => Severity::Error,
            Self::UnresolvedPin => Severity::Warning,
        }
    }
}

impl fmt::Display for WarningCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A non-fatal problem collected during hierarchical parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseWarning {
    pub code: WarningCode,
    pub severity: Severity,
    pub message: String,
    /// Resolved path of the file involved, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Subgraph whose content is affected, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subgraph: Option<String>,
}

impl ParseWarning {
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            severity: code.severity(),
            message: message.into(),
            file: None,
            subgraph: None,
        }
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn with_subgraph(mut self, subgraph: impl Into<String>) -> Self {
        self.subgraph = Some(subgraph.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity.is_error()
    }
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.code, self.message)
    }
}
