//! The fatal error type for loading a single document.

use std::{fmt, io};

use thiserror::Error;

/// Position in the YAML source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    /// Byte offset from the start of the document.
    pub offset: usize,
    /// 1-based line.
    pub line: usize,
    /// 1-based column.
    pub column: usize,
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl From<serde_yaml::Location> for SourceLocation {
    fn from(location: serde_yaml::Location) -> Self {
        Self {
            offset: location.index(),
            line: location.line(),
            column: location.column(),
        }
    }
}

/// Error type for loading a topology document.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The text is not valid YAML or does not match the document schema.
    #[error("invalid document: {message}")]
    Syntax {
        message: String,
        location: Option<SourceLocation>,
    },

    /// The document is well formed but violates a model rule.
    #[error("{message}")]
    Validation { message: String },

    /// The document could not be read.
    #[error("failed to read `{path}`")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl ParseError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Where in the source the error was detected, when known.
    pub fn location(&self) -> Option<SourceLocation> {
        match self {
            Self::Syntax { location, .. } => *location,
            Self::Validation { .. } | Self::Io { .. } => None,
        }
    }
}

impl From<serde_yaml::Error> for ParseError {
    fn from(err: serde_yaml::Error) -> Self {
        let location = err.location().map(SourceLocation::from);
        Self::Syntax {
            message: err.to_string(),
            location,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_error_carries_location() {
        let err = serde_yaml::from_str::<serde_yaml::Value>("a: [1, 2").unwrap_err();
        let err = ParseError::from(err);
        assert!(matches!(err, ParseError::Syntax { .. }));
        assert!(err.location().is_some());
    }

    #[test]
    fn test_validation_display() {
        let err = ParseError::validation("duplicate node id `r1`");
        assert_eq!(err.to_string(), "duplicate node id `r1`");
        assert!(err.location().is_none());
    }
}
