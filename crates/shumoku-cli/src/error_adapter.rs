//! Error adapter for converting ShumokuError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.
//!
//! # Multi-Error Support
//!
//! A [`ShumokuError::Hierarchy`] error carries every warning collected while
//! resolving included files; each error-severity warning is rendered
//! independently.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use shumoku::ShumokuError;
use shumoku_parser::{ParseError, ParseWarning};

/// Adapter for a document that failed to parse.
///
/// Syntax errors with a known location get a label pointing into the
/// source text.
pub struct ParseErrorAdapter<'a> {
    err: &'a ParseError,
    src: &'a str,
}

impl<'a> ParseErrorAdapter<'a> {
    pub fn new(err: &'a ParseError, src: &'a str) -> Self {
        Self { err, src }
    }
}

impl fmt::Debug for ParseErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseErrorAdapter")
            .field("err", &self.err)
            .finish()
    }
}

impl fmt::Display for ParseErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.err, f)
    }
}

impl std::error::Error for ParseErrorAdapter<'_> {}

impl MietteDiagnostic for ParseErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.err {
            ParseError::Syntax { .. } => "shumoku::syntax",
            ParseError::Validation { .. } => "shumoku::validation",
            ParseError::Io { .. } => "shumoku::io",
        };
        Some(Box::new(code))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        if self.src.is_empty() {
            return None;
        }
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let location = self.err.location()?;
        if self.src.is_empty() {
            return None;
        }
        let offset = location.offset.min(self.src.len().saturating_sub(1));
        let span = SourceSpan::new(offset.into(), 1);
        Some(Box::new(std::iter::once(LabeledSpan::new_primary_with_span(
            Some(format!("here ({location})")),
            span,
        ))))
    }
}

/// Adapter for a warning collected while resolving included files.
pub struct WarningAdapter<'a>(pub &'a ParseWarning);

impl fmt::Debug for WarningAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for WarningAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.message)
    }
}

impl std::error::Error for WarningAdapter<'_> {}

impl MietteDiagnostic for WarningAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.0.code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("pass --force to render the incomplete topology"))
    }
}

/// Adapter for [`ShumokuError`] variants without source information.
pub struct ErrorAdapter<'a>(pub &'a ShumokuError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            ShumokuError::Io(_) => "shumoku::io",
            ShumokuError::Parse { .. } => "shumoku::parse",
            ShumokuError::Hierarchy(_) => "shumoku::hierarchy",
            ShumokuError::UnknownSheet(_) => "shumoku::sheet",
            ShumokuError::Layout(_) => "shumoku::layout",
            ShumokuError::Config(_) => "shumoku::config",
        };
        Some(Box::new(code))
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A document error with source location information.
    Parse(ParseErrorAdapter<'a>),
    /// One failed include.
    Warning(WarningAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Parse(p) => fmt::Display::fmt(p, f),
            Reportable::Warning(w) => fmt::Display::fmt(w, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Parse(_) | Reportable::Warning(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Parse(p) => p.code(),
            Reportable::Warning(w) => w.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Parse(p) => p.help(),
            Reportable::Warning(w) => w.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Parse(p) => p.source_code(),
            Reportable::Warning(_) | Reportable::Error(_) => None,
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Parse(p) => p.labels(),
            Reportable::Warning(_) | Reportable::Error(_) => None,
        }
    }
}

/// Convert a [`ShumokuError`] into a list of reportable errors.
///
/// [`ShumokuError::Hierarchy`] yields one [`Reportable`] per error-severity
/// warning; every other variant yields exactly one.
pub fn to_reportables(err: &ShumokuError) -> Vec<Reportable<'_>> {
    match err {
        ShumokuError::Parse { err: parse_err, src } => {
            vec![Reportable::Parse(ParseErrorAdapter::new(parse_err, src))]
        }
        ShumokuError::Hierarchy(warnings) => {
            let reportables: Vec<_> = warnings
                .iter()
                .filter(|warning| warning.is_error())
                .map(|warning| Reportable::Warning(WarningAdapter(warning)))
                .collect();
            if reportables.is_empty() {
                vec![Reportable::Error(ErrorAdapter(err))]
            } else {
                reportables
            }
        }
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}

#[cfg(test)]
mod tests {
    use shumoku_parser::{WarningCode, parse_document};

    use super::*;

    #[test]
    fn test_syntax_error_points_into_source() {
        let src = "nodes:\n  - id: [unterminated\n";
        let parse_err = parse_document(src).unwrap_err();
        let err = ShumokuError::new_parse_error(parse_err, src);

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 1);
        match &reportables[0] {
            Reportable::Parse(p) => {
                assert!(p.source_code().is_some());
                let labels: Vec<_> = p.labels().expect("syntax errors have a location").collect();
                assert_eq!(labels.len(), 1);
                assert!(labels[0].primary());
            }
            other => panic!("Expected Parse, got {other:?}"),
        }
    }

    #[test]
    fn test_each_failed_include_is_reported() {
        let err = ShumokuError::Hierarchy(vec![
            ParseWarning::new(WarningCode::FileLoadError, "missing a.yaml"),
            ParseWarning::new(WarningCode::UnresolvedPin, "dc1#uplink"),
            ParseWarning::new(WarningCode::CircularReference, "b.yaml includes itself"),
        ]);

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 2);
        assert_eq!(reportables[0].to_string(), "missing a.yaml");
        assert_eq!(reportables[1].to_string(), "b.yaml includes itself");
        assert_eq!(
            reportables[1].code().map(|code| code.to_string()).as_deref(),
            Some("CIRCULAR_REFERENCE")
        );
    }

    #[test]
    fn test_non_parse_error() {
        let err = ShumokuError::UnknownSheet("dc9".to_string());

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 1);
        match &reportables[0] {
            Reportable::Error(e) => assert_eq!(e.to_string(), "Unknown sheet `dc9`"),
            other => panic!("Expected Error, got {other:?}"),
        }
    }
}
