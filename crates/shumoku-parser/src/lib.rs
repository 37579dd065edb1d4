//! Shumoku topology parser.
//!
//! Loads YAML topology documents into the [`shumoku_core::model`] types and
//! resolves multi-file hierarchies:
//!
//! - [`parse_document`] loads a single document
//! - [`HierarchicalParser`] follows `subgraphs[].file` includes through a
//!   [`FileResolver`], merges every file into one graph and keeps a per-file
//!   [`Sheet`] for drill-down views
//! - [`error`] holds the fatal [`ParseError`] and the non-fatal [`ParseWarning`]s

pub mod document;
pub mod error;
pub mod hierarchy;
pub mod resolver;

pub use document::parse_document;
pub use error::{ParseError, ParseWarning, Severity, WarningCode};
pub use hierarchy::{HierarchicalGraph, HierarchicalParser, ROOT_SHEET, Sheet};
pub use resolver::{FileResolver, FsFileResolver, MemoryFileResolver};
