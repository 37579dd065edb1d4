//! Multi-file topology resolution.
//!
//! A document may delegate the content of a subgraph to another file via
//! `subgraphs[].file`. [`HierarchicalParser`] follows those includes
//! recursively and produces:
//!
//! - one merged [`NetworkGraph`] with every device of every file, containment
//!   namespaced per include and all pin references resolved to devices
//! - one [`Sheet`] per file: that file's own graph, for drill-down views
//! - the [`ParseWarning`]s collected on the way
//!
//! # Cycles
//!
//! Each recursion step carries the chain of files above it. An include that
//! names a file already on that chain is reported as
//! [`WarningCode::CircularReference`] and skipped. Including the same file from
//! two sibling branches is not a cycle.
//!
//! # Example
//!
//! ```
//! # use shumoku_parser::{HierarchicalParser, MemoryFileResolver};
//! # tokio_test_block(async {
//! let resolver = MemoryFileResolver::new().with_file(
//!     "dc1.yaml",
//!     "nodes:\n  - id: core-sw\npins:\n  - id: uplink\n    device: core-sw\n",
//! );
//! let parser = HierarchicalParser::new(resolver);
//! let root = r#"
//! nodes:
//!   - id: edge-rtr
//! subgraphs:
//!   - id: dc1
//!     file: dc1.yaml
//! links:
//!   - from: { node: dc1, pin: uplink }
//!     to: edge-rtr
//! "#;
//!
//! let result = parser.parse(root, "root.yaml").await.unwrap();
//! assert_eq!(result.graph.nodes.len(), 2);
//! assert!(result.sheets.contains_key("dc1"));
//! # });
//! # fn tokio_test_block(f: impl std::future::Future<Output = ()>) {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

mod export;
mod merge;
mod pins;

use std::future::Future;

use indexmap::IndexMap;
use log::{debug, info, warn};
use serde::Serialize;

use shumoku_core::model::{Endpoint, NetworkGraph};

use crate::{
    document::parse_document,
    error::{ParseError, ParseWarning, WarningCode},
    resolver::FileResolver,
};

/// Key of the top-level document in [`HierarchicalGraph::sheets`].
pub const ROOT_SHEET: &str = "root";

/// One file's own view of the hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sheet {
    /// `root`, `<subgraph>` or `<subgraph>/<nested subgraph>`.
    pub id: String,
    /// The file's own graph. Child sheets include their export connectors;
    /// pin endpoints are kept so they can be drawn on subgraph boundaries.
    pub graph: NetworkGraph,
    pub parent_sheet: Option<String>,
    /// Sheet ids from the root down to this sheet, inclusive.
    pub breadcrumb: Vec<String>,
}

/// Result of resolving a document and everything it includes.
#[derive(Debug, Default, Clone, Serialize)]
pub struct HierarchicalGraph {
    /// Every file merged; free of pin references and export connectors.
    pub graph: NetworkGraph,
    pub sheets: IndexMap<String, Sheet>,
    pub warnings: Vec<ParseWarning>,
}

impl HierarchicalGraph {
    pub fn sheet(&self, id: &str) -> Option<&Sheet> {
        self.sheets.get(id)
    }

    pub fn root_sheet(&self) -> Option<&Sheet> {
        self.sheets.get(ROOT_SHEET)
    }

    /// True if any warning has error severity.
    pub fn has_errors(&self) -> bool {
        self.warnings.iter().any(ParseWarning::is_error)
    }
}

/// Sheet ids from the root to `key`: `a/b` gives `root`, `a`, `a/b`.
fn breadcrumb_for(key: &str) -> Vec<String> {
    let mut breadcrumb = vec![ROOT_SHEET.to_string()];
    let mut prefix = String::new();
    for part in key.split('/') {
        if !prefix.is_empty() {
            prefix.push('/');
        }
        prefix.push_str(part);
        breadcrumb.push(prefix.clone());
    }
    breadcrumb
}

/// One document after its includes were resolved.
struct Level {
    /// The document with every include merged in and pins resolved.
    merged: NetworkGraph,
    /// The document on its own.
    own: NetworkGraph,
    /// Descendant sheet graphs keyed relative to this document.
    sheets: IndexMap<String, NetworkGraph>,
}

type LevelFuture<'a> = std::pin::Pin<Box<dyn Future<Output = Level> + Send + 'a>>;

/// Resolves multi-file topologies through a [`FileResolver`].
///
/// The parser keeps no state between calls; one instance can parse any
/// number of unrelated documents.
#[derive(Debug, Clone)]
pub struct HierarchicalParser<R> {
    resolver: R,
}

impl<R: FileResolver> HierarchicalParser<R> {
    pub fn new(resolver: R) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Kept for callers that reset between documents. Cycle detection state
    /// lives in each call, so there is nothing to clear.
    ///
    /// Only files on the current include chain count as visited: a file
    /// included from two sibling branches (a diamond) is parsed twice and is
    /// not reported as [`WarningCode::CircularReference`].
    pub fn reset(&mut self) {}

    /// Parses `text`, the document located at `base_path`, and every file it
    /// includes.
    ///
    /// # Errors
    ///
    /// Only a malformed root document is an error. Problems with included
    /// files become warnings in the result.
    pub async fn parse(
        &self,
        text: &str,
        base_path: &str,
    ) -> Result<HierarchicalGraph, ParseError> {
        let document = parse_document(text)?;
        let root_path = self.resolver.resolve("", base_path);
        info!(path = root_path; "Resolving topology hierarchy");

        let mut warnings = Vec::new();
        let ancestors = vec![root_path.clone()];
        let level = self
            .resolve_level(document, &root_path, &ancestors, &mut warnings)
            .await;

        let mut sheets = IndexMap::with_capacity(level.sheets.len() + 1);
        sheets.insert(
            ROOT_SHEET.to_string(),
            Sheet {
                id: ROOT_SHEET.to_string(),
                graph: level.own,
                parent_sheet: None,
                breadcrumb: vec![ROOT_SHEET.to_string()],
            },
        );
        for (key, graph) in level.sheets {
            let breadcrumb = breadcrumb_for(&key);
            let parent_sheet = breadcrumb.iter().rev().nth(1).cloned();
            sheets.insert(
                key.clone(),
                Sheet {
                    id: key,
                    graph,
                    parent_sheet,
                    breadcrumb,
                },
            );
        }

        info!(
            nodes = level.merged.nodes.len(),
            links = level.merged.links.len(),
            sheets = sheets.len(),
            warnings = warnings.len();
            "Topology hierarchy resolved"
        );
        Ok(HierarchicalGraph {
            graph: level.merged,
            sheets,
            warnings,
        })
    }

    /// Reads the root document through the resolver, then [`parse`](Self::parse)s it.
    ///
    /// # Errors
    ///
    /// Fails if the root document cannot be read or parsed.
    pub async fn parse_file(&self, path: &str) -> Result<HierarchicalGraph, ParseError> {
        let text = self
            .resolver
            .read(path)
            .await
            .map_err(|source| ParseError::Io {
                path: path.to_string(),
                source,
            })?;
        self.parse(&text, path).await
    }

    async fn load(&self, path: &str) -> Result<NetworkGraph, ParseError> {
        let text = self
            .resolver
            .read(path)
            .await
            .map_err(|source| ParseError::Io {
                path: path.to_string(),
                source,
            })?;
        parse_document(&text)
    }

    fn resolve_level<'a>(
        &'a self,
        document: NetworkGraph,
        path: &'a str,
        ancestors: &'a [String],
        warnings: &'a mut Vec<ParseWarning>,
    ) -> LevelFuture<'a> {
        Box::pin(async move {
            let mut own = document.clone();
            let mut merged = document;
            let mut sheets = IndexMap::new();

            let includes: Vec<(String, String)> = own
                .subgraphs
                .iter()
                .filter_map(|subgraph| Some((subgraph.id.clone(), subgraph.file.clone()?)))
                .collect();

            for (subgraph_id, file) in includes {
                let resolved = self.resolver.resolve(path, &file);

                if ancestors.contains(&resolved) {
                    warn!(subgraph = subgraph_id, file = resolved; "Circular include skipped");
                    warnings.push(
                        ParseWarning::new(
                            WarningCode::CircularReference,
                            format!(
                                "`{resolved}` (subgraph `{subgraph_id}`) includes one of its own ancestors: {}",
                                ancestors.join(" -> ")
                            ),
                        )
                        .with_file(resolved)
                        .with_subgraph(subgraph_id),
                    );
                    continue;
                }

                let child_document = match self.load(&resolved).await {
                    Ok(document) => document,
                    Err(err) => {
                        warn!(subgraph = subgraph_id, file = resolved; "Failed to load include: {err}");
                        warnings.push(
                            ParseWarning::new(
                                WarningCode::FileLoadError,
                                format!("failed to load `{resolved}` for subgraph `{subgraph_id}`: {err}"),
                            )
                            .with_file(resolved)
                            .with_subgraph(subgraph_id),
                        );
                        continue;
                    }
                };

                debug!(subgraph = subgraph_id, file = resolved; "Descending into include");
                let mut chain = ancestors.to_vec();
                chain.push(resolved.clone());
                let Level {
                    merged: child_merged,
                    own: mut child_own,
                    sheets: child_sheets,
                } = self
                    .resolve_level(child_document, &resolved, &chain, warnings)
                    .await;

                export::synthesize_export_connectors(&mut child_own, &child_merged);
                sheets.insert(subgraph_id.clone(), child_own);
                for (key, sheet) in child_sheets {
                    sheets.insert(format!("{subgraph_id}/{key}"), sheet);
                }

                for graph in [&mut merged, &mut own] {
                    if let Some(subgraph) = graph.subgraph_mut(&subgraph_id) {
                        merge::merge_pins(&mut subgraph.pins, &child_merged.pins);
                    }
                }
                merge::merge_child(&mut merged, &subgraph_id, child_merged);
            }

            // Pin references are still intact here; rewriting below loses them.
            annotate_export_connectors(&merged, &own, &mut sheets);
            pins::resolve_pin_endpoints(&mut merged, warnings);

            Level {
                merged,
                own,
                sheets,
            }
        })
    }
}

/// Tells each direct child sheet where its pins lead in this document.
fn annotate_export_connectors(
    merged: &NetworkGraph,
    own: &NetworkGraph,
    sheets: &mut IndexMap<String, NetworkGraph>,
) {
    for link in &own.links {
        for (local, remote) in [(&link.from, &link.to), (&link.to, &link.from)] {
            let Endpoint::Pin { subgraph, pin } = local else {
                continue;
            };
            let Some(sheet) = sheets.get_mut(subgraph) else {
                continue;
            };
            if let Some(destination) = export::describe_remote(merged, remote) {
                debug!(subgraph, pin, device = destination.device; "Annotating export connector");
                export::annotate_destination(sheet, pin, destination);
            }
        }
    }
}
