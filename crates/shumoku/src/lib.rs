//! Shumoku - hierarchical network topology diagrams.
//!
//! Parsing, layout and rendering of YAML network topologies. A topology may
//! span several files: subgraphs that name a `file` become drill-down
//! sheets, rendered with SVG attributes that the HTML viewer and the
//! [`navigation`] state machine use to zoom between sheets.

pub mod config;
pub mod export;
pub mod layout;
pub mod navigation;

mod error;

pub use shumoku_core;
pub use shumoku_parser;

pub use error::ShumokuError;

use log::{debug, info, trace};

use shumoku_core::{layout::LayoutResult, model::NetworkGraph};
use shumoku_parser::{
    FileResolver, FsFileResolver, HierarchicalGraph, HierarchicalParser, ROOT_SHEET, Sheet,
};

use config::AppConfig;
use export::{
    html::{self, HtmlSheet},
    svg::{RenderOptions, SvgRenderer},
};
use layout::{BasicEngine, LayoutEngine};

/// Builder for parsing, laying out and rendering topologies.
///
/// # Examples
///
/// ```rust
/// use shumoku::{TopologyBuilder, config::AppConfig};
///
/// let source = r#"
/// nodes:
///   - id: r1
///     label: Router
///     type: router
///   - id: sw1
///     label: Switch
///     type: l2-switch
/// links:
///   - from: r1
///     to: sw1
///     bandwidth: 10G
/// "#;
///
/// let builder = TopologyBuilder::new(AppConfig::default());
/// let graph = builder.parse(source).expect("Failed to parse");
/// let svg = builder.render_svg(&graph).expect("Failed to render");
/// assert!(svg.contains(r#"data-id="r1""#));
/// ```
#[derive(Debug, Default)]
pub struct TopologyBuilder {
    config: AppConfig,
}

impl TopologyBuilder {
    /// Create a new topology builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse a single document, ignoring any `file` includes.
    ///
    /// # Errors
    ///
    /// Returns [`ShumokuError::Parse`] for malformed documents.
    pub fn parse(&self, source: &str) -> Result<NetworkGraph, ShumokuError> {
        info!("Parsing topology");
        let graph = shumoku_parser::parse_document(source)
            .map_err(|err| ShumokuError::new_parse_error(err, source))?;
        debug!(nodes = graph.nodes.len(), links = graph.links.len(); "Topology parsed");
        trace!(graph:?; "Parsed topology");
        Ok(graph)
    }

    /// Parse `source`, located at `base_path`, and every file it includes.
    ///
    /// Problems with included files are reported as warnings in the result,
    /// not as errors.
    ///
    /// # Errors
    ///
    /// Returns [`ShumokuError::Parse`] when the root document is malformed.
    pub async fn parse_hierarchy<R: FileResolver>(
        &self,
        resolver: R,
        source: &str,
        base_path: &str,
    ) -> Result<HierarchicalGraph, ShumokuError> {
        HierarchicalParser::new(resolver)
            .parse(source, base_path)
            .await
            .map_err(|err| ShumokuError::new_parse_error(err, source))
    }

    /// Read a topology from the filesystem, following includes.
    ///
    /// # Errors
    ///
    /// Returns [`ShumokuError::Io`] if `path` cannot be read and
    /// [`ShumokuError::Parse`] if it is malformed.
    pub async fn parse_file(&self, path: &str) -> Result<HierarchicalGraph, ShumokuError> {
        info!(path; "Reading topology");
        let resolver = FsFileResolver::new();
        let source = resolver.read(path).await?;
        self.parse_hierarchy(resolver, &source, path).await
    }

    /// Place every element of `graph` with the basic layout engine.
    ///
    /// # Errors
    ///
    /// Returns [`ShumokuError::Layout`] when the graph cannot be placed.
    pub fn layout(&self, graph: &NetworkGraph) -> Result<LayoutResult, ShumokuError> {
        BasicEngine::new(self.config.layout()).layout(graph)
    }

    /// Render options carrying the configured style overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ShumokuError::Config`] for an invalid background color.
    pub fn render_options(&self) -> Result<RenderOptions, ShumokuError> {
        let style = self.config.style();
        let mut options = RenderOptions::new();
        if let Some(theme) = style.theme() {
            options = options.with_theme(theme);
        }
        if let Some(edge_style) = style.edge_style() {
            options = options.with_edge_style(edge_style);
        }
        if let Some(color) = style.background_color().map_err(ShumokuError::Config)? {
            options = options.with_background(color.to_string());
        }
        Ok(options)
    }

    /// Lay out and render `graph` as a static SVG document.
    ///
    /// # Errors
    ///
    /// Returns layout and configuration errors.
    pub fn render_svg(&self, graph: &NetworkGraph) -> Result<String, ShumokuError> {
        let layout = self.layout(graph)?;
        let options = self.render_options()?;
        Ok(self.render_svg_with(graph, &layout, &options))
    }

    /// Render an already laid-out graph.
    pub fn render_svg_with(
        &self,
        graph: &NetworkGraph,
        layout: &LayoutResult,
        options: &RenderOptions,
    ) -> String {
        SvgRenderer::new().render(graph, layout, options)
    }

    /// Render one sheet of a hierarchy. Direct child sheets are embedded as
    /// previews inside the subgraphs that open them.
    ///
    /// # Errors
    ///
    /// Returns [`ShumokuError::UnknownSheet`] if `sheet_id` does not exist.
    pub fn render_sheet_svg(
        &self,
        hierarchy: &HierarchicalGraph,
        sheet_id: &str,
        interactive: bool,
    ) -> Result<String, ShumokuError> {
        let sheet = hierarchy
            .sheet(sheet_id)
            .ok_or_else(|| ShumokuError::UnknownSheet(sheet_id.to_string()))?;
        self.sheet_svg(hierarchy, sheet, interactive)
    }

    fn sheet_svg(
        &self,
        hierarchy: &HierarchicalGraph,
        sheet: &Sheet,
        interactive: bool,
    ) -> Result<String, ShumokuError> {
        info!(sheet = sheet.id; "Rendering sheet");
        let renderer = SvgRenderer::new();
        let layout = self.layout(&sheet.graph)?;
        let mut options = self
            .render_options()?
            .with_interactive(interactive)
            .with_sheet_id(sheet.id.as_str());

        let children = hierarchy
            .sheets
            .values()
            .filter(|child| child.parent_sheet.as_deref() == Some(sheet.id.as_str()));
        for child in children {
            let subgraph_id = child.id.rsplit('/').next().unwrap_or(child.id.as_str());
            if sheet.graph.subgraph(subgraph_id).is_none() {
                continue;
            }
            let child_layout = self.layout(&child.graph)?;
            let fragment = renderer.render_fragment(
                &child.graph,
                &child_layout,
                &self.render_options()?.with_sheet_id(child.id.as_str()),
            );
            debug!(sheet = sheet.id, child = child.id; "Embedding child sheet preview");
            options = options.with_embedded_sheet(subgraph_id, fragment);
        }

        Ok(renderer.render(&sheet.graph, &layout, &options))
    }

    /// Render `graph` wrapped in a standalone viewer page.
    ///
    /// # Errors
    ///
    /// Returns layout and configuration errors.
    pub fn render_html(&self, graph: &NetworkGraph, title: &str) -> Result<String, ShumokuError> {
        let layout = self.layout(graph)?;
        let options = self.render_options()?.with_interactive(true);
        let svg = self.render_svg_with(graph, &layout, &options);
        Ok(html::render_html(&svg, title))
    }

    /// Render every sheet of a hierarchy into one viewer page.
    ///
    /// # Errors
    ///
    /// Returns layout and configuration errors.
    pub fn render_sheets_html(
        &self,
        hierarchy: &HierarchicalGraph,
        title: &str,
    ) -> Result<String, ShumokuError> {
        let sheets = hierarchy
            .sheets
            .values()
            .map(|sheet| {
                Ok(HtmlSheet {
                    id: sheet.id.clone(),
                    title: sheet_title(hierarchy, &sheet.id),
                    breadcrumb: sheet
                        .breadcrumb
                        .iter()
                        .map(|id| (id.clone(), sheet_title(hierarchy, id)))
                        .collect(),
                    svg: self.sheet_svg(hierarchy, sheet, true)?,
                })
            })
            .collect::<Result<Vec<_>, ShumokuError>>()?;

        info!(sheets = sheets.len(); "Rendering multi-sheet page");
        Ok(html::render_sheets_html(title, &sheets))
    }
}

/// Display name of a sheet: the label of the subgraph that opens it, or the
/// document name for the root.
fn sheet_title(hierarchy: &HierarchicalGraph, sheet_id: &str) -> String {
    if sheet_id == ROOT_SHEET {
        return hierarchy
            .graph
            .name
            .clone()
            .unwrap_or_else(|| "Overview".to_string());
    }
    let subgraph_id = sheet_id.rsplit('/').next().unwrap_or(sheet_id);
    hierarchy
        .sheet(sheet_id)
        .and_then(|sheet| sheet.parent_sheet.as_deref())
        .and_then(|parent| hierarchy.sheet(parent))
        .and_then(|parent| parent.graph.subgraph(subgraph_id))
        .map(|subgraph| subgraph.label.clone())
        .filter(|label| !label.is_empty())
        .unwrap_or_else(|| subgraph_id.to_string())
}
