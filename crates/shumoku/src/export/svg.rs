//! SVG rendering of a laid-out network graph.
//!
//! [`SvgRenderer`] turns a [`NetworkGraph`] and its [`LayoutResult`] into a
//! standalone SVG document. Drawing is split by element kind; every part
//! adds its nodes to a [`LayeredOutput`] so paint order stays fixed
//! regardless of the order in which parts are drawn:
//!
//! ```text
//! subgraphs -> links -> nodes -> link labels -> ports -> legend
//! ```
//!
//! Output is deterministic: identical input always yields identical text.

mod icons;
mod labels;
mod layer;
mod legend;
mod links;
mod nodes;
mod paths;
mod shapes;
mod subgraphs;

pub use icons::{BuiltinIcons, Icon, IconProvider};
pub use layer::{LayeredOutput, RenderLayer, SvgNode};

use indexmap::IndexMap;
use log::{debug, info};
use shumoku_core::{
    color::{Palette, color_or},
    geometry::{Bounds, Insets},
    layout::LayoutResult,
    model::{EdgeStyle, NetworkGraph, Theme},
};
use svg::{
    Document,
    node::{Node as _, element as svg_element},
};

use paths::fmt_num;
use subgraphs::view_box_attr;

/// Id of the drop shadow filter nodes refer to.
pub(crate) const SHADOW_FILTER_ID: &str = "shumoku-shadow";

const VIEW_PADDING: f32 = 40.0;
const FONT_FAMILY: &str = "system-ui, -apple-system, 'Segoe UI', Roboto, sans-serif";
const STYLESHEET: &str = ".link-hit{cursor:pointer}.link:hover .link-line{stroke-opacity:.75}\
.subgraph[data-has-sheet] > rect:first-of-type{cursor:zoom-in}";

/// Pre-rendered content of a child sheet, embedded inside the subgraph that
/// opens it.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetFragment {
    /// Region of the child sheet's own coordinate space the content covers.
    pub view_box: Bounds,
    /// Serialized layer groups, without a surrounding `<svg>` element.
    pub content: String,
}

/// Per-call rendering switches.
///
/// Theme and edge style fall back to the graph's own settings when unset.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    interactive: bool,
    sheet_id: Option<String>,
    embedded_sheets: IndexMap<String, SheetFragment>,
    theme: Option<Theme>,
    edge_style: Option<EdgeStyle>,
    background: Option<String>,
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `data-*` attributes with device and link details.
    pub fn with_interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    /// Sheet the rendered graph belongs to; drill-down targets are
    /// resolved relative to it.
    pub fn with_sheet_id(mut self, sheet_id: impl Into<String>) -> Self {
        self.sheet_id = Some(sheet_id.into());
        self
    }

    /// Embeds `fragment` inside the subgraph `subgraph_id`.
    pub fn with_embedded_sheet(
        mut self,
        subgraph_id: impl Into<String>,
        fragment: SheetFragment,
    ) -> Self {
        self.embedded_sheets.insert(subgraph_id.into(), fragment);
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = Some(theme);
        self
    }

    pub fn with_edge_style(mut self, edge_style: EdgeStyle) -> Self {
        self.edge_style = Some(edge_style);
        self
    }

    /// Background color; invalid colors fall back to the theme background.
    pub fn with_background(mut self, background: impl Into<String>) -> Self {
        self.background = Some(background.into());
        self
    }

    pub fn interactive(&self) -> bool {
        self.interactive
    }

    pub fn sheet_id(&self) -> Option<&str> {
        self.sheet_id.as_deref()
    }
}

/// Everything the drawing parts need, resolved once per render.
pub(crate) struct RenderContext<'a> {
    pub graph: &'a NetworkGraph,
    pub layout: &'a LayoutResult,
    pub palette: &'static Palette,
    pub edge_style: EdgeStyle,
    pub interactive: bool,
    pub sheet_id: Option<&'a str>,
    pub embedded: &'a IndexMap<String, SheetFragment>,
    pub icons: &'a dyn IconProvider,
}

/// Renders laid-out graphs to SVG.
///
/// # Examples
///
/// ```
/// use shumoku::export::svg::{RenderOptions, SvgRenderer};
/// use shumoku::shumoku_core::{layout::LayoutResult, model::NetworkGraph};
///
/// let svg = SvgRenderer::new().render(
///     &NetworkGraph::new(),
///     &LayoutResult::default(),
///     &RenderOptions::new(),
/// );
/// assert!(svg.starts_with("<svg"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SvgRenderer<I = BuiltinIcons> {
    icons: I,
}

impl SvgRenderer<BuiltinIcons> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<I: IconProvider> SvgRenderer<I> {
    /// Uses `icons` instead of the built-in device icons.
    pub fn with_icons(icons: I) -> Self {
        Self { icons }
    }

    fn context<'a>(
        &'a self,
        graph: &'a NetworkGraph,
        layout: &'a LayoutResult,
        options: &'a RenderOptions,
    ) -> RenderContext<'a> {
        let theme = options.theme.unwrap_or(graph.settings.theme);
        RenderContext {
            graph,
            layout,
            palette: Palette::for_theme(theme),
            edge_style: options.edge_style.unwrap_or(graph.settings.edge_style),
            interactive: options.interactive,
            sheet_id: options.sheet_id.as_deref(),
            embedded: &options.embedded_sheets,
            icons: &self.icons,
        }
    }

    /// Draws every part and returns the layered output with the area it
    /// covers.
    fn draw(&self, ctx: &RenderContext<'_>) -> (LayeredOutput, Bounds) {
        let mut output = LayeredOutput::new();
        subgraphs::render_subgraphs(ctx, &mut output);
        links::render_links(ctx, &mut output);
        nodes::render_nodes(ctx, &mut output);

        let mut content = if ctx.layout.bounds.is_valid() {
            ctx.layout.bounds
        } else {
            ctx.layout.compute_bounds()
        };

        if ctx.graph.settings.legend.enabled {
            if let Some((bounds, group)) = legend::render_legend(ctx, content) {
                content = if content.is_valid() {
                    content.merge(&bounds)
                } else {
                    bounds
                };
                output.add_to_layer(RenderLayer::Legend, Box::new(group));
            }
        }

        (output, content)
    }

    /// Renders a complete SVG document.
    pub fn render(
        &self,
        graph: &NetworkGraph,
        layout: &LayoutResult,
        options: &RenderOptions,
    ) -> String {
        let ctx = self.context(graph, layout, options);
        info!(
            nodes = graph.nodes.len(),
            links = graph.links.len(),
            interactive = options.interactive;
            "Rendering SVG"
        );

        let (output, content) = self.draw(&ctx);
        let view_box = if content.is_valid() {
            content.add_padding(Insets::uniform(VIEW_PADDING))
        } else {
            Bounds::new(0.0, 0.0, 800.0, 600.0)
        };
        debug!(view_box:? = view_box; "Computed view box");

        let theme = options.theme.unwrap_or(graph.settings.theme);
        let mut doc = Document::new()
            .set("viewBox", view_box_attr(view_box))
            .set("width", fmt_num(view_box.width()))
            .set("height", fmt_num(view_box.height()))
            .set("class", "shumoku")
            .set(
                "data-theme",
                match theme {
                    Theme::Light => "light",
                    Theme::Dark => "dark",
                },
            )
            .set("font-family", FONT_FAMILY);
        if let Some(sheet_id) = &options.sheet_id {
            doc = doc.set("data-sheet-id", sheet_id.as_str());
        }

        let background = color_or(options.background.as_deref(), ctx.palette.background);
        doc = doc
            .add(definitions(ctx.palette))
            .add(svg_element::Style::new(STYLESHEET))
            .add(
                svg_element::Rectangle::new()
                    .set("class", "background")
                    .set("x", fmt_num(view_box.min_x()))
                    .set("y", fmt_num(view_box.min_y()))
                    .set("width", fmt_num(view_box.width()))
                    .set("height", fmt_num(view_box.height()))
                    .set("fill", background),
            );

        for node in output.render() {
            doc = doc.add(node);
        }

        doc.to_string()
    }

    /// Renders only the layer groups, for embedding inside a parent sheet.
    pub fn render_fragment(
        &self,
        graph: &NetworkGraph,
        layout: &LayoutResult,
        options: &RenderOptions,
    ) -> SheetFragment {
        let ctx = self.context(graph, layout, options);
        let (output, content) = self.draw(&ctx);
        let content_text: String = output
            .render()
            .into_iter()
            .map(|node| node.to_string())
            .collect();

        SheetFragment {
            view_box: if content.is_valid() {
                content.add_padding(Insets::uniform(VIEW_PADDING / 2.0))
            } else {
                Bounds::new(0.0, 0.0, 1.0, 1.0)
            },
            content: content_text,
        }
    }
}

fn definitions(palette: &Palette) -> svg_element::Definitions {
    let mut shadow = svg_element::Element::new("feDropShadow");
    shadow.assign("dx", 0);
    shadow.assign("dy", 1);
    shadow.assign("stdDeviation", 2);
    shadow.assign("flood-color", palette.shadow);
    shadow.assign("flood-opacity", 0.15);

    svg_element::Definitions::new().add(
        svg_element::Filter::new()
            .set("id", SHADOW_FILTER_ID)
            .set("x", "-20%")
            .set("y", "-20%")
            .set("width", "140%")
            .set("height", "140%")
            .add(shadow),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use shumoku_core::{
        geometry::{Point, Size},
        layout::NodeLayout,
        model::Node,
    };

    fn single_node() -> (NetworkGraph, LayoutResult) {
        let mut graph = NetworkGraph::new();
        graph.nodes.push(Node::new("r1"));
        let mut layout = LayoutResult::default();
        layout.nodes.insert(
            "r1".to_string(),
            NodeLayout {
                id: "r1".to_string(),
                position: Point::new(100.0, 50.0),
                size: Size::new(160.0, 80.0),
            },
        );
        layout.bounds = layout.compute_bounds();
        (graph, layout)
    }

    #[test]
    fn test_empty_graph_uses_default_view_box() {
        let svg = SvgRenderer::new().render(
            &NetworkGraph::new(),
            &LayoutResult::default(),
            &RenderOptions::new(),
        );
        assert!(svg.contains(r#"viewBox="0 0 800 600""#), "{svg}");
    }

    #[test]
    fn test_view_box_pads_content() {
        let (graph, layout) = single_node();
        let svg = SvgRenderer::new().render(&graph, &layout, &RenderOptions::new());
        // Node spans 20..180 x 10..90.
        assert!(svg.contains(r#"viewBox="-20 -30 240 160""#), "{svg}");
        assert!(svg.contains(SHADOW_FILTER_ID));
    }

    #[test]
    fn test_theme_override_and_background() {
        let (graph, layout) = single_node();
        let options = RenderOptions::new()
            .with_theme(Theme::Dark)
            .with_background("#123456")
            .with_sheet_id("dc1");
        let svg = SvgRenderer::new().render(&graph, &layout, &options);
        assert!(svg.contains(r#"data-theme="dark""#));
        assert!(svg.contains(r##"fill="#123456""##));
        assert!(svg.contains(r#"data-sheet-id="dc1""#));
    }

    #[test]
    fn test_fragment_has_no_document_wrapper() {
        let (graph, layout) = single_node();
        let fragment = SvgRenderer::new().render_fragment(&graph, &layout, &RenderOptions::new());
        assert!(!fragment.content.contains("<svg"));
        assert!(fragment.content.contains(r#"data-layer="nodes""#));
        assert!(fragment.view_box.contains(Point::new(100.0, 50.0)));
    }
}
