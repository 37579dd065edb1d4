//! Z-ordered render layers.
//!
//! Drawing code never appends to the document directly. It files each SVG
//! node under a [`RenderLayer`]; [`LayeredOutput::render`] then emits one
//! `<g data-layer="...">` per non-empty layer, bottom to top, keeping
//! insertion order inside a layer.
//!
//! ```
//! # use shumoku::export::svg::{LayeredOutput, RenderLayer};
//! # use svg::node::element::{Path, Rectangle};
//! let mut output = LayeredOutput::new();
//! output.add_to_layer(RenderLayer::Node, Box::new(Rectangle::new()));
//! output.add_to_layer(RenderLayer::Link, Box::new(Path::new()));
//!
//! // Links are emitted below nodes regardless of insertion order.
//! let groups = output.render();
//! assert_eq!(groups.len(), 2);
//! ```

use svg::{Node as _, node::element::Group};

/// Type alias for boxed SVG nodes.
pub type SvgNode = Box<dyn svg::Node>;

/// Rendering layers, bottom first.
///
/// Ports come after nodes so they stay clickable above node bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderLayer {
    Subgraph,
    Link,
    Node,
    LinkLabel,
    Port,
    Legend,
}

impl RenderLayer {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Subgraph => "subgraphs",
            Self::Link => "links",
            Self::Node => "nodes",
            Self::LinkLabel => "link-labels",
            Self::Port => "ports",
            Self::Legend => "legend",
        }
    }
}

/// SVG nodes collected per layer.
#[derive(Debug, Default)]
pub struct LayeredOutput {
    items: Vec<(RenderLayer, SvgNode)>,
}

impl LayeredOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_to_layer(&mut self, layer: RenderLayer, node: SvgNode) {
        self.items.push((layer, node));
    }

    /// Appends everything from `other`, after this output's own nodes.
    pub fn merge(&mut self, other: LayeredOutput) {
        self.items.extend(other.items);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of nodes filed under `layer`.
    pub fn layer_len(&self, layer: RenderLayer) -> usize {
        self.items.iter().filter(|(l, _)| *l == layer).count()
    }

    /// Consumes the output into one group per non-empty layer, bottom first.
    pub fn render(mut self) -> Vec<SvgNode> {
        // Stable: insertion order survives within a layer.
        self.items.sort_by_key(|(layer, _)| *layer);

        let mut groups: Vec<(RenderLayer, Group)> = Vec::new();
        for (layer, node) in self.items {
            match groups.last_mut() {
                Some((current, group)) if *current == layer => {
                    group.append(node);
                }
                _ => {
                    let group = Group::new().set("data-layer", layer.name()).add(node);
                    groups.push((layer, group));
                }
            }
        }

        groups
            .into_iter()
            .map(|(_, group)| Box::new(group) as SvgNode)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use svg::node::element::{Circle, Rectangle};

    #[test]
    fn test_layers_render_bottom_to_top() {
        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Port, Box::new(Circle::new()));
        output.add_to_layer(RenderLayer::Subgraph, Box::new(Rectangle::new()));
        output.add_to_layer(RenderLayer::Port, Box::new(Circle::new()));

        assert_eq!(output.layer_len(RenderLayer::Port), 2);

        let rendered: Vec<String> = output.render().iter().map(|node| node.to_string()).collect();
        assert_eq!(rendered.len(), 2);
        assert!(rendered[0].contains(r#"data-layer="subgraphs""#));
        assert!(rendered[1].contains(r#"data-layer="ports""#));
        assert_eq!(rendered[1].matches("<circle").count(), 2);
    }

    #[test]
    fn test_merge_keeps_layers() {
        let mut first = LayeredOutput::new();
        first.add_to_layer(RenderLayer::Node, Box::new(Rectangle::new()));
        let mut second = LayeredOutput::new();
        second.add_to_layer(RenderLayer::Node, Box::new(Rectangle::new()));
        second.add_to_layer(RenderLayer::Legend, Box::new(Rectangle::new()));

        first.merge(second);
        assert_eq!(first.render().len(), 2);
    }

    #[test]
    fn test_empty_output_renders_nothing() {
        let output = LayeredOutput::new();
        assert!(output.is_empty());
        assert!(output.render().is_empty());
    }
}
