//! Output contract of a layout engine.
//!
//! A [`LayoutResult`] positions every node, port, subgraph (with its boundary
//! pins) and link route of one [`NetworkGraph`](crate::model::NetworkGraph).
//! Renderers only read it; they never compute placement themselves.

use indexmap::IndexMap;
use serde::Serialize;

use crate::{
    geometry::{Bounds, Point, Size},
    model::PinDirection,
};

/// Which side of its owner a port or pin sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PortSide {
    Top,
    Right,
    Bottom,
    Left,
}

impl PortSide {
    /// Unit vector pointing away from the owner.
    pub fn outward(&self) -> Point {
        match self {
            Self::Top => Point::new(0.0, -1.0),
            Self::Right => Point::new(1.0, 0.0),
            Self::Bottom => Point::new(0.0, 1.0),
            Self::Left => Point::new(-1.0, 0.0),
        }
    }

    pub fn is_vertical(&self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeLayout {
    pub id: String,
    /// Center of the node.
    pub position: Point,
    pub size: Size,
}

impl NodeLayout {
    pub fn bounds(&self) -> Bounds {
        Bounds::new_from_center(self.position, self.size)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortLayout {
    pub node: String,
    pub port: String,
    /// Center of the port marker, on the node outline.
    pub position: Point,
    pub size: Size,
    pub side: PortSide,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PinLayout {
    pub id: String,
    pub position: Point,
    pub side: PortSide,
    pub direction: PinDirection,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubgraphLayout {
    pub id: String,
    pub bounds: Bounds,
    pub pins: IndexMap<String, PinLayout>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkLayout {
    /// Link key: its id or `link-<index>`.
    pub id: String,
    pub from: String,
    pub to: String,
    /// Route from the source anchor to the target anchor, at least two points.
    pub points: Vec<Point>,
}

/// Positions for everything in one graph.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct LayoutResult {
    pub nodes: IndexMap<String, NodeLayout>,
    /// Keyed by [`port_key`].
    pub ports: IndexMap<String, PortLayout>,
    pub subgraphs: IndexMap<String, SubgraphLayout>,
    pub links: IndexMap<String, LinkLayout>,
    /// Bounds of all content.
    pub bounds: Bounds,
}

/// Key of a port in [`LayoutResult::ports`].
pub fn port_key(node: &str, port: &str) -> String {
    format!("{node}:{port}")
}

impl LayoutResult {
    pub fn node(&self, id: &str) -> Option<&NodeLayout> {
        self.nodes.get(id)
    }

    pub fn port(&self, node: &str, port: &str) -> Option<&PortLayout> {
        self.ports.get(&port_key(node, port))
    }

    pub fn subgraph(&self, id: &str) -> Option<&SubgraphLayout> {
        self.subgraphs.get(id)
    }

    pub fn link(&self, key: &str) -> Option<&LinkLayout> {
        self.links.get(key)
    }

    /// Recomputes [`LayoutResult::bounds`] from nodes, subgraphs and routes.
    pub fn compute_bounds(&self) -> Bounds {
        let nodes = self.nodes.values().map(NodeLayout::bounds);
        let subgraphs = self.subgraphs.values().map(|subgraph| subgraph.bounds);
        let routes = self
            .links
            .values()
            .filter_map(|link| Bounds::from_points(link.points.iter().copied()));

        nodes
            .chain(subgraphs)
            .chain(routes)
            .reduce(|acc, bounds| acc.merge(&bounds))
            .unwrap_or_default()
    }
}
