use std::collections::BTreeSet;

use serde::Serialize;

use super::{Bandwidth, DeviceType, Link, Node, Pin, Settings, Subgraph};

/// A complete network topology: one document, or several merged together.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct NetworkGraph {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub nodes: Vec<Node>,
    pub links: Vec<Link>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subgraphs: Vec<Subgraph>,
    /// Boundary contract of this graph when it fills a parent's subgraph.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub pins: Vec<Pin>,
    pub settings: Settings,
}

impl NetworkGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn subgraph(&self, id: &str) -> Option<&Subgraph> {
        self.subgraphs.iter().find(|subgraph| subgraph.id == id)
    }

    pub fn subgraph_mut(&mut self, id: &str) -> Option<&mut Subgraph> {
        self.subgraphs.iter_mut().find(|subgraph| subgraph.id == id)
    }

    /// Bandwidths used by at least one link, ascending.
    pub fn bandwidths(&self) -> BTreeSet<Bandwidth> {
        self.links.iter().filter_map(|link| link.bandwidth).collect()
    }

    /// Device types used by at least one node, in enum order.
    pub fn device_types(&self) -> BTreeSet<DeviceType> {
        self.nodes.iter().filter_map(Node::device_type).collect()
    }

    /// Nodes whose containing subgraph is `parent` (`None` = top level).
    pub fn children_of<'a>(&'a self, parent: Option<&'a str>) -> impl Iterator<Item = &'a Node> {
        self.nodes
            .iter()
            .filter(move |node| node.parent.as_deref() == parent)
    }

    /// Subgraphs nested directly in `parent` (`None` = top level).
    pub fn subgraphs_in<'a>(
        &'a self,
        parent: Option<&'a str>,
    ) -> impl Iterator<Item = &'a Subgraph> {
        self.subgraphs
            .iter()
            .filter(move |subgraph| subgraph.parent.as_deref() == parent)
    }

    /// True if `node_id` is `subgraph_id` itself or nested anywhere inside it.
    pub fn is_within(&self, node_id: &str, subgraph_id: &str) -> bool {
        if node_id == subgraph_id {
            return true;
        }
        let mut current = self
            .node(node_id)
            .and_then(|node| node.parent.as_deref())
            .or_else(|| {
                self.subgraph(node_id)
                    .and_then(|subgraph| subgraph.parent.as_deref())
            });

        // Bounded by the subgraph count so a malformed parent loop terminates.
        for _ in 0..=self.subgraphs.len() {
            match current {
                Some(parent) if parent == subgraph_id => return true,
                Some(parent) => {
                    current = self
                        .subgraph(parent)
                        .and_then(|subgraph| subgraph.parent.as_deref());
                }
                None => return false,
            }
        }
        false
    }
}
