//! The network topology data model.
//!
//! A [`NetworkGraph`] owns flat, ordered lists of [`Node`]s, [`Link`]s and
//! [`Subgraph`]s. Containment is expressed by `parent` ids rather than
//! ownership, so merging documents only rewrites ids, never moves trees.

mod graph;
mod link;
mod node;
mod settings;
mod subgraph;

pub use graph::NetworkGraph;
pub use link::{Bandwidth, EXPORT_LINK_PREFIX, Endpoint, Link, LinkStyle, Redundancy};
pub use node::{
    DeviceInfo, DeviceType, EXPORT_NODE_PREFIX, ExportConnector, ExportDestination, Node,
    NodeKind, NodeShape, Port,
};
pub use settings::{Direction, EdgeStyle, LegendPosition, LegendSettings, Settings, Theme};
pub use subgraph::{Pin, PinDirection, Subgraph, SubgraphStyle};
