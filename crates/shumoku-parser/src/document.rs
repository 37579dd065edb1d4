//! Single-file YAML loader.
//!
//! Deserializes one sheet document into a [`NetworkGraph`]. Includes are not
//! followed here; `subgraphs[].file` is kept as a plain path for the
//! [`HierarchicalParser`](crate::HierarchicalParser) to resolve.

use std::collections::HashSet;

use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;

use shumoku_core::model::{
    Bandwidth, DeviceInfo, DeviceType, Direction, EdgeStyle, Endpoint, LegendPosition,
    LegendSettings, Link, LinkStyle, NetworkGraph, Node, NodeKind, NodeShape, Pin, PinDirection,
    Port, Redundancy, Settings, Subgraph, SubgraphStyle, Theme,
};

use crate::error::ParseError;

/// A value written either inline or as a list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            Self::One(value) => vec![value],
            Self::Many(values) => values,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawDocument {
    name: Option<String>,
    description: Option<String>,
    settings: RawSettings,
    nodes: Vec<RawNode>,
    links: Vec<RawLink>,
    subgraphs: Vec<RawSubgraph>,
    pins: Vec<RawPin>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSettings {
    theme: Option<Theme>,
    legend: Option<RawLegend>,
    #[serde(alias = "edgeStyle")]
    edge_style: Option<EdgeStyle>,
    direction: Option<Direction>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawLegend {
    Enabled(bool),
    Detailed {
        #[serde(default)]
        enabled: Option<bool>,
        #[serde(default)]
        position: Option<LegendPosition>,
    },
}

#[derive(Debug, Deserialize)]
struct RawNode {
    id: Option<String>,
    label: Option<OneOrMany<String>>,
    shape: Option<NodeShape>,
    #[serde(rename = "type")]
    device_type: Option<DeviceType>,
    vendor: Option<String>,
    model: Option<String>,
    service: Option<String>,
    resource: Option<String>,
    parent: Option<String>,
    ports: Option<RawPorts>,
    #[serde(default)]
    metadata: IndexMap<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawPorts {
    List(Vec<String>),
    Map(IndexMap<String, Option<RawPort>>),
}

#[derive(Debug, Default, Deserialize)]
struct RawPort {
    label: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawLink {
    id: Option<String>,
    from: Endpoint,
    to: Endpoint,
    bandwidth: Option<Bandwidth>,
    vlan: Option<OneOrMany<u32>>,
    redundancy: Option<Redundancy>,
    label: Option<OneOrMany<String>>,
    #[serde(default)]
    style: RawLinkStyle,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawLinkStyle {
    stroke: Option<String>,
    #[serde(alias = "strokeWidth")]
    stroke_width: Option<f32>,
    #[serde(alias = "strokeDasharray", alias = "stroke_dasharray")]
    dasharray: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawSubgraph {
    id: Option<String>,
    label: Option<String>,
    #[serde(default)]
    style: RawSubgraphStyle,
    #[serde(alias = "type")]
    icon: Option<DeviceType>,
    file: Option<String>,
    #[serde(default)]
    pins: Vec<RawPin>,
    parent: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSubgraphStyle {
    fill: Option<String>,
    stroke: Option<String>,
    #[serde(alias = "strokeDasharray")]
    stroke_dasharray: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawPin {
    id: Option<String>,
    label: Option<String>,
    direction: Option<PinDirection>,
    device: Option<String>,
    port: Option<String>,
}

/// Parses one YAML topology document.
///
/// # Errors
///
/// Returns [`ParseError::Syntax`] for malformed YAML or values outside the
/// schema, and [`ParseError::Validation`] for empty documents, missing ids and
/// duplicate node or subgraph ids.
///
/// # Examples
///
/// ```
/// # use shumoku_parser::parse_document;
/// let graph = parse_document(
///     r#"
/// nodes:
///   - id: r1
///     type: router
///   - id: sw1
/// links:
///   - from: { node: r1, port: ge0 }
///     to: sw1
///     bandwidth: 10G
/// "#,
/// )
/// .unwrap();
///
/// assert_eq!(graph.nodes.len(), 2);
/// assert!(graph.node("r1").unwrap().ports.contains_key("ge0"));
/// ```
pub fn parse_document(text: &str) -> Result<NetworkGraph, ParseError> {
    if text.trim().is_empty() {
        return Err(ParseError::validation("document is empty"));
    }

    let raw: Option<RawDocument> = serde_yaml::from_str(text)?;
    let raw = raw.ok_or_else(|| ParseError::validation("document is empty"))?;

    let nodes = convert_nodes(raw.nodes)?;
    let subgraphs = convert_subgraphs(raw.subgraphs)?;
    let pins = raw
        .pins
        .into_iter()
        .enumerate()
        .map(|(index, pin)| convert_pin(pin, &format!("pins[{index}]")))
        .collect::<Result<Vec<_>, _>>()?;
    let links = raw.links.into_iter().map(convert_link).collect();

    let mut graph = NetworkGraph {
        name: raw.name,
        description: raw.description,
        nodes,
        links,
        subgraphs,
        pins,
        settings: convert_settings(raw.settings),
    };
    register_implicit_ports(&mut graph);

    debug!(
        nodes = graph.nodes.len(),
        links = graph.links.len(),
        subgraphs = graph.subgraphs.len();
        "Parsed document"
    );
    Ok(graph)
}

fn convert_settings(raw: RawSettings) -> Settings {
    let legend = match raw.legend {
        None => LegendSettings::default(),
        Some(RawLegend::Enabled(enabled)) => LegendSettings {
            enabled,
            ..LegendSettings::default()
        },
        Some(RawLegend::Detailed { enabled, position }) => LegendSettings {
            enabled: enabled.unwrap_or(true),
            position: position.unwrap_or_default(),
        },
    };

    Settings {
        theme: raw.theme.unwrap_or_default(),
        legend,
        edge_style: raw.edge_style.unwrap_or_default(),
        direction: raw.direction.unwrap_or_default(),
    }
}

fn convert_nodes(raw_nodes: Vec<RawNode>) -> Result<Vec<Node>, ParseError> {
    let mut seen = HashSet::new();
    let mut nodes = Vec::with_capacity(raw_nodes.len());

    for (index, raw) in raw_nodes.into_iter().enumerate() {
        let id = raw
            .id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ParseError::validation(format!("nodes[{index}] has no id")))?;
        if !seen.insert(id.clone()) {
            return Err(ParseError::validation(format!("duplicate node id `{id}`")));
        }

        let label = raw
            .label
            .map(OneOrMany::into_vec)
            .filter(|lines| !lines.is_empty())
            .unwrap_or_else(|| vec![id.clone()]);

        let ports = match raw.ports {
            None => IndexMap::new(),
            Some(RawPorts::List(names)) => names
                .into_iter()
                .map(|name| (name, Port::default()))
                .collect(),
            Some(RawPorts::Map(map)) => map
                .into_iter()
                .map(|(name, port)| {
                    let label = port.unwrap_or_default().label;
                    (name, Port { label })
                })
                .collect(),
        };

        nodes.push(Node {
            id,
            label,
            shape: raw.shape.unwrap_or_default(),
            kind: NodeKind::Device(DeviceInfo {
                device_type: raw.device_type,
                vendor: raw.vendor,
                model: raw.model,
                service: raw.service,
                resource: raw.resource,
            }),
            parent: raw.parent,
            ports,
            metadata: raw.metadata,
        });
    }

    Ok(nodes)
}

fn convert_subgraphs(raw_subgraphs: Vec<RawSubgraph>) -> Result<Vec<Subgraph>, ParseError> {
    let mut seen = HashSet::new();
    let mut subgraphs = Vec::with_capacity(raw_subgraphs.len());

    for (index, raw) in raw_subgraphs.into_iter().enumerate() {
        let id = raw
            .id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ParseError::validation(format!("subgraphs[{index}] has no id")))?;
        if !seen.insert(id.clone()) {
            return Err(ParseError::validation(format!("duplicate subgraph id `{id}`")));
        }

        let pins = raw
            .pins
            .into_iter()
            .enumerate()
            .map(|(pin_index, pin)| convert_pin(pin, &format!("subgraph `{id}` pins[{pin_index}]")))
            .collect::<Result<Vec<_>, _>>()?;

        subgraphs.push(Subgraph {
            label: raw.label.unwrap_or_else(|| id.clone()),
            id,
            style: SubgraphStyle {
                fill: raw.style.fill,
                stroke: raw.style.stroke,
                stroke_dasharray: raw.style.stroke_dasharray,
            },
            icon: raw.icon,
            file: raw.file,
            pins,
            parent: raw.parent,
        });
    }

    Ok(subgraphs)
}

fn convert_pin(raw: RawPin, context: &str) -> Result<Pin, ParseError> {
    let id = raw
        .id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ParseError::validation(format!("{context} has no id")))?;
    Ok(Pin {
        id,
        label: raw.label,
        direction: raw.direction.unwrap_or_default(),
        device: raw.device,
        port: raw.port,
    })
}

fn convert_link(raw: RawLink) -> Link {
    Link {
        id: raw.id,
        from: raw.from,
        to: raw.to,
        bandwidth: raw.bandwidth,
        vlan: raw.vlan.map(OneOrMany::into_vec).unwrap_or_default(),
        redundancy: raw.redundancy,
        label: raw.label.map(OneOrMany::into_vec).unwrap_or_default(),
        style: LinkStyle {
            stroke: raw.style.stroke,
            stroke_width: raw.style.stroke_width,
            dasharray: raw.style.dasharray,
        },
    }
}

/// Adds ports that links mention but the node never declared.
fn register_implicit_ports(graph: &mut NetworkGraph) {
    let referenced: Vec<(String, String)> = graph
        .links
        .iter()
        .flat_map(|link| [&link.from, &link.to])
        .filter_map(|endpoint| match endpoint {
            Endpoint::Port { node, port } => Some((node.clone(), port.clone())),
            Endpoint::Node(_) | Endpoint::Pin { .. } => None,
        })
        .collect();

    for (node_id, port) in referenced {
        if let Some(node) = graph.nodes.iter_mut().find(|node| node.id == node_id) {
            node.ports.entry(port).or_default();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_document() {
        let graph = parse_document("nodes:\n  - id: a\n").unwrap();
        assert_eq!(graph.nodes.len(), 1);
        assert_eq!(graph.nodes[0].label, vec!["a".to_string()]);
        assert_eq!(graph.nodes[0].shape, NodeShape::Rounded);
        assert!(graph.links.is_empty());
    }

    #[test]
    fn test_empty_document_is_rejected() {
        assert!(matches!(
            parse_document("   \n"),
            Err(ParseError::Validation { .. })
        ));
        assert!(matches!(
            parse_document("~\n"),
            Err(ParseError::Validation { .. })
        ));
    }

    #[test]
    fn test_duplicate_node_id() {
        let err = parse_document("nodes:\n  - id: a\n  - id: a\n").unwrap_err();
        assert_eq!(err.to_string(), "duplicate node id `a`");
    }

    #[test]
    fn test_node_without_id() {
        let err = parse_document("nodes:\n  - label: nameless\n").unwrap_err();
        assert_eq!(err.to_string(), "nodes[0] has no id");
    }

    #[test]
    fn test_syntax_error_has_location() {
        let err = parse_document("nodes:\n  - id: [unterminated\n").unwrap_err();
        assert!(matches!(err, ParseError::Syntax { .. }));
        assert!(err.location().is_some());
    }

    #[test]
    fn test_multiline_labels_and_vlans() {
        let graph = parse_document(
            r#"
nodes:
  - id: sw1
    label: [Core Switch, 10.0.0.1]
    shape: hexagon
    type: l3-switch
  - id: sw2
links:
  - id: trunk
    from: sw1
    to: sw2
    vlan: [10, 20]
    redundancy: mlag
  - from: sw2
    to: sw1
    vlan: 30
    label: access
"#,
        )
        .unwrap();

        let sw1 = graph.node("sw1").unwrap();
        assert_eq!(sw1.label, vec!["Core Switch", "10.0.0.1"]);
        assert_eq!(sw1.shape, NodeShape::Hexagon);
        assert_eq!(sw1.device_type(), Some(DeviceType::L3Switch));

        assert_eq!(graph.links[0].vlan, vec![10, 20]);
        assert_eq!(graph.links[0].redundancy, Some(Redundancy::Mlag));
        assert_eq!(graph.links[1].vlan, vec![30]);
        assert_eq!(graph.links[1].label, vec!["access"]);
    }

    #[test]
    fn test_ports_list_map_and_implicit() {
        let graph = parse_document(
            r#"
nodes:
  - id: a
    ports: [eth0, eth1]
  - id: b
    ports:
      ge0: { label: Uplink }
      ge1:
links:
  - from: { node: a, port: eth9 }
    to: { node: b, port: ge0 }
"#,
        )
        .unwrap();

        let a = graph.node("a").unwrap();
        assert_eq!(
            a.ports.keys().collect::<Vec<_>>(),
            vec!["eth0", "eth1", "eth9"]
        );
        let b = graph.node("b").unwrap();
        assert_eq!(b.ports["ge0"].label.as_deref(), Some("Uplink"));
        assert_eq!(b.ports.len(), 2);
    }

    #[test]
    fn test_subgraphs_and_pins() {
        let graph = parse_document(
            r#"
subgraphs:
  - id: dc1
    label: Datacenter 1
    file: ./dc1.yaml
    pins:
      - id: uplink
        direction: out
pins:
  - id: wan
    device: edge
    port: ge0
    direction: in
links:
  - from: { node: dc1, pin: uplink }
    to: edge
nodes:
  - id: edge
"#,
        )
        .unwrap();

        let dc1 = graph.subgraph("dc1").unwrap();
        assert_eq!(dc1.label, "Datacenter 1");
        assert_eq!(dc1.file.as_deref(), Some("./dc1.yaml"));
        assert_eq!(dc1.pins[0].direction, PinDirection::Out);
        assert_eq!(graph.pins[0].device.as_deref(), Some("edge"));
        assert!(graph.links[0].from.is_pin());
    }

    #[test]
    fn test_settings_aliases() {
        let graph = parse_document(
            r#"
settings:
  theme: dark
  edgeStyle: splines
  legend: true
nodes: []
"#,
        )
        .unwrap();
        assert_eq!(graph.settings.theme, Theme::Dark);
        assert_eq!(graph.settings.edge_style, EdgeStyle::Splines);
        assert!(graph.settings.legend.enabled);

        let graph = parse_document(
            "settings:\n  legend: { position: top-left }\n  edge_style: straight\n",
        )
        .unwrap();
        assert!(graph.settings.legend.enabled);
        assert_eq!(graph.settings.legend.position, LegendPosition::TopLeft);
        assert_eq!(graph.settings.edge_style, EdgeStyle::Straight);
    }

    #[test]
    fn test_unknown_bandwidth_is_syntax_error() {
        let err = parse_document("links:\n  - from: a\n    to: b\n    bandwidth: 3G\n").unwrap_err();
        assert!(matches!(err, ParseError::Syntax { .. }));
    }
}
