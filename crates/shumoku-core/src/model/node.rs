//! Network devices (nodes), their shapes, ports and kinds.

use std::{fmt, str::FromStr};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::PinDirection;

/// Id prefix reserved for synthesized export-connector nodes.
pub const EXPORT_NODE_PREFIX: &str = "__export_";

/// Outline drawn for a node.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeShape {
    Rect,
    #[default]
    Rounded,
    Circle,
    Diamond,
    Hexagon,
    Cylinder,
    Stadium,
    Trapezoid,
}

impl NodeShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rect => "rect",
            Self::Rounded => "rounded",
            Self::Circle => "circle",
            Self::Diamond => "diamond",
            Self::Hexagon => "hexagon",
            Self::Cylinder => "cylinder",
            Self::Stadium => "stadium",
            Self::Trapezoid => "trapezoid",
        }
    }
}

impl FromStr for NodeShape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rect" => Ok(Self::Rect),
            "rounded" => Ok(Self::Rounded),
            "circle" => Ok(Self::Circle),
            "diamond" => Ok(Self::Diamond),
            "hexagon" => Ok(Self::Hexagon),
            "cylinder" => Ok(Self::Cylinder),
            "stadium" => Ok(Self::Stadium),
            "trapezoid" => Ok(Self::Trapezoid),
            _ => Err(format!(
                "invalid node shape `{s}`, valid values: rect, rounded, circle, diamond, \
                 hexagon, cylinder, stadium, trapezoid"
            )),
        }
    }
}

/// Category of network device; drives the built-in icon and the legend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeviceType {
    Router,
    L3Switch,
    L2Switch,
    Firewall,
    LoadBalancer,
    Server,
    AccessPoint,
    Cloud,
    Internet,
    Vpn,
    Database,
    Generic,
}

impl DeviceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Router => "router",
            Self::L3Switch => "l3-switch",
            Self::L2Switch => "l2-switch",
            Self::Firewall => "firewall",
            Self::LoadBalancer => "load-balancer",
            Self::Server => "server",
            Self::AccessPoint => "access-point",
            Self::Cloud => "cloud",
            Self::Internet => "internet",
            Self::Vpn => "vpn",
            Self::Database => "database",
            Self::Generic => "generic",
        }
    }

    /// Human readable name used in the legend.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Router => "Router",
            Self::L3Switch => "L3 Switch",
            Self::L2Switch => "L2 Switch",
            Self::Firewall => "Firewall",
            Self::LoadBalancer => "Load Balancer",
            Self::Server => "Server",
            Self::AccessPoint => "Access Point",
            Self::Cloud => "Cloud",
            Self::Internet => "Internet",
            Self::Vpn => "VPN",
            Self::Database => "Database",
            Self::Generic => "Device",
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named physical or logical interface on a node.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct Port {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Icon resolution keys and classification of an ordinary device.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct DeviceInfo {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub device_type: Option<DeviceType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
}

/// Where an export connector leads once the parent sheet is known.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDestination {
    /// Subgraph containing the remote endpoint, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subgraph_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subgraph_label: Option<String>,
    pub device: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<String>,
}

/// A synthetic node standing for "this device also connects outside this sheet".
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportConnector {
    pub pin_id: String,
    pub direction: PinDirection,
    /// The device inside the sheet the pin resolves to.
    pub local_device: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_port: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<ExportDestination>,
}

/// What a node represents.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum NodeKind {
    Device(DeviceInfo),
    ExportConnector(ExportConnector),
}

impl Default for NodeKind {
    fn default() -> Self {
        Self::Device(DeviceInfo::default())
    }
}

/// A device in the topology.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub id: String,
    /// Label lines; the first line is the primary one.
    pub label: Vec<String>,
    pub shape: NodeShape,
    #[serde(flatten)]
    pub kind: NodeKind,
    /// Containing subgraph id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub ports: IndexMap<String, Port>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub metadata: IndexMap<String, serde_json::Value>,
}

impl Node {
    /// Creates an ordinary device node labelled with its id.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            label: vec![id.clone()],
            id,
            shape: NodeShape::default(),
            kind: NodeKind::default(),
            parent: None,
            ports: IndexMap::new(),
            metadata: IndexMap::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = vec![label.into()];
        self
    }

    pub fn with_shape(mut self, shape: NodeShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn with_device_type(mut self, device_type: DeviceType) -> Self {
        match &mut self.kind {
            NodeKind::Device(info) => info.device_type = Some(device_type),
            NodeKind::ExportConnector(_) => {
                self.kind = NodeKind::Device(DeviceInfo {
                    device_type: Some(device_type),
                    ..DeviceInfo::default()
                })
            }
        }
        self
    }

    pub fn with_port(mut self, port: impl Into<String>) -> Self {
        self.ports.entry(port.into()).or_default();
        self
    }

    /// The primary (first) label line, falling back to the id.
    pub fn primary_label(&self) -> &str {
        self.label.first().map(String::as_str).unwrap_or(&self.id)
    }

    pub fn device(&self) -> Option<&DeviceInfo> {
        match &self.kind {
            NodeKind::Device(info) => Some(info),
            NodeKind::ExportConnector(_) => None,
        }
    }

    pub fn device_type(&self) -> Option<DeviceType> {
        self.device().and_then(|info| info.device_type)
    }

    pub fn export_connector(&self) -> Option<&ExportConnector> {
        match &self.kind {
            NodeKind::ExportConnector(connector) => Some(connector),
            NodeKind::Device(_) => None,
        }
    }

    pub fn is_export_connector(&self) -> bool {
        matches!(self.kind, NodeKind::ExportConnector(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_new_defaults() {
        let node = Node::new("r1");
        assert_eq!(node.label, vec!["r1".to_string()]);
        assert_eq!(node.shape, NodeShape::Rounded);
        assert!(node.device().is_some());
        assert!(!node.is_export_connector());
        assert_eq!(node.primary_label(), "r1");
    }

    #[test]
    fn test_primary_label_falls_back_to_id() {
        let mut node = Node::new("sw1");
        node.label.clear();
        assert_eq!(node.primary_label(), "sw1");
    }

    #[test]
    fn test_node_shape_from_str() {
        assert_eq!("hexagon".parse::<NodeShape>(), Ok(NodeShape::Hexagon));
        assert!("blob".parse::<NodeShape>().is_err());
    }

    #[test]
    fn test_device_type_serde_names() {
        let json = serde_json::to_string(&DeviceType::LoadBalancer).unwrap();
        assert_eq!(json, "\"load-balancer\"");
        assert_eq!(DeviceType::L3Switch.to_string(), "l3-switch");
    }

    #[test]
    fn test_export_connector_serializes_kind_tag() {
        let mut node = Node::new("__export_uplink");
        node.kind = NodeKind::ExportConnector(ExportConnector {
            pin_id: "uplink".to_string(),
            direction: PinDirection::Out,
            local_device: "core-sw".to_string(),
            local_port: Some("eth0".to_string()),
            destination: None,
        });

        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value["kind"], "exportConnector");
        assert_eq!(value["localDevice"], "core-sw");
        assert!(node.is_export_connector());
        assert!(node.device().is_none());
    }
}
