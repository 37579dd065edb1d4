//! Connections between devices.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Id prefix reserved for synthesized export-connector links.
pub const EXPORT_LINK_PREFIX: &str = "__export_link_";

/// Link capacity. Rendered as a number of parallel lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Bandwidth {
    #[serde(rename = "1G")]
    G1,
    #[serde(rename = "10G")]
    G10,
    #[serde(rename = "25G")]
    G25,
    #[serde(rename = "40G")]
    G40,
    #[serde(rename = "100G")]
    G100,
}

impl Bandwidth {
    /// All bandwidths in ascending order.
    pub const ALL: [Bandwidth; 5] = [Self::G1, Self::G10, Self::G25, Self::G40, Self::G100];

    /// Number of parallel strokes drawn for a link of this bandwidth.
    ///
    /// ```
    /// # use shumoku_core::model::Bandwidth;
    /// assert_eq!(Bandwidth::G1.line_count(), 1);
    /// assert_eq!(Bandwidth::G100.line_count(), 5);
    /// ```
    pub fn line_count(&self) -> usize {
        match self {
            Self::G1 => 1,
            Self::G10 => 2,
            Self::G25 => 3,
            Self::G40 => 4,
            Self::G100 => 5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::G1 => "1G",
            Self::G10 => "10G",
            Self::G25 => "25G",
            Self::G40 => "40G",
            Self::G100 => "100G",
        }
    }
}

impl fmt::Display for Bandwidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Bandwidth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|bandwidth| bandwidth.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("invalid bandwidth `{s}`, valid values: 1G, 10G, 25G, 40G, 100G"))
    }
}

/// Redundancy protocol a link participates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Redundancy {
    Ha,
    Vc,
    Vss,
    Vpc,
    Mlag,
    Stack,
}

/// One end of a link.
///
/// `Pin` only exists before hierarchical resolution (and in per-sheet views);
/// merged graphs only carry `Node` and `Port`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Endpoint {
    Node(String),
    Port {
        node: String,
        port: String,
    },
    Pin {
        #[serde(rename = "node")]
        subgraph: String,
        pin: String,
    },
}

impl Endpoint {
    pub fn node(id: impl Into<String>) -> Self {
        Self::Node(id.into())
    }

    pub fn port(node: impl Into<String>, port: impl Into<String>) -> Self {
        Self::Port {
            node: node.into(),
            port: port.into(),
        }
    }

    pub fn pin(subgraph: impl Into<String>, pin: impl Into<String>) -> Self {
        Self::Pin {
            subgraph: subgraph.into(),
            pin: pin.into(),
        }
    }

    /// The node id (or subgraph id for pin references).
    pub fn node_id(&self) -> &str {
        match self {
            Self::Node(node) | Self::Port { node, .. } => node,
            Self::Pin { subgraph, .. } => subgraph,
        }
    }

    pub fn port_name(&self) -> Option<&str> {
        match self {
            Self::Port { port, .. } => Some(port),
            Self::Node(_) | Self::Pin { .. } => None,
        }
    }

    pub fn is_pin(&self) -> bool {
        matches!(self, Self::Pin { .. })
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Node(node) => write!(f, "{node}"),
            Self::Port { node, port } => write!(f, "{node}:{port}"),
            Self::Pin { subgraph, pin } => write!(f, "{subgraph}#{pin}"),
        }
    }
}

/// Explicit visual overrides for a link.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct LinkStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dasharray: Option<String>,
}

/// A connection between two endpoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Link {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub from: Endpoint,
    pub to: Endpoint,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bandwidth: Option<Bandwidth>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub vlan: Vec<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redundancy: Option<Redundancy>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub label: Vec<String>,
    pub style: LinkStyle,
}

impl Link {
    pub fn new(from: Endpoint, to: Endpoint) -> Self {
        Self {
            id: None,
            from,
            to,
            bandwidth: None,
            vlan: Vec::new(),
            redundancy: None,
            label: Vec::new(),
            style: LinkStyle::default(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_bandwidth(mut self, bandwidth: Bandwidth) -> Self {
        self.bandwidth = Some(bandwidth);
        self
    }

    pub fn with_vlan(mut self, vlan: impl IntoIterator<Item = u32>) -> Self {
        self.vlan = vlan.into_iter().collect();
        self
    }

    /// Stable key for this link: its id, or `link-<index>` for anonymous links.
    pub fn key(&self, index: usize) -> String {
        self.id.clone().unwrap_or_else(|| format!("link-{index}"))
    }

    /// Number of parallel strokes; links without bandwidth draw one.
    pub fn line_count(&self) -> usize {
        self.bandwidth.map_or(1, |bandwidth| bandwidth.line_count())
    }

    pub fn is_export_connector(&self) -> bool {
        self.id
            .as_deref()
            .is_some_and(|id| id.starts_with(EXPORT_LINK_PREFIX))
    }
}
