//! Subgraphs (grouping containers / drill-down sheets) and their pins.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::DeviceType;

/// Direction of traffic through a pin, as seen from inside the subgraph.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PinDirection {
    In,
    Out,
    #[default]
    Bidirectional,
}

impl PinDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Out => "out",
            Self::Bidirectional => "bidirectional",
        }
    }
}

impl fmt::Display for PinDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PinDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in" => Ok(Self::In),
            "out" => Ok(Self::Out),
            "bidirectional" | "both" => Ok(Self::Bidirectional),
            _ => Err(format!(
                "invalid pin direction `{s}`, valid values: in, out, bidirectional"
            )),
        }
    }
}

/// A declared connection point on a subgraph boundary.
///
/// The parent document declares that a pin exists; the child file that fills
/// the subgraph declares which `device`/`port` it resolves to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pin {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub direction: PinDirection,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<String>,
}

impl Pin {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: None,
            direction: PinDirection::default(),
            device: None,
            port: None,
        }
    }

    pub fn with_direction(mut self, direction: PinDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_device(mut self, device: impl Into<String>, port: Option<&str>) -> Self {
        self.device = Some(device.into());
        self.port = port.map(str::to_string);
        self
    }

    /// The label shown for this pin, falling back to the id.
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.id)
    }
}

/// Visual overrides for a subgraph container.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct SubgraphStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_dasharray: Option<String>,
}

/// A grouping container. With `file` set it is also a drill-down sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Subgraph {
    pub id: String,
    pub label: String,
    pub style: SubgraphStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<DeviceType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub pins: Vec<Pin>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

impl Subgraph {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            style: SubgraphStyle::default(),
            icon: None,
            file: None,
            pins: Vec::new(),
            parent: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn with_pin(mut self, pin: Pin) -> Self {
        self.pins.push(pin);
        self
    }

    /// True when this subgraph is filled by a child document.
    pub fn has_sheet(&self) -> bool {
        self.file.is_some()
    }

    pub fn pin(&self, id: &str) -> Option<&Pin> {
        self.pins.iter().find(|pin| pin.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pin_direction_from_str() {
        assert_eq!("in".parse::<PinDirection>(), Ok(PinDirection::In));
        assert_eq!("both".parse::<PinDirection>(), Ok(PinDirection::Bidirectional));
        assert!("sideways".parse::<PinDirection>().is_err());
    }

    #[test]
    fn test_pin_display_label() {
        let pin = Pin::new("uplink");
        assert_eq!(pin.display_label(), "uplink");

        let labelled = Pin {
            label: Some("WAN".to_string()),
            ..Pin::new("uplink")
        };
        assert_eq!(labelled.display_label(), "WAN");
    }

    #[test]
    fn test_subgraph_has_sheet() {
        assert!(!Subgraph::new("dc1").has_sheet());
        assert!(Subgraph::new("dc1").with_file("./dc1.yaml").has_sheet());
    }

    #[test]
    fn test_subgraph_pin_lookup() {
        let subgraph = Subgraph::new("dc1").with_pin(Pin::new("uplink"));
        assert!(subgraph.pin("uplink").is_some());
        assert!(subgraph.pin("downlink").is_none());
    }
}
