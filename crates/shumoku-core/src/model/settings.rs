//! Per-document rendering settings.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Fixed color palette family.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(format!("invalid theme `{s}`, valid values: light, dark")),
        }
    }
}

/// How link routes are drawn.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeStyle {
    /// Right-angle routes with rounded corners.
    #[default]
    Orthogonal,
    /// A single segment between the endpoints.
    Straight,
    /// The route points joined with rounded corners.
    Polyline,
    /// A smooth curve through the route points.
    Splines,
}

impl FromStr for EdgeStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "orthogonal" => Ok(Self::Orthogonal),
            "straight" => Ok(Self::Straight),
            "polyline" => Ok(Self::Polyline),
            "splines" => Ok(Self::Splines),
            _ => Err(format!(
                "invalid edge style `{s}`, valid values: orthogonal, straight, polyline, splines"
            )),
        }
    }
}

/// Main flow direction used by the layout engine.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    #[serde(rename = "TB")]
    TopToBottom,
    #[serde(rename = "LR")]
    LeftToRight,
}

/// Corner of the diagram where the legend is placed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LegendPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    #[default]
    BottomRight,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LegendSettings {
    pub enabled: bool,
    pub position: LegendPosition,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct Settings {
    pub theme: Theme,
    pub legend: LegendSettings,
    pub edge_style: EdgeStyle,
    pub direction: Direction,
}
