//! Colors: a CSS color wrapper, the fixed theme palettes and VLAN coloring.

use std::{
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use color::DynamicColor;

use crate::model::Theme;

/// Wrapper around the `DynamicColor` type from the color crate.
///
/// Used to validate user supplied colors before they reach the SVG output.
#[derive(Clone, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl Color {
    /// Parses CSS color strings such as "#ff0000", "rgb(255, 0, 0)" or "red".
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Color { color }),
            Err(err) => Err(format!("Invalid color '{color_str}': {err}")),
        }
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        svg::node::Value::from(color.to_string())
    }
}

/// Returns `user` when it is a valid CSS color, otherwise `fallback`.
///
/// Invalid values are logged and never reach the output.
pub fn color_or(user: Option<&str>, fallback: &str) -> String {
    match user {
        Some(value) => match Color::new(value) {
            // Keep the user's spelling; the wrapper only validates.
            Ok(_) => value.to_string(),
            Err(err) => {
                log::warn!(value, fallback; "Ignoring invalid color: {err}");
                fallback.to_string()
            }
        },
        None => fallback.to_string(),
    }
}

/// Fixed colors for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: &'static str,
    pub node_fill: &'static str,
    pub node_stroke: &'static str,
    pub text: &'static str,
    pub text_secondary: &'static str,
    pub link: &'static str,
    pub subgraph_fill: &'static str,
    pub subgraph_stroke: &'static str,
    pub port_fill: &'static str,
    pub port_stroke: &'static str,
    pub label_background: &'static str,
    pub export_fill: &'static str,
    pub legend_background: &'static str,
    pub shadow: &'static str,
}

impl Palette {
    pub const LIGHT: Palette = Palette {
        background: "#ffffff",
        node_fill: "#ffffff",
        node_stroke: "#94a3b8",
        text: "#1e293b",
        text_secondary: "#64748b",
        link: "#64748b",
        subgraph_fill: "#f8fafc",
        subgraph_stroke: "#cbd5e1",
        port_fill: "#334155",
        port_stroke: "#ffffff",
        label_background: "#ffffff",
        export_fill: "#e0f2fe",
        legend_background: "#ffffff",
        shadow: "#0f172a",
    };

    pub const DARK: Palette = Palette {
        background: "#0f172a",
        node_fill: "#1e293b",
        node_stroke: "#475569",
        text: "#f1f5f9",
        text_secondary: "#94a3b8",
        link: "#94a3b8",
        subgraph_fill: "#111827",
        subgraph_stroke: "#334155",
        port_fill: "#cbd5e1",
        port_stroke: "#0f172a",
        label_background: "#1e293b",
        export_fill: "#0c4a6e",
        legend_background: "#1e293b",
        shadow: "#000000",
    };

    pub fn for_theme(theme: Theme) -> &'static Palette {
        match theme {
            Theme::Light => &Self::LIGHT,
            Theme::Dark => &Self::DARK,
        }
    }
}

/// Colors assigned to VLANs.
pub const VLAN_PALETTE: [&str; 12] = [
    "#2563eb", "#16a34a", "#dc2626", "#9333ea", "#ea580c", "#0891b2", "#ca8a04", "#db2777",
    "#4f46e5", "#059669", "#7c3aed", "#0d9488",
];

/// Deterministic color for a set of VLAN ids.
///
/// A single VLAN is indexed by its id, a trunk carrying several VLANs by the
/// sum of its ids. Returns `None` for untagged links.
///
/// ```
/// # use shumoku_core::color::{vlan_color, VLAN_PALETTE};
/// assert_eq!(vlan_color(&[]), None);
/// assert_eq!(vlan_color(&[13]), Some(VLAN_PALETTE[1]));
/// assert_eq!(vlan_color(&[10, 20]), vlan_color(&[20, 10]));
/// ```
pub fn vlan_color(vlans: &[u32]) -> Option<&'static str> {
    let key: u64 = match vlans {
        [] => return None,
        [single] => u64::from(*single),
        many => many.iter().map(|&vlan| u64::from(vlan)).sum(),
    };
    let index = (key % VLAN_PALETTE.len() as u64) as usize;
    Some(VLAN_PALETTE[index])
}
