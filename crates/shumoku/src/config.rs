//! Configuration types for Shumoku rendering.
//!
//! This module provides configuration structures that control how topologies
//! are laid out and styled. All types implement [`serde::Deserialize`] for
//! loading from external sources such as the CLI's TOML file.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout and style settings.
//! - [`LayoutConfig`] - Spacing and sizing used by the basic layout engine.
//! - [`StyleConfig`] - Visual overrides such as background color and theme.
//!
//! # Example
//!
//! ```
//! # use shumoku::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.style().background_color().is_ok());
//! assert_eq!(config.layout().node_spacing(), 60.0);
//! ```

use serde::Deserialize;

use shumoku_core::{
    color::Color,
    geometry::Size,
    model::{EdgeStyle, Theme},
};

/// Top-level application configuration combining layout and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout and style configurations.
    pub fn new(layout: LayoutConfig, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Spacing and default sizes for the basic layout engine.
///
/// Every field is optional in the TOML file; missing values keep their
/// defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Gap between siblings in the same rank.
    node_spacing: f32,
    /// Gap between consecutive ranks.
    rank_spacing: f32,
    /// Default node width.
    node_width: f32,
    /// Default node height.
    node_height: f32,
    /// Space between a subgraph border and its content.
    subgraph_padding: f32,
    /// Height reserved for the subgraph label.
    subgraph_header: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_spacing: 60.0,
            rank_spacing: 100.0,
            node_width: 160.0,
            node_height: 80.0,
            subgraph_padding: 30.0,
            subgraph_header: 36.0,
        }
    }
}

impl LayoutConfig {
    pub fn node_spacing(&self) -> f32 {
        self.node_spacing
    }

    pub fn rank_spacing(&self) -> f32 {
        self.rank_spacing
    }

    /// Size given to nodes that do not need more room for their label.
    pub fn node_size(&self) -> Size {
        Size::new(self.node_width, self.node_height)
    }

    pub fn subgraph_padding(&self) -> f32 {
        self.subgraph_padding
    }

    pub fn subgraph_header(&self) -> f32 {
        self.subgraph_header
    }

    pub fn with_node_spacing(mut self, node_spacing: f32) -> Self {
        self.node_spacing = node_spacing;
        self
    }

    pub fn with_rank_spacing(mut self, rank_spacing: f32) -> Self {
        self.rank_spacing = rank_spacing;
        self
    }
}

/// Visual styling configuration for rendered topologies.
///
/// Fields that are not set fall back to the document's own settings, then to
/// renderer defaults.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    /// Background [`Color`] for diagrams, as a color string.
    #[serde(default)]
    background_color: Option<String>,

    /// Theme forced on every document.
    #[serde(default)]
    theme: Option<Theme>,

    /// Edge style forced on every document.
    #[serde(default)]
    edge_style: Option<EdgeStyle>,
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    pub fn theme(&self) -> Option<Theme> {
        self.theme
    }

    pub fn edge_style(&self) -> Option<EdgeStyle> {
        self.edge_style
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = Some(theme);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_layout_section_keeps_defaults() {
        let config: AppConfig = serde_json::from_str(r#"{"layout": {"rank_spacing": 140}}"#)
            .expect("valid config");

        assert_eq!(config.layout().rank_spacing(), 140.0);
        assert_eq!(config.layout().node_spacing(), 60.0);
        assert_eq!(config.layout().node_size(), Size::new(160.0, 80.0));
    }

    #[test]
    fn test_style_overrides() {
        let config: AppConfig = serde_json::from_str(
            r##"{"style": {"background_color": "#101010", "theme": "dark", "edge_style": "straight"}}"##,
        )
        .expect("valid config");

        assert!(config.style().background_color().unwrap().is_some());
        assert_eq!(config.style().theme(), Some(Theme::Dark));
        assert_eq!(config.style().edge_style(), Some(EdgeStyle::Straight));
    }

    #[test]
    fn test_invalid_background_color() {
        let config: AppConfig =
            serde_json::from_str(r#"{"style": {"background_color": "not-a-color"}}"#)
                .expect("valid config");

        let err = config.style().background_color().unwrap_err();
        assert!(err.contains("Invalid background color"));
    }
}
