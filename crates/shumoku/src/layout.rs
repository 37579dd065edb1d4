//! Node placement.
//!
//! Placement is outside the rendering core: anything that fills a
//! [`LayoutResult`] can drive the renderer. [`BasicEngine`] is the default,
//! a deterministic rank-based compound layout.

mod basic;
mod routing;

pub use basic::BasicEngine;

use shumoku_core::{layout::LayoutResult, model::NetworkGraph};

use crate::ShumokuError;

/// Computes positions for every element of a graph.
pub trait LayoutEngine {
    /// # Errors
    ///
    /// Returns [`ShumokuError::Layout`] when the graph cannot be placed.
    fn layout(&self, graph: &NetworkGraph) -> Result<LayoutResult, ShumokuError>;
}

/// Rough text width without font metrics.
pub(crate) fn estimate_text_width(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * 0.6
}
