//! Output formats.
//!
//! [`svg`] renders a laid-out graph to a standalone SVG document and
//! [`html`] wraps one or more rendered sheets in a viewer page.

pub mod html;
pub mod svg;
