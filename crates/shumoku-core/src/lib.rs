//! Shumoku Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Shumoku parser,
//! layout engine and renderer. It includes:
//!
//! - **Model**: The network topology model ([`model`] module)
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Colors**: CSS color validation, theme palettes and VLAN colors ([`color`] module)
//! - **Layout**: The layout output contract ([`layout`] module)

pub mod color;
pub mod geometry;
pub mod layout;
pub mod model;
