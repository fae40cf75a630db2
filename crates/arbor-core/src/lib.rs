//! Arbor Core Types and Definitions
//!
//! This crate provides the foundational types shared by every Arbor crate:
//!
//! - **Identifiers**: Efficient string-interned node identifiers ([`identifier::Id`])
//! - **Tree**: The validated mind-map tree model ([`tree`] module)
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Palettes**: The fixed catalog of depth-indexed palettes ([`palette`] module)
//! - **Settings**: Diagram type, palette and node style selection ([`settings`] module)
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Draw**: Glyphs, labels, strokes and render layers ([`draw`] module)

pub mod color;
pub mod draw;
pub mod geometry;
pub mod identifier;
pub mod palette;
pub mod settings;
pub mod tree;
