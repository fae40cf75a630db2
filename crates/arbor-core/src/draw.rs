//! Drawable components for mind-map rendering.
//!
//! Every visual element of a rendered diagram (node glyphs, labels, and the
//! placeholder message) implements [`Drawable`]. A drawable renders itself
//! into a [`LayeredOutput`] at a given position and reports the area it
//! covers there, which the viewport uses for fit-to-content.
//!
//! # Overview
//!
//! - [`Shape`] / [`ShapeDefinition`] - node glyphs (circle, rectangle, diamond)
//! - [`Text`] / [`TextDefinition`] - measured labels
//! - [`StrokeDefinition`] - outline color and width, applied with [`apply_stroke!`](crate::apply_stroke!)
//! - [`RenderLayer`] / [`LayeredOutput`] - z-ordered SVG output

mod layer;
mod shape;
mod stroke;
mod text;

pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use shape::{
    CircleDefinition, DiamondDefinition, RectangleDefinition, Shape, ShapeDefinition,
    shape_for_style,
};
pub use stroke::{StrokeCap, StrokeDefinition};
pub use text::{FontWeight, Text, TextAnchor, TextDefinition};

use crate::geometry::{Bounds, Point, Size};

/// An element that can render itself at a position.
pub trait Drawable: std::fmt::Debug {
    /// Renders the element with `position` as its anchor point.
    fn render_to_layers(&self, position: Point) -> LayeredOutput;

    /// The extent of the element.
    fn size(&self) -> Size;

    /// The area covered when rendered at `position`.
    ///
    /// Defaults to a box of [`size`](Drawable::size) centered on the position.
    fn bounds_at(&self, position: Point) -> Bounds {
        position.to_bounds(self.size())
    }
}
