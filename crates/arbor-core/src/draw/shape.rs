//! Node glyph definitions.
//!
//! This module provides the [`ShapeDefinition`] trait and the [`Shape`]
//! wrapper used to draw node glyphs: a circle, a rounded rectangle and a
//! diamond. All glyphs are centered on their position.

use std::rc::Rc;

use crate::{
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer, StrokeDefinition},
    geometry::{Point, Size},
    settings::LayoutStyle,
};

mod circle;
mod diamond;
mod rectangle;

pub use circle::CircleDefinition;
pub use diamond::DiamondDefinition;
pub use rectangle::RectangleDefinition;

/// Stroke width of the glyph outline in the tree families.
const GLYPH_STROKE_WIDTH: f32 = 2.0;

/// A trait for glyph definitions that provide stateless geometry and rendering.
pub trait ShapeDefinition: std::fmt::Debug {
    /// The extent of the glyph, excluding the stroke.
    fn size(&self) -> Size;

    /// Renders this glyph centered on `position`.
    fn render_to_svg(&self, position: Point) -> Box<dyn svg::Node>;

    /// Creates a boxed clone of this shape definition.
    fn clone_box(&self) -> Box<dyn ShapeDefinition>;

    fn fill_color(&self) -> Option<Color>;

    fn set_fill_color(&mut self, color: Option<Color>);

    fn stroke(&self) -> &StrokeDefinition;

    fn set_stroke(&mut self, stroke: StrokeDefinition);

    /// Returns true if the node label is drawn inside the glyph rather than beside it.
    fn contains_label(&self) -> bool {
        false
    }
}

/// Enable cloning of `Box<dyn ShapeDefinition>` by delegating to the clone_box method.
/// This allows `Rc::make_mut` to work with `Rc<Box<dyn ShapeDefinition>>`.
impl Clone for Box<dyn ShapeDefinition> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// A glyph instance sharing its definition with other nodes of the same style.
#[derive(Debug, Clone)]
pub struct Shape {
    definition: Rc<Box<dyn ShapeDefinition>>,
}

impl Shape {
    pub fn new(definition: Rc<Box<dyn ShapeDefinition>>) -> Self {
        Self { definition }
    }

    /// Returns a copy of this shape filled with `color`.
    ///
    /// The shared definition is cloned only when another shape still uses it.
    pub fn with_fill_color(mut self, color: Color) -> Self {
        Rc::make_mut(&mut self.definition).set_fill_color(Some(color));
        self
    }

    /// Returns a copy of this shape outlined with `stroke`.
    pub fn with_stroke(mut self, stroke: StrokeDefinition) -> Self {
        Rc::make_mut(&mut self.definition).set_stroke(stroke);
        self
    }

    pub fn fill_color(&self) -> Option<Color> {
        self.definition.fill_color()
    }

    pub fn stroke(&self) -> &StrokeDefinition {
        self.definition.stroke()
    }

    pub fn contains_label(&self) -> bool {
        self.definition.contains_label()
    }
}

impl Drawable for Shape {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Glyph, self.definition.render_to_svg(position));
        output
    }

    fn size(&self) -> Size {
        self.definition.size()
    }
}

/// Builds the glyph drawn for every node of the tree families in `style`.
///
/// Glyphs carry a white outline of width 2 and no fill; callers fill them
/// with the palette color of the node depth.
///
/// ```
/// # use arbor_core::draw::{Drawable, shape_for_style};
/// # use arbor_core::settings::LayoutStyle;
/// let rect = shape_for_style(LayoutStyle::Rect);
/// assert_eq!(rect.size().width(), 60.0);
/// assert!(rect.contains_label());
/// assert!(!shape_for_style(LayoutStyle::Standard).contains_label());
/// ```
pub fn shape_for_style(style: LayoutStyle) -> Shape {
    let definition: Box<dyn ShapeDefinition> = match style {
        LayoutStyle::Standard => Box::new(CircleDefinition::new(5.0)),
        LayoutStyle::Rect => {
            Box::new(RectangleDefinition::new(Size::new(60.0, 30.0)).with_rounded(5.0))
        }
        LayoutStyle::Diamond => Box::new(DiamondDefinition::new(10.0)),
    };
    let stroke = StrokeDefinition::new(
        Color::new("white").unwrap_or_default(),
        GLYPH_STROKE_WIDTH,
    );
    Shape::new(Rc::new(definition)).with_stroke(stroke)
}
