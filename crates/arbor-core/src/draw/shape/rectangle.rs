use svg::node::element as svg_element;

use super::ShapeDefinition;
use crate::{
    apply_stroke,
    color::Color,
    draw::StrokeDefinition,
    geometry::{Point, Size},
};

/// Rectangle glyph definition
#[derive(Debug, Clone)]
pub struct RectangleDefinition {
    size: Size,
    rounded: f32,
    fill_color: Option<Color>,
    stroke: StrokeDefinition,
}

impl RectangleDefinition {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            rounded: 0.0,
            fill_color: None,
            stroke: StrokeDefinition::default(),
        }
    }

    /// Sets the corner radius.
    pub fn with_rounded(mut self, radius: f32) -> Self {
        self.rounded = radius;
        self
    }

    pub fn rounded(&self) -> f32 {
        self.rounded
    }
}

impl ShapeDefinition for RectangleDefinition {
    fn size(&self) -> Size {
        self.size
    }

    fn render_to_svg(&self, position: Point) -> Box<dyn svg::Node> {
        // Position is the center of the rectangle
        let bounds = position.to_bounds(self.size);

        let rect = svg_element::Rectangle::new()
            .set("x", bounds.min_x())
            .set("y", bounds.min_y())
            .set("width", self.size.width())
            .set("height", self.size.height())
            .set("rx", self.rounded);
        let rect = apply_stroke!(rect, &self.stroke);

        match self.fill_color {
            Some(fill) => rect
                .set("fill", fill.to_string())
                .set("fill-opacity", fill.alpha())
                .into(),
            None => rect.set("fill", "none").into(),
        }
    }

    fn clone_box(&self) -> Box<dyn ShapeDefinition> {
        Box::new(self.clone())
    }

    fn fill_color(&self) -> Option<Color> {
        self.fill_color
    }

    fn set_fill_color(&mut self, color: Option<Color>) {
        self.fill_color = color;
    }

    fn stroke(&self) -> &StrokeDefinition {
        &self.stroke
    }

    fn set_stroke(&mut self, stroke: StrokeDefinition) {
        self.stroke = stroke;
    }

    fn contains_label(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_top_left_from_center() {
        let rect = RectangleDefinition::new(Size::new(60.0, 30.0)).with_rounded(5.0);
        let svg = rect.render_to_svg(Point::new(100.0, 100.0)).to_string();

        assert!(svg.contains("x=\"70\""));
        assert!(svg.contains("y=\"85\""));
        assert!(svg.contains("rx=\"5\""));
    }
}
