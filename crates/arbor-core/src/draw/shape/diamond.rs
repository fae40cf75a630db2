use svg::node::element::{self as svg_element, path::Data};

use super::ShapeDefinition;
use crate::{
    apply_stroke,
    color::Color,
    draw::StrokeDefinition,
    geometry::{Point, Size},
};

/// Diamond glyph definition: a square rotated by 45 degrees.
#[derive(Debug, Clone)]
pub struct DiamondDefinition {
    /// Distance from the center to each vertex.
    half_diagonal: f32,
    fill_color: Option<Color>,
    stroke: StrokeDefinition,
}

impl DiamondDefinition {
    pub fn new(half_diagonal: f32) -> Self {
        Self {
            half_diagonal,
            fill_color: None,
            stroke: StrokeDefinition::default(),
        }
    }
}

impl ShapeDefinition for DiamondDefinition {
    fn size(&self) -> Size {
        Size::new(self.half_diagonal * 2.0, self.half_diagonal * 2.0)
    }

    fn render_to_svg(&self, position: Point) -> Box<dyn svg::Node> {
        let (x, y, h) = (position.x(), position.y(), self.half_diagonal);
        let data = Data::new()
            .move_to((x, y - h))
            .line_to((x + h, y))
            .line_to((x, y + h))
            .line_to((x - h, y))
            .close();

        let path = svg_element::Path::new().set("d", data);
        let path = apply_stroke!(path, &self.stroke);

        match self.fill_color {
            Some(fill) => path
                .set("fill", fill.to_string())
                .set("fill-opacity", fill.alpha())
                .into(),
            None => path.set("fill", "none").into(),
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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diamond_vertices() {
        let diamond = DiamondDefinition::new(10.0);
        let svg = diamond.render_to_svg(Point::new(0.0, 0.0)).to_string();

        assert!(svg.contains("M0,-10"));
        assert!(svg.contains("L10,0"));
        assert!(svg.contains("z") || svg.contains("Z"));
    }
}
