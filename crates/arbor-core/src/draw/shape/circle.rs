use svg::node::element as svg_element;

use super::ShapeDefinition;
use crate::{
    apply_stroke,
    color::Color,
    draw::StrokeDefinition,
    geometry::{Point, Size},
};

/// Circle glyph definition
#[derive(Debug, Clone)]
pub struct CircleDefinition {
    radius: f32,
    fill_color: Option<Color>,
    stroke: StrokeDefinition,
}

impl CircleDefinition {
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            fill_color: None,
            stroke: StrokeDefinition::default(),
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }
}

impl ShapeDefinition for CircleDefinition {
    fn size(&self) -> Size {
        Size::new(self.radius * 2.0, self.radius * 2.0)
    }

    fn render_to_svg(&self, position: Point) -> Box<dyn svg::Node> {
        let circle = svg_element::Circle::new()
            .set("cx", position.x())
            .set("cy", position.y())
            .set("r", self.radius);
        let circle = apply_stroke!(circle, &self.stroke);

        match self.fill_color {
            Some(fill) => circle
                .set("fill", fill.to_string())
                .set("fill-opacity", fill.alpha())
                .into(),
            None => circle.set("fill", "none").into(),
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
