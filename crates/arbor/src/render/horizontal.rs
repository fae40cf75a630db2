//! Drawing pass of the two-sided horizontal family.

use std::rc::Rc;

use arbor_core::{
    draw::{
        FontWeight, RectangleDefinition, Shape, ShapeDefinition, StrokeDefinition, Text,
        TextAnchor,
    },
    geometry::Size,
};

use super::{RenderStyle, SceneBuilder, fixed_color};
use crate::layout::{HorizontalSpacing, Layout};

const BOX_RADIUS: f32 = 4.0;
const BOX_STROKE_WIDTH: f32 = 1.0;
const EDGE_WIDTH: f32 = 1.5;

pub(super) fn draw(layout: &Layout, style: &RenderStyle, scene: &mut SceneBuilder) {
    let edge_stroke = StrokeDefinition::new(fixed_color("#888"), EDGE_WIDTH);
    for edge in layout.edges() {
        scene.add_edge(&edge.path().translate(layout.origin()), &edge_stroke);
    }

    let node_size = layout
        .node_size()
        .unwrap_or_else(|| HorizontalSpacing::default().node_size());
    let node_box = box_shape(node_size);

    let accent = style.palette().color_for_depth(0);
    let root_box = node_box
        .clone()
        .with_fill_color(accent)
        .with_stroke(StrokeDefinition::new(accent, BOX_STROKE_WIDTH));
    let mut root_label = style.label_definition();
    root_label
        .set_font_size(14.0)
        .set_weight(FontWeight::Bold)
        .set_color(fixed_color("#fff"))
        .set_anchor(TextAnchor::Middle);

    let branch_fill = fixed_color("#f0f0f0");
    let mut branch_label = style.label_definition();
    branch_label
        .set_color(fixed_color("#333333"))
        .set_anchor(TextAnchor::Middle);

    for node in layout.nodes() {
        let position = layout.to_device(node.position());

        if node.depth() == 0 {
            scene.add_node_part(node.id(), &root_box, position);
            scene.add_node_part(node.id(), &Text::new(&root_label, node.name()), position);
        } else {
            let outline = StrokeDefinition::new(
                style.palette().color_for_depth(node.depth()),
                BOX_STROKE_WIDTH,
            );
            let shape = node_box
                .clone()
                .with_fill_color(branch_fill)
                .with_stroke(outline);
            scene.add_node_part(node.id(), &shape, position);
            scene.add_node_part(node.id(), &Text::new(&branch_label, node.name()), position);
        }
    }
}

fn box_shape(size: Size) -> Shape {
    let definition: Box<dyn ShapeDefinition> =
        Box::new(RectangleDefinition::new(size).with_rounded(BOX_RADIUS));
    Shape::new(Rc::new(definition))
}
