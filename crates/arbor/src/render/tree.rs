//! Drawing pass of the tree families: radial, logical and fishbone.

use arbor_core::{
    draw::{StrokeDefinition, Text, TextAnchor, shape_for_style},
    geometry::Point,
    settings::DiagramType,
};

use super::{RenderStyle, SceneBuilder, fixed_color};
use crate::layout::Layout;

const EDGE_WIDTH: f32 = 1.5;

/// Gap between a small glyph and its label.
const LABEL_OFFSET: f32 = 8.0;

pub(super) fn draw(layout: &Layout, style: &RenderStyle, scene: &mut SceneBuilder) {
    let edge_stroke = StrokeDefinition::new(fixed_color("#ccc"), EDGE_WIDTH);
    for edge in layout.edges() {
        scene.add_edge(&edge.path().translate(layout.origin()), &edge_stroke);
    }

    let glyph = shape_for_style(style.layout_style());
    let boxed_label = glyph.contains_label();

    let mut label_definition = style.label_definition();
    let label_color = if boxed_label {
        fixed_color("#fff")
    } else {
        fixed_color("#333")
    };
    label_definition.set_color(label_color);

    for node in layout.nodes() {
        let position = layout.to_device(node.position());

        let shape = glyph
            .clone()
            .with_fill_color(style.palette().color_for_depth(node.depth()));
        scene.add_node_part(node.id(), &shape, position);

        let (offset, anchor) =
            label_placement(layout.diagram_type(), boxed_label, node.has_children());
        label_definition.set_anchor(anchor);
        let label = Text::new(&label_definition, node.name());
        scene.add_node_part(node.id(), &label, position.add_point(Point::new(offset, 0.0)));
    }
}

/// Horizontal label offset and anchor.
///
/// Labels sit on the outer side of small glyphs: before a branch, after a
/// leaf, mirrored when the tree grows left. Boxed glyphs center the label.
fn label_placement(
    diagram_type: DiagramType,
    boxed_label: bool,
    has_children: bool,
) -> (f32, TextAnchor) {
    if diagram_type == DiagramType::LogicalStructureLeft {
        if has_children {
            (LABEL_OFFSET, TextAnchor::Start)
        } else {
            (-LABEL_OFFSET, TextAnchor::End)
        }
    } else if boxed_label {
        (0.0, TextAnchor::Middle)
    } else if has_children {
        (-LABEL_OFFSET, TextAnchor::End)
    } else {
        (LABEL_OFFSET, TextAnchor::Start)
    }
}
