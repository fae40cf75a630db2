//! Drawing pass of the markdown outline.

use std::collections::HashSet;

use arbor_core::{
    draw::{FontWeight, StrokeDefinition, Text, TextAnchor},
    geometry::Point,
    identifier::Id,
};

use super::{RenderStyle, SceneBuilder, fixed_color};
use crate::layout::Layout;

const FONT_SIZE: f32 = 14.0;
const GUIDE_WIDTH: f32 = 2.0;
const MARKER_GAP: f32 = 6.0;
const TOGGLE_OFFSET: f32 = 12.0;

pub(super) fn draw(layout: &Layout, style: &RenderStyle, scene: &mut SceneBuilder) {
    let palette = style.palette();

    for edge in layout.edges() {
        let parent_depth = layout.node(edge.from()).map_or(0, |parent| parent.depth());
        let guide = StrokeDefinition::new(palette.color_for_depth(parent_depth), GUIDE_WIDTH);
        scene.add_edge(&edge.path().translate(layout.origin()), &guide);
    }

    let expanded: HashSet<Id> = layout.edges().iter().map(|edge| edge.from()).collect();

    let mut marker_definition = style.label_definition();
    marker_definition
        .set_font_family("monospace")
        .set_font_size(FONT_SIZE)
        .set_weight(FontWeight::Bold)
        .set_anchor(TextAnchor::Start);

    let mut name_definition = style.label_definition();
    name_definition
        .set_font_size(FONT_SIZE)
        .set_anchor(TextAnchor::Start);

    let mut toggle_definition = style.label_definition();
    toggle_definition
        .set_font_size(FONT_SIZE)
        .set_color(fixed_color("#6b7280"))
        .set_anchor(TextAnchor::Middle);

    for node in layout.nodes() {
        let position = layout.to_device(node.position());

        let marker_text = "#".repeat(node.heading_level());
        marker_definition.set_color(palette.color_for_depth(node.depth()));
        let marker = Text::new(&marker_definition, &marker_text);
        scene.add_node_part(node.id(), &marker, position);

        let name_x = marker.calculate_size().width() + MARKER_GAP;
        let name = Text::new(&name_definition, node.name());
        scene.add_node_part(node.id(), &name, position.add_point(Point::new(name_x, 0.0)));

        if node.has_children() {
            let symbol = if expanded.contains(&node.id()) {
                "−"
            } else {
                "+"
            };
            scene.add_decoration(
                &Text::new(&toggle_definition, symbol),
                position.sub_point(Point::new(TOGGLE_OFFSET, 0.0)),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use arbor_core::{
        color::Color,
        palette::Palette,
        settings::{DiagramType, LayoutStyle},
        tree::{Node, Tree},
    };

    use super::*;
    use crate::{
        layout::{LayoutParams, layout},
        render::render,
    };

    fn tree() -> Tree {
        Tree::new(
            Node::new("root", "Topic")
                .with_child(Node::new("a", "Alpha").with_child(Node::new("a1", "Leaf")))
                .with_child(Node::new("b", "Beta")),
        )
        .unwrap()
    }

    #[test]
    fn test_heading_markers_by_level() {
        let tree = tree();
        let layout = layout(&tree, DiagramType::Markdown, &LayoutParams::default());
        let svg = render(&layout, &RenderStyle::default()).to_svg_string();

        assert!(svg.contains("###"));
        assert!(!svg.contains("####"));
        assert!(svg.contains("Alpha"));
    }

    #[test]
    fn test_guides_use_parent_color() {
        let tree = tree();
        let layout = layout(&tree, DiagramType::Markdown, &LayoutParams::default());
        let style = RenderStyle::new(Palette::Purple, LayoutStyle::Standard);
        let svg = render(&layout, &style).to_svg_string();

        let root_color = Palette::Purple.color_for_depth(0).to_string();
        let branch_color = Palette::Purple.color_for_depth(1).to_string();
        // Two guides hang off the root, one off Alpha.
        assert_eq!(svg.matches(&format!("stroke=\"{root_color}\"")).count(), 2);
        assert_eq!(svg.matches(&format!("stroke=\"{branch_color}\"")).count(), 1);
    }

    #[test]
    fn test_toggles_reflect_collapse() {
        let tree = tree();
        let params = LayoutParams::default().with_collapsed([Id::new("a")]);
        let layout = layout(&tree, DiagramType::Markdown, &params);
        let scene = render(&layout, &RenderStyle::default());
        let svg = scene.to_svg_string();

        assert!(svg.contains('+'));
        assert!(svg.contains('−'));
        assert_eq!(scene.node_bounds().len(), 3);

        let grey = Color::new("#6b7280").unwrap().to_string();
        assert_eq!(svg.matches(&format!("fill=\"{grey}\"")).count(), 2);
    }
}
