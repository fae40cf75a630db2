//! Layered tree layouts: logical structure (right or left) and fishbone.
//!
//! All three share the tidy tree computed over the canvas minus its margins,
//! with depth running along the x axis and breadth along the y axis. They
//! differ in direction and in the connector drawn between parent and child.

use arbor_core::{
    geometry::{Point, Size},
    settings::DiagramType,
    tree::Tree,
};

use super::{Edge, EdgePath, Hierarchy, Layout, LayoutParams, PositionedNode, tidy};

/// Direction and connector style of a layered layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Variant {
    /// Grows right with curved connectors.
    Right,
    /// Grows left with curved connectors.
    Left,
    /// Grows right with elbow connectors.
    Fishbone,
}

impl Variant {
    fn diagram_type(self) -> DiagramType {
        match self {
            Self::Right => DiagramType::LogicalStructure,
            Self::Left => DiagramType::LogicalStructureLeft,
            Self::Fishbone => DiagramType::Fishbone,
        }
    }
}

pub(super) fn layout(tree: &Tree, params: &LayoutParams, variant: Variant) -> Layout {
    let hierarchy = Hierarchy::new(tree);
    let canvas = params.canvas();
    let margin = params.margin();

    let area = Size::new(
        canvas.height() - margin.vertical_sum(),
        canvas.width() - margin.horizontal_sum(),
    );
    let separation = |a: usize, b: usize| {
        if hierarchy.parent(a) == hierarchy.parent(b) {
            1.0
        } else {
            2.0
        }
    };
    let placed = tidy::place(&hierarchy, area, separation);

    // Tidy breadth runs down the y axis, depth along x.
    let positions: Vec<Point> = placed
        .iter()
        .map(|point| {
            let x = match variant {
                Variant::Left => -point.y(),
                Variant::Right | Variant::Fishbone => point.y(),
            };
            Point::new(x, point.x())
        })
        .collect();

    let nodes = (0..hierarchy.len())
        .map(|index| {
            PositionedNode::new(
                hierarchy.node(index),
                positions[index],
                hierarchy.depth(index),
                hierarchy.parent_id(index),
            )
        })
        .collect();

    let edges = (1..hierarchy.len())
        .filter_map(|index| {
            let parent = hierarchy.parent(index)?;
            let source = positions[parent];
            let target = positions[index];
            let path = match variant {
                Variant::Right | Variant::Left => horizontal_link(source, target),
                Variant::Fishbone => EdgePath::Elbow {
                    start: source,
                    mid_x: (source.x() + target.x()) / 2.0,
                    end: target,
                },
            };
            Some(Edge::new(
                hierarchy.node(parent).id(),
                hierarchy.node(index).id(),
                path,
            ))
        })
        .collect();

    let origin = match variant {
        Variant::Left => Point::new(canvas.width() - margin.right(), margin.top()),
        Variant::Right | Variant::Fishbone => Point::new(margin.left(), margin.top()),
    };

    Layout {
        diagram_type: variant.diagram_type(),
        nodes,
        edges,
        origin,
        canvas,
        node_size: None,
    }
}

/// S-curve with both control points on the horizontal midpoint.
pub(super) fn horizontal_link(source: Point, target: Point) -> EdgePath {
    let mid_x = (source.x() + target.x()) / 2.0;
    EdgePath::Cubic {
        start: source,
        control1: Point::new(mid_x, source.y()),
        control2: Point::new(mid_x, target.y()),
        end: target,
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use arbor_core::tree::Node;

    use super::*;

    /// Root with children A and B, where A has one child A1.
    fn four_node_tree() -> Tree {
        Tree::new(
            Node::new("root", "Root")
                .with_child(Node::new("a", "A").with_child(Node::new("a1", "A1")))
                .with_child(Node::new("b", "B")),
        )
        .unwrap()
    }

    fn node<'a>(layout: &'a Layout, name: &str) -> &'a PositionedNode {
        layout
            .nodes()
            .iter()
            .find(|node| node.name() == name)
            .unwrap()
    }

    #[test]
    fn test_four_node_logical_structure() {
        let tree = four_node_tree();
        let layout = layout(&tree, &LayoutParams::default(), Variant::Right);

        assert_eq!(layout.diagram_type(), DiagramType::LogicalStructure);
        assert_eq!(layout.origin(), Point::new(150.0, 50.0));
        assert_eq!(layout.nodes().len(), 4);
        assert_eq!(layout.edges().len(), 3);

        // Depth extent 500 over height 2; breadth 400.
        let root = node(&layout, "Root");
        let a = node(&layout, "A");
        let a1 = node(&layout, "A1");
        let b = node(&layout, "B");
        assert_approx_eq!(f32, root.x(), 0.0);
        assert_approx_eq!(f32, a.x(), 250.0);
        assert_approx_eq!(f32, b.x(), 250.0);
        assert_approx_eq!(f32, a1.x(), 500.0);
        assert_eq!(a1.depth(), 2);

        // A and B are one unit apart, padded by half a unit: 400 / 2.
        assert_approx_eq!(f32, a.y(), 100.0, epsilon = 0.001);
        assert_approx_eq!(f32, b.y(), 300.0, epsilon = 0.001);
        assert_approx_eq!(f32, a1.y(), a.y(), epsilon = 0.001);
        assert_approx_eq!(f32, root.y(), 200.0, epsilon = 0.001);

        assert!(a.has_children());
        assert!(!b.has_children());
        assert_eq!(b.parent(), Some(root.id()));
    }

    #[test]
    fn test_left_variant_mirrors_x() {
        let tree = four_node_tree();
        let right = layout(&tree, &LayoutParams::default(), Variant::Right);
        let left = layout(&tree, &LayoutParams::default(), Variant::Left);

        for (r, l) in right.nodes().iter().zip(left.nodes()) {
            assert_approx_eq!(f32, l.x(), -r.x());
            assert_approx_eq!(f32, l.y(), r.y());
        }
        assert_eq!(left.origin(), Point::new(650.0, 50.0));
        assert_eq!(left.diagram_type(), DiagramType::LogicalStructureLeft);
    }

    #[test]
    fn test_curved_link_controls() {
        let path = horizontal_link(Point::new(0.0, 10.0), Point::new(100.0, 90.0));
        assert_eq!(
            path.points(),
            vec![
                Point::new(0.0, 10.0),
                Point::new(50.0, 10.0),
                Point::new(50.0, 90.0),
                Point::new(100.0, 90.0),
            ]
        );
    }

    #[test]
    fn test_fishbone_shares_positions() {
        let tree = four_node_tree();
        let logical = layout(&tree, &LayoutParams::default(), Variant::Right);
        let fishbone = layout(&tree, &LayoutParams::default(), Variant::Fishbone);

        assert_eq!(logical.nodes(), fishbone.nodes());
        assert!(
            fishbone
                .edges()
                .iter()
                .all(|edge| matches!(edge.path(), EdgePath::Elbow { .. }))
        );
    }
}
