//! Two-sided horizontal layout.
//!
//! The root sits at the origin. Its first `ceil(n / 2)` children grow to the
//! left and the rest to the right, keeping their order. Each first-level
//! child gets a vertical slot proportional to its own child count; deeper
//! nodes are stacked around their parent at a fixed pitch, one column further
//! out per level.

use arbor_core::{
    geometry::Point,
    settings::DiagramType,
    tree::{Node, Tree},
};

use super::{
    Edge, HorizontalSpacing, Layout, LayoutParams, PositionedNode, Side, logical::horizontal_link,
};

struct Placer {
    spacing: HorizontalSpacing,
    nodes: Vec<PositionedNode>,
    edges: Vec<Edge>,
}

impl Side {
    /// Direction of growth along x.
    fn sign(self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right | Side::None => 1.0,
        }
    }
}

impl Placer {
    fn place(
        &mut self,
        node: &Node,
        position: Point,
        depth: usize,
        parent: Option<&PositionedNode>,
        side: Side,
    ) -> PositionedNode {
        let placed = PositionedNode::new(node, position, depth, parent.map(PositionedNode::id))
            .with_side(side);

        if let Some(parent) = parent {
            // Connect the facing edges of the two boxes.
            let half_width = self.spacing.node_size().width() / 2.0 * side.sign();
            let start = parent.position().add_point(Point::new(half_width, 0.0));
            let end = position.sub_point(Point::new(half_width, 0.0));
            self.edges
                .push(Edge::new(parent.id(), node.id(), horizontal_link(start, end)));
        }

        self.nodes.push(placed.clone());
        placed
    }

    /// Places one side's first-level children in slots sized by their fan-out.
    fn place_side(&mut self, root: &PositionedNode, children: &[Node], side: Side) {
        let vertical = self.spacing.vertical();
        let slot = |node: &Node| vertical * node.children().len().max(1) as f32;

        let total: f32 = children.iter().map(slot).sum();
        let mut current_y = -total / 2.0;
        let x = self.spacing.horizontal() * side.sign();

        for child in children {
            let space = slot(child);
            let position = Point::new(x, current_y + space / 2.0);
            let placed = self.place(child, position, 1, Some(root), side);
            self.place_descendants(&placed, child);
            current_y += space;
        }
    }

    /// Stacks the children of `node` around its y, one column further out.
    fn place_descendants(&mut self, placed: &PositionedNode, node: &Node) {
        let pitch = self.spacing.grandchild();
        let count = node.children().len() as f32;
        let depth = placed.depth() + 1;
        let x = self.spacing.horizontal() * depth as f32 * placed.side().sign();

        for (index, child) in node.children().iter().enumerate() {
            let y = placed.y() - count * pitch / 2.0 + pitch / 2.0 + index as f32 * pitch;
            let child_placed =
                self.place(child, Point::new(x, y), depth, Some(placed), placed.side());
            self.place_descendants(&child_placed, child);
        }
    }
}

pub(super) fn layout(tree: &Tree, params: &LayoutParams) -> Layout {
    let spacing = params.horizontal();
    let mut placer = Placer {
        spacing,
        nodes: Vec::with_capacity(tree.len()),
        edges: Vec::with_capacity(tree.len().saturating_sub(1)),
    };

    let root = tree.root();
    let placed_root = placer.place(root, Point::default(), 0, None, Side::None);

    let (left, right) = split_children(root.children());
    placer.place_side(&placed_root, left, Side::Left);
    placer.place_side(&placed_root, right, Side::Right);

    let canvas = params.canvas();
    Layout {
        diagram_type: DiagramType::Horizontal,
        nodes: placer.nodes,
        edges: placer.edges,
        origin: canvas.center(),
        canvas,
        node_size: Some(spacing.node_size()),
    }
}

/// First half (rounded up) goes left, the rest right.
fn split_children(children: &[Node]) -> (&[Node], &[Node]) {
    children.split_at(children.len().div_ceil(2))
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;
    use crate::layout::proptest_tests::tree_strategy;

    // ===================
    // Check functions
    // ===================

    /// The first `ceil(n / 2)` root children go left, in order; the rest go right.
    fn check_side_split(tree: &Tree) -> Result<(), TestCaseError> {
        let layout = layout(tree, &LayoutParams::for_diagram(DiagramType::Horizontal));
        let children = tree.root().children();
        let left_count = children.len().div_ceil(2);

        let mut last_left_y = f32::NEG_INFINITY;
        let mut last_right_y = f32::NEG_INFINITY;
        for (index, child) in children.iter().enumerate() {
            let Some(node) = layout.node(child.id()) else {
                return Err(TestCaseError::fail("child not placed"));
            };
            if index < left_count {
                prop_assert_eq!(node.side(), Side::Left);
                prop_assert!(node.x() < 0.0);
                prop_assert!(node.y() > last_left_y);
                last_left_y = node.y();
            } else {
                prop_assert_eq!(node.side(), Side::Right);
                prop_assert!(node.x() > 0.0);
                prop_assert!(node.y() > last_right_y);
                last_right_y = node.y();
            }
        }
        Ok(())
    }

    /// Descendants inherit their first-level ancestor's side.
    fn check_sides_inherited(tree: &Tree) -> Result<(), TestCaseError> {
        let layout = layout(tree, &LayoutParams::for_diagram(DiagramType::Horizontal));
        for node in layout.nodes().iter().filter(|node| node.depth() > 1) {
            let parent = node.parent().and_then(|parent| layout.node(parent));
            prop_assert_eq!(parent.map(PositionedNode::side), Some(node.side()));
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn side_split(tree in tree_strategy()) {
            check_side_split(&tree)?;
        }

        #[test]
        fn sides_inherited(tree in tree_strategy()) {
            check_sides_inherited(&tree)?;
        }
    }
}
