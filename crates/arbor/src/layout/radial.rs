//! Radial mind-map layout.
//!
//! The tidy tree is computed over a breadth of one full turn and a depth
//! extent of a third of the smaller canvas side, then read as polar
//! coordinates around the canvas center.

use std::f32::consts::TAU;

use arbor_core::{
    geometry::{Polar, Size},
    settings::DiagramType,
    tree::Tree,
};

use super::{Edge, EdgePath, Hierarchy, Layout, LayoutParams, PositionedNode, tidy};

pub(super) fn layout(tree: &Tree, params: &LayoutParams) -> Layout {
    let hierarchy = Hierarchy::new(tree);
    let canvas = params.canvas();
    let radius = canvas.width().min(canvas.height()) / 3.0;

    // Tighter packing further out, where the same angle spans more arc.
    let separation = |a: usize, b: usize| {
        let base = if hierarchy.parent(a) == hierarchy.parent(b) {
            1.0
        } else {
            2.0
        };
        base / hierarchy.depth(a).max(1) as f32
    };
    let placed = tidy::place(&hierarchy, Size::new(TAU, radius), separation);

    let polar: Vec<Polar> = placed
        .iter()
        .map(|point| Polar::new(point.x(), point.y()))
        .collect();

    let nodes = (0..hierarchy.len())
        .map(|index| {
            PositionedNode::new(
                hierarchy.node(index),
                polar[index].to_cartesian(),
                hierarchy.depth(index),
                hierarchy.parent_id(index),
            )
            .with_polar(polar[index])
        })
        .collect();

    let edges = (1..hierarchy.len())
        .filter_map(|index| {
            let parent = hierarchy.parent(index)?;
            Some(Edge::new(
                hierarchy.node(parent).id(),
                hierarchy.node(index).id(),
                radial_link(polar[parent], polar[index]),
            ))
        })
        .collect();

    Layout {
        diagram_type: DiagramType::MindMap,
        nodes,
        edges,
        origin: canvas.center(),
        canvas,
        node_size: None,
    }
}

/// Curve leaving the source along its angle and arriving along the target's,
/// with both control points on the mid radius.
fn radial_link(source: Polar, target: Polar) -> EdgePath {
    let mid_radius = (source.radius() + target.radius()) / 2.0;
    EdgePath::Cubic {
        start: source.to_cartesian(),
        control1: Polar::new(source.angle(), mid_radius).to_cartesian(),
        control2: Polar::new(target.angle(), mid_radius).to_cartesian(),
        end: target.to_cartesian(),
    }
}


#[cfg(test)]
mod proptest_tests {
    use std::collections::HashMap;

    use proptest::prelude::*;

    use super::*;
    use crate::layout::proptest_tests::tree_strategy;

    // ===================
    // Check functions
    // ===================

    fn check_equal_radius_per_depth(tree: &Tree) -> Result<(), TestCaseError> {
        let layout = layout(tree, &LayoutParams::default());
        let mut radii: HashMap<usize, f32> = HashMap::new();

        for node in layout.nodes() {
            let polar = node.polar();
            prop_assert!(polar.is_some());
            let radius = node.position().hypot();
            let expected = *radii.entry(node.depth()).or_insert(radius);
            prop_assert!(
                (radius - expected).abs() < 0.01,
                "depth {} radius {} vs {}",
                node.depth(),
                radius,
                expected
            );
        }
        Ok(())
    }

    fn check_angles_within_turn(tree: &Tree) -> Result<(), TestCaseError> {
        let layout = layout(tree, &LayoutParams::default());
        for node in layout.nodes() {
            let angle = node.polar().map(|polar| polar.angle()).unwrap_or_default();
            prop_assert!((0.0..=TAU + 0.001).contains(&angle));
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn equal_radius_per_depth(tree in tree_strategy()) {
            check_equal_radius_per_depth(&tree)?;
        }

        #[test]
        fn angles_within_turn(tree in tree_strategy()) {
            check_angles_within_turn(&tree)?;
        }
    }
}
