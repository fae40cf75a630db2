//! Linear-time tidy tree placement (Reingold-Tilford with Buchheim's
//! improvements).
//!
//! Every node gets a breadth coordinate such that siblings keep their order,
//! subtrees never overlap, and identical subtrees are drawn identically. The
//! result is normalized into a `[0, breadth] × [0, extent]` box: the extreme
//! nodes sit half a separation unit inside the breadth range, and depth maps
//! linearly onto the extent.

use arbor_core::geometry::{Point, Size};

use super::Hierarchy;

/// Per-node working state of the placement walks.
#[derive(Debug, Clone)]
struct Walker {
    /// Preliminary breadth coordinate.
    prelim: f32,
    /// Modifier applied to the whole subtree in the second walk.
    modifier: f32,
    change: f32,
    shift: f32,
    thread: Option<usize>,
    ancestor: usize,
    default_ancestor: Option<usize>,
    /// Index among siblings.
    number: usize,
}

struct TidyTree<'h, F> {
    hierarchy: &'h Hierarchy<'h>,
    walkers: Vec<Walker>,
    separation: F,
}

/// Places every node of `hierarchy` inside `area`.
///
/// The returned points are indexed like the hierarchy: `x` is the breadth
/// coordinate in `[0, area.width]` and `y` the depth coordinate in
/// `[0, area.height]`. `separation(a, b)` gives the desired distance between
/// two neighboring nodes, in breadth units before normalization.
pub(super) fn place<F>(hierarchy: &Hierarchy<'_>, area: Size, separation: F) -> Vec<Point>
where
    F: Fn(usize, usize) -> f32,
{
    let mut tidy = TidyTree::new(hierarchy, separation);
    tidy.first_walk_all();
    let breadth = tidy.second_walk();
    tidy.normalize(breadth, area)
}

impl<'h, F> TidyTree<'h, F>
where
    F: Fn(usize, usize) -> f32,
{
    fn new(hierarchy: &'h Hierarchy<'h>, separation: F) -> Self {
        // Index `len` is a virtual parent of the root.
        let walkers = (0..=hierarchy.len())
            .map(|index| Walker {
                prelim: 0.0,
                modifier: 0.0,
                change: 0.0,
                shift: 0.0,
                thread: None,
                ancestor: index,
                default_ancestor: None,
                number: 0,
            })
            .collect();

        let mut tidy = Self {
            hierarchy,
            walkers,
            separation,
        };
        for index in 0..hierarchy.len() {
            for (number, &child) in hierarchy.children(index).iter().enumerate() {
                tidy.walkers[child].number = number;
            }
        }
        tidy
    }

    fn virtual_root(&self) -> usize {
        self.hierarchy.len()
    }

    fn parent(&self, index: usize) -> usize {
        self.hierarchy
            .parent(index)
            .unwrap_or_else(|| self.virtual_root())
    }

    /// Children of `index`, treating the virtual root as the root's parent.
    fn children(&self, index: usize) -> &'h [usize] {
        let hierarchy: &'h Hierarchy<'h> = self.hierarchy;
        if index == self.virtual_root() {
            &[0]
        } else {
            hierarchy.children(index)
        }
    }

    fn next_left(&self, index: usize) -> Option<usize> {
        self.children(index)
            .first()
            .copied()
            .or(self.walkers[index].thread)
    }

    fn next_right(&self, index: usize) -> Option<usize> {
        self.children(index)
            .last()
            .copied()
            .or(self.walkers[index].thread)
    }

    fn first_walk_all(&mut self) {
        for index in self.hierarchy.post_order() {
            self.first_walk(index);
        }
        let root_prelim = self.walkers[0].prelim;
        let virtual_root = self.virtual_root();
        self.walkers[virtual_root].modifier = -root_prelim;
    }

    fn first_walk(&mut self, v: usize) {
        let parent = self.parent(v);
        let siblings = self.children(parent);
        let number = self.walkers[v].number;
        let left_sibling = number.checked_sub(1).map(|previous| siblings[previous]);

        let children = self.children(v);
        if let (Some(&first), Some(&last)) = (children.first(), children.last()) {
            self.execute_shifts(v);
            let midpoint = (self.walkers[first].prelim + self.walkers[last].prelim) / 2.0;
            if let Some(w) = left_sibling {
                self.walkers[v].prelim = self.walkers[w].prelim + (self.separation)(v, w);
                self.walkers[v].modifier = self.walkers[v].prelim - midpoint;
            } else {
                self.walkers[v].prelim = midpoint;
            }
        } else if let Some(w) = left_sibling {
            self.walkers[v].prelim = self.walkers[w].prelim + (self.separation)(v, w);
        }

        let default_ancestor = self.walkers[parent]
            .default_ancestor
            .unwrap_or(siblings[0]);
        let default_ancestor = self.apportion(v, left_sibling, default_ancestor);
        self.walkers[parent].default_ancestor = Some(default_ancestor);
    }

    /// Pushes the subtree of `v` right until it clears its left siblings.
    fn apportion(&mut self, v: usize, left_sibling: Option<usize>, ancestor: usize) -> usize {
        let Some(w) = left_sibling else {
            return ancestor;
        };
        let mut ancestor = ancestor;

        // i: inner, o: outer; p: right subtree (v), m: left forest
        let mut vip = v;
        let mut vop = v;
        let mut vim = w;
        let mut vom = self.children(self.parent(v))[0];
        let mut sip = self.walkers[vip].modifier;
        let mut sop = self.walkers[vop].modifier;
        let mut sim = self.walkers[vim].modifier;
        let mut som = self.walkers[vom].modifier;

        let mut next_im = self.next_right(vim);
        let mut next_ip = self.next_left(vip);

        while let (Some(im), Some(ip)) = (next_im, next_ip) {
            vim = im;
            vip = ip;
            let (Some(om), Some(op)) = (self.next_left(vom), self.next_right(vop)) else {
                break;
            };
            vom = om;
            vop = op;
            self.walkers[vop].ancestor = v;

            let shift = self.walkers[vim].prelim + sim - self.walkers[vip].prelim - sip
                + (self.separation)(vim, vip);
            if shift > 0.0 {
                let wm = self.next_ancestor(vim, v, ancestor);
                self.move_subtree(wm, v, shift);
                sip += shift;
                sop += shift;
            }

            sim += self.walkers[vim].modifier;
            sip += self.walkers[vip].modifier;
            som += self.walkers[vom].modifier;
            sop += self.walkers[vop].modifier;

            next_im = self.next_right(vim);
            next_ip = self.next_left(vip);
        }

        if let Some(im) = next_im {
            if self.next_right(vop).is_none() {
                self.walkers[vop].thread = Some(im);
                self.walkers[vop].modifier += sim - sop;
            }
        }

        if let Some(ip) = next_ip {
            if self.next_left(vom).is_none() {
                self.walkers[vom].thread = Some(ip);
                self.walkers[vom].modifier += sip - som;
                ancestor = v;
            }
        }

        ancestor
    }

    fn next_ancestor(&self, vim: usize, v: usize, ancestor: usize) -> usize {
        let candidate = self.walkers[vim].ancestor;
        if self.parent(candidate) == self.parent(v) {
            candidate
        } else {
            ancestor
        }
    }

    fn move_subtree(&mut self, wm: usize, wp: usize, shift: f32) {
        let subtrees = (self.walkers[wp].number - self.walkers[wm].number) as f32;
        let change = shift / subtrees;
        self.walkers[wp].change -= change;
        self.walkers[wp].shift += shift;
        self.walkers[wm].change += change;
        self.walkers[wp].prelim += shift;
        self.walkers[wp].modifier += shift;
    }

    fn execute_shifts(&mut self, v: usize) {
        let mut shift = 0.0;
        let mut change = 0.0;
        for &child in self.children(v).iter().rev() {
            let walker = &mut self.walkers[child];
            walker.prelim += shift;
            walker.modifier += shift;
            change += walker.change;
            shift += walker.shift + change;
        }
    }

    /// Resolves the final breadth coordinate of every node.
    fn second_walk(&mut self) -> Vec<f32> {
        let mut breadth = vec![0.0; self.hierarchy.len()];
        // Pre-order indices: each parent is resolved before its children.
        for (index, position) in breadth.iter_mut().enumerate() {
            let parent_modifier = self.walkers[self.parent(index)].modifier;
            *position = self.walkers[index].prelim + parent_modifier;
            self.walkers[index].modifier += parent_modifier;
        }
        breadth
    }

    fn normalize(&self, breadth: Vec<f32>, area: Size) -> Vec<Point> {
        let mut left = 0;
        let mut right = 0;
        for (index, &position) in breadth.iter().enumerate() {
            if position < breadth[left] {
                left = index;
            }
            if position > breadth[right] {
                right = index;
            }
        }

        let s = if left == right {
            1.0
        } else {
            (self.separation)(left, right) / 2.0
        };
        let tx = s - breadth[left];
        let kx = area.width() / (breadth[right] + s + tx);
        let ky = area.height() / self.hierarchy.max_depth().max(1) as f32;

        breadth
            .iter()
            .enumerate()
            .map(|(index, &position)| {
                Point::new(
                    (position + tx) * kx,
                    self.hierarchy.depth(index) as f32 * ky,
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use arbor_core::tree::{Node, Tree};

    use super::*;
    use crate::layout::tests::sample_tree;

    fn siblings_first(hierarchy: &Hierarchy<'_>) -> impl Fn(usize, usize) -> f32 {
        |a, b| {
            if hierarchy.parent(a) == hierarchy.parent(b) {
                1.0
            } else {
                2.0
            }
        }
    }

    #[test]
    fn test_single_node_sits_mid_breadth() {
        let tree = Tree::new(Node::new("root", "Only")).unwrap();
        let hierarchy = Hierarchy::new(&tree);
        let points = place(&hierarchy, Size::new(400.0, 300.0), |_, _| 1.0);

        assert_eq!(points.len(), 1);
        assert_approx_eq!(f32, points[0].x(), 200.0);
        assert_approx_eq!(f32, points[0].y(), 0.0);
    }

    #[test]
    fn test_two_children_are_symmetric() {
        let tree = Tree::new(
            Node::new("root", "Topic")
                .with_child(Node::new("a", "A"))
                .with_child(Node::new("b", "B")),
        )
        .unwrap();
        let hierarchy = Hierarchy::new(&tree);
        let points = place(&hierarchy, Size::new(400.0, 200.0), siblings_first(&hierarchy));

        // Span is 1 unit plus half a unit of padding each side: 2 units over 400.
        assert_approx_eq!(f32, points[1].x(), 100.0);
        assert_approx_eq!(f32, points[2].x(), 300.0);
        assert_approx_eq!(f32, points[0].x(), 200.0);
        assert_approx_eq!(f32, points[1].y(), 200.0);
    }

    #[test]
    fn test_parent_centered_over_children() {
        let tree = sample_tree();
        let hierarchy = Hierarchy::new(&tree);
        let points = place(&hierarchy, Size::new(600.0, 300.0), siblings_first(&hierarchy));

        for index in 0..hierarchy.len() {
            let children = hierarchy.children(index);
            if let (Some(&first), Some(&last)) = (children.first(), children.last()) {
                let midpoint = (points[first].x() + points[last].x()) / 2.0;
                assert_approx_eq!(f32, points[index].x(), midpoint, epsilon = 0.001);
            }
        }
    }

    #[test]
    fn test_sibling_order_and_spacing_preserved() {
        let tree = sample_tree();
        let hierarchy = Hierarchy::new(&tree);
        let points = place(&hierarchy, Size::new(600.0, 300.0), siblings_first(&hierarchy));

        for index in 0..hierarchy.len() {
            for pair in hierarchy.children(index).windows(2) {
                assert!(points[pair[0]].x() < points[pair[1]].x());
            }
        }
        // A1, A2, then C1 under a different parent: two units apart.
        let unit = points[3].x() - points[2].x();
        assert!(points[6].x() - points[3].x() >= 2.0 * unit - 0.001);
    }

    #[test]
    fn test_extremes_are_half_unit_inside() {
        let tree = sample_tree();
        let hierarchy = Hierarchy::new(&tree);
        let points = place(&hierarchy, Size::new(600.0, 300.0), |_, _| 1.0);

        let min = points.iter().map(|p| p.x()).fold(f32::INFINITY, f32::min);
        let max = points.iter().map(|p| p.x()).fold(f32::NEG_INFINITY, f32::max);
        let unit = points[3].x() - points[2].x();
        assert_approx_eq!(f32, min, unit / 2.0, epsilon = 0.001);
        assert_approx_eq!(f32, max, 600.0 - unit / 2.0, epsilon = 0.001);
    }

    #[test]
    fn test_depth_maps_linearly() {
        let tree = sample_tree();
        let hierarchy = Hierarchy::new(&tree);
        let points = place(&hierarchy, Size::new(600.0, 300.0), |_, _| 1.0);

        for (index, point) in points.iter().enumerate() {
            assert_approx_eq!(f32, point.y(), hierarchy.depth(index) as f32 * 150.0);
        }
    }
}

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use arbor_core::tree::Tree;

    use super::*;
    use crate::layout::proptest_tests::tree_strategy;

    // ===================
    // Check functions
    // ===================

    /// Nodes stay inside the area and never share a spot on one depth level.
    fn check_levels_do_not_overlap(tree: &Tree) -> Result<(), TestCaseError> {
        let hierarchy = Hierarchy::new(tree);
        let area = Size::new(1000.0, 500.0);
        let points = place(&hierarchy, area, |_, _| 1.0);

        prop_assert_eq!(points.len(), hierarchy.len());
        for point in &points {
            prop_assert!(point.x() >= -0.001 && point.x() <= area.width() + 0.001);
            prop_assert!(point.y() >= -0.001 && point.y() <= area.height() + 0.001);
        }

        for depth in 0..=hierarchy.max_depth() {
            let mut xs: Vec<f32> = (0..hierarchy.len())
                .filter(|&index| hierarchy.depth(index) == depth)
                .map(|index| points[index].x())
                .collect();
            xs.sort_by(f32::total_cmp);
            for pair in xs.windows(2) {
                prop_assert!(pair[1] - pair[0] > 0.0, "overlap at depth {}", depth);
            }
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn levels_do_not_overlap(tree in tree_strategy()) {
            check_levels_do_not_overlap(&tree)?;
        }
    }
}
