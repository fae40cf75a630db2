//! Outline (markdown) layout: one heading row per visible node.

use std::collections::HashSet;

use indexmap::IndexSet;

use arbor_core::{
    geometry::Point,
    identifier::Id,
    settings::DiagramType,
    tree::Tree,
};

use super::{Edge, EdgePath, Hierarchy, Layout, LayoutParams, PositionedNode};

pub(super) fn layout(tree: &Tree, params: &LayoutParams) -> Layout {
    let hierarchy = Hierarchy::with_collapsed(tree, params.collapsed());
    let spacing = params.outline();

    // Arena indices are pre-order, so the index is the row.
    let positions: Vec<Point> = (0..hierarchy.len())
        .map(|row| {
            Point::new(
                hierarchy.depth(row) as f32 * spacing.indent(),
                row as f32 * spacing.row_height(),
            )
        })
        .collect();

    let nodes = (0..hierarchy.len())
        .map(|row| {
            PositionedNode::new(
                hierarchy.node(row),
                positions[row],
                hierarchy.depth(row),
                hierarchy.parent_id(row),
            )
        })
        .collect();

    let edges = (1..hierarchy.len())
        .filter_map(|row| {
            let parent = hierarchy.parent(row)?;
            Some(Edge::new(
                hierarchy.node(parent).id(),
                hierarchy.node(row).id(),
                EdgePath::Guide {
                    start: positions[parent],
                    end: positions[row],
                },
            ))
        })
        .collect();

    let canvas = params.canvas();
    let margin = params.margin();
    Layout {
        diagram_type: DiagramType::Markdown,
        nodes,
        edges,
        origin: Point::new(margin.left(), margin.top()),
        canvas,
        node_size: None,
    }
}

/// Expand/collapse state of an outline view.
///
/// A fresh state shows the root expanded and every other branch collapsed.
/// [`collapsed_set`](OutlineState::collapsed_set) turns it into the set
/// consumed by [`LayoutParams::with_collapsed`].
///
/// # Examples
///
/// ```
/// # use arbor::layout::{layout, LayoutParams, OutlineState};
/// # use arbor_core::{settings::DiagramType, tree::{Node, Tree}};
/// let tree = Tree::new(
///     Node::new("root", "Topic")
///         .with_child(Node::new("a", "A").with_child(Node::new("a1", "A1"))),
/// ).unwrap();
///
/// let mut state = OutlineState::new(&tree);
/// let params = LayoutParams::default().with_collapsed(state.collapsed_set(&tree));
/// assert_eq!(layout(&tree, DiagramType::Markdown, &params).nodes().len(), 2);
///
/// state.toggle(tree.root().children()[0].id());
/// let params = LayoutParams::default().with_collapsed(state.collapsed_set(&tree));
/// assert_eq!(layout(&tree, DiagramType::Markdown, &params).nodes().len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineState {
    expanded: IndexSet<Id>,
}

impl OutlineState {
    pub fn new(tree: &Tree) -> Self {
        Self {
            expanded: IndexSet::from([tree.root().id()]),
        }
    }

    /// Flips one node between expanded and collapsed.
    pub fn toggle(&mut self, id: Id) -> &mut Self {
        if !self.expanded.shift_remove(&id) {
            self.expanded.insert(id);
        }
        self
    }

    pub fn is_expanded(&self, id: Id) -> bool {
        self.expanded.contains(&id)
    }

    /// Expands every branch of `tree`.
    pub fn expand_all(&mut self, tree: &Tree) -> &mut Self {
        self.expanded
            .extend(tree.iter().filter(|visit| !visit.node.is_leaf()).map(|visit| visit.node.id()));
        self
    }

    /// Branches of `tree` whose children are hidden.
    pub fn collapsed_set(&self, tree: &Tree) -> HashSet<Id> {
        tree.iter()
            .map(|visit| visit.node)
            .filter(|node| !node.is_leaf() && !self.expanded.contains(&node.id()))
            .map(|node| node.id())
            .collect()
    }
}
