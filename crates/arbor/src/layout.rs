//! Layout engine for mind-map trees.
//!
//! [`layout`] is a pure function from a [`Tree`], a [`DiagramType`] and
//! [`LayoutParams`] to a [`Layout`]: every node gets a position in diagram
//! space and every parent-child pair gets an [`EdgePath`]. The same inputs
//! always produce the same coordinates, and the input tree is never mutated.
//!
//! The layout families are:
//!
//! - radial (`mind-map`): tidy tree wrapped around the root
//! - logical (`logical-structure`, `logical-structure-left`, `fishbone`):
//!   tidy tree growing right or left, with curved or elbow connectors
//! - horizontal: two-sided tree with fixed spacings
//! - outline (`markdown`): indented heading rows
//!
//! # Example
//!
//! ```
//! # use arbor::layout::{layout, LayoutParams};
//! # use arbor_core::{settings::DiagramType, tree::{Node, Tree}};
//! let tree = Tree::new(
//!     Node::new("root", "Topic")
//!         .with_child(Node::new("a", "A"))
//!         .with_child(Node::new("b", "B")),
//! ).unwrap();
//!
//! let params = LayoutParams::for_diagram(DiagramType::Horizontal);
//! let layout = layout(&tree, DiagramType::Horizontal, &params);
//!
//! assert_eq!(layout.nodes().len(), 3);
//! assert_eq!(layout.edges().len(), 2);
//! ```

mod horizontal;
mod logical;
mod outline;
mod path;
mod radial;
mod tidy;

pub use outline::OutlineState;
pub use path::EdgePath;

use std::collections::HashSet;

use log::{debug, info, trace};

use arbor_core::{
    geometry::{Insets, Point, Polar, Size},
    identifier::Id,
    settings::DiagramType,
    tree::{Node, Tree},
};

/// Default drawing surface of the tree families.
pub const DEFAULT_CANVAS: Size = Size::new(800.0, 500.0);

/// Default drawing surface of the horizontal family.
pub const HORIZONTAL_CANVAS: Size = Size::new(2000.0, 1200.0);

/// Which side of the root a node grows on.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Not split by side (the root, and every non-horizontal layout).
    #[default]
    None,
    Left,
    Right,
}

/// A node placed in diagram space.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedNode {
    id: Id,
    name: String,
    position: Point,
    depth: usize,
    side: Side,
    parent: Option<Id>,
    has_children: bool,
    polar: Option<Polar>,
}

impl PositionedNode {
    fn new(node: &Node, position: Point, depth: usize, parent: Option<Id>) -> Self {
        Self {
            id: node.id(),
            name: node.name().to_string(),
            position,
            depth,
            side: Side::None,
            parent,
            has_children: !node.is_leaf(),
            polar: None,
        }
    }

    fn with_side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }

    fn with_polar(mut self, polar: Polar) -> Self {
        self.polar = Some(polar);
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Position in diagram space, before the layout origin is applied.
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn x(&self) -> f32 {
        self.position.x()
    }

    pub fn y(&self) -> f32 {
        self.position.y()
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn parent(&self) -> Option<Id> {
        self.parent
    }

    /// Whether the source node has children, visible or not.
    pub fn has_children(&self) -> bool {
        self.has_children
    }

    /// Angle and radius assigned by the radial layout.
    pub fn polar(&self) -> Option<Polar> {
        self.polar
    }

    /// Markdown heading level of this node: depth plus one, capped at six.
    pub fn heading_level(&self) -> usize {
        (self.depth + 1).min(arbor_outline::MAX_HEADING_LEVEL)
    }
}

/// A parent-child connector.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    from: Id,
    to: Id,
    path: EdgePath,
}

impl Edge {
    pub fn new(from: Id, to: Id, path: EdgePath) -> Self {
        Self { from, to, path }
    }

    pub fn from(&self) -> Id {
        self.from
    }

    pub fn to(&self) -> Id {
        self.to
    }

    pub fn path(&self) -> &EdgePath {
        &self.path
    }
}

/// The positioned graph produced by [`layout`].
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    diagram_type: DiagramType,
    nodes: Vec<PositionedNode>,
    edges: Vec<Edge>,
    origin: Point,
    canvas: Size,
    node_size: Option<Size>,
}

impl Layout {
    /// An empty layout over `canvas`; renders as the "no data" placeholder.
    pub fn empty(diagram_type: DiagramType, canvas: Size) -> Self {
        Self {
            diagram_type,
            nodes: Vec::new(),
            edges: Vec::new(),
            origin: canvas.center(),
            canvas,
            node_size: None,
        }
    }

    pub fn diagram_type(&self) -> DiagramType {
        self.diagram_type
    }

    /// Positioned nodes in pre-order.
    pub fn nodes(&self) -> &[PositionedNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Translation from diagram space to device space.
    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn canvas(&self) -> Size {
        self.canvas
    }

    /// Fixed node box, for the families that draw every node at one size.
    pub fn node_size(&self) -> Option<Size> {
        self.node_size
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: Id) -> Option<&PositionedNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Maps a diagram-space point to device space.
    pub fn to_device(&self, point: Point) -> Point {
        self.origin.add_point(point)
    }
}

/// Fixed spacings of the horizontal two-sided layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizontalSpacing {
    horizontal: f32,
    vertical: f32,
    grandchild: f32,
    node_size: Size,
}

impl HorizontalSpacing {
    pub fn new(horizontal: f32, vertical: f32, grandchild: f32, node_size: Size) -> Self {
        Self {
            horizontal,
            vertical,
            grandchild,
            node_size,
        }
    }

    /// Distance between consecutive depth columns.
    pub fn horizontal(&self) -> f32 {
        self.horizontal
    }

    /// Height of one child slot.
    pub fn vertical(&self) -> f32 {
        self.vertical
    }

    /// Distance between stacked grandchildren.
    pub fn grandchild(&self) -> f32 {
        self.grandchild
    }

    pub fn node_size(&self) -> Size {
        self.node_size
    }
}

impl Default for HorizontalSpacing {
    fn default() -> Self {
        Self::new(300.0, 120.0, 100.0, Size::new(180.0, 40.0))
    }
}

/// Row geometry of the outline layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlineSpacing {
    indent: f32,
    row_height: f32,
}

impl OutlineSpacing {
    pub fn new(indent: f32, row_height: f32) -> Self {
        Self { indent, row_height }
    }

    pub fn indent(&self) -> f32 {
        self.indent
    }

    pub fn row_height(&self) -> f32 {
        self.row_height
    }
}

impl Default for OutlineSpacing {
    fn default() -> Self {
        Self::new(24.0, 32.0)
    }
}

/// Inputs of the layout engine besides the tree itself.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutParams {
    canvas: Size,
    margin: Insets,
    horizontal: HorizontalSpacing,
    outline: OutlineSpacing,
    collapsed: HashSet<Id>,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            canvas: DEFAULT_CANVAS,
            margin: Insets::new(50.0, 150.0, 50.0, 150.0),
            horizontal: HorizontalSpacing::default(),
            outline: OutlineSpacing::default(),
            collapsed: HashSet::new(),
        }
    }
}

impl LayoutParams {
    /// Default parameters with the canvas of `diagram_type`'s family.
    pub fn for_diagram(diagram_type: DiagramType) -> Self {
        let canvas = match diagram_type {
            DiagramType::Horizontal => HORIZONTAL_CANVAS,
            _ => DEFAULT_CANVAS,
        };
        Self::default().with_canvas(canvas)
    }

    pub fn with_canvas(mut self, canvas: Size) -> Self {
        self.canvas = canvas;
        self
    }

    pub fn with_margin(mut self, margin: Insets) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_horizontal(mut self, horizontal: HorizontalSpacing) -> Self {
        self.horizontal = horizontal;
        self
    }

    pub fn with_outline(mut self, outline: OutlineSpacing) -> Self {
        self.outline = outline;
        self
    }

    /// Hides the descendants of every listed node in the outline layout.
    pub fn with_collapsed(mut self, collapsed: impl IntoIterator<Item = Id>) -> Self {
        self.collapsed = collapsed.into_iter().collect();
        self
    }

    pub fn canvas(&self) -> Size {
        self.canvas
    }

    pub fn margin(&self) -> Insets {
        self.margin
    }

    pub fn horizontal(&self) -> HorizontalSpacing {
        self.horizontal
    }

    pub fn outline(&self) -> OutlineSpacing {
        self.outline
    }

    pub fn collapsed(&self) -> &HashSet<Id> {
        &self.collapsed
    }
}

/// Lays out `tree` as `diagram_type`.
pub fn layout(tree: &Tree, diagram_type: DiagramType, params: &LayoutParams) -> Layout {
    info!(diagram_type = diagram_type.name(), nodes = tree.len(); "Computing layout");

    let layout = match diagram_type {
        DiagramType::MindMap => radial::layout(tree, params),
        DiagramType::LogicalStructure => logical::layout(tree, params, logical::Variant::Right),
        DiagramType::LogicalStructureLeft => logical::layout(tree, params, logical::Variant::Left),
        DiagramType::Fishbone => logical::layout(tree, params, logical::Variant::Fishbone),
        DiagramType::Horizontal => horizontal::layout(tree, params),
        DiagramType::Markdown => outline::layout(tree, params),
    };

    debug!(
        nodes = layout.nodes.len(),
        edges = layout.edges.len(),
        origin_x = layout.origin.x(),
        origin_y = layout.origin.y();
        "Layout computed"
    );
    trace!(nodes:? = layout.nodes; "Positioned nodes");

    layout
}

/// Index arena over a tree in pre-order: index 0 is the root and every
/// parent precedes its children.
#[derive(Debug)]
struct Hierarchy<'a> {
    entries: Vec<Entry<'a>>,
}

#[derive(Debug)]
struct Entry<'a> {
    node: &'a Node,
    depth: usize,
    parent: Option<usize>,
    children: Vec<usize>,
}

impl<'a> Hierarchy<'a> {
    fn new(tree: &'a Tree) -> Self {
        Self::with_collapsed(tree, &HashSet::new())
    }

    /// Builds the arena, skipping the descendants of every collapsed node.
    fn with_collapsed(tree: &'a Tree, collapsed: &HashSet<Id>) -> Self {
        let mut entries: Vec<Entry<'a>> = Vec::with_capacity(tree.len());
        let mut stack = vec![(tree.root(), 0, None)];

        while let Some((node, depth, parent)) = stack.pop() {
            let index = entries.len();
            if let Some(parent) = parent {
                let parent_entry: &mut Entry<'a> = &mut entries[parent];
                parent_entry.children.push(index);
            }
            entries.push(Entry {
                node,
                depth,
                parent,
                children: Vec::new(),
            });

            if !collapsed.contains(&node.id()) {
                stack.extend(
                    node.children()
                        .iter()
                        .rev()
                        .map(|child| (child, depth + 1, Some(index))),
                );
            }
        }

        Self { entries }
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn node(&self, index: usize) -> &'a Node {
        self.entries[index].node
    }

    fn depth(&self, index: usize) -> usize {
        self.entries[index].depth
    }

    fn parent(&self, index: usize) -> Option<usize> {
        self.entries[index].parent
    }

    fn children(&self, index: usize) -> &[usize] {
        &self.entries[index].children
    }

    fn max_depth(&self) -> usize {
        self.entries.iter().map(|entry| entry.depth).max().unwrap_or(0)
    }

    fn parent_id(&self, index: usize) -> Option<Id> {
        self.parent(index).map(|parent| self.node(parent).id())
    }

    /// Indices with every child before its parent and siblings left to right.
    fn post_order(&self) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.len());
        let mut stack = vec![(0, 0)];

        while let Some((index, cursor)) = stack.pop() {
            if let Some(&child) = self.children(index).get(cursor) {
                stack.push((index, cursor + 1));
                stack.push((child, 0));
            } else {
                order.push(index);
            }
        }

        order
    }
}
