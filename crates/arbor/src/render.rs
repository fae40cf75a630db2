//! Rendering of positioned layouts into SVG scenes.
//!
//! [`render`] draws every node and edge of a [`Layout`] in device space (the
//! layout origin applied) and measures what it drew. The resulting [`Scene`]
//! carries the SVG content together with the per-node and per-edge bounds the
//! viewport fits against.
//!
//! Each diagram family has its own drawing pass:
//!
//! - tree families (radial, logical, fishbone): a glyph per node picked by
//!   the [`LayoutStyle`], a label beside or inside it, thin grey connectors
//! - horizontal: fixed-size boxes with the root highlighted
//! - markdown: `#`-prefixed heading rows with indentation guides
//!
//! An empty layout renders as a "no data" placeholder.
//!
//! # Example
//!
//! ```
//! # use arbor::layout::{layout, LayoutParams};
//! # use arbor::render::{render, RenderStyle};
//! # use arbor_core::{settings::DiagramType, tree::{Node, Tree}};
//! let tree = Tree::new(Node::new("root", "Topic").with_child(Node::new("a", "A"))).unwrap();
//! let layout = layout(&tree, DiagramType::MindMap, &LayoutParams::default());
//!
//! let scene = render(&layout, &RenderStyle::default());
//! assert_eq!(scene.node_bounds().len(), 2);
//! assert!(scene.to_svg_string().contains("<svg"));
//! ```

mod horizontal;
mod outline;
mod placeholder;
mod scene;
mod tree;

pub use placeholder::PLACEHOLDER_MESSAGE;
pub use scene::Scene;

use log::{debug, info};

use arbor_core::{
    color::Color,
    draw::TextDefinition,
    palette::Palette,
    settings::{DiagramType, LayoutStyle, Settings},
};

use crate::layout::Layout;

use scene::SceneBuilder;

/// Default label font.
pub const DEFAULT_FONT_FAMILY: &str = "sans-serif";

/// Visual choices applied on top of a layout.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderStyle {
    palette: Palette,
    layout_style: LayoutStyle,
    background: Option<Color>,
    font_family: String,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self::new(Palette::default(), LayoutStyle::default())
    }
}

impl RenderStyle {
    pub fn new(palette: Palette, layout_style: LayoutStyle) -> Self {
        Self {
            palette,
            layout_style,
            background: None,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
        }
    }

    /// Takes the palette and node style of the user's display settings.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.color_palette(), settings.layout_style())
    }

    /// Fills the whole canvas with `color` beneath the diagram.
    pub fn with_background(mut self, color: Option<Color>) -> Self {
        self.background = color;
        self
    }

    pub fn with_font_family(mut self, font_family: impl Into<String>) -> Self {
        self.font_family = font_family.into();
        self
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    pub fn layout_style(&self) -> LayoutStyle {
        self.layout_style
    }

    pub fn background(&self) -> Option<Color> {
        self.background
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    /// Base label styling: 12px in the configured font.
    fn label_definition(&self) -> TextDefinition {
        let mut definition = TextDefinition::new();
        definition.set_font_family(&self.font_family);
        definition
    }
}

/// Draws `layout` with `style`.
///
/// Rendering always rebuilds the whole scene; nothing is cached between calls.
pub fn render(layout: &Layout, style: &RenderStyle) -> Scene {
    if layout.is_empty() {
        info!(
            diagram_type = layout.diagram_type().name();
            "Rendering placeholder for empty layout"
        );
        return placeholder::scene(layout.canvas(), style);
    }

    info!(
        diagram_type = layout.diagram_type().name(),
        nodes = layout.nodes().len();
        "Rendering scene"
    );

    let mut builder = SceneBuilder::new();
    match layout.diagram_type() {
        DiagramType::MindMap
        | DiagramType::LogicalStructure
        | DiagramType::LogicalStructureLeft
        | DiagramType::Fishbone => tree::draw(layout, style, &mut builder),
        DiagramType::Horizontal => horizontal::draw(layout, style, &mut builder),
        DiagramType::Markdown => outline::draw(layout, style, &mut builder),
    }

    let scene = builder.build(layout.canvas(), style.background());
    debug!(
        node_bounds = scene.node_bounds().len(),
        edge_bounds = scene.edge_bounds().len();
        "Scene rendered"
    );
    scene
}

/// Parses one of the renderer's built-in CSS colors.
fn fixed_color(css: &str) -> Color {
    Color::new(css).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use arbor_core::tree::{Node, Tree};

    use super::*;
    use crate::layout::{LayoutParams, layout};

    fn small_tree() -> Tree {
        Tree::new(
            Node::new("root", "Topic")
                .with_child(Node::new("a", "A").with_child(Node::new("a1", "A1")))
                .with_child(Node::new("b", "B")),
        )
        .unwrap()
    }

    #[test]
    fn test_every_family_measures_every_node() {
        let tree = small_tree();
        for diagram_type in DiagramType::ALL {
            let layout = layout(&tree, diagram_type, &LayoutParams::for_diagram(diagram_type));
            let scene = render(&layout, &RenderStyle::default());

            assert_eq!(scene.node_bounds().len(), 4, "{}", diagram_type.name());
            assert_eq!(scene.edge_bounds().len(), 3, "{}", diagram_type.name());
            assert!(!scene.is_placeholder());
            assert!(scene.content_bounds().is_some());
        }
    }

    #[test]
    fn test_empty_layout_renders_placeholder() {
        let layout = Layout::empty(DiagramType::MindMap, crate::layout::DEFAULT_CANVAS);
        let scene = render(&layout, &RenderStyle::default());

        assert!(scene.is_placeholder());
        assert!(scene.node_bounds().is_empty());
        assert!(scene.content_bounds().is_none());
        assert!(scene.to_svg_string().contains(PLACEHOLDER_MESSAGE));
    }

    #[test]
    fn test_style_from_settings() {
        let mut settings = Settings::default();
        settings
            .set_color_palette(Palette::Earth)
            .set_layout_style(LayoutStyle::Diamond);

        let style = RenderStyle::from_settings(&settings).with_font_family("monospace");
        assert_eq!(style.palette(), Palette::Earth);
        assert_eq!(style.layout_style(), LayoutStyle::Diamond);
        assert_eq!(style.font_family(), "monospace");
        assert!(style.background().is_none());
    }

    #[test]
    fn test_background_is_drawn_first() {
        let tree = small_tree();
        let layout = layout(&tree, DiagramType::Fishbone, &LayoutParams::default());
        let style = RenderStyle::default().with_background(Some(fixed_color("#fafafa")));

        let svg = render(&layout, &style).to_svg_string();
        let background = svg.find("data-role=\"background\"").unwrap();
        let content = svg.find("class=\"viewport\"").unwrap();
        assert!(background < content);
    }
}
