use indexmap::IndexMap;
use svg::{
    Document,
    node::element::{Group, Path, Rectangle},
};

use arbor_core::{
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer, StrokeDefinition},
    geometry::{Bounds, Point, Size},
    identifier::Id,
};

use crate::{layout::EdgePath, viewport::ViewportState};

/// A rendered diagram and the measured extent of everything in it.
///
/// All bounds are in device space: diagram coordinates with the layout
/// origin applied, before any viewport transform.
#[derive(Debug, Clone)]
pub struct Scene {
    canvas: Size,
    content: Group,
    background: Option<Color>,
    node_bounds: IndexMap<Id, Bounds>,
    edge_bounds: Vec<Bounds>,
    placeholder: bool,
}

impl Scene {
    pub fn canvas(&self) -> Size {
        self.canvas
    }

    pub fn background(&self) -> Option<Color> {
        self.background
    }

    /// Glyph plus label bounds of every drawn node, in drawing order.
    pub fn node_bounds(&self) -> &IndexMap<Id, Bounds> {
        &self.node_bounds
    }

    pub fn bounds_of(&self, id: Id) -> Option<Bounds> {
        self.node_bounds.get(&id).copied()
    }

    pub fn edge_bounds(&self) -> &[Bounds] {
        &self.edge_bounds
    }

    /// Union of every node and edge bounds, `None` when nothing was measured.
    pub fn content_bounds(&self) -> Option<Bounds> {
        self.node_bounds
            .values()
            .chain(&self.edge_bounds)
            .copied()
            .reduce(|acc, bounds| acc.merge(&bounds))
    }

    /// Whether this is the "no data" scene of an empty layout.
    pub fn is_placeholder(&self) -> bool {
        self.placeholder
    }

    /// Builds the SVG document, with `viewport` applied to the content group.
    ///
    /// The background, when set, stays fixed under the transformed content.
    pub fn document(&self, viewport: Option<&ViewportState>) -> Document {
        let width = self.canvas.width();
        let height = self.canvas.height();

        let mut document = Document::new()
            .set("viewBox", format!("0 0 {width} {height}"))
            .set("width", width)
            .set("height", height);

        if let Some(color) = self.background {
            let background = Rectangle::new()
                .set("data-role", "background")
                .set("x", 0)
                .set("y", 0)
                .set("width", width)
                .set("height", height)
                .set("fill", color.to_string());
            document = document.add(background);
        }

        let content = match viewport {
            Some(viewport) => self.content.clone().set("transform", viewport.to_svg_transform()),
            None => self.content.clone(),
        };
        document.add(content)
    }

    /// Serializes the untransformed document.
    pub fn to_svg_string(&self) -> String {
        self.document(None).to_string()
    }

    /// Serializes the document as currently panned and zoomed.
    pub fn to_svg_string_with(&self, viewport: &ViewportState) -> String {
        self.document(Some(viewport)).to_string()
    }
}

/// Collects drawn elements and their bounds while a scene is rendered.
#[derive(Debug, Default)]
pub(super) struct SceneBuilder {
    output: LayeredOutput,
    node_bounds: IndexMap<Id, Bounds>,
    edge_bounds: Vec<Bounds>,
    placeholder: bool,
}

impl SceneBuilder {
    pub(super) fn new() -> Self {
        Self::default()
    }

    /// Draws one part of node `id` at a device `position`.
    ///
    /// Bounds of several parts of the same node are merged.
    pub(super) fn add_node_part<D: Drawable>(&mut self, id: Id, drawable: &D, position: Point) {
        let bounds = drawable.bounds_at(position);
        self.node_bounds
            .entry(id)
            .and_modify(|existing| *existing = existing.merge(&bounds))
            .or_insert(bounds);
        self.output.merge(drawable.render_to_layers(position));
    }

    /// Draws an element that belongs to no node and is not measured.
    pub(super) fn add_decoration<D: Drawable>(&mut self, drawable: &D, position: Point) {
        self.output.merge(drawable.render_to_layers(position));
    }

    /// Strokes an edge whose path is already in device space.
    pub(super) fn add_edge(&mut self, path: &EdgePath, stroke: &StrokeDefinition) {
        let element = Path::new()
            .set("d", path.to_svg_data())
            .set("fill", "none");
        let element = arbor_core::apply_stroke!(element, stroke);

        self.output.add_to_layer(RenderLayer::Edge, Box::new(element));
        self.edge_bounds.push(path.bounds());
    }

    pub(super) fn mark_placeholder(&mut self) {
        self.placeholder = true;
    }

    pub(super) fn build(self, canvas: Size, background: Option<Color>) -> Scene {
        let content = self
            .output
            .render()
            .into_iter()
            .fold(Group::new().set("class", "viewport"), |group, layer| group.add(layer));

        Scene {
            canvas,
            content,
            background,
            node_bounds: self.node_bounds,
            edge_bounds: self.edge_bounds,
            placeholder: self.placeholder,
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use arbor_core::draw::{Text, TextDefinition, shape_for_style};
    use arbor_core::settings::LayoutStyle;

    use super::*;

    fn stroke() -> StrokeDefinition {
        StrokeDefinition::new(Color::new("#ccc").unwrap(), 1.5)
    }

    #[test]
    fn test_node_parts_merge_bounds() {
        let mut builder = SceneBuilder::new();
        let glyph = shape_for_style(LayoutStyle::Rect);
        let definition = TextDefinition::new();
        let label = Text::new(&definition, "A fairly long label");

        let id = Id::new("a");
        builder.add_node_part(id, &glyph, Point::new(100.0, 100.0));
        builder.add_node_part(id, &label, Point::new(100.0, 100.0));
        let scene = builder.build(Size::new(400.0, 300.0), None);

        let bounds = scene.bounds_of(id).unwrap();
        assert_eq!(scene.node_bounds().len(), 1);
        assert!(bounds.min_y() <= 85.0);
        assert!(bounds.max_y() >= 115.0);
    }

    #[test]
    fn test_content_bounds_include_edges() {
        let mut builder = SceneBuilder::new();
        builder.add_edge(
            &EdgePath::Elbow {
                start: Point::new(10.0, 20.0),
                mid_x: 150.0,
                end: Point::new(300.0, 40.0),
            },
            &stroke(),
        );
        let scene = builder.build(Size::new(400.0, 300.0), None);

        let bounds = scene.content_bounds().unwrap();
        assert_approx_eq!(f32, bounds.min_x(), 10.0);
        assert_approx_eq!(f32, bounds.max_x(), 300.0);
        assert_eq!(scene.edge_bounds().len(), 1);
    }

    #[test]
    fn test_edges_are_unfilled() {
        let mut builder = SceneBuilder::new();
        builder.add_edge(
            &EdgePath::Guide {
                start: Point::new(0.0, 0.0),
                end: Point::new(10.0, 10.0),
            },
            &stroke(),
        );
        let svg = builder.build(Size::new(100.0, 100.0), None).to_svg_string();

        assert!(svg.contains("fill=\"none\""));
        assert!(svg.contains("stroke-width=\"1.5\""));
        assert!(svg.contains("data-layer=\"edge\""));
    }

    #[test]
    fn test_document_viewport_transform() {
        let scene = SceneBuilder::new().build(Size::new(800.0, 500.0), None);
        let untransformed = scene.to_svg_string();
        assert!(untransformed.contains("viewBox=\"0 0 800 500\""));
        assert!(!untransformed.contains("transform="));

        let viewport = ViewportState::new(1.5, Point::new(20.0, -10.0));
        let transformed = scene.to_svg_string_with(&viewport);
        assert!(transformed.contains("transform=\"translate(20, -10) scale(1.5)\""));
    }

    #[test]
    fn test_empty_scene_has_no_content_bounds() {
        let scene = SceneBuilder::new().build(Size::new(800.0, 500.0), None);
        assert!(scene.content_bounds().is_none());
        assert!(!scene.is_placeholder());
    }
}
