use arbor_core::{
    draw::{Text, TextAnchor},
    geometry::Size,
};

use super::{RenderStyle, Scene, SceneBuilder, fixed_color};

/// Message shown in place of a diagram when there is nothing to draw.
pub const PLACEHOLDER_MESSAGE: &str = "Nenhum mapa mental encontrado";

/// A scene holding only the centered "no data" message.
///
/// The message is not measured, so fitting the scene yields the neutral viewport.
pub(super) fn scene(canvas: Size, style: &RenderStyle) -> Scene {
    let mut definition = style.label_definition();
    definition
        .set_font_size(16.0)
        .set_color(fixed_color("#6b7280"))
        .set_anchor(TextAnchor::Middle);

    let mut builder = SceneBuilder::new();
    builder.add_decoration(&Text::new(&definition, PLACEHOLDER_MESSAGE), canvas.center());
    builder.mark_placeholder();
    builder.build(canvas, style.background())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_is_centered() {
        let scene = scene(Size::new(800.0, 500.0), &RenderStyle::default());
        let svg = scene.to_svg_string();

        assert!(scene.is_placeholder());
        assert!(svg.contains("x=\"400\""));
        assert!(svg.contains("y=\"250\""));
        assert!(svg.contains("text-anchor=\"middle\""));
    }
}
