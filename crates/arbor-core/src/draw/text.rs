//! Node labels and other text elements.
//!
//! This module provides [`TextDefinition`], a reusable label style, and
//! [`Text`], a measurable element pairing content with a definition. Labels
//! are measured with real font metrics so the viewport can fit the rendered
//! content rather than the bare node positions.
//!
//! # Quick Start
//!
//! ```
//! # use arbor_core::draw::{Drawable, TextAnchor, TextDefinition, Text};
//! let mut style = TextDefinition::new();
//! style.set_font_size(14.0).set_anchor(TextAnchor::Start);
//!
//! let text = Text::new(&style, "Central topic");
//! assert!(text.size().width() > 0.0);
//! ```

use std::{
    fmt,
    sync::{Arc, Mutex, OnceLock, PoisonError},
};

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping, Weight};
use log::info;
use svg::{self, node::element as svg_element};

use crate::{
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer},
    geometry::{Bounds, Point, Size},
};

/// Vertical offset that centers a single line of text on its anchor point.
const BASELINE_SHIFT: &str = ".31em";

/// Fallback glyph advance, as a fraction of the font size, when no font can shape the text.
const FALLBACK_ADVANCE: f32 = 0.55;

/// Horizontal alignment of a label relative to its anchor point.
///
/// Maps directly to SVG `text-anchor` values.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    /// Text starts at the anchor and extends right.
    Start,
    #[default]
    Middle,
    /// Text ends at the anchor.
    End,
}

impl TextAnchor {
    pub fn to_svg_value(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

impl FontWeight {
    pub fn to_svg_value(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Bold => "bold",
        }
    }
}

impl fmt::Display for FontWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_svg_value())
    }
}

/// Defines the visual style of a label.
///
/// # Default Values
///
/// | Property | Default |
/// |----------|---------|
/// | Font family | `"sans-serif"` |
/// | Font size | `12` px |
/// | Weight | normal |
/// | Color | `#333` |
/// | Anchor | middle |
#[derive(Debug, Clone, PartialEq)]
pub struct TextDefinition {
    font_family: String,
    font_size: f32,
    weight: FontWeight,
    color: Color,
    anchor: TextAnchor,
}

impl TextDefinition {
    /// Creates a new text definition with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the font size in pixels.
    pub fn set_font_size(&mut self, size: f32) -> &mut Self {
        self.font_size = size;
        self
    }

    pub fn set_font_family(&mut self, family: &str) -> &mut Self {
        self.font_family = family.to_string();
        self
    }

    pub fn set_weight(&mut self, weight: FontWeight) -> &mut Self {
        self.weight = weight;
        self
    }

    pub fn set_color(&mut self, color: Color) -> &mut Self {
        self.color = color;
        self
    }

    pub fn set_anchor(&mut self, anchor: TextAnchor) -> &mut Self {
        self.anchor = anchor;
        self
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn weight(&self) -> FontWeight {
        self.weight
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn anchor(&self) -> TextAnchor {
        self.anchor
    }
}

impl Default for TextDefinition {
    fn default() -> Self {
        Self {
            font_family: String::from("sans-serif"),
            font_size: 12.0,
            weight: FontWeight::Normal,
            color: Color::new("#333").unwrap_or_default(),
            anchor: TextAnchor::Middle,
        }
    }
}

/// A renderable label combining content with styling.
///
/// # Examples
///
/// ```
/// # use arbor_core::draw::{TextDefinition, Text};
/// let style = TextDefinition::new();
/// let text = Text::new(&style, "Topic");
///
/// let size = text.calculate_size();
/// assert!(size.width() > 0.0);
/// assert!(size.height() > 0.0);
/// assert_eq!(text.content(), "Topic");
/// ```
#[derive(Debug, Clone)]
pub struct Text<'a> {
    definition: &'a TextDefinition,
    content: &'a str,
}

impl<'a> Text<'a> {
    pub fn new(definition: &'a TextDefinition, content: &'a str) -> Self {
        Self {
            definition,
            content,
        }
    }

    pub fn content(&self) -> &str {
        self.content
    }

    /// Measures the rendered extent of this text in pixels.
    pub fn calculate_size(&self) -> Size {
        TEXT_MANAGER
            .get_or_init(TextManager::new)
            .calculate_text_size(self.content, self.definition)
    }
}

impl<'a> Drawable for Text<'a> {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let definition = self.definition;

        let mut rendered_text = svg_element::Text::new(self.content)
            .set("x", position.x())
            .set("y", position.y())
            .set("dy", BASELINE_SHIFT)
            .set("text-anchor", definition.anchor().to_svg_value())
            .set("font-family", definition.font_family())
            .set("font-size", definition.font_size())
            .set("fill", definition.color().to_string());

        if definition.weight() == FontWeight::Bold {
            rendered_text = rendered_text.set("font-weight", definition.weight().to_svg_value());
        }

        output.add_to_layer(RenderLayer::Text, Box::new(rendered_text));
        output
    }

    fn size(&self) -> Size {
        self.calculate_size()
    }

    fn bounds_at(&self, position: Point) -> Bounds {
        let size = self.size();
        let min_x = match self.definition.anchor() {
            TextAnchor::Start => position.x(),
            TextAnchor::Middle => position.x() - size.width() / 2.0,
            TextAnchor::End => position.x() - size.width(),
        };
        Bounds::new_from_top_left(
            Point::new(min_x, position.y() - size.height() / 2.0),
            size,
        )
    }
}

/// TextManager handles text measurement and font operations.
/// It keeps a single FontSystem since loading system fonts is expensive.
struct TextManager {
    font_system: Arc<Mutex<FontSystem>>,
}

impl TextManager {
    fn new() -> Self {
        info!("Initializing FontSystem");
        Self {
            font_system: Arc::new(Mutex::new(FontSystem::new())),
        }
    }

    /// Calculate the size of text in pixels using cosmic-text shaping.
    ///
    /// Falls back to an estimate from the character count when no installed
    /// font can shape the text.
    fn calculate_text_size(&self, text: &str, text_def: &TextDefinition) -> Size {
        if text.is_empty() {
            return Size::default();
        }

        let mut font_system = self
            .font_system
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let font_size = text_def.font_size();
        let metrics = Metrics::new(font_size, font_size * 1.2);

        let mut buffer = Buffer::new(&mut font_system, metrics);
        let mut buffer = buffer.borrow_with(&mut font_system);

        let weight = match text_def.weight() {
            FontWeight::Normal => Weight::NORMAL,
            FontWeight::Bold => Weight::BOLD,
        };
        let attrs = Attrs::new()
            .family(Family::Name(text_def.font_family()))
            .weight(weight);

        buffer.set_size(None, None);
        buffer.set_text(text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(true);

        let mut max_width: f32 = 0.0;
        let mut total_height: f32 = 0.0;
        for run in buffer.layout_runs() {
            if let Some(last) = run.glyphs.last() {
                max_width = max_width.max(last.x + last.w);
            }
            total_height += metrics.line_height;
        }

        if max_width <= 0.0 {
            max_width = text.chars().count() as f32 * font_size * FALLBACK_ADVANCE;
        }
        if total_height <= 0.0 {
            total_height = metrics.line_height;
        }

        Size::new(max_width, total_height)
    }
}

static TEXT_MANAGER: OnceLock<TextManager> = OnceLock::new();
