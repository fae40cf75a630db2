//! Configuration types for Arbor diagram rendering.
//!
//! This module provides configuration structures that control how diagrams
//! are laid out, styled, fitted and exported. All types implement
//! [`serde::Deserialize`] for loading from external sources, and every
//! section and field may be omitted.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining every section.
//! - `[diagram]` - Default diagram type, palette and node style ([`Settings`]).
//! - [`LayoutConfig`] - Canvas, margins and spacings of the layout engine.
//! - [`StyleConfig`] - Background color and label font.
//! - [`ViewportConfig`] - Fit padding and container size.
//! - [`ExportConfig`] - PNG scale, surface and dotted backdrop.
//!
//! # Example
//!
//! ```
//! # use arbor::config::AppConfig;
//! // Use default configuration
//! let config = AppConfig::default();
//! assert!(config.style().background_color().is_ok());
//! assert_eq!(config.viewport().fit_padding(), 40.0);
//! ```

use serde::Deserialize;

use arbor_core::{
    color::Color,
    geometry::{Insets, Size},
    settings::{DiagramType, Settings},
};

use crate::{
    export::png::RasterOptions,
    layout::{
        DEFAULT_CANVAS, HORIZONTAL_CANVAS, HorizontalSpacing, LayoutParams, OutlineSpacing,
    },
    render::{DEFAULT_FONT_FAMILY, RenderStyle},
    viewport::DEFAULT_FIT_PADDING,
};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Default display settings.
    #[serde(default)]
    diagram: Settings,

    /// Layout engine section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style section.
    #[serde(default)]
    style: StyleConfig,

    /// Viewport section.
    #[serde(default)]
    viewport: ViewportConfig,

    /// Export section.
    #[serde(default)]
    export: ExportConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(
        diagram: Settings,
        layout: LayoutConfig,
        style: StyleConfig,
        viewport: ViewportConfig,
        export: ExportConfig,
    ) -> Self {
        Self {
            diagram,
            layout,
            style,
            viewport,
            export,
        }
    }

    /// Returns the default display settings.
    pub fn diagram(&self) -> &Settings {
        &self.diagram
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    pub fn viewport(&self) -> &ViewportConfig {
        &self.viewport
    }

    pub fn export(&self) -> &ExportConfig {
        &self.export
    }
}

/// Canvas, margin and spacing overrides for the layout engine.
///
/// Unset canvas dimensions use the family default: 800x500, or 2000x1200 for
/// the horizontal family.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    canvas_width: Option<f32>,
    canvas_height: Option<f32>,
    margin_top: f32,
    margin_right: f32,
    margin_bottom: f32,
    margin_left: f32,
    horizontal_spacing: f32,
    vertical_spacing: f32,
    grandchild_spacing: f32,
    node_width: f32,
    node_height: f32,
    outline_indent: f32,
    outline_row_height: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let params = LayoutParams::default();
        let margin = params.margin();
        let horizontal = params.horizontal();
        let outline = params.outline();
        Self {
            canvas_width: None,
            canvas_height: None,
            margin_top: margin.top(),
            margin_right: margin.right(),
            margin_bottom: margin.bottom(),
            margin_left: margin.left(),
            horizontal_spacing: horizontal.horizontal(),
            vertical_spacing: horizontal.vertical(),
            grandchild_spacing: horizontal.grandchild(),
            node_width: horizontal.node_size().width(),
            node_height: horizontal.node_size().height(),
            outline_indent: outline.indent(),
            outline_row_height: outline.row_height(),
        }
    }
}

impl LayoutConfig {
    /// The drawing surface for `diagram_type`.
    pub fn canvas(&self, diagram_type: DiagramType) -> Size {
        let family = match diagram_type {
            DiagramType::Horizontal => HORIZONTAL_CANVAS,
            _ => DEFAULT_CANVAS,
        };
        Size::new(
            self.canvas_width.unwrap_or(family.width()),
            self.canvas_height.unwrap_or(family.height()),
        )
    }

    /// Builds the layout parameters of `diagram_type`.
    pub fn params(&self, diagram_type: DiagramType) -> LayoutParams {
        LayoutParams::default()
            .with_canvas(self.canvas(diagram_type))
            .with_margin(Insets::new(
                self.margin_top,
                self.margin_right,
                self.margin_bottom,
                self.margin_left,
            ))
            .with_horizontal(HorizontalSpacing::new(
                self.horizontal_spacing,
                self.vertical_spacing,
                self.grandchild_spacing,
                Size::new(self.node_width, self.node_height),
            ))
            .with_outline(OutlineSpacing::new(
                self.outline_indent,
                self.outline_row_height,
            ))
    }
}

/// Visual styling configuration for rendered diagrams.
///
/// Fields that are not set fall back to renderer defaults.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    /// Background [`Color`] behind the diagram, as a color string.
    #[serde(default)]
    background_color: Option<String>,

    /// Label font family.
    #[serde(default)]
    font_family: Option<String>,
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    pub fn font_family(&self) -> &str {
        self.font_family.as_deref().unwrap_or(DEFAULT_FONT_FAMILY)
    }

    /// Combines this section with display `settings` into a render style.
    ///
    /// # Errors
    ///
    /// Returns an error if the background color is invalid.
    pub fn render_style(&self, settings: &Settings) -> Result<RenderStyle, String> {
        Ok(RenderStyle::from_settings(settings)
            .with_background(self.background_color()?)
            .with_font_family(self.font_family()))
    }
}

/// Fit-to-content configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    fit_padding: f32,
    container_width: f32,
    container_height: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            fit_padding: DEFAULT_FIT_PADDING,
            container_width: DEFAULT_CANVAS.width(),
            container_height: DEFAULT_CANVAS.height(),
        }
    }
}

impl ViewportConfig {
    /// Space kept free around fitted content.
    pub fn fit_padding(&self) -> f32 {
        self.fit_padding
    }

    /// Size of the view the diagram is fitted into.
    pub fn container(&self) -> Size {
        Size::new(self.container_width, self.container_height)
    }
}

/// Image export configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    png_scale: f32,
    surface_width: Option<f32>,
    surface_height: Option<f32>,
    dot_spacing: f32,
    dot_color: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            png_scale: 1.0,
            surface_width: None,
            surface_height: None,
            dot_spacing: 20.0,
            dot_color: String::from("#e5e7eb"),
        }
    }
}

impl ExportConfig {
    pub fn png_scale(&self) -> f32 {
        self.png_scale
    }

    /// Fixed surface size, when both dimensions are configured.
    pub fn surface(&self) -> Option<Size> {
        self.surface_width
            .zip(self.surface_height)
            .map(|(width, height)| Size::new(width, height))
    }

    /// Builds the raster options of this section.
    ///
    /// # Errors
    ///
    /// Returns an error if the dot color is invalid.
    pub fn raster_options(&self) -> Result<RasterOptions, String> {
        let dot_color = Color::new(&self.dot_color)
            .map_err(|err| format!("Invalid dot color in config: {err}"))?;
        Ok(RasterOptions::default()
            .with_surface(self.surface())
            .with_scale(self.png_scale)
            .with_dot_spacing(self.dot_spacing)
            .with_dot_color(dot_color))
    }
}
