//! PNG export.
//!
//! The scene is composited over a white surface stamped with a grid of small
//! dots, the same backdrop the interactive view shows. The scene's SVG is
//! rasterized with resvg as an opaque image source: nothing is re-laid out.

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{debug, info};
use thiserror::Error;

use arbor_core::{color::Color, geometry::Size};

use super::{Error as ExportError, Exporter};
use crate::{render::Scene, viewport::ViewportState};

#[derive(Debug, Error)]
pub enum RasterError {
    #[error("failed to parse SVG")]
    SvgParse,

    #[error("failed to allocate pixmap for raster rendering")]
    PixmapAlloc,

    #[error("failed to encode PNG")]
    PngEncode,
}

pub type Result<T> = std::result::Result<T, RasterError>;

/// Surface and backdrop settings of a PNG export.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterOptions {
    surface: Option<Size>,
    scale: f32,
    background: Color,
    dot_color: Color,
    dot_spacing: f32,
    dot_radius: f32,
    viewport: Option<ViewportState>,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            surface: None,
            scale: 1.0,
            background: Color::new("white").unwrap_or_default(),
            dot_color: Color::new("#e5e7eb").unwrap_or_default(),
            dot_spacing: 20.0,
            dot_radius: 1.0,
            viewport: None,
        }
    }
}

impl RasterOptions {
    /// Overrides the surface size, which otherwise is the scene canvas.
    pub fn with_surface(mut self, surface: Option<Size>) -> Self {
        self.surface = surface;
        self
    }

    /// Device pixels per scene unit.
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_dot_color(mut self, color: Color) -> Self {
        self.dot_color = color;
        self
    }

    /// Dot pitch in device pixels, independent of the scale.
    pub fn with_dot_spacing(mut self, spacing: f32) -> Self {
        self.dot_spacing = spacing;
        self
    }

    /// Rasterizes the scene as seen through `viewport`.
    pub fn with_viewport(mut self, viewport: Option<ViewportState>) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn surface(&self) -> Option<Size> {
        self.surface
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn dot_color(&self) -> Color {
        self.dot_color
    }

    pub fn dot_spacing(&self) -> f32 {
        self.dot_spacing
    }

    pub fn viewport(&self) -> Option<ViewportState> {
        self.viewport
    }
}

/// Renders `scene` to PNG bytes.
///
/// # Errors
///
/// Fails if the surface cannot be allocated, the scene SVG does not parse,
/// or PNG encoding fails.
pub fn rasterize(scene: &Scene, options: &RasterOptions) -> Result<Vec<u8>> {
    let surface = options.surface.unwrap_or_else(|| scene.canvas());
    let scale = options.scale;
    let width_px = (surface.width() * scale).ceil().max(1.0) as u32;
    let height_px = (surface.height() * scale).ceil().max(1.0) as u32;

    let mut pixmap = tiny_skia::Pixmap::new(width_px, height_px).ok_or(RasterError::PixmapAlloc)?;
    pixmap.fill(skia_color(options.background));
    stamp_dots(&mut pixmap, options);

    let svg = scene.document(options.viewport.as_ref()).to_string();
    let mut opt = usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();
    let tree = usvg::Tree::from_str(&svg, &opt).map_err(|_| RasterError::SvgParse)?;

    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    debug!(width = width_px, height = height_px; "Scene rasterized");

    pixmap.encode_png().map_err(|_| RasterError::PngEncode)
}

/// Stamps the dot grid in device pixels, starting at the top-left corner.
fn stamp_dots(pixmap: &mut tiny_skia::Pixmap, options: &RasterOptions) {
    let spacing = options.dot_spacing;
    let radius = options.dot_radius;
    if spacing <= 0.0 || radius <= 0.0 {
        return;
    }

    let mut builder = tiny_skia::PathBuilder::new();
    let mut y = 0.0;
    while y < pixmap.height() as f32 {
        let mut x = 0.0;
        while x < pixmap.width() as f32 {
            builder.push_circle(x, y, radius);
            x += spacing;
        }
        y += spacing;
    }
    let Some(path) = builder.finish() else {
        return;
    };

    let mut paint = tiny_skia::Paint::default();
    paint.set_color(skia_color(options.dot_color));
    paint.anti_alias = true;
    pixmap.fill_path(
        &path,
        &paint,
        tiny_skia::FillRule::Winding,
        tiny_skia::Transform::identity(),
        None,
    );
}

fn skia_color(color: Color) -> tiny_skia::Color {
    let [r, g, b, a] = color.to_rgba8();
    tiny_skia::Color::from_rgba8(r, g, b, a)
}

/// Writes a PNG rendering of the scene to a file.
#[derive(Debug, Clone)]
pub struct PngExporter {
    path: PathBuf,
    options: RasterOptions,
}

impl PngExporter {
    pub fn new(path: impl AsRef<Path>, options: RasterOptions) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            options,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Exporter for PngExporter {
    fn export_scene(&self, scene: &Scene) -> std::result::Result<(), ExportError> {
        let bytes = rasterize(scene, &self.options)?;
        fs::write(&self.path, bytes)?;
        info!(path:? = self.path; "PNG exported successfully");
        Ok(())
    }
}
