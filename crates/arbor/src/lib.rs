//! Arbor - layout, rendering and viewport engine for mind-map diagrams.
//!
//! A labeled tree goes through the pipeline
//!
//! ```text
//! Tree (JSON, outline text, or a DiagramSource)
//!     ↓ layout
//! Layout (positioned nodes and edge paths)
//!     ↓ render
//! Scene (SVG content plus measured bounds)
//!     ↓ fit / interaction
//! ViewportState (zoom and pan)
//!     ↓ export
//! PNG, SVG or Markdown outline
//! ```
//!
//! [`DiagramBuilder`] drives the whole pipeline from an [`AppConfig`]; the
//! stage modules can also be used on their own.

pub mod config;
pub mod export;
pub mod interaction;
pub mod layout;
pub mod render;
pub mod session;
pub mod source;
pub mod viewport;

mod error;

pub use arbor_core::{color, draw, geometry, identifier, palette, settings, tree};

pub use error::ArborError;

use log::{debug, info, trace};

use config::AppConfig;
use export::png;
use layout::{Layout, LayoutParams};
use render::{RenderStyle, Scene};
use settings::{DiagramType, Settings};
use tree::Tree;
use viewport::ViewportState;

/// Builder for parsing, laying out, rendering and exporting mind maps.
///
/// # Examples
///
/// ```rust,no_run
/// use arbor::{DiagramBuilder, config::AppConfig, settings::Settings};
///
/// let json = r#"{"id": "root", "name": "Rust", "children": [{"id": "1", "name": "Ownership"}]}"#;
///
/// // With custom config
/// let config = AppConfig::default();
/// let builder = DiagramBuilder::new(config);
///
/// // Parse the tree
/// let tree = builder.parse_json(json)
///     .expect("Failed to parse");
///
/// // Render it with the default display settings
/// let svg = builder.render_svg(&tree, &Settings::default())
///     .expect("Failed to render");
///
/// // Or use default config
/// let builder = DiagramBuilder::default();
/// ```
#[derive(Debug, Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including layout, style and export settings
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use arbor::{DiagramBuilder, config::AppConfig};
    ///
    /// let config = AppConfig::default();
    /// let builder = DiagramBuilder::new(config);
    /// ```
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse the `{id, name, children}` JSON format into a tree.
    ///
    /// # Errors
    ///
    /// Returns [`ArborError::Input`] for malformed JSON, missing or empty ids,
    /// missing names, and duplicate ids.
    pub fn parse_json(&self, json: &str) -> Result<Tree, ArborError> {
        info!("Parsing tree JSON");
        let tree = Tree::from_json(json)?;

        debug!(nodes = tree.len(), height = tree.height(); "Tree parsed successfully");
        trace!(tree:?; "Parsed tree");
        Ok(tree)
    }

    /// Parse a Markdown outline into a tree.
    ///
    /// # Errors
    ///
    /// Returns [`ArborError::Outline`] with span diagnostics when the outline
    /// has no root heading, several root headings, or text before the first
    /// heading.
    pub fn parse_outline(&self, source: &str) -> Result<Tree, ArborError> {
        info!("Parsing outline");
        let tree = arbor_outline::parse(source)
            .map_err(|err| ArborError::new_outline_error(err, source))?;

        debug!(nodes = tree.len(); "Outline parsed successfully");
        Ok(tree)
    }

    /// Layout parameters of `diagram_type` under the configuration.
    pub fn layout_params(&self, diagram_type: DiagramType) -> LayoutParams {
        self.config.layout().params(diagram_type)
    }

    /// Lay out `tree` as the diagram type of `settings`.
    pub fn layout(&self, tree: &Tree, settings: &Settings) -> Layout {
        let diagram_type = settings.diagram_type();
        layout::layout(tree, diagram_type, &self.layout_params(diagram_type))
    }

    /// Render style combining `settings` with the configured style section.
    ///
    /// # Errors
    ///
    /// Returns [`ArborError::Config`] if the configured background color is invalid.
    pub fn render_style(&self, settings: &Settings) -> Result<RenderStyle, ArborError> {
        self.config
            .style()
            .render_style(settings)
            .map_err(ArborError::Config)
    }

    /// Lay out and draw `tree`.
    ///
    /// # Errors
    ///
    /// Returns [`ArborError::Config`] if the style configuration is invalid.
    pub fn render(&self, tree: &Tree, settings: &Settings) -> Result<Scene, ArborError> {
        let style = self.render_style(settings)?;
        let layout = self.layout(tree, settings);
        Ok(render::render(&layout, &style))
    }

    /// Draw `tree`, or the "no data" placeholder when there is no tree.
    ///
    /// # Errors
    ///
    /// Returns [`ArborError::Config`] if the style configuration is invalid.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use arbor::{DiagramBuilder, settings::Settings};
    ///
    /// let builder = DiagramBuilder::default();
    /// let tree = builder.parse_json("not json").ok();
    ///
    /// let scene = builder.render_or_placeholder(tree.as_ref(), &Settings::default())
    ///     .expect("Failed to render");
    /// assert!(scene.is_placeholder());
    /// ```
    pub fn render_or_placeholder(
        &self,
        tree: Option<&Tree>,
        settings: &Settings,
    ) -> Result<Scene, ArborError> {
        match tree {
            Some(tree) => self.render(tree, settings),
            None => {
                let diagram_type = settings.diagram_type();
                let style = self.render_style(settings)?;
                let empty = Layout::empty(diagram_type, self.config.layout().canvas(diagram_type));
                Ok(render::render(&empty, &style))
            }
        }
    }

    /// Render `tree` to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns [`ArborError::Config`] if the style configuration is invalid.
    pub fn render_svg(&self, tree: &Tree, settings: &Settings) -> Result<String, ArborError> {
        let scene = self.render(tree, settings)?;
        let svg = scene.to_svg_string();
        info!(bytes = svg.len(); "SVG rendered successfully");
        Ok(svg)
    }

    /// Render `tree` to PNG bytes with the configured export options.
    ///
    /// # Errors
    ///
    /// Returns [`ArborError::Config`] for invalid style or export colors, and
    /// [`ArborError::Export`] if rasterization fails.
    pub fn render_png(&self, tree: &Tree, settings: &Settings) -> Result<Vec<u8>, ArborError> {
        let scene = self.render(tree, settings)?;
        self.rasterize(&scene)
    }

    /// Rasterize an already rendered scene with the configured export options.
    ///
    /// # Errors
    ///
    /// Returns [`ArborError::Config`] for an invalid dot color, and
    /// [`ArborError::Export`] if rasterization fails.
    pub fn rasterize(&self, scene: &Scene) -> Result<Vec<u8>, ArborError> {
        let options = self
            .config
            .export()
            .raster_options()
            .map_err(ArborError::Config)?;
        let bytes =
            png::rasterize(scene, &options).map_err(|err| ArborError::Export(Box::new(err)))?;
        info!(bytes = bytes.len(); "PNG rendered successfully");
        Ok(bytes)
    }

    /// Fit a rendered scene into the configured container.
    pub fn fit(&self, scene: &Scene) -> ViewportState {
        let viewport = self.config.viewport();
        viewport::fit(scene, viewport.container(), viewport.fit_padding())
    }

    /// Serialize `tree` as a Markdown outline.
    pub fn to_outline(&self, tree: &Tree) -> String {
        arbor_outline::to_outline(tree)
    }
}
