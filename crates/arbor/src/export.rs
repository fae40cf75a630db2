//! Export of rendered scenes to files.
//!
//! Each backend implements [`Exporter`] over a [`Scene`]:
//!
//! - [`png`]: raster image on a dotted background, via resvg
//! - [`svg`]: the scene's SVG document as text
//!
//! Outline text export works on the tree instead of the scene and lives in
//! `arbor_outline`.

pub mod png;
pub mod svg;

use std::io;

use thiserror::Error;

use crate::render::Scene;

/// A backend writing a [`Scene`] to some output.
pub trait Exporter {
    /// Writes `scene` to the backend's output.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Raster`] if the scene cannot be converted to the
    /// target format, or [`Error::Io`] if writing the output fails.
    fn export_scene(&self, scene: &Scene) -> Result<(), Error>;
}

/// Errors that can occur during export.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Raster error: {0}")]
    Raster(#[from] png::RasterError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
