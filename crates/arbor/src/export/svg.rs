use std::{
    fs::File,
    io::Write,
    path::{Path, PathBuf},
};

use log::{error, info};

use super::{Error, Exporter};
use crate::{render::Scene, viewport::ViewportState};

/// Writes the scene's SVG document to a file.
#[derive(Debug, Clone)]
pub struct SvgExporter {
    path: PathBuf,
    viewport: Option<ViewportState>,
}

impl SvgExporter {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            viewport: None,
        }
    }

    /// Writes the document as seen through `viewport` instead of untransformed.
    pub fn with_viewport(mut self, viewport: ViewportState) -> Self {
        self.viewport = Some(viewport);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Exporter for SvgExporter {
    fn export_scene(&self, scene: &Scene) -> Result<(), Error> {
        let document = scene.document(self.viewport.as_ref());

        let mut file = File::create(&self.path).map_err(|err| {
            error!(path:? = self.path, err:err; "Failed to create SVG file");
            err
        })?;
        write!(file, "{document}").map_err(|err| {
            error!(path:? = self.path, err:err; "Failed to write SVG content");
            err
        })?;

        info!(path:? = self.path; "SVG exported successfully");
        Ok(())
    }
}
