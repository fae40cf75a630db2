//! Error types for Arbor operations.
//!
//! This module provides the main error type [`ArborError`] which wraps
//! the error conditions of every pipeline stage.

use std::io;

use thiserror::Error;

use arbor_core::tree::TreeError;
use arbor_outline::ParseError;

/// The main error type for Arbor operations.
///
/// # Diagnostic Variants
///
/// The `Outline` variant carries structured diagnostics with source spans
/// together with the outline text they point into, for rich error reporting.
#[derive(Debug, Error)]
pub enum ArborError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid tree: {0}")]
    Input(#[from] TreeError),

    #[error("{err}")]
    Outline { err: ParseError, src: String },

    #[error("Render error: {0}")]
    Render(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<crate::export::Error> for ArborError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl ArborError {
    /// Create a new `Outline` error with the associated source text.
    pub fn new_outline_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Outline {
            err,
            src: src.into(),
        }
    }
}
