//! Error types for export operations

use layout_engine::LayoutError;
use std::io;
use text_engine::TextError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error(transparent)]
    FontResolution(#[from] TextError),

    #[error("Layout error: {0}")]
    Layout(LayoutError),

    #[error("Structural assertion failed: {0}")]
    StructuralAssertion(String),

    #[error("Invalid export options: {0}")]
    InvalidOptions(String),
}

impl From<LayoutError> for ExportError {
    fn from(err: LayoutError) -> Self {
        match err {
            LayoutError::Font(e) => ExportError::FontResolution(e),
            LayoutError::StructuralAssertion(msg) => ExportError::StructuralAssertion(msg),
            other => ExportError::Layout(other),
        }
    }
}

impl ExportError {
    pub(crate) fn assertion(msg: impl Into<String>) -> Self {
        ExportError::StructuralAssertion(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, ExportError>;
