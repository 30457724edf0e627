//! Error types for layout engine

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("Invalid page geometry: {0}")]
    InvalidGeometry(String),

    #[error("Invalid grid: {0}")]
    Grid(#[from] grid_model::GridError),

    #[error(transparent)]
    Font(#[from] text_engine::TextError),

    #[error("Layout invariant violated: {0}")]
    StructuralAssertion(String),
}

pub type Result<T> = std::result::Result<T, LayoutError>;
