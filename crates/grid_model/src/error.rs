//! Error types for the grid model

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GridError {
    #[error("Grid '{0}' has no columns")]
    NoColumns(String),

    #[error("Invalid page setup: {0}")]
    InvalidPageSetup(String),
}

pub type Result<T> = std::result::Result<T, GridError>;
