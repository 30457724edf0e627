//! Error types for text engine

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TextError {
    #[error("Cannot resolve font {font}: {reason}")]
    FontResolution { font: String, reason: String },
}

impl TextError {
    pub fn font_resolution(font: &crate::FontKey, reason: impl Into<String>) -> Self {
        TextError::FontResolution {
            font: font.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TextError>;
