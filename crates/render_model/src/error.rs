//! Error types for render model

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Command tagged for page {page} but the document has {page_count} pages")]
    PageOutOfRange { page: u32, page_count: u32 },

    #[error("Page {0} has no commands")]
    EmptyPage(u32),
}

pub type Result<T> = std::result::Result<T, RenderError>;
