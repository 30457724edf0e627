//! PDF Export Module
//!
//! Serializes a paginated command log into a tagged PDF with embedded
//! TrueType programs.
//!
//! # Architecture
//!
//! - `objects`: PDF object model and byte serialization
//! - `writer`: object table, xref table, trailer and offset verification
//! - `content`: content stream generation
//! - `fonts`: font program embedding
//! - `structure`: logical structure tree
//! - `pdfa`: info dictionary, XMP metadata, output intent
//! - `document`: object allocation and assembly
//! - `options`: export configuration
//! - `api`: public entry points

mod api;
mod content;
mod document;
mod fonts;
pub mod objects;
mod options;
pub mod pdfa;
mod structure;
pub mod writer;

pub use api::*;
pub use content::{render_page, ContentStream};
pub use document::PdfDocumentBuilder;
pub use fonts::{base_font_name, FontResources};
pub use options::*;
pub use structure::structure_role;
pub use writer::{read_xref, verify_xref, PDF_HEADER};
