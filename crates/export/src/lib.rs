//! Export - PDF and XLSX serializers for paginated grids
//!
//! Both exports run a full layout of their own: geometry is resolved from
//! the page setup, the grids are paginated into a command log, and the log
//! is serialized. Each export is assembled in memory and reaches its sink
//! only once complete.
//!
//! # Modules
//!
//! - `deflate`: zlib framing for embedded font programs and ICC profiles
//! - `pdf`: tagged PDF/A-1a documents with embedded TrueType fonts
//! - `xlsx`: SpreadsheetML workbooks, one worksheet per printed page

mod error;
pub mod deflate;
pub mod pdf;
pub mod xlsx;

pub use error::*;

pub use deflate::{adler32, compress};
pub use pdf::{export_pdf, export_pdf_bytes, export_pdf_to, PdfExportOptions};
pub use xlsx::{
    column_index, column_letter, export_xlsx, export_xlsx_bytes, export_xlsx_to,
    XlsxExportOptions,
};

use grid_model::{Grid, PageSetup};
use layout_engine::{paginate, resolve_geometry, PageGeometry, Pagination};
use text_engine::FontMetricsProvider;

/// Resolve the page geometry and paginate `grids` onto it
pub(crate) fn prepare(
    grids: &[Grid],
    setup: &PageSetup,
    fonts: &dyn FontMetricsProvider,
) -> Result<(PageGeometry, Pagination)> {
    if grids.is_empty() {
        return Err(ExportError::InvalidOptions("no grids to export".into()));
    }
    let geometry = resolve_geometry(setup)?;
    let pagination = paginate(grids, &geometry, fonts)?;
    for (grid, rows) in pagination.unplaced_rows(grids) {
        tracing::warn!(
            grid = %grids[grid].name,
            first = rows.start,
            count = rows.len(),
            "rows left out of the export"
        );
    }
    Ok((geometry, pagination))
}
