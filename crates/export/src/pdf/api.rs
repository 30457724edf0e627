//! PDF Export Public API

use super::document::PdfDocumentBuilder;
use super::options::PdfExportOptions;
use crate::{prepare, Result};
use grid_model::{Grid, PageSetup};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use text_engine::{FontCache, FontMetricsProvider};

/// Lay out `grids` and serialize them as a PDF held in memory
///
/// # Example
///
/// ```ignore
/// use export::pdf::{export_pdf_bytes, PdfExportOptions};
/// use text_engine::SystemFontProvider;
///
/// let bytes = export_pdf_bytes(&grids, &PageSetup::default(), &SystemFontProvider::new(), &PdfExportOptions::default())?;
/// ```
pub fn export_pdf_bytes(
    grids: &[Grid],
    setup: &PageSetup,
    provider: &dyn FontMetricsProvider,
    options: &PdfExportOptions,
) -> Result<Vec<u8>> {
    let fonts = FontCache::new(provider);
    let (geometry, pagination) = prepare(grids, setup, &fonts)?;
    let fallback_title = grids.first().map(Grid::title).unwrap_or_default();
    let bytes = PdfDocumentBuilder::new(&geometry, &fonts, options).build(&pagination, &fallback_title)?;
    tracing::debug!(resolved_fonts = fonts.resolutions(), "pdf export finished");
    Ok(bytes)
}

/// Export to a byte sink. Nothing is written unless the whole document
/// was built.
pub fn export_pdf_to<W: Write>(
    sink: &mut W,
    grids: &[Grid],
    setup: &PageSetup,
    provider: &dyn FontMetricsProvider,
    options: &PdfExportOptions,
) -> Result<()> {
    let bytes = export_pdf_bytes(grids, setup, provider, options)?;
    sink.write_all(&bytes)?;
    sink.flush()?;
    Ok(())
}

/// Export to a file, creating or truncating it
pub fn export_pdf(
    path: impl AsRef<Path>,
    grids: &[Grid],
    setup: &PageSetup,
    provider: &dyn FontMetricsProvider,
    options: &PdfExportOptions,
) -> Result<()> {
    let bytes = export_pdf_bytes(grids, setup, provider, options)?;
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(&bytes)?;
    writer.flush()?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "wrote pdf");
    Ok(())
}
