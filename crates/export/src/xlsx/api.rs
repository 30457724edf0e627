//! XLSX Export Public API

use super::options::XlsxExportOptions;
use super::worksheet::SheetModel;
use super::writer::XlsxWriter;
use crate::{prepare, Result};
use grid_model::{Grid, PageSetup};
use layout_engine::Pagination;
use std::fs::File;
use std::io::{BufWriter, Cursor, Write};
use std::path::Path;
use text_engine::{FontCache, FontMetricsProvider};

/// One sheet per page that draws at least one data row, in page order
pub fn collect_sheets(pagination: &Pagination) -> Vec<SheetModel> {
    let mut sheets = Vec::new();
    for page in 1..=pagination.page_count {
        match SheetModel::from_page(&pagination.log, page) {
            Some(sheet) => sheets.push(sheet),
            None => tracing::warn!(page, "page draws no data rows; no worksheet written"),
        }
    }
    sheets
}

/// Lay out `grids` and package them as an XLSX workbook held in memory
pub fn export_xlsx_bytes(
    grids: &[Grid],
    setup: &PageSetup,
    provider: &dyn FontMetricsProvider,
    options: &XlsxExportOptions,
) -> Result<Vec<u8>> {
    let fonts = FontCache::new(provider);
    let (_, pagination) = prepare(grids, setup, &fonts)?;
    let sheets = collect_sheets(&pagination);
    let bytes = XlsxWriter::new(Cursor::new(Vec::new()))
        .write(&sheets, setup, options)?
        .into_inner();
    tracing::info!(
        pages = pagination.page_count,
        sheets = sheets.len(),
        bytes = bytes.len(),
        "built xlsx workbook"
    );
    Ok(bytes)
}

/// Export to a byte sink. Nothing is written unless the whole archive
/// was built.
pub fn export_xlsx_to<W: Write>(
    sink: &mut W,
    grids: &[Grid],
    setup: &PageSetup,
    provider: &dyn FontMetricsProvider,
    options: &XlsxExportOptions,
) -> Result<()> {
    let bytes = export_xlsx_bytes(grids, setup, provider, options)?;
    sink.write_all(&bytes)?;
    sink.flush()?;
    Ok(())
}

/// Export to a file, creating or truncating it
pub fn export_xlsx(
    path: impl AsRef<Path>,
    grids: &[Grid],
    setup: &PageSetup,
    provider: &dyn FontMetricsProvider,
    options: &XlsxExportOptions,
) -> Result<()> {
    let bytes = export_xlsx_bytes(grids, setup, provider, options)?;
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(&bytes)?;
    writer.flush()?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "wrote xlsx");
    Ok(())
}
