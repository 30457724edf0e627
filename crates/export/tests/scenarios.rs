//! Cross-crate export scenarios

use export::pdf::{read_xref, verify_xref};
use export::{
    export_pdf, export_pdf_bytes, export_xlsx, export_xlsx_bytes, ExportError, PdfExportOptions,
    XlsxExportOptions,
};
use grid_model::{Grid, PageSetup};
use layout_engine::resolve_geometry;
use std::io::Cursor;
use text_engine::FixedMetricsProvider;
use zip::ZipArchive;

fn inventory(rows: usize) -> Grid {
    let mut grid = Grid::new("Inventory", ["Item", "Qty", "Bin"]);
    for r in 0..rows {
        grid.push_row([format!("Item {r}"), format!("{}", r % 17), format!("B-{:03}", r)]);
    }
    grid
}

fn page_count(pdf: &[u8]) -> usize {
    let marker = b"/Type /Page /";
    pdf.windows(marker.len()).filter(|w| *w == &marker[..]).count()
}

fn sheet_count(xlsx: Vec<u8>) -> usize {
    let archive = ZipArchive::new(Cursor::new(xlsx)).unwrap();
    let sheets = archive
        .file_names()
        .filter(|n| n.starts_with("xl/worksheets/sheet"))
        .count();
    sheets
}

#[test]
fn scenario_a_small_grid_fits_one_page() {
    let provider = FixedMetricsProvider::new();
    let pdf = export_pdf_bytes(
        &[inventory(5)],
        &PageSetup::default(),
        &provider,
        &PdfExportOptions::default(),
    )
    .unwrap();
    assert_eq!(page_count(&pdf), 1);
    let text = String::from_utf8_lossy(&pdf);
    assert!(text.contains("/BaseFont /Arial-Regular"));
    assert!(text.contains("/BaseFont /Arial-Bold"));
    for r in 0..5 {
        assert!(text.contains(&format!("(Item {r}) Tj")));
    }
    verify_xref(&pdf).unwrap();
}

#[test]
fn scenario_b_long_grid_splits_with_consistent_stamps() {
    let provider = FixedMetricsProvider::new();
    let pdf = export_pdf_bytes(
        &[inventory(200)],
        &PageSetup::default(),
        &provider,
        &PdfExportOptions::default(),
    )
    .unwrap();
    let pages = page_count(&pdf);
    assert!(pages > 1);
    let text = String::from_utf8_lossy(&pdf);
    for k in 1..=pages {
        assert!(text.contains(&format!("(Page {k} / {pages}) Tj")));
    }
    assert!(!text.contains(&format!("(Page {} / {pages}) Tj", pages + 1)));
    for (num, offset) in read_xref(&pdf).unwrap() {
        assert!(pdf[offset..].starts_with(format!("{num} 0 obj").as_bytes()));
    }

    let xlsx = export_xlsx_bytes(
        &[inventory(200)],
        &PageSetup::default(),
        &provider,
        &XlsxExportOptions::default(),
    )
    .unwrap();
    assert_eq!(sheet_count(xlsx), pages);
}

#[test]
fn scenario_c_landscape_swaps_printable_area() {
    let portrait = resolve_geometry(&PageSetup::default()).unwrap();
    let landscape = resolve_geometry(&PageSetup::default().with_landscape(true)).unwrap();
    assert!((portrait.printable_width() - landscape.printable_height()).abs() < 1e-9);
    assert!((portrait.printable_height() - landscape.printable_width()).abs() < 1e-9);

    let provider = FixedMetricsProvider::new();
    let pdf = export_pdf_bytes(
        &[inventory(3)],
        &PageSetup::default().with_landscape(true),
        &provider,
        &PdfExportOptions::default(),
    )
    .unwrap();
    assert!(String::from_utf8_lossy(&pdf).contains("/MediaBox [0 0 842 595]"));
}

#[test]
fn scenario_d_empty_grid_has_pdf_page_but_no_sheet() {
    let provider = FixedMetricsProvider::new();
    let grids = [inventory(4), Grid::new("Empty", ["Item", "Qty"])];
    let pdf = export_pdf_bytes(&grids, &PageSetup::default(), &provider, &PdfExportOptions::default())
        .unwrap();
    let xlsx = export_xlsx_bytes(&grids, &PageSetup::default(), &provider, &XlsxExportOptions::default())
        .unwrap();
    assert_eq!(page_count(&pdf), 2);
    assert_eq!(sheet_count(xlsx), 1);

    let only_empty = [Grid::new("Empty", ["Item"])];
    let pdf = export_pdf_bytes(&only_empty, &PageSetup::default(), &provider, &PdfExportOptions::default())
        .unwrap();
    let xlsx = export_xlsx_bytes(&only_empty, &PageSetup::default(), &provider, &XlsxExportOptions::default())
        .unwrap();
    assert_eq!(page_count(&pdf), 1);
    assert_eq!(sheet_count(xlsx), 0);
}

#[test]
fn test_no_grids_is_rejected() {
    let provider = FixedMetricsProvider::new();
    let err = export_pdf_bytes(&[], &PageSetup::default(), &provider, &PdfExportOptions::default())
        .unwrap_err();
    assert!(matches!(err, ExportError::InvalidOptions(_)));
}

#[test]
fn test_file_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let provider = FixedMetricsProvider::new();
    let grids = [inventory(10)];

    let pdf_path = dir.path().join("inventory.pdf");
    export_pdf(&pdf_path, &grids, &PageSetup::default(), &provider, &PdfExportOptions::default())
        .unwrap();
    let pdf = std::fs::read(&pdf_path).unwrap();
    verify_xref(&pdf).unwrap();

    let xlsx_path = dir.path().join("inventory.xlsx");
    // An existing file is overwritten
    std::fs::write(&xlsx_path, b"stale").unwrap();
    export_xlsx(&xlsx_path, &grids, &PageSetup::default(), &provider, &XlsxExportOptions::default())
        .unwrap();
    let xlsx = std::fs::read(&xlsx_path).unwrap();
    assert_eq!(sheet_count(xlsx), 1);
}
