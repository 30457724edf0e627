//! Worksheet reconstruction
//!
//! A worksheet is rebuilt from one page of the command log. Every grid
//! rectangle and cell text carries its (band, column) index, so rows and
//! columns come straight from those indices; text without an index is page
//! header content (title and page stamp).

use super::columns::cell_reference;
use super::styles::style;
use super::{RELATIONSHIPS_DOC_NS, SPREADSHEET_NS, XML_DECLARATION};
use grid_model::PageSetup;
use quick_xml::escape::partial_escape;
use render_model::{CommandLog, Rect, TextRole};
use std::collections::BTreeSet;

/// Height of the header line when the page has no header text
const DEFAULT_HEADER_HEIGHT: f64 = 12.0;

/// Points to spreadsheet character-width units (7.5 px per character at 96 dpi)
pub fn excel_column_width(points: f64) -> f64 {
    let pixels = (points - 1.0) / 72.0 * 96.0;
    (pixels / 7.5 * 100.0).round() / 100.0
}

/// Shortest decimal form, with float noise below 1e-6 removed
fn fmt_decimal(value: f64) -> String {
    let rounded = (value * 1_000_000.0).round() / 1_000_000.0;
    if rounded == 0.0 {
        "0".to_string()
    } else {
        format!("{rounded}")
    }
}

/// One row band of the grid
#[derive(Debug, Clone, PartialEq)]
pub struct SheetRow {
    /// Row height in points
    pub height: f64,
    /// Header band (column titles)
    pub header: bool,
    /// Cell text per column; `None` where nothing was drawn
    pub cells: Vec<Option<String>>,
}

/// Table structure of one printed page
#[derive(Debug, Clone, PartialEq)]
pub struct SheetModel {
    pub title: Option<String>,
    pub stamp: Option<String>,
    /// Largest font size among header texts
    pub header_height: f64,
    /// Column widths in points
    pub column_widths: Vec<f64>,
    pub rows: Vec<SheetRow>,
}

impl SheetModel {
    /// Rebuild the grid drawn on `page`.
    ///
    /// Returns `None` when the page draws no data-row rectangle; such a page
    /// gets no worksheet.
    pub fn from_page(log: &CommandLog, page: u32) -> Option<Self> {
        let cells: Vec<_> = log
            .rects_on(page)
            .filter_map(|r| r.cell.map(|cell| (cell, r.rect)))
            .collect();
        if !cells.iter().any(|(cell, _)| !cell.is_header()) {
            return None;
        }

        let bands: Vec<usize> = cells
            .iter()
            .map(|(cell, _)| cell.band)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let first_band = bands[0];
        let mut first_row: Vec<(usize, Rect)> = cells
            .iter()
            .filter(|(cell, _)| cell.band == first_band)
            .map(|(cell, rect)| (cell.column, *rect))
            .collect();
        first_row.sort_by_key(|(column, _)| *column);
        first_row.dedup_by_key(|(column, _)| *column);
        let columns: Vec<usize> = first_row.iter().map(|(column, _)| *column).collect();

        let mut rows: Vec<SheetRow> = bands
            .iter()
            .map(|band| {
                let height = cells
                    .iter()
                    .filter(|(cell, _)| cell.band == *band)
                    .min_by_key(|(cell, _)| cell.column)
                    .map(|(_, rect)| rect.height)
                    .unwrap_or_default();
                SheetRow {
                    height,
                    header: *band == 0,
                    cells: vec![None; columns.len()],
                }
            })
            .collect();

        let mut title = None;
        let mut stamp = None;
        let mut header_height: Option<f64> = None;
        for text in log.texts_on(page) {
            match text.cell {
                Some(cell) => {
                    let row = bands.binary_search(&cell.band);
                    let column = columns.binary_search(&cell.column);
                    if let (Ok(row), Ok(column)) = (row, column) {
                        rows[row].cells[column] = Some(text.content.clone());
                    }
                }
                None => {
                    header_height = Some(header_height.map_or(text.font_size, |h| h.max(text.font_size)));
                    match text.role {
                        TextRole::PageStamp => stamp = Some(text.content.clone()),
                        _ => title = Some(text.content.clone()),
                    }
                }
            }
        }

        Some(Self {
            title,
            stamp,
            header_height: header_height.unwrap_or(DEFAULT_HEADER_HEIGHT),
            column_widths: first_row.iter().map(|(_, rect)| rect.width).collect(),
            rows,
        })
    }

    pub fn column_count(&self) -> usize {
        self.column_widths.len()
    }

    fn has_header_line(&self) -> bool {
        let present = |s: &Option<String>| s.as_deref().is_some_and(|s| !s.trim().is_empty());
        present(&self.title) || present(&self.stamp)
    }

    /// `xl/worksheets/sheetN.xml`. `printer_settings` is the relationship
    /// id of the sheet's printer-settings part.
    pub fn to_xml(&self, setup: &PageSetup, printer_settings: &str) -> String {
        let column_count = self.column_count();
        let mut xml = String::from(XML_DECLARATION);
        xml.push_str(&format!(
            r#"<worksheet xmlns="{SPREADSHEET_NS}" xmlns:r="{RELATIONSHIPS_DOC_NS}">"#
        ));
        xml.push_str(r#"<sheetViews><sheetView workbookViewId="0"/></sheetViews>"#);

        xml.push_str("<cols>");
        for (i, width) in self.column_widths.iter().enumerate() {
            xml.push_str(&format!(
                r#"<col min="{n}" max="{n}" width="{}" customWidth="1"/>"#,
                fmt_decimal(excel_column_width(*width)),
                n = i + 1
            ));
        }
        xml.push_str("</cols>");

        xml.push_str("<sheetData>");
        let mut row_number = 1;
        if self.has_header_line() {
            xml.push_str(&row_start(row_number, column_count, self.header_height));
            if let Some(title) = self.title.as_deref().filter(|t| !t.trim().is_empty()) {
                xml.push_str(&inline_cell(&cell_reference(0, row_number), style::TITLE, title));
            }
            if let Some(stamp) = self.stamp.as_deref().filter(|s| !s.trim().is_empty()) {
                let last = column_count.saturating_sub(1);
                xml.push_str(&inline_cell(&cell_reference(last, row_number), style::STAMP, stamp));
            }
            xml.push_str("</row>");
            row_number += 1;
        }
        for row in &self.rows {
            xml.push_str(&row_start(row_number, column_count, row.height));
            let cell_style = if row.header { style::HEADER } else { style::DATA };
            for (column, text) in row.cells.iter().enumerate() {
                if let Some(text) = text {
                    xml.push_str(&inline_cell(&cell_reference(column, row_number), cell_style, text));
                }
            }
            xml.push_str("</row>");
            row_number += 1;
        }
        xml.push_str("</sheetData>");

        let m = &setup.margins;
        xml.push_str(&format!(
            r#"<pageMargins left="{}" right="{}" top="{}" bottom="{}" header="0" footer="0"/>"#,
            fmt_decimal(f64::from(m.left) / 100.0),
            fmt_decimal(f64::from(m.right) / 100.0),
            fmt_decimal(f64::from(m.top) / 100.0),
            fmt_decimal(f64::from(m.bottom) / 100.0),
        ));

        let mut attrs = vec![format!(r#"paperSize="{}""#, setup.paper.code())];
        if setup.paper.is_custom() {
            let (width, height) = setup.paper_size();
            attrs.push(format!(
                r#"paperWidth="{}in""#,
                fmt_decimal(f64::from(width) / 100.0)
            ));
            attrs.push(format!(
                r#"paperHeight="{}in""#,
                fmt_decimal(f64::from(height) / 100.0)
            ));
        }
        let orientation = if setup.landscape { "landscape" } else { "portrait" };
        attrs.push(format!(r#"orientation="{orientation}""#));
        attrs.push(format!(r#"r:id="{printer_settings}""#));
        xml.push_str(&format!("<pageSetup {}/>", attrs.join(" ")));

        xml.push_str("</worksheet>");
        xml
    }
}

fn row_start(number: usize, column_count: usize, height: f64) -> String {
    format!(
        r#"<row r="{number}" spans="1:{column_count}" ht="{}" customHeight="1">"#,
        fmt_decimal(height)
    )
}

fn inline_cell(reference: &str, style: u32, text: &str) -> String {
    format!(
        r#"<c r="{reference}" s="{style}" t="inlineStr"><is><t>{}</t></is></c>"#,
        partial_escape(text)
    )
}
