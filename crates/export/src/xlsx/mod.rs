//! XLSX Export Module
//!
//! Rebuilds each printed page as a worksheet and packages the workbook as
//! an Office Open XML (SpreadsheetML) zip archive.
//!
//! ## Structure
//!
//! - `[Content_Types].xml` - Content type definitions
//! - `_rels/.rels` - Root relationships
//! - `xl/workbook.xml` - Sheet list and print-title names
//! - `xl/_rels/workbook.xml.rels` - Workbook relationships
//! - `xl/styles.xml` - Fixed stylesheet
//! - `xl/worksheets/sheetN.xml` - One sheet per printed page
//! - `xl/worksheets/_rels/sheetN.xml.rels` - Sheet relationships
//! - `xl/printerSettings/printerSettingsN.bin` - DEVMODE record per sheet
//!
//! Pages that draw no data row are left out of the workbook, so a grid
//! with no rows yields a PDF page but no worksheet.

mod api;
mod columns;
mod content_types;
mod options;
mod printer_settings;
mod relationships;
mod styles;
mod workbook;
mod worksheet;
mod writer;

pub use api::*;
pub use columns::{cell_reference, column_index, column_letter};
pub use content_types::ContentTypes;
pub use options::XlsxExportOptions;
pub use printer_settings::{DevMode, DEVMODE_SIZE};
pub use relationships::{Relationship, Relationships};
pub use styles::{style, styles_xml};
pub use workbook::{sheet_name, workbook_relationships, workbook_xml};
pub use worksheet::{excel_column_width, SheetModel, SheetRow};
pub use writer::XlsxWriter;


pub(crate) const XML_DECLARATION: &str =
    "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n";

pub(crate) const SPREADSHEET_NS: &str =
    "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
pub(crate) const RELATIONSHIPS_DOC_NS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
pub(crate) const RELATIONSHIPS_NS: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships";
pub(crate) const CONTENT_TYPES_NS: &str =
    "http://schemas.openxmlformats.org/package/2006/content-types";

/// Content types used in the package
pub mod content_type {
    pub const RELATIONSHIPS: &str = "application/vnd.openxmlformats-package.relationships+xml";
    pub const XML: &str = "application/xml";
    pub const PRINTER_SETTINGS: &str =
        "application/vnd.openxmlformats-officedocument.spreadsheetml.printerSettings";
    pub const WORKBOOK: &str =
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml";
    pub const STYLES: &str =
        "application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml";
    pub const WORKSHEET: &str =
        "application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml";
}

/// Relationship types used in the package
pub mod relationship_type {
    pub const OFFICE_DOCUMENT: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
    pub const WORKSHEET: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet";
    pub const STYLES: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
    pub const PRINTER_SETTINGS: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/printerSettings";
}
