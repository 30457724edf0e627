//! XLSX Writer Infrastructure
//!
//! Creates ZIP archives with the SpreadsheetML package structure.

use super::content_types::ContentTypes;
use super::options::XlsxExportOptions;
use super::printer_settings::DevMode;
use super::relationships::Relationships;
use super::styles::styles_xml;
use super::workbook::{workbook_relationships, workbook_xml};
use super::worksheet::SheetModel;
use super::{content_type, relationship_type};
use crate::Result;
use grid_model::PageSetup;
use std::io::{Seek, Write};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Root relationships: the workbook as the office document
fn root_relationships() -> Relationships {
    let mut rels = Relationships::new();
    rels.add(relationship_type::OFFICE_DOCUMENT, "xl/workbook.xml");
    rels
}

/// Main XLSX writer
pub struct XlsxWriter<W: Write + Seek> {
    zip: ZipWriter<W>,
    content_types: ContentTypes,
}

impl<W: Write + Seek> XlsxWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            zip: ZipWriter::new(writer),
            content_types: ContentTypes::new(),
        }
    }

    /// Write a complete workbook, one worksheet per entry of `sheets`
    /// (sheet numbers follow slice order), and return the finished sink.
    pub fn write(
        mut self,
        sheets: &[SheetModel],
        setup: &PageSetup,
        options: &XlsxExportOptions,
    ) -> Result<W> {
        for number in 1..=sheets.len() {
            self.content_types.add_override(
                &format!("xl/worksheets/sheet{number}.xml"),
                content_type::WORKSHEET,
            );
        }
        let content_types_xml = self.content_types.to_xml();
        self.write_file("[Content_Types].xml", &content_types_xml)?;
        self.write_file("_rels/.rels", &root_relationships().to_xml())?;
        self.write_file(
            "xl/_rels/workbook.xml.rels",
            &workbook_relationships(sheets.len()).to_xml(),
        )?;
        self.write_file(
            "xl/workbook.xml",
            &workbook_xml(sheets.len(), options.print_titles),
        )?;
        self.write_file("xl/styles.xml", &styles_xml())?;

        let printer_settings = DevMode::from_setup(setup, &options.device_name).to_bytes();
        for (index, sheet) in sheets.iter().enumerate() {
            let number = index + 1;
            let mut rels = Relationships::new();
            let settings_id = rels.add(
                relationship_type::PRINTER_SETTINGS,
                &format!("../printerSettings/printerSettings{number}.bin"),
            );
            self.write_file(
                &format!("xl/worksheets/sheet{number}.xml"),
                &sheet.to_xml(setup, &settings_id),
            )?;
            self.write_file(
                &format!("xl/worksheets/_rels/sheet{number}.xml.rels"),
                &rels.to_xml(),
            )?;
            self.write_binary(
                &format!("xl/printerSettings/printerSettings{number}.bin"),
                &printer_settings,
            )?;
        }

        tracing::debug!(sheets = sheets.len(), "wrote workbook parts");
        Ok(self.zip.finish()?)
    }

    /// Write a file to the ZIP archive
    pub fn write_file(&mut self, path: &str, content: &str) -> Result<()> {
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        self.zip.start_file(path, options)?;
        self.zip.write_all(content.as_bytes())?;

        Ok(())
    }

    /// Write binary data to the ZIP archive
    pub fn write_binary(&mut self, path: &str, data: &[u8]) -> Result<()> {
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);

        self.zip.start_file(path, options)?;
        self.zip.write_all(data)?;

        Ok(())
    }
}
