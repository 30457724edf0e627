//! PDF Document Assembly
//!
//! Turns a paginated command log into a complete tagged PDF. Objects are
//! allocated in a fixed order:
//!
//! 1. catalog and page tree
//! 2. per font: font file, descriptor, font dictionary
//! 3. per page: content stream, page dictionary
//! 4. structure tree
//! 5. info, outlines, metadata, output intent, ICC profile

use super::content::render_page;
use super::fonts::FontResources;
use super::objects::{PdfDictionary, PdfObject, PdfStream};
use super::options::PdfExportOptions;
use super::pdfa::{self, DocumentInfo};
use super::structure::{build_structure_tree, PageEntry};
use super::writer::{ObjectTable, PdfWriter, Trailer};
use crate::Result;
use layout_engine::{PageGeometry, Pagination};
use text_engine::FontMetricsProvider;
use uuid::Uuid;

/// `[0 0 width height]`
pub fn media_box(geometry: &PageGeometry) -> PdfObject {
    PdfObject::array([
        PdfObject::int(0),
        PdfObject::int(0),
        PdfObject::Real(geometry.page_width),
        PdfObject::Real(geometry.page_height),
    ])
}

/// Builds one PDF from one pagination
pub struct PdfDocumentBuilder<'a> {
    geometry: &'a PageGeometry,
    fonts: &'a dyn FontMetricsProvider,
    options: &'a PdfExportOptions,
}

impl<'a> PdfDocumentBuilder<'a> {
    pub fn new(
        geometry: &'a PageGeometry,
        fonts: &'a dyn FontMetricsProvider,
        options: &'a PdfExportOptions,
    ) -> Self {
        Self {
            geometry,
            fonts,
            options,
        }
    }

    fn document_info(&self, fallback_title: &str, document_id: Uuid) -> DocumentInfo {
        DocumentInfo {
            title: self
                .options
                .title
                .clone()
                .unwrap_or_else(|| fallback_title.to_string()),
            author: self.options.author.clone(),
            subject: self.options.subject.clone(),
            creator: self.options.creator.clone(),
            producer: self.options.producer.clone(),
            created: self.options.resolved_timestamp(),
            document_id,
            // A fresh file has one instance, named like the document
            instance_id: document_id,
        }
    }

    /// Assemble and serialize. `fallback_title` is used when the options
    /// carry no title.
    pub fn build(&self, pagination: &Pagination, fallback_title: &str) -> Result<Vec<u8>> {
        let log = &pagination.log;
        let mut table = ObjectTable::new();

        let catalog_ref = table.allocate();
        let pages_ref = table.allocate();

        let fonts = FontResources::embed(log, self.fonts, &mut table)?;
        let resource_names = fonts.resource_names();
        let resources = PdfDictionary::new().with("Font", fonts.resource_dictionary().into());

        let mut entries = Vec::new();
        for (index, page) in (1..=pagination.page_count).enumerate() {
            let content = render_page(log, page, self.geometry.page_height, &resource_names);
            let content_ref = table.add(PdfStream::new(PdfDictionary::new(), content))?;
            let page_ref = table.add(
                PdfDictionary::typed("Page")
                    .with("Parent", PdfObject::Reference(pages_ref))
                    .with("MediaBox", media_box(self.geometry))
                    .with("Resources", resources.clone().into())
                    .with("Contents", PdfObject::Reference(content_ref))
                    .with("StructParents", PdfObject::int(index as i64)),
            )?;
            entries.push(PageEntry { page, page_ref });
        }

        let struct_root_ref = build_structure_tree(log, &entries, &mut table)?;

        let document_id = self.options.resolved_document_id();
        let info = self.document_info(fallback_title, document_id);
        let info_ref = table.add(info.info_dictionary())?;
        let outlines_ref = table.add(pdfa::outlines())?;
        let metadata_ref = table.add(info.metadata_stream())?;
        let intent_ref = table.allocate();
        let icc_ref = table.add(pdfa::srgb_icc_stream()?)?;
        table.set(intent_ref, pdfa::srgb_output_intent(icc_ref))?;

        table.set(
            pages_ref,
            PdfDictionary::typed("Pages")
                .with(
                    "Kids",
                    PdfObject::array(entries.iter().map(|e| PdfObject::Reference(e.page_ref))),
                )
                .with("Count", PdfObject::int(pagination.page_count)),
        )?;
        table.set(
            catalog_ref,
            PdfDictionary::typed("Catalog")
                .with("Pages", PdfObject::Reference(pages_ref))
                .with("Outlines", PdfObject::Reference(outlines_ref))
                .with("Metadata", PdfObject::Reference(metadata_ref))
                .with("Lang", PdfObject::text(&self.options.language))
                .with(
                    "MarkInfo",
                    PdfDictionary::new()
                        .with("Marked", PdfObject::Boolean(true))
                        .into(),
                )
                .with("StructTreeRoot", PdfObject::Reference(struct_root_ref))
                .with(
                    "ViewerPreferences",
                    PdfDictionary::new()
                        .with("DisplayDocTitle", PdfObject::Boolean(true))
                        .into(),
                )
                .with(
                    "OutputIntents",
                    PdfObject::array([PdfObject::Reference(intent_ref)]),
                ),
        )?;

        let id = document_id.as_bytes().to_vec();
        let trailer = Trailer {
            root: catalog_ref,
            info: info_ref,
            id: [id.clone(), id],
        };
        let bytes = PdfWriter::new().write(&table, &trailer)?;

        tracing::info!(
            pages = pagination.page_count,
            fonts = fonts.len(),
            objects = table.len(),
            bytes = bytes.len(),
            "built pdf document"
        );
        Ok(bytes)
    }
}
