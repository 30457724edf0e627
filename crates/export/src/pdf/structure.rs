//! Logical structure tree
//!
//! One `StructElem` per text run, all children of a single `/Document`
//! element. Each element names its page and the run's index on that page
//! as a marked-content id; the content streams themselves are not tagged
//! with BDC/EMC, so readers can walk the tree but not map it back to glyphs.

use super::objects::{PdfDictionary, PdfObject};
use super::writer::ObjectTable;
use crate::Result;
use render_model::{CommandLog, TextRole};

/// Standard structure type for a text role
pub fn structure_role(role: TextRole) -> &'static str {
    match role {
        TextRole::Title => "H1",
        TextRole::PageStamp => "P",
        TextRole::Header => "TH",
        TextRole::Cell => "TD",
    }
}

/// A page as the structure tree sees it
#[derive(Debug, Clone, Copy)]
pub struct PageEntry {
    /// 1-based page tag in the command log
    pub page: u32,
    /// Object number of the page dictionary
    pub page_ref: u32,
}

/// Allocate and fill the structure tree. Returns the `StructTreeRoot`.
///
/// `pages[i]` gets parent-tree key `i`, which must match the page's
/// `/StructParents`.
pub fn build_structure_tree(
    log: &CommandLog,
    pages: &[PageEntry],
    table: &mut ObjectTable,
) -> Result<u32> {
    let root_ref = table.allocate();
    let document_ref = table.allocate();

    let mut kids = Vec::new();
    let mut parent_tree = Vec::new();
    for (index, entry) in pages.iter().enumerate() {
        let mut page_elements = Vec::new();
        for (mcid, text) in log.texts_on(entry.page).enumerate() {
            let marked_content = PdfDictionary::typed("MCR")
                .with("Pg", PdfObject::Reference(entry.page_ref))
                .with("MCID", PdfObject::int(mcid as i64));
            let element = PdfDictionary::typed("StructElem")
                .with("S", PdfObject::name(structure_role(text.role)))
                .with("P", PdfObject::Reference(document_ref))
                .with("Pg", PdfObject::Reference(entry.page_ref))
                .with("K", marked_content.into());
            let element_ref = table.add(element)?;
            kids.push(PdfObject::Reference(element_ref));
            page_elements.push(PdfObject::Reference(element_ref));
        }
        parent_tree.push(PdfObject::int(index as i64));
        parent_tree.push(PdfObject::Array(page_elements));
    }

    tracing::debug!(elements = kids.len(), pages = pages.len(), "built structure tree");

    table.set(
        document_ref,
        PdfDictionary::typed("StructElem")
            .with("S", PdfObject::name("Document"))
            .with("P", PdfObject::Reference(root_ref))
            .with("K", PdfObject::Array(kids)),
    )?;
    table.set(
        root_ref,
        PdfDictionary::typed("StructTreeRoot")
            .with("K", PdfObject::Reference(document_ref))
            .with(
                "ParentTree",
                PdfDictionary::new()
                    .with("Nums", PdfObject::Array(parent_tree))
                    .into(),
            )
            .with("ParentTreeNextKey", PdfObject::int(pages.len() as i64)),
    )?;
    Ok(root_ref)
}
