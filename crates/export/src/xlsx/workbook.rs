//! Workbook part and its relationships

use super::relationships::Relationships;
use super::{relationship_type, RELATIONSHIPS_DOC_NS, SPREADSHEET_NS, XML_DECLARATION};
use quick_xml::escape::{escape, partial_escape};

/// Sheet name for the 1-based sheet number
pub fn sheet_name(number: usize) -> String {
    format!("Page{number}")
}

/// Quoted sheet name for formulas; embedded quotes are doubled
fn quoted_sheet_name(name: &str) -> String {
    format!("'{}'", name.replace('\'', "''"))
}

/// `xl/workbook.xml` for `sheet_count` sheets.
///
/// With `print_titles`, every sheet repeats its first two rows on each
/// printed page.
pub fn workbook_xml(sheet_count: usize, print_titles: bool) -> String {
    let mut xml = String::from(XML_DECLARATION);
    xml.push_str(&format!(
        r#"<workbook xmlns="{SPREADSHEET_NS}" xmlns:r="{RELATIONSHIPS_DOC_NS}">"#
    ));
    xml.push_str("<sheets>");
    for number in 1..=sheet_count {
        xml.push_str(&format!(
            r#"<sheet name="{}" sheetId="{number}" r:id="rId{number}"/>"#,
            escape(sheet_name(number).as_str())
        ));
    }
    xml.push_str("</sheets>");

    if print_titles && sheet_count > 0 {
        xml.push_str("<definedNames>");
        for number in 1..=sheet_count {
            let range = format!("{}!$1:$2", quoted_sheet_name(&sheet_name(number)));
            xml.push_str(&format!(
                r#"<definedName name="_xlnm.Print_Titles" localSheetId="{}">{}</definedName>"#,
                number - 1,
                partial_escape(range.as_str())
            ));
        }
        xml.push_str("</definedNames>");
    }

    xml.push_str("</workbook>");
    xml
}

/// `xl/_rels/workbook.xml.rels`: sheets as `rId1..rIdN`, then the stylesheet
pub fn workbook_relationships(sheet_count: usize) -> Relationships {
    let mut rels = Relationships::new();
    for number in 1..=sheet_count {
        rels.add(
            relationship_type::WORKSHEET,
            &format!("worksheets/sheet{number}.xml"),
        );
    }
    rels.add(relationship_type::STYLES, "styles.xml");
    rels
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheets_and_print_titles() {
        let xml = workbook_xml(2, true);
        assert!(xml.contains(r#"<sheet name="Page1" sheetId="1" r:id="rId1"/>"#));
        assert!(xml.contains(r#"<sheet name="Page2" sheetId="2" r:id="rId2"/>"#));
        assert!(xml.contains(
            r#"<definedName name="_xlnm.Print_Titles" localSheetId="1">'Page2'!$1:$2</definedName>"#
        ));
    }

    #[test]
    fn test_print_titles_can_be_disabled() {
        assert!(!workbook_xml(3, false).contains("definedNames"));
    }

    #[test]
    fn test_quoting() {
        assert_eq!(quoted_sheet_name("Bob's"), "'Bob''s'");
    }

    #[test]
    fn test_relationship_ids() {
        let rels = workbook_relationships(3);
        assert_eq!(rels.len(), 4);
        assert_eq!(rels.get("rId3").unwrap().target, "worksheets/sheet3.xml");
        assert_eq!(rels.get("rId4").unwrap().target, "styles.xml");
    }
}
