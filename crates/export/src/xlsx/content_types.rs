//! [Content_Types].xml generation
//!
//! Declares the content type of every part in the package, by extension
//! or by explicit part name.

use super::{content_type, CONTENT_TYPES_NS, XML_DECLARATION};

/// Content types of one package, in insertion order
#[derive(Debug, Clone, Default)]
pub struct ContentTypes {
    /// Extension → content type
    defaults: Vec<(String, String)>,
    /// Part name → content type
    overrides: Vec<(String, String)>,
}

impl ContentTypes {
    /// Defaults for relationships, plain XML and printer-settings blobs,
    /// plus the workbook and stylesheet overrides
    pub fn new() -> Self {
        let mut ct = Self::default();
        ct.add_default("rels", content_type::RELATIONSHIPS);
        ct.add_default("xml", content_type::XML);
        ct.add_default("bin", content_type::PRINTER_SETTINGS);
        ct.add_override("xl/workbook.xml", content_type::WORKBOOK);
        ct.add_override("xl/styles.xml", content_type::STYLES);
        ct
    }

    pub fn add_default(&mut self, extension: &str, content_type: &str) {
        self.defaults
            .push((extension.to_string(), content_type.to_string()));
    }

    /// Add an override; part names are made absolute
    pub fn add_override(&mut self, part_name: &str, content_type: &str) {
        let normalized = if part_name.starts_with('/') {
            part_name.to_string()
        } else {
            format!("/{part_name}")
        };
        self.overrides.push((normalized, content_type.to_string()));
    }

    /// Content type of a part, overrides first
    pub fn get_content_type(&self, path: &str) -> Option<&str> {
        let normalized = format!("/{}", path.trim_start_matches('/'));
        if let Some((_, ct)) = self.overrides.iter().find(|(p, _)| *p == normalized) {
            return Some(ct);
        }
        let extension = path.rsplit('.').next()?;
        self.defaults
            .iter()
            .find(|(e, _)| e == extension)
            .map(|(_, ct)| ct.as_str())
    }

    pub fn to_xml(&self) -> String {
        let mut xml = String::from(XML_DECLARATION);
        xml.push_str(&format!(r#"<Types xmlns="{CONTENT_TYPES_NS}">"#));
        for (extension, ct) in &self.defaults {
            xml.push_str(&format!(
                r#"<Default Extension="{extension}" ContentType="{ct}"/>"#
            ));
        }
        for (part, ct) in &self.overrides {
            xml.push_str(&format!(r#"<Override PartName="{part}" ContentType="{ct}"/>"#));
        }
        xml.push_str("</Types>");
        xml
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let mut ct = ContentTypes::new();
        ct.add_override("xl/worksheets/sheet1.xml", content_type::WORKSHEET);

        assert_eq!(
            ct.get_content_type("xl/worksheets/sheet1.xml"),
            Some(content_type::WORKSHEET)
        );
        assert_eq!(
            ct.get_content_type("/xl/workbook.xml"),
            Some(content_type::WORKBOOK)
        );
        assert_eq!(
            ct.get_content_type("xl/printerSettings/printerSettings1.bin"),
            Some(content_type::PRINTER_SETTINGS)
        );
        assert_eq!(ct.get_content_type("docProps/thumbnail.jpeg"), None);
    }

    #[test]
    fn test_xml_order() {
        let xml = ContentTypes::new().to_xml();
        let rels = xml.find(r#"Extension="rels""#).unwrap();
        let bin = xml.find(r#"Extension="bin""#).unwrap();
        let workbook = xml.find(r#"PartName="/xl/workbook.xml""#).unwrap();
        assert!(rels < bin && bin < workbook);
        assert!(xml.ends_with("</Types>"));
    }
}
