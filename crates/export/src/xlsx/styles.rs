//! Fixed stylesheet
//!
//! Six fonts and six cell formats cover everything a printed grid needs.
//! Worksheets refer to the formats by index.

use super::{SPREADSHEET_NS, XML_DECLARATION};

/// Cell format indices into `cellXfs`
pub mod style {
    pub const DEFAULT: u32 = 0;
    pub const BOLD: u32 = 1;
    /// Bordered, Arial 9 bold
    pub const HEADER: u32 = 2;
    /// Bordered, Arial 8
    pub const DATA: u32 = 3;
    /// Arial 12 bold
    pub const TITLE: u32 = 4;
    /// Arial 9, right-aligned
    pub const STAMP: u32 = 5;
}

/// (bold, size, name) per font id
const FONTS: [(bool, u32, &str); 6] = [
    (false, 11, "Calibri"),
    (true, 11, "Calibri"),
    (true, 9, "Arial"),
    (false, 8, "Arial"),
    (true, 12, "Arial"),
    (false, 9, "Arial"),
];

/// (font id, border id, right-aligned) per cell format
const CELL_FORMATS: [(u32, u32, bool); 6] = [
    (0, 1, false),
    (1, 0, false),
    (2, 1, false),
    (3, 1, false),
    (4, 0, false),
    (5, 0, true),
];

pub fn styles_xml() -> String {
    let mut xml = String::from(XML_DECLARATION);
    xml.push_str(&format!(r#"<styleSheet xmlns="{SPREADSHEET_NS}">"#));

    xml.push_str(&format!(r#"<fonts count="{}">"#, FONTS.len()));
    for (bold, size, name) in FONTS {
        xml.push_str("<font>");
        if bold {
            xml.push_str("<b/>");
        }
        xml.push_str(&format!(r#"<sz val="{size}"/><name val="{name}"/></font>"#));
    }
    xml.push_str("</fonts>");

    xml.push_str(r#"<fills count="2">"#);
    xml.push_str(r#"<fill><patternFill patternType="none"/></fill>"#);
    xml.push_str(r#"<fill><patternFill patternType="gray125"/></fill>"#);
    xml.push_str("</fills>");

    xml.push_str(r#"<borders count="2">"#);
    xml.push_str("<border><left/><right/><top/><bottom/><diagonal/></border>");
    xml.push_str(r#"<border diagonalDown="0" diagonalUp="0">"#);
    for side in ["left", "right", "top", "bottom"] {
        xml.push_str(&format!(r#"<{side} style="thin"><color auto="1"/></{side}>"#));
    }
    xml.push_str("<diagonal/></border>");
    xml.push_str("</borders>");

    xml.push_str(
        r#"<cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs>"#,
    );

    xml.push_str(&format!(r#"<cellXfs count="{}">"#, CELL_FORMATS.len()));
    for (font, border, right) in CELL_FORMATS {
        xml.push_str(&format!(
            r#"<xf numFmtId="0" fontId="{font}" fillId="0" borderId="{border}" xfId="0""#
        ));
        if font != 0 {
            xml.push_str(r#" applyFont="1""#);
        }
        if border != 0 {
            xml.push_str(r#" applyBorder="1""#);
        }
        xml.push_str(r#" applyAlignment="1">"#);
        if right {
            xml.push_str(r#"<alignment vertical="center" horizontal="right"/>"#);
        } else {
            xml.push_str(r#"<alignment vertical="center"/>"#);
        }
        xml.push_str("</xf>");
    }
    xml.push_str("</cellXfs>");

    xml.push_str("</styleSheet>");
    xml
}
