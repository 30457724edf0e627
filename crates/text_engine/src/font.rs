//! Font identity and resolved metrics

use crate::winansi;
use serde::{Deserialize, Serialize};
use std::fmt;

/// First character code covered by an embedded width table
pub const FIRST_CHAR: u8 = 32;
/// Last character code covered by an embedded width table
pub const LAST_CHAR: u8 = 255;
/// Entries in a width table (codes 32..=255)
pub const WIDTH_COUNT: usize = (LAST_CHAR - FIRST_CHAR) as usize + 1;

/// Font style flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum FontStyle {
    #[default]
    Regular,
    Bold,
    Italic,
    BoldItalic,
}

impl FontStyle {
    pub fn from_flags(bold: bool, italic: bool) -> Self {
        match (bold, italic) {
            (false, false) => FontStyle::Regular,
            (true, false) => FontStyle::Bold,
            (false, true) => FontStyle::Italic,
            (true, true) => FontStyle::BoldItalic,
        }
    }

    pub fn is_bold(&self) -> bool {
        matches!(self, FontStyle::Bold | FontStyle::BoldItalic)
    }

    pub fn is_italic(&self) -> bool {
        matches!(self, FontStyle::Italic | FontStyle::BoldItalic)
    }

    /// Style suffix used in PostScript-style font names
    pub fn name(&self) -> &'static str {
        match self {
            FontStyle::Regular => "Regular",
            FontStyle::Bold => "Bold",
            FontStyle::Italic => "Italic",
            FontStyle::BoldItalic => "BoldItalic",
        }
    }
}

/// Identifies one physical font resource: family plus style.
///
/// Size is deliberately absent; every size of a key shares one embedded
/// program and one width table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FontKey {
    pub family: String,
    pub style: FontStyle,
}

impl FontKey {
    pub fn new(family: impl Into<String>, style: FontStyle) -> Self {
        Self {
            family: family.into(),
            style,
        }
    }

    pub fn regular(family: impl Into<String>) -> Self {
        Self::new(family, FontStyle::Regular)
    }

    pub fn bold(family: impl Into<String>) -> Self {
        Self::new(family, FontStyle::Bold)
    }
}

impl fmt::Display for FontKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.family, self.style.name())
    }
}

/// Metrics and program bytes for one [`FontKey`].
///
/// Vertical metrics and the bounding box are in font design units
/// (`em_square` per em); `widths` are already scaled to a 1000-unit em.
#[derive(Debug, Clone, PartialEq)]
pub struct FontMetrics {
    pub key: FontKey,
    /// Advance widths for codes 32..=255 in 1000-unit glyph space
    pub widths: Vec<u16>,
    /// [xMin, yMin, xMax, yMax] in design units
    pub bbox: [i32; 4],
    /// Degrees counter-clockwise from vertical
    pub italic_angle: f64,
    pub ascent: i32,
    /// Negative below the baseline
    pub descent: i32,
    pub line_gap: i32,
    pub cap_height: i32,
    pub em_square: u16,
    /// Complete font program for whole-font embedding
    pub program: Vec<u8>,
}

impl FontMetrics {
    /// Convert a design-unit value to 1000-unit glyph space
    pub fn to_glyph_space(&self, value: f64) -> i64 {
        scale_to_glyph_space(value, self.em_square)
    }

    /// Width of a character code in glyph space; 0 outside the table
    pub fn code_width(&self, code: u8) -> u16 {
        if code < FIRST_CHAR {
            return 0;
        }
        self.widths
            .get((code - FIRST_CHAR) as usize)
            .copied()
            .unwrap_or(0)
    }

    /// Rendered width of `text` at `size` points, using the embedded encoding
    pub fn text_width(&self, text: &str, size: f64) -> f64 {
        let units: u64 = winansi::encode(text)
            .into_iter()
            .map(|code| u64::from(self.code_width(code)))
            .sum();
        units as f64 * size / 1000.0
    }

    /// Distance between consecutive baselines at `size` points
    pub fn line_height(&self, size: f64) -> f64 {
        let units = f64::from(self.ascent - self.descent + self.line_gap);
        units * size / f64::from(self.em_square)
    }
}

/// `round(raw * 1000 / em)`, rounding half away from zero
pub fn scale_to_glyph_space(raw: f64, em_square: u16) -> i64 {
    if em_square == 0 {
        return 0;
    }
    (raw * 1000.0 / f64::from(em_square)).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics() -> FontMetrics {
        FontMetrics {
            key: FontKey::regular("Arial"),
            widths: vec![500; WIDTH_COUNT],
            bbox: [-100, -200, 1000, 900],
            italic_angle: 0.0,
            ascent: 1854,
            descent: -434,
            line_gap: 67,
            cap_height: 1467,
            em_square: 2048,
            program: Vec::new(),
        }
    }

    #[test]
    fn test_width_count() {
        assert_eq!(WIDTH_COUNT, 224);
    }

    #[test]
    fn test_style_flags() {
        assert_eq!(FontStyle::from_flags(true, true), FontStyle::BoldItalic);
        assert!(FontStyle::Bold.is_bold());
        assert!(!FontStyle::Bold.is_italic());
        assert_eq!(FontStyle::BoldItalic.name(), "BoldItalic");
    }

    #[test]
    fn test_scale_rounds_half_away_from_zero() {
        assert_eq!(scale_to_glyph_space(1.024, 2048), 1);
        assert_eq!(scale_to_glyph_space(1139.0, 2048), 556);
        assert_eq!(scale_to_glyph_space(-434.0, 2048), -212);
    }

    #[test]
    fn test_text_width() {
        let m = metrics();
        assert_eq!(m.text_width("abcd", 10.0), 20.0);
        // Control characters have no width
        assert_eq!(m.text_width("a\tb", 10.0), 10.0);
    }

    #[test]
    fn test_line_height() {
        let m = metrics();
        let expected = 2355.0 * 12.0 / 2048.0;
        assert!((m.line_height(12.0) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_display() {
        assert_eq!(FontKey::bold("Arial").to_string(), "Arial Bold");
    }
}
