//! System font provider
//!
//! Resolves fonts from the platform font store using font-kit and reads the
//! metrics an embedded TrueType font needs.

use crate::{
    scale_to_glyph_space, winansi, FontKey, FontMetrics, FontMetricsProvider, Result, TextError,
    FIRST_CHAR, LAST_CHAR,
};
use font_kit::family_name::FamilyName;
use font_kit::font::Font;
use font_kit::handle::Handle;
use font_kit::properties::{Properties, Style, Weight};
use font_kit::source::SystemSource;
use std::sync::Arc;

const POST_TABLE: u32 = u32::from_be_bytes(*b"post");

/// Lowest weight that counts as bold (semibold and up)
const BOLD_WEIGHT: f32 = 600.0;

/// Reject a face whose weight or slant differs from the requested style.
///
/// The platform matcher returns the nearest face of the family even when
/// the requested style is not installed; embedding that face under the
/// requested name would misdescribe the program.
fn check_face(key: &FontKey, properties: &Properties) -> Result<()> {
    let bold = properties.weight.0 >= BOLD_WEIGHT;
    let italic = properties.style != Style::Normal;
    if bold != key.style.is_bold() || italic != key.style.is_italic() {
        return Err(TextError::font_resolution(
            key,
            format!(
                "family has no {} face (closest is weight {}, {:?})",
                key.style.name(),
                properties.weight.0,
                properties.style
            ),
        ));
    }
    Ok(())
}

/// Only a standalone TrueType-outline program can be embedded as FontFile2
fn check_program(key: &FontKey, program: &[u8], font_index: u32) -> Result<()> {
    if font_index > 0 || program.starts_with(b"ttcf") {
        return Err(TextError::font_resolution(
            key,
            format!("face {font_index} of a font collection cannot be embedded"),
        ));
    }
    if program.starts_with(b"OTTO") {
        return Err(TextError::font_resolution(
            key,
            "CFF-flavoured OpenType cannot be embedded as TrueType",
        ));
    }
    Ok(())
}

/// Production provider backed by installed fonts
pub struct SystemFontProvider {
    source: SystemSource,
}

impl Default for SystemFontProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemFontProvider {
    pub fn new() -> Self {
        Self {
            source: SystemSource::new(),
        }
    }

    /// Load the face for `key` along with its index inside its file
    fn load(&self, key: &FontKey) -> Result<(Font, u32)> {
        let properties = Properties {
            weight: if key.style.is_bold() {
                Weight::BOLD
            } else {
                Weight::NORMAL
            },
            style: if key.style.is_italic() {
                Style::Italic
            } else {
                Style::Normal
            },
            ..Default::default()
        };

        let handle = self
            .source
            .select_best_match(&[FamilyName::Title(key.family.clone())], &properties)
            .map_err(|e| TextError::font_resolution(key, format!("no match: {e}")))?;

        let font_index = match &handle {
            Handle::Path { font_index, .. } | Handle::Memory { font_index, .. } => *font_index,
        };
        let font = handle
            .load()
            .map_err(|e| TextError::font_resolution(key, format!("load failed: {e}")))?;
        check_face(key, &font.properties())?;
        Ok((font, font_index))
    }
}

/// Italic angle from the `post` table (16.16 fixed at offset 4)
fn italic_angle(font: &Font) -> f64 {
    let Some(post) = font.load_font_table(POST_TABLE) else {
        return 0.0;
    };
    match post.get(4..8) {
        Some(raw) => {
            let fixed = i32::from_be_bytes([raw[0], raw[1], raw[2], raw[3]]);
            f64::from(fixed) / 65536.0
        }
        None => 0.0,
    }
}

impl FontMetricsProvider for SystemFontProvider {
    fn resolve(&self, key: &FontKey) -> Result<Arc<FontMetrics>> {
        let (font, font_index) = self.load(key)?;
        let metrics = font.metrics();
        let em_square = u16::try_from(metrics.units_per_em)
            .ok()
            .filter(|em| *em > 0)
            .ok_or_else(|| {
                TextError::font_resolution(
                    key,
                    format!("unusable units per em: {}", metrics.units_per_em),
                )
            })?;

        let widths = (FIRST_CHAR..=LAST_CHAR)
            .map(|code| {
                winansi::decode(code)
                    .and_then(|ch| font.glyph_for_char(ch))
                    .and_then(|glyph| font.advance(glyph).ok())
                    .map(|advance| {
                        scale_to_glyph_space(f64::from(advance.x()), em_square).clamp(0, 65535)
                            as u16
                    })
                    .unwrap_or(0)
            })
            .collect::<Vec<_>>();

        let program = font
            .copy_font_data()
            .ok_or_else(|| TextError::font_resolution(key, "font program is not readable"))?;
        check_program(key, &program, font_index)?;

        let bounds = metrics.bounding_box;
        tracing::info!(
            font = %key,
            postscript = ?font.postscript_name(),
            bytes = program.len(),
            "loaded system font"
        );

        Ok(Arc::new(FontMetrics {
            key: key.clone(),
            widths,
            bbox: [
                bounds.min_x().round() as i32,
                bounds.min_y().round() as i32,
                bounds.max_x().round() as i32,
                bounds.max_y().round() as i32,
            ],
            italic_angle: italic_angle(&font),
            ascent: metrics.ascent.round() as i32,
            descent: metrics.descent.round() as i32,
            line_gap: metrics.line_gap.round() as i32,
            cap_height: metrics.cap_height.round() as i32,
            em_square,
            program: program.as_ref().clone(),
        }))
    }
}
