//! PDF Font Embedding
//!
//! Every distinct (family, style) in the command log is embedded once as a
//! whole TrueType program with a WinAnsi width table, whatever sizes it is
//! drawn at.

use super::objects::{PdfDictionary, PdfObject, PdfStream};
use super::writer::ObjectTable;
use crate::{deflate, Result};
use render_model::CommandLog;
use std::collections::HashMap;
use text_engine::{FontKey, FontMetrics, FontMetricsProvider, FIRST_CHAR, LAST_CHAR};

/// Descriptor flag: font uses the standard Latin character set
const FLAG_NONSYMBOLIC: i64 = 32;
/// Descriptor flag: glyphs slant
const FLAG_ITALIC: i64 = 64;
/// Dominant vertical stem width; not measured
const STEM_V: i64 = 80;

/// One embedded font and the page resource name it is drawn with
#[derive(Debug, Clone)]
pub struct EmbeddedFont {
    pub key: FontKey,
    pub resource: String,
    pub font_ref: u32,
}

/// Fonts embedded in one document
#[derive(Debug, Default)]
pub struct FontResources {
    fonts: Vec<EmbeddedFont>,
}

/// `Arial` + Bold → `Arial-Bold`
pub fn base_font_name(key: &FontKey) -> String {
    let family: String = key.family.chars().filter(|c| !c.is_whitespace()).collect();
    format!("{family}-{}", key.style.name())
}

impl FontResources {
    /// Embed every font the log draws with, in first-use order.
    ///
    /// Allocates font file, descriptor and font dictionary for each font,
    /// in that order.
    pub fn embed(
        log: &CommandLog,
        fonts: &dyn FontMetricsProvider,
        table: &mut ObjectTable,
    ) -> Result<Self> {
        let mut embedded = Vec::new();
        for (index, key) in log.font_keys().into_iter().enumerate() {
            let metrics = fonts.resolve(&key)?;
            let base_font = base_font_name(&key);

            let file_ref = table.add(font_file(&metrics)?)?;
            let descriptor_ref = table.add(font_descriptor(&metrics, &base_font, file_ref))?;
            let font_ref = table.add(font_dictionary(&metrics, &base_font, descriptor_ref))?;

            tracing::debug!(
                font = %key,
                base_font = %base_font,
                program = metrics.program.len(),
                "embedded font"
            );
            embedded.push(EmbeddedFont {
                key,
                resource: format!("F{}", index + 1),
                font_ref,
            });
        }
        Ok(Self { fonts: embedded })
    }

    pub fn fonts(&self) -> &[EmbeddedFont] {
        &self.fonts
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    /// Font → resource name, for content stream generation
    pub fn resource_names(&self) -> HashMap<FontKey, String> {
        self.fonts
            .iter()
            .map(|f| (f.key.clone(), f.resource.clone()))
            .collect()
    }

    /// `/Font` subdictionary for page resources
    pub fn resource_dictionary(&self) -> PdfDictionary {
        let mut dict = PdfDictionary::new();
        for font in &self.fonts {
            dict.insert(font.resource.clone(), PdfObject::Reference(font.font_ref));
        }
        dict
    }
}

fn font_file(metrics: &FontMetrics) -> Result<PdfStream> {
    let compressed = deflate::compress(&metrics.program)?;
    let dict = PdfDictionary::new()
        .with("Filter", PdfObject::name("FlateDecode"))
        .with("Length1", PdfObject::int(metrics.program.len() as i64));
    Ok(PdfStream::new(dict, compressed))
}

fn font_descriptor(metrics: &FontMetrics, base_font: &str, file_ref: u32) -> PdfDictionary {
    let mut flags = FLAG_NONSYMBOLIC;
    if metrics.key.style.is_italic() {
        flags += FLAG_ITALIC;
    }
    let bbox = metrics
        .bbox
        .iter()
        .map(|v| PdfObject::Integer(metrics.to_glyph_space(f64::from(*v))));

    PdfDictionary::typed("FontDescriptor")
        .with("FontName", PdfObject::name(base_font))
        .with("Flags", PdfObject::Integer(flags))
        .with("FontBBox", PdfObject::array(bbox))
        .with("ItalicAngle", PdfObject::Real(metrics.italic_angle))
        .with(
            "Ascent",
            PdfObject::Integer(metrics.to_glyph_space(f64::from(metrics.ascent))),
        )
        .with(
            "Descent",
            PdfObject::Integer(metrics.to_glyph_space(f64::from(metrics.descent))),
        )
        .with(
            "CapHeight",
            PdfObject::Integer(metrics.to_glyph_space(f64::from(metrics.cap_height))),
        )
        .with("StemV", PdfObject::Integer(STEM_V))
        .with("FontFile2", PdfObject::Reference(file_ref))
}

fn font_dictionary(metrics: &FontMetrics, base_font: &str, descriptor_ref: u32) -> PdfDictionary {
    let widths = metrics.widths.iter().map(|w| PdfObject::int(*w));
    PdfDictionary::typed("Font")
        .with("Subtype", PdfObject::name("TrueType"))
        .with("BaseFont", PdfObject::name(base_font))
        .with("FirstChar", PdfObject::int(FIRST_CHAR))
        .with("LastChar", PdfObject::int(LAST_CHAR))
        .with("Widths", PdfObject::array(widths))
        .with("FontDescriptor", PdfObject::Reference(descriptor_ref))
        .with("Encoding", PdfObject::name("WinAnsiEncoding"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use render_model::{TextCommand, TextRole};
    use text_engine::{FixedMetricsProvider, FontCache, FontStyle};

    fn log_with(fonts: &[(FontKey, f64)]) -> CommandLog {
        let mut log = CommandLog::new();
        for (key, size) in fonts {
            log.push_text(TextCommand {
                content: "x".into(),
                font: key.clone(),
                font_size: *size,
                x: 0.0,
                y: 0.0,
                page: 1,
                role: TextRole::Cell,
                cell: None,
            });
        }
        log
    }

    #[test]
    fn test_base_font_name() {
        assert_eq!(base_font_name(&FontKey::regular("Arial")), "Arial-Regular");
        assert_eq!(
            base_font_name(&FontKey::new("Times New Roman", FontStyle::BoldItalic)),
            "TimesNewRoman-BoldItalic"
        );
    }

    #[test]
    fn test_one_program_per_family_and_style() {
        let provider = FixedMetricsProvider::new();
        let cache = FontCache::new(&provider);
        let arial = FontKey::regular("Arial");
        let log = log_with(&[(arial.clone(), 8.0), (arial.clone(), 9.0), (arial, 12.0)]);

        let mut table = ObjectTable::new();
        let resources = FontResources::embed(&log, &cache, &mut table).unwrap();

        assert_eq!(resources.len(), 1);
        assert_eq!(table.len(), 3);
        assert_eq!(provider.calls(), 1);
        let file_streams = (1..=table.len())
            .filter(|n| {
                matches!(table.get(*n), Some(PdfObject::Stream(s)) if s.dict.get("Length1").is_some())
            })
            .count();
        assert_eq!(file_streams, 1);
    }

    #[test]
    fn test_object_order_and_contents() {
        let provider = FixedMetricsProvider::new();
        let log = log_with(&[
            (FontKey::regular("Arial"), 9.0),
            (FontKey::new("Arial", FontStyle::Italic), 9.0),
        ]);
        let mut table = ObjectTable::new();
        let resources = FontResources::embed(&log, &provider, &mut table).unwrap();

        let fonts = resources.fonts();
        assert_eq!(fonts[0].resource, "F1");
        assert_eq!(fonts[0].font_ref, 3);
        assert_eq!(fonts[1].resource, "F2");
        assert_eq!(fonts[1].font_ref, 6);

        let Some(PdfObject::Stream(file)) = table.get(1) else {
            panic!("object 1 should be the font file");
        };
        assert_eq!(file.dict.get("Length1"), Some(&PdfObject::Integer(6000)));
        assert_eq!(&file.data[..2], &deflate::ZLIB_HEADER);

        let Some(PdfObject::Dictionary(descriptor)) = table.get(5) else {
            panic!("object 5 should be the italic descriptor");
        };
        assert_eq!(descriptor.get("Flags"), Some(&PdfObject::Integer(96)));
        assert_eq!(descriptor.get("FontFile2"), Some(&PdfObject::Reference(4)));

        let Some(PdfObject::Dictionary(font)) = table.get(3) else {
            panic!("object 3 should be a font dictionary");
        };
        assert_eq!(font.get("FirstChar"), Some(&PdfObject::Integer(32)));
        assert_eq!(font.get("LastChar"), Some(&PdfObject::Integer(255)));
        match font.get("Widths") {
            Some(PdfObject::Array(widths)) => assert_eq!(widths.len(), 224),
            other => panic!("unexpected widths: {other:?}"),
        }
        assert_eq!(
            resources.resource_dictionary().get("F2"),
            Some(&PdfObject::Reference(6))
        );
    }

    #[test]
    fn test_unresolvable_font_fails() {
        let provider = FixedMetricsProvider::new().with_unavailable("Arial");
        let log = log_with(&[(FontKey::regular("Arial"), 9.0)]);
        let mut table = ObjectTable::new();
        assert!(FontResources::embed(&log, &provider, &mut table).is_err());
    }
}
