//! PDF/A-1a Support
//!
//! Document information, XMP metadata, the sRGB output intent and the ICC
//! profile it points at. Together with embedded fonts and the structure
//! tree these are what an archival reader checks for.

use super::objects::{PdfDictionary, PdfObject, PdfStream};
use crate::{deflate, Result};
use chrono::{DateTime, FixedOffset};
use quick_xml::escape::escape;
use uuid::Uuid;

/// Output condition registered for sRGB
pub const SRGB_CONDITION: &str = "sRGB IEC61966-2.1";

/// Descriptive fields shared by the Info dictionary and the XMP packet
#[derive(Debug, Clone)]
pub struct DocumentInfo {
    pub title: String,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub creator: String,
    pub producer: String,
    pub created: DateTime<FixedOffset>,
    pub document_id: Uuid,
    pub instance_id: Uuid,
}

/// `D:YYYYMMDDHHmmSS+HH'mm'`
pub fn pdf_date(date: &DateTime<FixedOffset>) -> String {
    let offset = date.offset().local_minus_utc();
    let sign = if offset < 0 { '-' } else { '+' };
    let offset = offset.abs();
    format!(
        "D:{}{sign}{:02}'{:02}'",
        date.format("%Y%m%d%H%M%S"),
        offset / 3600,
        (offset % 3600) / 60
    )
}

/// XMP date form, `YYYY-MM-DDTHH:MM:SS+HH:MM`
pub fn xmp_date(date: &DateTime<FixedOffset>) -> String {
    date.format("%Y-%m-%dT%H:%M:%S%:z").to_string()
}

impl DocumentInfo {
    /// The trailer `/Info` dictionary
    pub fn info_dictionary(&self) -> PdfDictionary {
        let date = PdfObject::text(&pdf_date(&self.created));
        let mut dict = PdfDictionary::new().with("Title", PdfObject::text_string(&self.title));
        if let Some(author) = &self.author {
            dict.insert("Author", PdfObject::text_string(author));
        }
        if let Some(subject) = &self.subject {
            dict.insert("Subject", PdfObject::text_string(subject));
        }
        dict.with("Creator", PdfObject::text_string(&self.creator))
            .with("Producer", PdfObject::text_string(&self.producer))
            .with("CreationDate", date.clone())
            .with("ModDate", date)
            .with("Trapped", PdfObject::name("False"))
    }

    /// XMP packet describing the document
    pub fn xmp_packet(&self) -> Vec<u8> {
        let date = xmp_date(&self.created);
        let mut xmp = String::new();
        xmp.push_str("<?xpacket begin=\"\u{FEFF}\" id=\"W5M0MpCehiHzreSzNTczkc9d\"?>\n");
        xmp.push_str("<x:xmpmeta xmlns:x=\"adobe:ns:meta/\">\n");
        xmp.push_str("<rdf:RDF xmlns:rdf=\"http://www.w3.org/1999/02/22-rdf-syntax-ns#\">\n");

        xmp.push_str("<rdf:Description rdf:about=\"\" xmlns:dc=\"http://purl.org/dc/elements/1.1/\">\n");
        xmp.push_str("<dc:format>application/pdf</dc:format>\n");
        xmp.push_str(&format!(
            "<dc:title><rdf:Alt><rdf:li xml:lang=\"x-default\">{}</rdf:li></rdf:Alt></dc:title>\n",
            escape(self.title.as_str())
        ));
        if let Some(author) = &self.author {
            xmp.push_str(&format!(
                "<dc:creator><rdf:Seq><rdf:li>{}</rdf:li></rdf:Seq></dc:creator>\n",
                escape(author.as_str())
            ));
        }
        if let Some(subject) = &self.subject {
            xmp.push_str(&format!(
                "<dc:description><rdf:Alt><rdf:li xml:lang=\"x-default\">{}</rdf:li></rdf:Alt></dc:description>\n",
                escape(subject.as_str())
            ));
        }
        xmp.push_str("</rdf:Description>\n");

        xmp.push_str("<rdf:Description rdf:about=\"\" xmlns:xmp=\"http://ns.adobe.com/xap/1.0/\">\n");
        xmp.push_str(&format!(
            "<xmp:CreatorTool>{}</xmp:CreatorTool>\n",
            escape(self.creator.as_str())
        ));
        xmp.push_str(&format!("<xmp:CreateDate>{date}</xmp:CreateDate>\n"));
        xmp.push_str(&format!("<xmp:ModifyDate>{date}</xmp:ModifyDate>\n"));
        xmp.push_str(&format!("<xmp:MetadataDate>{date}</xmp:MetadataDate>\n"));
        xmp.push_str("</rdf:Description>\n");

        xmp.push_str("<rdf:Description rdf:about=\"\" xmlns:pdf=\"http://ns.adobe.com/pdf/1.3/\">\n");
        xmp.push_str(&format!(
            "<pdf:Producer>{}</pdf:Producer>\n",
            escape(self.producer.as_str())
        ));
        xmp.push_str("</rdf:Description>\n");

        xmp.push_str("<rdf:Description rdf:about=\"\" xmlns:xmpMM=\"http://ns.adobe.com/xap/1.0/mm/\">\n");
        xmp.push_str(&format!(
            "<xmpMM:DocumentID>uuid:{}</xmpMM:DocumentID>\n",
            self.document_id
        ));
        xmp.push_str(&format!(
            "<xmpMM:InstanceID>uuid:{}</xmpMM:InstanceID>\n",
            self.instance_id
        ));
        xmp.push_str("</rdf:Description>\n");

        xmp.push_str("<rdf:Description rdf:about=\"\" xmlns:pdfaid=\"http://www.aiim.org/pdfa/ns/id/\">\n");
        xmp.push_str("<pdfaid:part>1</pdfaid:part>\n");
        xmp.push_str("<pdfaid:conformance>A</pdfaid:conformance>\n");
        xmp.push_str("</rdf:Description>\n");

        xmp.push_str("</rdf:RDF>\n</x:xmpmeta>\n");
        // Room for in-place metadata edits
        for _ in 0..20 {
            xmp.push_str(&" ".repeat(80));
            xmp.push('\n');
        }
        xmp.push_str("<?xpacket end=\"w\"?>");
        xmp.into_bytes()
    }

    /// Uncompressed `/Metadata` stream
    pub fn metadata_stream(&self) -> PdfStream {
        let dict = PdfDictionary::typed("Metadata").with("Subtype", PdfObject::name("XML"));
        PdfStream::new(dict, self.xmp_packet())
    }
}

/// Empty outline tree
pub fn outlines() -> PdfDictionary {
    PdfDictionary::typed("Outlines").with("Count", PdfObject::int(0))
}

/// sRGB output intent pointing at the ICC profile object
pub fn srgb_output_intent(icc_profile_ref: u32) -> PdfDictionary {
    let condition = PdfObject::text(SRGB_CONDITION);
    PdfDictionary::typed("OutputIntent")
        .with("S", PdfObject::name("GTS_PDFA1"))
        .with("OutputConditionIdentifier", condition.clone())
        .with("OutputCondition", condition.clone())
        .with("RegistryName", PdfObject::text("http://www.color.org"))
        .with("Info", condition)
        .with("DestOutputProfile", PdfObject::Reference(icc_profile_ref))
}

/// Compressed three-component ICC profile stream
pub fn srgb_icc_stream() -> Result<PdfStream> {
    let profile = srgb_profile();
    let dict = PdfDictionary::new()
        .with("N", PdfObject::int(3))
        .with("Filter", PdfObject::name("FlateDecode"));
    Ok(PdfStream::new(dict, deflate::compress(&profile)?))
}

/// ICC XYZ number triple, s15Fixed16
fn xyz(x: f64, y: f64, z: f64) -> Vec<u8> {
    let mut data = b"XYZ \0\0\0\0".to_vec();
    for v in [x, y, z] {
        data.extend_from_slice(&s15_fixed16(v).to_be_bytes());
    }
    data
}

fn s15_fixed16(value: f64) -> i32 {
    (value * 65536.0).round() as i32
}

/// `curv` with a single u8Fixed8 gamma
fn gamma_curve(gamma: f64) -> Vec<u8> {
    let mut data = b"curv\0\0\0\0".to_vec();
    data.extend_from_slice(&1u32.to_be_bytes());
    data.extend_from_slice(&((gamma * 256.0).round() as u16).to_be_bytes());
    data
}

fn text_description(text: &str) -> Vec<u8> {
    let mut data = b"desc\0\0\0\0".to_vec();
    data.extend_from_slice(&((text.len() + 1) as u32).to_be_bytes());
    data.extend_from_slice(text.as_bytes());
    data.push(0);
    // No Unicode or Macintosh ScriptCode variants
    data.extend_from_slice(&[0; 8]);
    data.extend_from_slice(&[0; 3]);
    data.extend_from_slice(&[0; 67]);
    data
}

fn text_tag(text: &str) -> Vec<u8> {
    let mut data = b"text\0\0\0\0".to_vec();
    data.extend_from_slice(text.as_bytes());
    data.push(0);
    data
}

/// Version 2.1 monitor profile with sRGB primaries and a 2.2 gamma
pub fn srgb_profile() -> Vec<u8> {
    const HEADER_LEN: usize = 128;
    let curve = gamma_curve(2.2);
    let tags: Vec<(&[u8; 4], Vec<u8>)> = vec![
        (b"desc", text_description(SRGB_CONDITION)),
        (b"cprt", text_tag("No copyright, use freely")),
        (b"wtpt", xyz(0.9642, 1.0, 0.8249)),
        (b"rXYZ", xyz(0.4361, 0.2225, 0.0139)),
        (b"gXYZ", xyz(0.3851, 0.7169, 0.0971)),
        (b"bXYZ", xyz(0.1431, 0.0606, 0.7141)),
        (b"rTRC", curve.clone()),
        (b"gTRC", curve.clone()),
        (b"bTRC", curve),
    ];

    let mut table = Vec::new();
    let mut data = Vec::new();
    let data_start = HEADER_LEN + 4 + tags.len() * 12;
    table.extend_from_slice(&(tags.len() as u32).to_be_bytes());
    for (signature, body) in &tags {
        let offset = data_start + data.len();
        table.extend_from_slice(*signature);
        table.extend_from_slice(&(offset as u32).to_be_bytes());
        table.extend_from_slice(&(body.len() as u32).to_be_bytes());
        data.extend_from_slice(body);
        while data.len() % 4 != 0 {
            data.push(0);
        }
    }

    let size = data_start + data.len();
    let mut profile = Vec::with_capacity(size);
    profile.extend_from_slice(&(size as u32).to_be_bytes());
    profile.extend_from_slice(b"none");
    profile.extend_from_slice(&[0x02, 0x10, 0x00, 0x00]);
    profile.extend_from_slice(b"mntr");
    profile.extend_from_slice(b"RGB ");
    profile.extend_from_slice(b"XYZ ");
    // Creation date: 2000-01-01 00:00:00
    for field in [2000u16, 1, 1, 0, 0, 0] {
        profile.extend_from_slice(&field.to_be_bytes());
    }
    profile.extend_from_slice(b"acsp");
    // Platform, flags, manufacturer, model, attributes, rendering intent
    profile.extend_from_slice(&[0; 4 + 4 + 4 + 4 + 8 + 4]);
    // D50 illuminant
    profile.extend_from_slice(&xyz(0.9642, 1.0, 0.8249)[8..]);
    // Creator, profile id and reserved bytes
    profile.resize(HEADER_LEN, 0);

    profile.extend_from_slice(&table);
    profile.extend_from_slice(&data);
    profile
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::objects::PdfString;
    use chrono::TimeZone;

    fn info() -> DocumentInfo {
        let created = FixedOffset::east_opt(3600)
            .unwrap()
            .with_ymd_and_hms(2024, 3, 5, 14, 7, 9)
            .unwrap();
        DocumentInfo {
            title: "Sales & Returns Data".into(),
            author: Some("Ops".into()),
            subject: None,
            creator: "Grid Export".into(),
            producer: "grid-export 0.1.0".into(),
            created,
            document_id: Uuid::nil(),
            instance_id: Uuid::nil(),
        }
    }

    #[test]
    fn test_pdf_date_format() {
        assert_eq!(pdf_date(&info().created), "D:20240305140709+01'00'");
        let west = FixedOffset::west_opt(5 * 3600 + 30 * 60)
            .unwrap()
            .with_ymd_and_hms(2023, 12, 31, 23, 59, 0)
            .unwrap();
        assert_eq!(pdf_date(&west), "D:20231231235900-05'30'");
    }

    #[test]
    fn test_info_dictionary() {
        let dict = info().info_dictionary();
        assert_eq!(dict.get("Trapped"), Some(&PdfObject::name("False")));
        assert_eq!(dict.get("Author"), Some(&PdfObject::text("Ops")));
        assert!(dict.get("Subject").is_none());
        assert_eq!(dict.get("CreationDate"), dict.get("ModDate"));
    }

    #[test]
    fn test_info_strings_outside_ascii_are_utf16() {
        let mut info = info();
        info.title = "Umsatz € Übersicht".into();
        let dict = info.info_dictionary();
        let Some(PdfObject::String(PdfString::Hex(title))) = dict.get("Title") else {
            panic!("title is not a hex string");
        };
        assert_eq!(&title[..2], &[0xFE, 0xFF]);
        let units: Vec<u16> = title[2..]
            .chunks(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        assert_eq!(String::from_utf16(&units).unwrap(), "Umsatz € Übersicht");
        assert_eq!(dict.get("Producer"), Some(&PdfObject::text("grid-export 0.1.0")));
    }

    #[test]
    fn test_xmp_escapes_and_identifies_conformance() {
        let xmp = String::from_utf8(info().xmp_packet()).unwrap();
        assert!(xmp.contains("Sales &amp; Returns Data"));
        assert!(xmp.contains("<pdfaid:part>1</pdfaid:part>"));
        assert!(xmp.contains("<pdfaid:conformance>A</pdfaid:conformance>"));
        assert!(xmp.contains("<xmp:CreateDate>2024-03-05T14:07:09+01:00</xmp:CreateDate>"));
        assert!(xmp.contains(&format!("uuid:{}", Uuid::nil())));
        assert!(xmp.ends_with("<?xpacket end=\"w\"?>"));
    }

    #[test]
    fn test_icc_profile_layout() {
        let profile = srgb_profile();
        let size = u32::from_be_bytes(profile[0..4].try_into().unwrap()) as usize;
        assert_eq!(size, profile.len());
        assert_eq!(&profile[36..40], b"acsp");
        assert_eq!(&profile[16..20], b"RGB ");
        let tag_count = u32::from_be_bytes(profile[128..132].try_into().unwrap());
        assert_eq!(tag_count, 9);
        // Every tag lies inside the profile
        for i in 0..tag_count as usize {
            let entry = &profile[132 + i * 12..144 + i * 12];
            let offset = u32::from_be_bytes(entry[4..8].try_into().unwrap()) as usize;
            let len = u32::from_be_bytes(entry[8..12].try_into().unwrap()) as usize;
            assert!(offset + len <= profile.len());
        }
    }

    #[test]
    fn test_icc_stream_is_compressed() {
        let stream = srgb_icc_stream().unwrap();
        assert_eq!(stream.dict.get("N"), Some(&PdfObject::int(3)));
        assert_eq!(&stream.data[..2], &deflate::ZLIB_HEADER);
    }

    #[test]
    fn test_output_intent() {
        let intent = srgb_output_intent(42);
        assert_eq!(intent.get("S"), Some(&PdfObject::name("GTS_PDFA1")));
        assert_eq!(intent.get("DestOutputProfile"), Some(&PdfObject::Reference(42)));
        for key in ["OutputCondition", "OutputConditionIdentifier", "Info"] {
            assert_eq!(intent.get(key), Some(&PdfObject::text(SRGB_CONDITION)), "{key}");
        }
    }
}
