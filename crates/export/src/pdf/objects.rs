//! PDF Object Model
//!
//! The object types a PDF body is built from, and their byte serialization.
//! Dictionaries keep insertion order so the written file reads the way it
//! was assembled.

use std::io::{self, Write};

/// PDF object types
#[derive(Debug, Clone, PartialEq)]
pub enum PdfObject {
    Boolean(bool),
    Integer(i64),
    Real(f64),
    String(PdfString),
    /// Name without the leading slash
    Name(String),
    Array(Vec<PdfObject>),
    Dictionary(PdfDictionary),
    Stream(PdfStream),
    /// Indirect reference to an object (generation is always 0)
    Reference(u32),
}

/// PDF string encoding
#[derive(Debug, Clone, PartialEq)]
pub enum PdfString {
    /// Literal string enclosed in parentheses
    Literal(Vec<u8>),
    /// Hexadecimal string enclosed in angle brackets
    Hex(Vec<u8>),
}

impl PdfString {
    /// Literal string from text, WinAnsi-encoded
    pub fn text(s: &str) -> Self {
        PdfString::Literal(text_engine::winansi::encode(s))
    }

    pub fn hex(data: impl Into<Vec<u8>>) -> Self {
        PdfString::Hex(data.into())
    }

    /// Text string for document-level metadata: a literal when the text is
    /// plain ASCII, otherwise UTF-16BE with a byte order mark
    pub fn text_string(s: &str) -> Self {
        if s.is_ascii() {
            return PdfString::Literal(s.as_bytes().to_vec());
        }
        let mut data = vec![0xFE, 0xFF];
        for unit in s.encode_utf16() {
            data.extend_from_slice(&unit.to_be_bytes());
        }
        PdfString::Hex(data)
    }
}

/// PDF dictionary
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PdfDictionary {
    entries: Vec<(String, PdfObject)>,
}

impl PdfDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dictionary whose first entry is `/Type /type_name`
    pub fn typed(type_name: &str) -> Self {
        let mut dict = Self::new();
        dict.insert("Type", PdfObject::name(type_name));
        dict
    }

    /// Insert or replace a key
    pub fn insert(&mut self, key: impl Into<String>, value: PdfObject) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Builder form of [`PdfDictionary::insert`]
    pub fn with(mut self, key: impl Into<String>, value: PdfObject) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&PdfObject> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &PdfObject)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }
}

/// PDF stream: dictionary plus raw bytes.
///
/// `/Length` is filled in at serialization time from `data`.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfStream {
    pub dict: PdfDictionary,
    pub data: Vec<u8>,
}

impl PdfStream {
    pub fn new(dict: PdfDictionary, data: Vec<u8>) -> Self {
        Self { dict, data }
    }
}

/// Serializer for PDF objects
pub struct PdfSerializer<W: Write> {
    writer: W,
}

impl<W: Write> PdfSerializer<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write_object(&mut self, obj: &PdfObject) -> io::Result<()> {
        match obj {
            PdfObject::Boolean(b) => write!(self.writer, "{b}"),
            PdfObject::Integer(n) => write!(self.writer, "{n}"),
            PdfObject::Real(n) => write!(self.writer, "{}", fmt_num(*n)),
            PdfObject::String(s) => self.write_string(s),
            PdfObject::Name(name) => self.write_name(name),
            PdfObject::Array(arr) => self.write_array(arr),
            PdfObject::Dictionary(dict) => self.write_dictionary(dict),
            PdfObject::Stream(stream) => self.write_stream(stream),
            PdfObject::Reference(num) => write!(self.writer, "{num} 0 R"),
        }
    }

    fn write_string(&mut self, s: &PdfString) -> io::Result<()> {
        match s {
            PdfString::Literal(data) => {
                self.writer.write_all(b"(")?;
                self.writer.write_all(&escape_literal(data))?;
                self.writer.write_all(b")")
            }
            PdfString::Hex(data) => {
                write!(self.writer, "<")?;
                for byte in data {
                    write!(self.writer, "{byte:02X}")?;
                }
                write!(self.writer, ">")
            }
        }
    }

    fn write_name(&mut self, name: &str) -> io::Result<()> {
        write!(self.writer, "/")?;
        for byte in name.bytes() {
            match byte {
                b'#' | b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' | b'/' | b'%' => {
                    write!(self.writer, "#{byte:02X}")?
                }
                0x21..=0x7E => self.writer.write_all(&[byte])?,
                _ => write!(self.writer, "#{byte:02X}")?,
            }
        }
        Ok(())
    }

    fn write_array(&mut self, arr: &[PdfObject]) -> io::Result<()> {
        write!(self.writer, "[")?;
        for (i, obj) in arr.iter().enumerate() {
            if i > 0 {
                write!(self.writer, " ")?;
            }
            self.write_object(obj)?;
        }
        write!(self.writer, "]")
    }

    fn write_dictionary(&mut self, dict: &PdfDictionary) -> io::Result<()> {
        write!(self.writer, "<<")?;
        for (key, value) in dict.iter() {
            write!(self.writer, " ")?;
            self.write_name(key)?;
            write!(self.writer, " ")?;
            self.write_object(value)?;
        }
        write!(self.writer, " >>")
    }

    fn write_stream(&mut self, stream: &PdfStream) -> io::Result<()> {
        let dict = stream
            .dict
            .clone()
            .with("Length", PdfObject::Integer(stream.data.len() as i64));
        self.write_dictionary(&dict)?;
        self.writer.write_all(b"\r\nstream\r\n")?;
        self.writer.write_all(&stream.data)?;
        self.writer.write_all(b"\r\nendstream")
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Serialize one object to bytes
pub fn to_bytes(obj: &PdfObject) -> io::Result<Vec<u8>> {
    let mut serializer = PdfSerializer::new(Vec::new());
    serializer.write_object(obj)?;
    Ok(serializer.into_inner())
}

/// Escape `\`, `(` and `)` with a backslash; every other byte passes through
pub fn escape_literal(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len());
    for &byte in data {
        if matches!(byte, b'\\' | b'(' | b')') {
            out.push(b'\\');
        }
        out.push(byte);
    }
    out
}

/// Number with at most four decimals and no trailing zeros
pub fn fmt_num(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{n:.0}")
    } else {
        let s = format!("{n:.4}");
        let s = s.trim_end_matches('0').trim_end_matches('.');
        if s == "-0" {
            "0".to_string()
        } else {
            s.to_string()
        }
    }
}

impl PdfObject {
    pub fn name(s: impl Into<String>) -> Self {
        PdfObject::Name(s.into())
    }

    pub fn text(s: &str) -> Self {
        PdfObject::String(PdfString::text(s))
    }

    pub fn text_string(s: &str) -> Self {
        PdfObject::String(PdfString::text_string(s))
    }

    pub fn int(n: impl Into<i64>) -> Self {
        PdfObject::Integer(n.into())
    }

    pub fn array(objects: impl IntoIterator<Item = PdfObject>) -> Self {
        PdfObject::Array(objects.into_iter().collect())
    }
}

impl From<PdfDictionary> for PdfObject {
    fn from(dict: PdfDictionary) -> Self {
        PdfObject::Dictionary(dict)
    }
}

impl From<PdfStream> for PdfObject {
    fn from(stream: PdfStream) -> Self {
        PdfObject::Stream(stream)
    }
}
