//! PDF Writer
//!
//! Object numbers come from one counter starting at 1. Objects may be
//! filled in any order but are written in number order, each offset taken
//! from the byte position just before its `N 0 obj` line. The finished file
//! is checked against its own xref table before it leaves this module.

use super::objects::{to_bytes, PdfDictionary, PdfObject, PdfString};
use crate::{ExportError, Result};
use std::collections::BTreeMap;

/// File header: version comment plus a binary marker line
pub const PDF_HEADER: &[u8] = b"%PDF-1.7\n%\xE2\xE3\xCF\xD3\n";

const EOL: &[u8] = b"\r\n";

/// Indirect objects of one document, keyed by object number
#[derive(Debug, Default)]
pub struct ObjectTable {
    next: u32,
    objects: BTreeMap<u32, PdfObject>,
}

impl ObjectTable {
    pub fn new() -> Self {
        Self {
            next: 1,
            objects: BTreeMap::new(),
        }
    }

    /// Reserve the next object number
    pub fn allocate(&mut self) -> u32 {
        let num = self.next;
        self.next += 1;
        num
    }

    /// Fill a reserved number
    pub fn set(&mut self, num: u32, object: impl Into<PdfObject>) -> Result<()> {
        if num == 0 || num >= self.next {
            return Err(ExportError::assertion(format!(
                "object {num} was never allocated"
            )));
        }
        if self.objects.insert(num, object.into()).is_some() {
            return Err(ExportError::assertion(format!(
                "object {num} written twice"
            )));
        }
        Ok(())
    }

    /// Allocate and fill in one step
    pub fn add(&mut self, object: impl Into<PdfObject>) -> Result<u32> {
        let num = self.allocate();
        self.set(num, object)?;
        Ok(num)
    }

    pub fn get(&self, num: u32) -> Option<&PdfObject> {
        self.objects.get(&num)
    }

    /// Count of allocated objects, excluding the free head
    pub fn len(&self) -> u32 {
        self.next - 1
    }

    pub fn is_empty(&self) -> bool {
        self.next == 1
    }
}

/// Trailer references
#[derive(Debug, Clone)]
pub struct Trailer {
    pub root: u32,
    pub info: u32,
    /// Permanent and changing file identifiers
    pub id: [Vec<u8>; 2],
}

/// Serializes an [`ObjectTable`] into a complete file
pub struct PdfWriter {
    buffer: Vec<u8>,
    offsets: Vec<(u32, usize)>,
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfWriter {
    pub fn new() -> Self {
        Self {
            buffer: Vec::new(),
            offsets: Vec::new(),
        }
    }

    fn position(&self) -> usize {
        self.buffer.len()
    }

    fn write_object(&mut self, num: u32, object: &PdfObject) -> Result<()> {
        self.offsets.push((num, self.position()));
        self.buffer
            .extend_from_slice(format!("{num} 0 obj").as_bytes());
        self.buffer.extend_from_slice(EOL);
        self.buffer.extend_from_slice(&to_bytes(object)?);
        self.buffer.extend_from_slice(EOL);
        self.buffer.extend_from_slice(b"endobj");
        self.buffer.extend_from_slice(EOL);
        Ok(())
    }

    fn write_xref(&mut self, size: u32) {
        self.buffer.extend_from_slice(b"xref\r\n");
        self.buffer
            .extend_from_slice(format!("0 {size}\r\n").as_bytes());
        self.buffer.extend_from_slice(b"0000000000 65535 f\r\n");
        for (_, offset) in &self.offsets {
            self.buffer
                .extend_from_slice(format!("{offset:010} 00000 n\r\n").as_bytes());
        }
    }

    /// Write header, body, xref, trailer; verify; return the bytes
    pub fn write(mut self, table: &ObjectTable, trailer: &Trailer) -> Result<Vec<u8>> {
        let count = table.len();
        if let Some(missing) = (1..=count).find(|n| table.get(*n).is_none()) {
            return Err(ExportError::assertion(format!(
                "object {missing} allocated but never written"
            )));
        }

        self.buffer.extend_from_slice(PDF_HEADER);
        for (num, object) in &table.objects {
            self.write_object(*num, object)?;
        }

        let xref_offset = self.position();
        let size = count + 1;
        self.write_xref(size);

        let trailer_dict = PdfDictionary::new()
            .with("Root", PdfObject::Reference(trailer.root))
            .with("Size", PdfObject::int(size))
            .with(
                "ID",
                PdfObject::array(
                    trailer
                        .id
                        .iter()
                        .map(|id| PdfObject::String(PdfString::hex(id.clone()))),
                ),
            )
            .with("Info", PdfObject::Reference(trailer.info));
        self.buffer.extend_from_slice(b"trailer\r\n");
        self.buffer
            .extend_from_slice(&to_bytes(&trailer_dict.into())?);
        self.buffer.extend_from_slice(b"\r\nstartxref\r\n");
        self.buffer
            .extend_from_slice(format!("{xref_offset}\r\n%%EOF\r\n").as_bytes());

        verify_xref(&self.buffer)?;
        tracing::debug!(objects = count, bytes = self.buffer.len(), "wrote pdf body");
        Ok(self.buffer)
    }
}

/// Parse the xref table of a file written by [`PdfWriter`].
///
/// Returns `(object number, offset)` for every in-use entry.
pub fn read_xref(pdf: &[u8]) -> Result<Vec<(u32, usize)>> {
    const STARTXREF: &[u8] = b"startxref\r\n";
    let marker = pdf
        .windows(STARTXREF.len())
        .rposition(|w| w == STARTXREF)
        .ok_or_else(|| ExportError::assertion("missing startxref"))?;
    let xref_offset: usize = std::str::from_utf8(&pdf[marker + STARTXREF.len()..])
        .ok()
        .and_then(|tail| tail.lines().next())
        .and_then(|l| l.trim().parse().ok())
        .ok_or_else(|| ExportError::assertion("unreadable startxref offset"))?;

    let section = pdf
        .get(xref_offset..)
        .filter(|s| s.starts_with(b"xref\r\n"))
        .and_then(|s| std::str::from_utf8(s).ok())
        .ok_or_else(|| ExportError::assertion("startxref does not point at xref"))?;

    let mut lines = section.split("\r\n").skip(1);
    let size: u32 = lines
        .next()
        .and_then(|l| l.strip_prefix("0 "))
        .and_then(|n| n.parse().ok())
        .ok_or_else(|| ExportError::assertion("malformed xref subsection header"))?;

    let mut entries = Vec::new();
    for (num, line) in (0..size).zip(lines) {
        if line.len() != 18 {
            return Err(ExportError::assertion(format!(
                "xref line for object {num} is not 20 bytes"
            )));
        }
        if num == 0 {
            continue;
        }
        let offset = line[..10]
            .parse()
            .map_err(|_| ExportError::assertion(format!("bad offset for object {num}")))?;
        entries.push((num, offset));
    }
    if entries.len() + 1 != size as usize {
        return Err(ExportError::assertion("xref table is truncated"));
    }
    Ok(entries)
}

/// Every xref offset must land exactly on `N 0 obj`
pub fn verify_xref(pdf: &[u8]) -> Result<()> {
    for (num, offset) in read_xref(pdf)? {
        let expected = format!("{num} 0 obj");
        if !pdf
            .get(offset..)
            .is_some_and(|rest| rest.starts_with(expected.as_bytes()))
        {
            return Err(ExportError::assertion(format!(
                "xref offset {offset} for object {num} does not point at its header"
            )));
        }
    }
    Ok(())
}
