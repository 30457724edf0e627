//! Printer settings parts
//!
//! Each worksheet links a binary DEVMODE record so a spreadsheet
//! application prints with the same paper and orientation as the PDF.
//! Only the public part of the record is written; there is no
//! driver-private tail.

use grid_model::PageSetup;

/// Size of the public DEVMODEW record
pub const DEVMODE_SIZE: usize = 220;

const SPEC_VERSION: u16 = 0x0401;
/// Characters in the device and form name fields, terminator included
const NAME_CHARS: usize = 32;

const DM_ORIENTATION: u32 = 0x0000_0001;
const DM_PAPERSIZE: u32 = 0x0000_0002;
const DM_PAPERLENGTH: u32 = 0x0000_0004;
const DM_PAPERWIDTH: u32 = 0x0000_0008;
const DM_SCALE: u32 = 0x0000_0010;
const DM_COPIES: u32 = 0x0000_0100;

const ORIENTATION_PORTRAIT: i16 = 1;
const ORIENTATION_LANDSCAPE: i16 = 2;

/// Offsets of the fields this module writes
mod offset {
    pub const SPEC_VERSION: usize = 64;
    pub const SIZE: usize = 68;
    pub const FIELDS: usize = 72;
    pub const ORIENTATION: usize = 76;
    pub const PAPER_SIZE: usize = 78;
    pub const PAPER_LENGTH: usize = 80;
    pub const PAPER_WIDTH: usize = 82;
    pub const SCALE: usize = 84;
    pub const COPIES: usize = 86;
}

/// The subset of DEVMODE a printed grid needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DevMode {
    pub device_name: String,
    pub landscape: bool,
    pub paper_code: u16,
    /// Portrait paper height in tenths of a millimetre
    pub paper_length: i16,
    /// Portrait paper width in tenths of a millimetre
    pub paper_width: i16,
    /// Percent
    pub scale: i16,
    pub copies: i16,
}

/// Hundredths of an inch to tenths of a millimetre
fn tenths_mm(hundredths: u32) -> i16 {
    let value = (f64::from(hundredths) * 0.254 * 10.0).round();
    value.clamp(0.0, f64::from(i16::MAX)) as i16
}

impl DevMode {
    pub fn from_setup(setup: &PageSetup, device_name: &str) -> Self {
        let (width, height) = setup.paper_size();
        Self {
            device_name: device_name.to_string(),
            landscape: setup.landscape,
            paper_code: setup.paper.code(),
            paper_length: tenths_mm(height),
            paper_width: tenths_mm(width),
            scale: 100,
            copies: 1,
        }
    }

    /// Little-endian DEVMODEW bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = vec![0u8; DEVMODE_SIZE];

        for (i, unit) in self
            .device_name
            .encode_utf16()
            .take(NAME_CHARS - 1)
            .enumerate()
        {
            buf[i * 2..i * 2 + 2].copy_from_slice(&unit.to_le_bytes());
        }

        let mut put_u16 = |at: usize, value: u16| {
            buf[at..at + 2].copy_from_slice(&value.to_le_bytes());
        };
        put_u16(offset::SPEC_VERSION, SPEC_VERSION);
        put_u16(offset::SIZE, DEVMODE_SIZE as u16);
        let orientation = if self.landscape {
            ORIENTATION_LANDSCAPE
        } else {
            ORIENTATION_PORTRAIT
        };
        put_u16(offset::ORIENTATION, orientation as u16);
        put_u16(offset::PAPER_SIZE, self.paper_code);
        put_u16(offset::PAPER_LENGTH, self.paper_length as u16);
        put_u16(offset::PAPER_WIDTH, self.paper_width as u16);
        put_u16(offset::SCALE, self.scale as u16);
        put_u16(offset::COPIES, self.copies as u16);

        let fields =
            DM_ORIENTATION | DM_PAPERSIZE | DM_PAPERLENGTH | DM_PAPERWIDTH | DM_SCALE | DM_COPIES;
        buf[offset::FIELDS..offset::FIELDS + 4].copy_from_slice(&fields.to_le_bytes());
        buf
    }
}
