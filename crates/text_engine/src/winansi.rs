//! WinAnsi (Windows code page 1252) encoding
//!
//! Embedded fonts use `/WinAnsiEncoding`, so width tables and content
//! strings both go through this mapping.

/// Code points for 0x80..=0x9F; `None` marks unassigned slots
const HIGH_CONTROL: [Option<char>; 32] = [
    Some('\u{20AC}'),
    None,
    Some('\u{201A}'),
    Some('\u{0192}'),
    Some('\u{201E}'),
    Some('\u{2026}'),
    Some('\u{2020}'),
    Some('\u{2021}'),
    Some('\u{02C6}'),
    Some('\u{2030}'),
    Some('\u{0160}'),
    Some('\u{2039}'),
    Some('\u{0152}'),
    None,
    Some('\u{017D}'),
    None,
    None,
    Some('\u{2018}'),
    Some('\u{2019}'),
    Some('\u{201C}'),
    Some('\u{201D}'),
    Some('\u{2022}'),
    Some('\u{2013}'),
    Some('\u{2014}'),
    Some('\u{02DC}'),
    Some('\u{2122}'),
    Some('\u{0161}'),
    Some('\u{203A}'),
    Some('\u{0153}'),
    None,
    Some('\u{017E}'),
    Some('\u{0178}'),
];

/// Byte used for characters the code page cannot represent
pub const REPLACEMENT: u8 = b'?';

/// Character for a code, if the code page assigns one
pub fn decode(code: u8) -> Option<char> {
    match code {
        0x80..=0x9F => HIGH_CONTROL[(code - 0x80) as usize],
        _ => Some(char::from(code)),
    }
}

/// Code for a character, if the code page has one
pub fn encode_char(ch: char) -> Option<u8> {
    let cp = ch as u32;
    if cp < 0x80 || (0xA0..=0xFF).contains(&cp) {
        return Some(cp as u8);
    }
    HIGH_CONTROL
        .iter()
        .position(|c| *c == Some(ch))
        .map(|i| 0x80 + i as u8)
}

/// Encode a string, substituting [`REPLACEMENT`] for unmappable characters
pub fn encode(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| encode_char(ch).unwrap_or(REPLACEMENT))
        .collect()
}
