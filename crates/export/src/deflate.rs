//! zlib framing for embedded binary streams
//!
//! Font programs and the ICC profile are stored as `/FlateDecode` streams:
//! a two-byte zlib header, a raw deflate body and the Adler-32 checksum of
//! the uncompressed bytes, big-endian.

use flate2::write::DeflateEncoder;
use flate2::Compression;
use std::io::{self, Write};

/// CMF/FLG pair: 32K window, default compression level
pub const ZLIB_HEADER: [u8; 2] = [0x78, 0x9C];

const ADLER_MOD: u32 = 65521;

/// Longest run of bytes that cannot overflow the u32 sums before reduction
const ADLER_NMAX: usize = 5552;

/// Adler-32 checksum
pub fn adler32(data: &[u8]) -> u32 {
    let mut a: u32 = 1;
    let mut b: u32 = 0;
    for block in data.chunks(ADLER_NMAX) {
        for &byte in block {
            a += u32::from(byte);
            b += a;
        }
        a %= ADLER_MOD;
        b %= ADLER_MOD;
    }
    (b << 16) | a
}

/// Compress `data` into a zlib stream
pub fn compress(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut out = Vec::with_capacity(data.len() / 2 + 16);
    out.extend_from_slice(&ZLIB_HEADER);

    let mut encoder = DeflateEncoder::new(out, Compression::default());
    encoder.write_all(data)?;
    let mut out = encoder.finish()?;

    out.extend_from_slice(&adler32(data).to_be_bytes());
    Ok(out)
}
