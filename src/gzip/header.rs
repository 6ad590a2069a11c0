//! GZIP container parsing (RFC 1952).
//!
//! The header is validated and skipped; the trailer is read from the last
//! eight bytes of the input window.

use crate::deflate::bitstream::BitReader;
use crate::error::{InflateError, Result};

pub const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];
pub const METHOD_DEFLATE: u8 = 8;

// Flag bits in header byte 3
pub const FTEXT: u8 = 0x01;
pub const FHCRC: u8 = 0x02;
pub const FEXTRA: u8 = 0x04;
pub const FNAME: u8 = 0x08;
pub const FCOMMENT: u8 = 0x10;
const FRESERVED: u8 = 0xE0;

/// CRC32 + ISIZE
pub const TRAILER_LEN: usize = 8;

/// Parsed gzip member header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GzipHeader {
    pub flags: u8,
    /// Offset of the first DEFLATE block from the start of the input
    pub data_offset: usize,
}

impl GzipHeader {
    pub fn is_text(&self) -> bool {
        self.flags & FTEXT != 0
    }

    pub fn has_extra(&self) -> bool {
        self.flags & FEXTRA != 0
    }

    pub fn has_name(&self) -> bool {
        self.flags & FNAME != 0
    }

    pub fn has_comment(&self) -> bool {
        self.flags & FCOMMENT != 0
    }

    pub fn has_header_crc(&self) -> bool {
        self.flags & FHCRC != 0
    }
}

/// Trailer fields, both little-endian on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GzipTrailer {
    pub crc32: u32,
    /// Uncompressed size modulo 2^32
    pub isize: u32,
}

/// Validate the header and locate the DEFLATE data.
pub fn parse_header(data: &[u8]) -> Result<GzipHeader> {
    let mut reader = BitReader::new(data);

    if reader.read_aligned_bytes(2)? != GZIP_MAGIC {
        return Err(InflateError::invalid_header("bad gzip magic"));
    }
    if reader.read_u8()? != METHOD_DEFLATE {
        return Err(InflateError::invalid_header("unsupported compression method"));
    }
    let flags = reader.read_u8()?;
    if flags & FRESERVED != 0 {
        return Err(InflateError::invalid_header("reserved flag bits set"));
    }

    // MTIME (4), XFL (1), OS (1)
    reader.read_aligned_bytes(6)?;

    if flags & FEXTRA != 0 {
        let xlen = reader.read_u16_le()?;
        reader.read_aligned_bytes(xlen as usize)?;
    }
    if flags & FNAME != 0 {
        skip_zero_terminated(&mut reader)?;
    }
    if flags & FCOMMENT != 0 {
        skip_zero_terminated(&mut reader)?;
    }
    // CRC16 of the header, not verified
    if flags & FHCRC != 0 {
        reader.read_aligned_bytes(2)?;
    }

    let header = GzipHeader {
        flags,
        data_offset: reader.position(),
    };
    tracing::debug!(
        "gzip header: flags {:#04x}, deflate data at byte {}",
        header.flags,
        header.data_offset
    );
    Ok(header)
}

fn skip_zero_terminated(reader: &mut BitReader<'_>) -> Result<()> {
    while reader.read_u8()? != 0 {}
    Ok(())
}

/// Read CRC32 and ISIZE from the last eight bytes.
///
/// Only correct for a single member with nothing after it.
pub fn read_trailer(data: &[u8]) -> Result<GzipTrailer> {
    let start = data
        .len()
        .checked_sub(TRAILER_LEN)
        .ok_or_else(|| InflateError::eof(data.len()))?;
    let t = &data[start..];
    Ok(GzipTrailer {
        crc32: u32::from_le_bytes([t[0], t[1], t[2], t[3]]),
        isize: u32::from_le_bytes([t[4], t[5], t[6], t[7]]),
    })
}
