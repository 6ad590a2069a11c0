//! GZIP decompression.
//!
//! Parses the container, inflates the DEFLATE blocks between header and
//! trailer, then checks the trailer according to [`InflateOptions`].

pub mod header;

pub use header::{parse_header, read_trailer, GzipHeader, GzipTrailer, TRAILER_LEN};

use crate::deflate::{capacity_hint, InflateDecoder, OutputBuffer};
use crate::error::{InflateError, Result};
use crate::options::InflateOptions;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GzipOutput {
    pub output: Vec<u8>,
    /// Header, DEFLATE data and trailer bytes consumed
    pub bytes_read: usize,
    pub bytes_written: usize,
}

/// Decompress a whole gzip buffer with default options.
pub fn inflate(buffer: &[u8]) -> Result<Vec<u8>> {
    inflate_with_options(buffer, &InflateOptions::default())
}

/// Decompress `length` bytes of `buffer` starting at `offset`.
pub fn inflate_range(buffer: &[u8], offset: usize, length: usize) -> Result<Vec<u8>> {
    Ok(inflate_with_stats(buffer, offset, length, &InflateOptions::default())?.output)
}

/// Decompress a whole gzip buffer.
pub fn inflate_with_options(buffer: &[u8], options: &InflateOptions) -> Result<Vec<u8>> {
    Ok(inflate_with_stats(buffer, 0, buffer.len(), options)?.output)
}

/// Decompress with stats.
pub fn inflate_with_stats(
    buffer: &[u8],
    offset: usize,
    length: usize,
    options: &InflateOptions,
) -> Result<GzipOutput> {
    let data = window(buffer, offset, length)?;

    let header = parse_header(data)?;
    let trailer = read_trailer(data)?;

    let deflate_end = data.len() - TRAILER_LEN;
    if deflate_end < header.data_offset {
        return Err(InflateError::eof(data.len()));
    }
    let deflate_data = &data[header.data_offset..deflate_end];

    let capacity = capacity_hint(
        trailer.isize as usize,
        deflate_data.len(),
        options.max_output_size,
    );
    tracing::debug!(
        "inflating {} bytes of deflate data, trailer declares {} bytes",
        deflate_data.len(),
        trailer.isize
    );

    let output = OutputBuffer::with_capacity(capacity, options.max_output_size);
    let outcome = InflateDecoder::new(deflate_data, output).run()?;

    if options.verify_size && outcome.output.len() as u32 != trailer.isize {
        return Err(InflateError::SizeMismatch {
            declared: trailer.isize,
            actual: outcome.output.len(),
        });
    }
    if options.verify_checksum {
        let actual = crc32fast::hash(&outcome.output);
        if actual != trailer.crc32 {
            return Err(InflateError::ChecksumMismatch {
                expected: trailer.crc32,
                actual,
            });
        }
    }

    let bytes_written = outcome.output.len();
    Ok(GzipOutput {
        output: outcome.output,
        bytes_read: header.data_offset + outcome.bytes_consumed + TRAILER_LEN,
        bytes_written,
    })
}

fn window(buffer: &[u8], offset: usize, length: usize) -> Result<&[u8]> {
    offset
        .checked_add(length)
        .and_then(|end| buffer.get(offset..end))
        .ok_or(InflateError::InvalidRange {
            offset,
            length,
            available: buffer.len(),
        })
}
