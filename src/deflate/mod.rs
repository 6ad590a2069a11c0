//! RFC 1951 DEFLATE 解码
//!
//! 位流读取、规范 Huffman 树、块状态机和 LZ77 复制。

pub mod bitstream;
pub mod huffman;
pub mod inflate;
pub mod lz77;

pub use bitstream::BitReader;
pub use huffman::{
    fixed_trees, HuffmanTree, DIST_BASE, DIST_EXTRA, FIXED_DISTANCE_CODE_LENGTHS,
    FIXED_LITLEN_CODE_LENGTHS, LENGTH_BASE, LENGTH_EXTRA,
};
pub use inflate::{BlockHeader, BlockKind, InflateDecoder, InflateOutcome};
pub use lz77::OutputBuffer;

use crate::error::Result;
use crate::options::InflateOptions;

/// DEFLATE 最大压缩比 (258 字节 / 约 2 位)
pub const MAX_EXPANSION_RATIO: usize = 1032;

/// 输出预分配大小：声明大小，受输入长度和上限约束
pub fn capacity_hint(declared: usize, input_len: usize, limit: usize) -> usize {
    declared
        .min(input_len.saturating_mul(MAX_EXPANSION_RATIO))
        .min(limit)
}

/// 原始 INFLATE 解压（不带 GZIP 容器）
///
/// 没有尾部可校验，`options` 中只有 `max_output_size` 生效。
pub fn inflate_raw(data: &[u8], options: &InflateOptions) -> Result<Vec<u8>> {
    let capacity = capacity_hint(
        data.len().saturating_mul(4),
        data.len(),
        options.max_output_size,
    );
    let output = OutputBuffer::with_capacity(capacity, options.max_output_size);
    Ok(InflateDecoder::new(data, output).run()?.output)
}
