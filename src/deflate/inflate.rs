//! INFLATE 块解码
//!
//! 块状态机：读取块头 (BFINAL/BTYPE)，按无压缩、固定 Huffman、动态 Huffman 分派，
//! 压缩块解码为字面字节和 (长度, 距离) 序列，直到 BFINAL 块结束。

use crate::deflate::bitstream::BitReader;
use crate::deflate::huffman::{
    fixed_trees, HuffmanTree, CODE_LENGTH_ORDER, DIST_BASE, DIST_EXTRA, END_OF_BLOCK,
    LENGTH_BASE, LENGTH_EXTRA,
};
use crate::deflate::lz77::OutputBuffer;
use crate::error::{InflateError, Result};

/// 动态块中字面/长度码的最大个数
const MAX_LITLEN_CODES: usize = 286;
/// 动态块中距离码的最大个数
const MAX_DIST_CODES: usize = 30;

/// 块类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// 无压缩 (BTYPE = 0)
    Stored,
    /// 固定 Huffman (BTYPE = 1)
    Fixed,
    /// 动态 Huffman (BTYPE = 2)
    Dynamic,
}

impl BlockKind {
    pub fn from_btype(btype: u32) -> Result<Self> {
        match btype {
            0 => Ok(BlockKind::Stored),
            1 => Ok(BlockKind::Fixed),
            2 => Ok(BlockKind::Dynamic),
            _ => Err(InflateError::InvalidBlockType { btype: btype as u8 }),
        }
    }
}

/// 块头
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockHeader {
    pub final_block: bool,
    pub kind: BlockKind,
}

/// 一次解码的结果
#[derive(Debug)]
pub struct InflateOutcome {
    pub output: Vec<u8>,
    /// 消费的输入字节数 (最后一个部分字节计入)
    pub bytes_consumed: usize,
    /// 解码的块数
    pub blocks: usize,
}

/// INFLATE 解码器
///
/// 所有游标状态都属于这个实例，不同实例之间互不影响。
pub struct InflateDecoder<'a> {
    reader: BitReader<'a>,
    output: OutputBuffer,
    blocks: usize,
}

impl<'a> InflateDecoder<'a> {
    /// 在原始 DEFLATE 数据上创建解码器
    pub fn new(input: &'a [u8], output: OutputBuffer) -> Self {
        Self {
            reader: BitReader::new(input),
            output,
            blocks: 0,
        }
    }

    /// 解码所有块直到 BFINAL
    pub fn run(mut self) -> Result<InflateOutcome> {
        loop {
            let header = self.read_block_header()?;
            tracing::trace!(
                "block {}: {:?}, final: {}, output so far: {}",
                self.blocks,
                header.kind,
                header.final_block,
                self.output.len()
            );

            match header.kind {
                BlockKind::Stored => self.decode_stored()?,
                BlockKind::Fixed => {
                    let trees = fixed_trees()?;
                    self.decode_symbols(&trees.literal, &trees.distance)?;
                }
                BlockKind::Dynamic => {
                    let (literal, distance) = self.read_dynamic_trees()?;
                    self.decode_symbols(&literal, &distance)?;
                }
            }

            self.blocks += 1;
            if header.final_block {
                break;
            }
        }

        tracing::debug!(
            "inflated {} blocks: {} bytes in, {} bytes out",
            self.blocks,
            self.reader.position(),
            self.output.len()
        );

        Ok(InflateOutcome {
            bytes_consumed: self.reader.position(),
            blocks: self.blocks,
            output: self.output.into_vec(),
        })
    }

    /// 读取块头 (3 bits)
    fn read_block_header(&mut self) -> Result<BlockHeader> {
        let final_block = self.reader.read_bits(1)? == 1;
        let kind = BlockKind::from_btype(self.reader.read_bits(2)?)?;
        Ok(BlockHeader { final_block, kind })
    }

    /// 解压无压缩块
    fn decode_stored(&mut self) -> Result<()> {
        self.reader.align_to_byte();

        let len = self.reader.read_u16_le()?;
        let nlen = self.reader.read_u16_le()?;
        if nlen != !len {
            return Err(InflateError::invalid_header(
                "stored block length does not match its complement",
            ));
        }

        tracing::trace!("stored block of {} bytes", len);
        let bytes = self.reader.read_aligned_bytes(len as usize)?;
        self.output.extend_from_slice(bytes)
    }

    /// 解析动态 Huffman 表
    fn read_dynamic_trees(&mut self) -> Result<(HuffmanTree, HuffmanTree)> {
        let hlit = self.reader.read_bits(5)? as usize + 257;
        let hdist = self.reader.read_bits(5)? as usize + 1;
        let hclen = self.reader.read_bits(4)? as usize + 4;

        tracing::trace!("dynamic block: hlit {}, hdist {}, hclen {}", hlit, hdist, hclen);

        if hlit > MAX_LITLEN_CODES || hdist > MAX_DIST_CODES {
            return Err(InflateError::corrupt("too many length or distance codes"));
        }

        // 码长码的码长按固定顺序出现
        let mut meta_lengths = [0u8; 19];
        for &symbol in &CODE_LENGTH_ORDER[..hclen] {
            meta_lengths[symbol] = self.reader.read_bits(3)? as u8;
        }
        let meta_tree = HuffmanTree::build(&meta_lengths, meta_lengths.len())?;

        let lengths = read_code_lengths(&mut self.reader, &meta_tree, hlit + hdist)?;
        let (litlen_lengths, dist_lengths) = lengths.split_at(hlit);

        if litlen_lengths[END_OF_BLOCK as usize] == 0 {
            return Err(InflateError::corrupt("missing end-of-block code"));
        }

        let literal = HuffmanTree::build(litlen_lengths, hlit)?;
        let distance = HuffmanTree::build(dist_lengths, hdist)?;
        Ok((literal, distance))
    }

    /// 解码字面/长度/距离序列直到块结束
    fn decode_symbols(&mut self, literal: &HuffmanTree, distance: &HuffmanTree) -> Result<()> {
        loop {
            let symbol = literal.decode_symbol(&mut self.reader)?;
            match symbol {
                0..=255 => self.output.push(symbol as u8)?,
                END_OF_BLOCK => return Ok(()),
                257..=285 => {
                    let idx = (symbol - 257) as usize;
                    let length =
                        LENGTH_BASE[idx] as usize + self.reader.read_bits(LENGTH_EXTRA[idx])? as usize;

                    let dist_symbol = distance.decode_symbol(&mut self.reader)? as usize;
                    if dist_symbol >= DIST_BASE.len() {
                        return Err(InflateError::corrupt("invalid distance symbol"));
                    }
                    let dist = DIST_BASE[dist_symbol] as usize
                        + self.reader.read_bits(DIST_EXTRA[dist_symbol])? as usize;

                    self.output.copy_match(length, dist)?;
                }
                _ => return Err(InflateError::corrupt("invalid literal/length symbol")),
            }
        }
    }
}

/// 用码长码树解码 `count` 个码长
///
/// 16: 重复前一个码长 3-6 次；17: 0 重复 3-10 次；18: 0 重复 11-138 次。
/// 重复越过 `count` 视为损坏，结果长度恰好为 `count`。
pub fn read_code_lengths(
    reader: &mut BitReader<'_>,
    meta_tree: &HuffmanTree,
    count: usize,
) -> Result<Vec<u8>> {
    let mut lengths: Vec<u8> = Vec::with_capacity(count);

    while lengths.len() < count {
        let symbol = meta_tree.decode_symbol(reader)?;
        let (value, repeat) = match symbol {
            0..=15 => (symbol as u8, 1),
            16 => {
                let prev = *lengths
                    .last()
                    .ok_or_else(|| InflateError::corrupt("repeat with no previous length"))?;
                (prev, 3 + reader.read_bits(2)? as usize)
            }
            17 => (0, 3 + reader.read_bits(3)? as usize),
            18 => (0, 11 + reader.read_bits(7)? as usize),
            _ => return Err(InflateError::corrupt("invalid code length symbol")),
        };

        if lengths.len() + repeat > count {
            return Err(InflateError::corrupt("code length repeat overflows table"));
        }
        lengths.resize(lengths.len() + repeat, value);
    }

    Ok(lengths)
}
