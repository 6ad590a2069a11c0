//! 位流读取器
//!
//! DEFLATE 数据按 LSB 优先打包；`BitReader` 只负责游标，不了解 Huffman 或块结构。

use crate::error::{InflateError, Result};

/// 位流读取器
///
/// 借用输入切片，游标由字节位置和字节内位偏移 (0..8) 组成。
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    /// 数据引用
    data: &'a [u8],
    /// 当前位置 (字节)
    pos: usize,
    /// 当前字节内已消费的位数
    bit_pos: u8,
}

impl<'a> BitReader<'a> {
    /// 创建新的位读取器
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            bit_pos: 0,
        }
    }

    /// 读取 n 位 (小端序, n <= 16)
    #[inline]
    pub fn read_bits(&mut self, n: u8) -> Result<u32> {
        debug_assert!(n <= 16, "read_bits supports at most 16 bits");

        let mut value = 0u32;
        let mut filled = 0u8;
        while filled < n {
            let byte = match self.data.get(self.pos) {
                Some(&b) => b as u32,
                None => return Err(InflateError::eof(self.pos)),
            };
            let take = (8 - self.bit_pos).min(n - filled);
            let bits = (byte >> self.bit_pos) & ((1u32 << take) - 1);
            value |= bits << filled;
            filled += take;
            self.bit_pos += take;
            if self.bit_pos == 8 {
                self.bit_pos = 0;
                self.pos += 1;
            }
        }

        Ok(value)
    }

    /// 读取单个位
    #[inline]
    pub fn read_bit(&mut self) -> Result<u32> {
        let byte = match self.data.get(self.pos) {
            Some(&b) => b,
            None => return Err(InflateError::eof(self.pos)),
        };
        let bit = (byte >> self.bit_pos) & 1;
        self.bit_pos += 1;
        if self.bit_pos == 8 {
            self.bit_pos = 0;
            self.pos += 1;
        }
        Ok(bit as u32)
    }

    /// 对齐到字节边界
    pub fn align_to_byte(&mut self) {
        if self.bit_pos != 0 {
            self.bit_pos = 0;
            self.pos += 1;
        }
    }

    /// 读取 n 个完整字节，调用前必须已对齐
    pub fn read_aligned_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        debug_assert!(self.is_aligned());

        let end = match self.pos.checked_add(n) {
            Some(end) if end <= self.data.len() => end,
            _ => return Err(InflateError::eof(self.data.len())),
        };
        let bytes = &self.data[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    /// 读取对齐的单个字节
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_aligned_bytes(1)?[0])
    }

    /// 读取对齐的小端 u16
    pub fn read_u16_le(&mut self) -> Result<u16> {
        let bytes = self.read_aligned_bytes(2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    /// 是否位于字节边界
    pub fn is_aligned(&self) -> bool {
        self.bit_pos == 0
    }

    /// 已消费的字节数 (部分消费的字节计入)
    pub fn position(&self) -> usize {
        self.pos + usize::from(self.bit_pos != 0)
    }

    /// 获取剩余字节数
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position())
    }
}

/// 位写入器，仅用于在测试中手工构造 DEFLATE 流
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct BitWriter {
    data: Vec<u8>,
    bit_buf: u64,
    num_bits: u8,
}

#[cfg(test)]
impl BitWriter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// 写入 n 位 (小端序)
    pub(crate) fn write_bits(&mut self, bits: u32, n: u8) {
        if n == 0 {
            return;
        }
        self.bit_buf |= ((bits as u64) & ((1u64 << n) - 1)) << self.num_bits;
        self.num_bits += n;
        while self.num_bits >= 8 {
            self.data.push((self.bit_buf & 0xFF) as u8);
            self.bit_buf >>= 8;
            self.num_bits -= 8;
        }
    }

    /// 写入 Huffman 码 (高位先出)
    pub(crate) fn write_code(&mut self, code: u32, len: u8) {
        for i in (0..len).rev() {
            self.write_bits((code >> i) & 1, 1);
        }
    }

    pub(crate) fn align_to_byte(&mut self) {
        let pad = (8 - self.num_bits % 8) % 8;
        self.write_bits(0, pad);
    }

    pub(crate) fn write_bytes(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.write_bits(b as u32, 8);
        }
    }

    pub(crate) fn into_bytes(mut self) -> Vec<u8> {
        self.align_to_byte();
        self.data
    }
}
