// 公共测试辅助函数
// 手工构造 DEFLATE 位流和 GZIP 容器

#![allow(dead_code)]

use std::io::Write;

use flate2::Compression;

pub const FTEXT: u8 = 0x01;
pub const FHCRC: u8 = 0x02;
pub const FEXTRA: u8 = 0x04;
pub const FNAME: u8 = 0x08;
pub const FCOMMENT: u8 = 0x10;

/// 位写入器 (LSB 优先)
#[derive(Debug, Default)]
pub struct BitWriter {
    data: Vec<u8>,
    bit_buf: u64,
    num_bits: u8,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_bits(&mut self, bits: u32, n: u8) {
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

    /// Huffman 码高位先出
    pub fn write_code(&mut self, code: u32, len: u8) {
        for i in (0..len).rev() {
            self.write_bits((code >> i) & 1, 1);
        }
    }

    pub fn align_to_byte(&mut self) {
        let pad = (8 - self.num_bits % 8) % 8;
        self.write_bits(0, pad);
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.write_bits(b as u32, 8);
        }
    }

    pub fn block_header(&mut self, final_block: bool, btype: u32) {
        self.write_bits(final_block as u32, 1);
        self.write_bits(btype, 2);
    }

    /// 固定 Huffman 字面/长度码
    pub fn fixed_symbol(&mut self, symbol: u32) {
        match symbol {
            0..=143 => self.write_code(0x30 + symbol, 8),
            144..=255 => self.write_code(0x190 + symbol - 144, 9),
            256..=279 => self.write_code(symbol - 256, 7),
            _ => self.write_code(0xC0 + symbol - 280, 8),
        }
    }

    /// 固定 Huffman 距离码
    pub fn fixed_distance(&mut self, symbol: u32) {
        self.write_code(symbol, 5);
    }

    /// 完整的无压缩块
    pub fn stored_block(&mut self, final_block: bool, payload: &[u8]) {
        self.block_header(final_block, 0);
        self.align_to_byte();
        let len = payload.len() as u16;
        self.write_bytes(&len.to_le_bytes());
        self.write_bytes(&(!len).to_le_bytes());
        self.write_bytes(payload);
    }

    pub fn into_bytes(mut self) -> Vec<u8> {
        self.align_to_byte();
        self.data
    }
}

/// 可选头部字段
#[derive(Debug, Default, Clone)]
pub struct HeaderFields {
    pub text: bool,
    pub extra: Option<Vec<u8>>,
    pub name: Option<String>,
    pub comment: Option<String>,
    pub header_crc: bool,
}

/// 用给定头部字段把原始 DEFLATE 数据包装成 gzip
pub fn gzip_wrap_with(fields: &HeaderFields, deflate: &[u8], plain: &[u8]) -> Vec<u8> {
    let mut flags = 0u8;
    if fields.text {
        flags |= FTEXT;
    }
    if fields.extra.is_some() {
        flags |= FEXTRA;
    }
    if fields.name.is_some() {
        flags |= FNAME;
    }
    if fields.comment.is_some() {
        flags |= FCOMMENT;
    }
    if fields.header_crc {
        flags |= FHCRC;
    }

    let mut out = vec![0x1F, 0x8B, 8, flags, 0, 0, 0, 0, 0, 0xFF];
    if let Some(extra) = &fields.extra {
        out.extend_from_slice(&(extra.len() as u16).to_le_bytes());
        out.extend_from_slice(extra);
    }
    if let Some(name) = &fields.name {
        out.extend_from_slice(name.as_bytes());
        out.push(0);
    }
    if let Some(comment) = &fields.comment {
        out.extend_from_slice(comment.as_bytes());
        out.push(0);
    }
    if fields.header_crc {
        let crc16 = (crc32fast::hash(&out) & 0xFFFF) as u16;
        out.extend_from_slice(&crc16.to_le_bytes());
    }

    out.extend_from_slice(deflate);
    out.extend_from_slice(&crc32fast::hash(plain).to_le_bytes());
    out.extend_from_slice(&(plain.len() as u32).to_le_bytes());
    out
}

/// 最简头部的 gzip 包装
pub fn gzip_wrap(deflate: &[u8], plain: &[u8]) -> Vec<u8> {
    gzip_wrap_with(&HeaderFields::default(), deflate, plain)
}

/// flate2 生成的 gzip 数据
pub fn flate2_gzip(plain: &[u8], level: Compression) -> Vec<u8> {
    let mut encoder = flate2::write::GzEncoder::new(Vec::new(), level);
    encoder.write_all(plain).unwrap();
    encoder.finish().unwrap()
}

/// flate2 生成的原始 DEFLATE 数据
pub fn flate2_deflate(plain: &[u8], level: Compression) -> Vec<u8> {
    let mut encoder = flate2::write::DeflateEncoder::new(Vec::new(), level);
    encoder.write_all(plain).unwrap();
    encoder.finish().unwrap()
}

/// 可压缩的文本样本
pub fn sample_text(repeats: usize) -> Vec<u8> {
    let line = "The quick brown fox jumps over the lazy dog. 0123456789\n";
    let mut text = String::new();
    for i in 0..repeats {
        text.push_str(line);
        text.push_str(&format!("line {i}: {}\n", i * 7919 % 1000));
    }
    text.into_bytes()
}

/// 单个固定 Huffman 块：一个字面字节后接距离 1、长度 258 的复制
pub fn fixed_run_block(byte: u8) -> Vec<u8> {
    let mut w = BitWriter::new();
    w.block_header(true, 1);
    w.fixed_symbol(byte as u32);
    w.fixed_symbol(285);
    w.fixed_distance(0);
    w.fixed_symbol(256);
    w.into_bytes()
}

/// 单个动态 Huffman 块，只含字面字节 'a' / 'b'
///
/// 字面/长度码长: 'a'=2, 'b'=2, 256=1；距离码只有符号 0 (码长 1)。
/// 码长序列用符号 18 编码长串 0。
pub fn dynamic_ab_block(text: &[u8]) -> Vec<u8> {
    let mut w = BitWriter::new();
    w.block_header(true, 2);
    w.write_bits(0, 5); // HLIT = 257
    w.write_bits(0, 5); // HDIST = 1
    w.write_bits(14, 4); // HCLEN = 18

    // 顺序 16,17,18,0,8,7,9,6,10,5,11,4,12,3,13,2,14,1
    let meta = [0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2, 0, 2];
    for len in meta {
        w.write_bits(len, 3);
    }

    // 码长码: 18 -> "0", 1 -> "10", 2 -> "11"
    let zeros = |w: &mut BitWriter, n: u32| {
        w.write_code(0, 1);
        w.write_bits(n - 11, 7);
    };
    zeros(&mut w, 97); // 0..=96
    w.write_code(0b11, 2); // 'a'
    w.write_code(0b11, 2); // 'b'
    zeros(&mut w, 138); // 99..=236
    zeros(&mut w, 19); // 237..=255
    w.write_code(0b10, 2); // 256
    w.write_code(0b10, 2); // 距离符号 0

    // 字面码: 256 -> "0", 'a' -> "10", 'b' -> "11"
    for &b in text {
        match b {
            b'a' => w.write_code(0b10, 2),
            b'b' => w.write_code(0b11, 2),
            _ => panic!("dynamic_ab_block only encodes 'a' and 'b'"),
        }
    }
    w.write_code(0, 1);
    w.into_bytes()
}
