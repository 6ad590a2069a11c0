//! Huffman 解码
//!
//! RFC 1951 §3.2.2 规范 Huffman 码：由码长表重建二叉字典树，逐位解码。

use std::sync::OnceLock;

use crate::deflate::bitstream::BitReader;
use crate::error::{InflateError, Result};

/// DEFLATE 允许的最大码长
pub const MAX_CODE_LENGTH: usize = 15;

/// 块结束符号
pub const END_OF_BLOCK: u16 = 256;

/// 长度码基础值表 (符号 257..=285)
pub const LENGTH_BASE: [u16; 29] = [
    3, 4, 5, 6, 7, 8, 9, 10, 11, 13, 15, 17, 19, 23, 27, 31, 35, 43, 51, 59, 67, 83, 99,
    115, 131, 163, 195, 227, 258,
];

/// 长度码额外位数表
pub const LENGTH_EXTRA: [u8; 29] = [
    0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 2, 2, 2, 2, 3, 3, 3, 3, 4, 4, 4, 4, 5, 5, 5, 5, 0,
];

/// 距离码基础值表
pub const DIST_BASE: [u16; 30] = [
    1, 2, 3, 4, 5, 7, 9, 13, 17, 25, 33, 49, 65, 97, 129, 193, 257, 385, 513, 769, 1025,
    1537, 2049, 3073, 4097, 6145, 8193, 12289, 16385, 24577,
];

/// 距离码额外位数表
pub const DIST_EXTRA: [u8; 30] = [
    0, 0, 0, 0, 1, 1, 2, 2, 3, 3, 4, 4, 5, 5, 6, 6, 7, 7, 8, 8, 9, 9, 10, 10, 11, 11, 12,
    12, 13, 13,
];

/// 码长码的码长在动态块头中的出现顺序
pub const CODE_LENGTH_ORDER: [usize; 19] = [
    16, 17, 18, 0, 8, 7, 9, 6, 10, 5, 11, 4, 12, 3, 13, 2, 14, 1, 15,
];

const fn fixed_litlen_lengths() -> [u8; 288] {
    let mut lengths = [8u8; 288];
    let mut i = 144;
    while i < 256 {
        lengths[i] = 9;
        i += 1;
    }
    while i < 280 {
        lengths[i] = 7;
        i += 1;
    }
    lengths
}

/// 固定 Huffman 码的字面/长度码长
/// 0-143: 8, 144-255: 9, 256-279: 7, 280-287: 8
pub const FIXED_LITLEN_CODE_LENGTHS: [u8; 288] = fixed_litlen_lengths();

/// 固定 Huffman 码的距离码长 (全部 5 bits)
pub const FIXED_DISTANCE_CODE_LENGTHS: [u8; 30] = [5; 30];

type NodeId = u32;

/// 字典树节点
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Node {
    Leaf(u16),
    Internal([Option<NodeId>; 2]),
}

/// 规范 Huffman 解码树
///
/// 节点存放在扁平数组中，根节点固定为下标 0。
#[derive(Debug, Clone)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
}

impl HuffmanTree {
    /// 从码长表构建解码树，只使用前 `num_symbols` 个码长
    pub fn build(code_lengths: &[u8], num_symbols: usize) -> Result<Self> {
        let lengths = code_lengths
            .get(..num_symbols)
            .ok_or_else(|| InflateError::corrupt("code length table shorter than alphabet"))?;

        // 统计每个长度的符号数
        let mut bl_count = [0u32; MAX_CODE_LENGTH + 1];
        for &len in lengths {
            if len as usize > MAX_CODE_LENGTH {
                return Err(InflateError::corrupt("code length above 15"));
            }
            bl_count[len as usize] += 1;
        }
        bl_count[0] = 0;

        // 计算每个长度的第一个码
        let mut next_code = [0u32; MAX_CODE_LENGTH + 1];
        let mut code = 0u32;
        for bits in 1..=MAX_CODE_LENGTH {
            code = (code + bl_count[bits - 1]) << 1;
            next_code[bits] = code;
        }

        let mut tree = Self {
            nodes: vec![Node::Internal([None, None])],
        };

        for (symbol, &len) in lengths.iter().enumerate() {
            if len == 0 {
                continue;
            }
            let code = next_code[len as usize];
            next_code[len as usize] += 1;
            if code >= 1u32 << len {
                return Err(InflateError::corrupt("over-subscribed code lengths"));
            }
            tree.insert(code, len, symbol as u16)?;
        }

        Ok(tree)
    }

    /// 按高位到低位插入一个码
    fn insert(&mut self, code: u32, len: u8, symbol: u16) -> Result<()> {
        let mut node = 0usize;
        for shift in (0..len).rev() {
            let bit = ((code >> shift) & 1) as usize;
            let children = match self.nodes[node] {
                Node::Internal(children) => children,
                Node::Leaf(_) => return Err(InflateError::corrupt("code is prefix of another")),
            };
            match children[bit] {
                Some(_) if shift == 0 => {
                    return Err(InflateError::corrupt("code is prefix of another"));
                }
                Some(child) => node = child as usize,
                None => {
                    let id = self.nodes.len();
                    self.nodes.push(if shift == 0 {
                        Node::Leaf(symbol)
                    } else {
                        Node::Internal([None, None])
                    });
                    if let Node::Internal(children) = &mut self.nodes[node] {
                        children[bit] = Some(id as NodeId);
                    }
                    node = id;
                }
            }
        }
        Ok(())
    }

    /// 逐位解码一个符号
    pub fn decode_symbol(&self, reader: &mut BitReader<'_>) -> Result<u16> {
        let mut node = 0usize;
        loop {
            match self.nodes[node] {
                Node::Leaf(symbol) => return Ok(symbol),
                Node::Internal(children) => {
                    let bit = reader.read_bit()? as usize;
                    node = children[bit]
                        .ok_or_else(|| InflateError::corrupt("bit sequence not in code"))?
                        as usize;
                }
            }
        }
    }

    /// 树中是否没有任何码
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }
}

/// 固定 Huffman 块共享的一对解码树
#[derive(Debug)]
pub struct FixedTrees {
    pub literal: HuffmanTree,
    pub distance: HuffmanTree,
}

static FIXED_TREES: OnceLock<Result<FixedTrees>> = OnceLock::new();

/// 获取固定 Huffman 树，首次调用时构建，之后只读共享
pub fn fixed_trees() -> Result<&'static FixedTrees> {
    FIXED_TREES
        .get_or_init(|| {
            Ok(FixedTrees {
                literal: HuffmanTree::build(&FIXED_LITLEN_CODE_LENGTHS, 288)?,
                distance: HuffmanTree::build(&FIXED_DISTANCE_CODE_LENGTHS, 30)?,
            })
        })
        .as_ref()
        .map_err(Clone::clone)
}
