//! gzinflate - gzip 解压库
//!
//! 纯 Rust 实现的单次 gzip/DEFLATE 解压：完整的压缩字节输入，完整的解压字节输出。
//!
//! ## 功能
//!
//! - GZIP 头部解析（FEXTRA / FNAME / FCOMMENT / FHCRC）
//! - 无压缩、固定 Huffman、动态 Huffman 块
//! - 可选的 CRC32 / ISIZE 尾部校验
//! - 原始 DEFLATE 流解压
//!
//! ## 示例
//!
//! ```no_run
//! let compressed = std::fs::read("archive.gz").unwrap();
//! let data = gzinflate::inflate(&compressed).unwrap();
//! println!("{} bytes", data.len());
//! ```

pub mod deflate;
pub mod error;
pub mod gzip;
pub mod options;

// 重导出常用类型
pub use deflate::inflate_raw;
pub use error::{ErrorKind, InflateError, Result};
pub use gzip::{inflate, inflate_range, inflate_with_options, inflate_with_stats, GzipOutput};
pub use options::InflateOptions;

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
