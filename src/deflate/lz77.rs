//! LZ77 回溯复制
//!
//! 输出缓冲区和 (长度, 距离) 复制。距离小于长度时源区间与目标区间重叠，
//! 复制结果必须与逐字节复制一致。

use crate::error::{InflateError, Result};

/// 解压输出缓冲区
///
/// 写入位置即 `len()`，永远不超过 `limit`。
#[derive(Debug)]
pub struct OutputBuffer {
    data: Vec<u8>,
    limit: usize,
}

impl OutputBuffer {
    /// 创建输出缓冲区，`capacity` 只是预分配提示
    pub fn with_capacity(capacity: usize, limit: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity.min(limit)),
            limit,
        }
    }

    /// 当前写入位置
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    #[inline]
    fn ensure_room(&self, n: usize) -> Result<()> {
        if n > self.limit - self.data.len() {
            return Err(InflateError::OutputLimitExceeded { limit: self.limit });
        }
        Ok(())
    }

    /// 写入一个字面字节
    #[inline]
    pub fn push(&mut self, byte: u8) -> Result<()> {
        self.ensure_room(1)?;
        self.data.push(byte);
        Ok(())
    }

    /// 写入原始字节 (无压缩块)
    pub fn extend_from_slice(&mut self, bytes: &[u8]) -> Result<()> {
        self.ensure_room(bytes.len())?;
        self.data.extend_from_slice(bytes);
        Ok(())
    }

    /// LZ77 复制：从当前位置向前 `distance` 字节处复制 `length` 字节
    ///
    /// 按 `min(distance, remaining)` 分块复制，源起点随每块前移，
    /// 因此后一块可以读到前一块刚写入的字节。
    pub fn copy_match(&mut self, length: usize, distance: usize) -> Result<()> {
        let available = self.data.len();
        if distance == 0 || distance > available {
            return Err(InflateError::InvalidBackReference {
                distance,
                available,
            });
        }
        self.ensure_room(length)?;

        let mut src = available - distance;
        let mut remaining = length;
        while remaining > 0 {
            let chunk = remaining.min(distance);
            self.data.extend_from_within(src..src + chunk);
            src += chunk;
            remaining -= chunk;
        }

        Ok(())
    }
}
