//! # 容量估算
//!
//! 每个像素的 R、G、B 通道各提供一个载体位，Alpha 通道不计入。

use crate::constants::{CARRIER_CHANNELS, HEADER_FIXED_BYTES};
use serde::Serialize;

/// 给定尺寸的图像可用的载体位数：`width * height * 3`。
pub fn capacity_bits(width: u32, height: u32) -> u64 {
    (u64::from(width) * u64::from(height)).saturating_mul(CARRIER_CHANNELS as u64)
}

/// 给定尺寸的图像可容纳的字节数 (向下取整)。
pub fn capacity_bytes(width: u32, height: u32) -> u64 {
    capacity_bits(width, height) / 8
}

/// 图像容量，同时以位和字节表示。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Capacity {
    pub capacity_bits: u64,
    pub capacity_bytes: u64,
}

impl Capacity {
    pub fn of(width: u32, height: u32) -> Self {
        Self {
            capacity_bits: capacity_bits(width, height),
            capacity_bytes: capacity_bytes(width, height),
        }
    }

    /// 扣除头部 (含给定文件名) 之后还能嵌入的载荷字节数。
    pub fn max_payload(&self, filename: &str) -> u64 {
        let header = (HEADER_FIXED_BYTES + filename.len()) as u64;
        self.capacity_bytes.saturating_sub(header)
    }
}
