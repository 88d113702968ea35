//! # LSB 隐写检测
//!
//! 基于两个粗略指标给出嫌疑分数：全局最低位中 0 与 1 的平衡度，
//! 以及同一行相邻像素之间最低位的翻转率。嵌入随机数据会让两者都升高。
//! 结果仅供参考，不能作为是否隐写的定论。

use crate::capacity::capacity_bits;
use crate::carrier::Carrier;
use crate::constants::CARRIER_CHANNELS;
use serde::Serialize;

/// 检测结果。
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DetectionReport {
    /// 0.0 (不太可能) 到 1.0 (很可能)。
    pub suspicion_score: f64,
    pub width: u32,
    pub height: u32,
    pub lsb_ones: u64,
    pub lsb_zeros: u64,
    /// 最低位为 1 的比例。
    pub lsb_balance: f64,
    /// 相邻像素间最低位不同的比例。
    pub flip_rate: f64,
}

const BALANCE_WEIGHT: f64 = 0.6;
const FLIP_WEIGHT: f64 = 0.4;
/// 翻转率达到该值即视为满分。
const FLIP_SATURATION: f64 = 0.5;

/// 对 `image` 的载体通道做启发式分析。
pub fn detect<C: Carrier>(image: &C) -> DetectionReport {
    let (width, height) = image.dimensions();

    let lsb_ones = image.carriers().map(|c| u64::from(c & 1)).sum::<u64>();
    let total = capacity_bits(width, height);
    let lsb_zeros = total - lsb_ones;

    let lsb_balance = if total == 0 {
        0.5
    } else {
        lsb_ones as f64 / total as f64
    };
    let balance_score = 1.0 - (0.5 - lsb_balance).abs() * 2.0;

    let (flips, compared) = row_flips(image, width);
    let flip_rate = if compared == 0 {
        0.0
    } else {
        flips as f64 / compared as f64
    };
    let flip_score = (flip_rate / FLIP_SATURATION).min(1.0);

    let suspicion_score =
        (BALANCE_WEIGHT * balance_score + FLIP_WEIGHT * flip_score).clamp(0.0, 1.0);

    DetectionReport {
        suspicion_score,
        width,
        height,
        lsb_ones,
        lsb_zeros,
        lsb_balance,
        flip_rate,
    }
}

/// 统计每行相邻像素 RGB 最低位模式的差异位数，以及参与比较的位数。
fn row_flips<C: Carrier>(image: &C, width: u32) -> (u64, u64) {
    if width == 0 {
        return (0, 0);
    }

    let row_len = C::STRIDE * width as usize;
    let mut flips = 0u64;
    let mut compared = 0u64;

    for row in image.samples().chunks_exact(row_len) {
        let patterns = row.chunks_exact(C::STRIDE).map(|px| {
            px.iter()
                .take(CARRIER_CHANNELS)
                .fold(0u8, |acc, c| (acc << 1) | (c & 1))
        });

        let mut prev: Option<u8> = None;
        for cur in patterns {
            if let Some(prev) = prev {
                flips += u64::from((prev ^ cur).count_ones());
                compared += CARRIER_CHANNELS as u64;
            }
            prev = Some(cur);
        }
    }

    (flips, compared)
}
