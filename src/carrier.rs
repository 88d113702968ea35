//! # 载体视图
//!
//! 把像素缓冲区看作一串有序的载体通道：按行优先遍历像素，
//! 像素内按 R、G、B 顺序，跳过 Alpha。

use crate::constants::CARRIER_CHANNELS;
use image::{RgbImage, RgbaImage};

/// 可作为隐写载体的 8 位像素缓冲区。
pub trait Carrier {
    /// 每个像素在原始数据中占用的字节数。
    const STRIDE: usize;

    fn dimensions(&self) -> (u32, u32);

    fn samples(&self) -> &[u8];

    fn samples_mut(&mut self) -> &mut [u8];

    /// 按遍历顺序返回所有载体通道。
    fn carriers(&self) -> impl Iterator<Item = &u8> {
        self.samples()
            .chunks_exact(Self::STRIDE)
            .flat_map(|px| px.iter().take(CARRIER_CHANNELS))
    }

    /// 按遍历顺序返回所有载体通道的可变引用。
    fn carriers_mut(&mut self) -> impl Iterator<Item = &mut u8> {
        self.samples_mut()
            .chunks_exact_mut(Self::STRIDE)
            .flat_map(|px| px.iter_mut().take(CARRIER_CHANNELS))
    }
}

impl Carrier for RgbImage {
    const STRIDE: usize = 3;

    fn dimensions(&self) -> (u32, u32) {
        RgbImage::dimensions(self)
    }

    fn samples(&self) -> &[u8] {
        self.as_raw()
    }

    fn samples_mut(&mut self) -> &mut [u8] {
        self
    }
}

impl Carrier for RgbaImage {
    const STRIDE: usize = 4;

    fn dimensions(&self) -> (u32, u32) {
        RgbaImage::dimensions(self)
    }

    fn samples(&self) -> &[u8] {
        self.as_raw()
    }

    fn samples_mut(&mut self) -> &mut [u8] {
        self
    }
}
