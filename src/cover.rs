//! # 载体图像
//!
//! 负责在图像文件与编解码器之间转换：带 Alpha 的图像按 RGBA8 处理并保留 Alpha，
//! 其余颜色类型统一转换为 RGB8。

use crate::capacity::Capacity;
use crate::codec::{self, Decoded, EncodeReport};
use crate::detect::{self, DetectionReport};
use crate::error::Result;
use image::{DynamicImage, ImageResult, RgbImage, RgbaImage};
use log::debug;
use std::path::Path;

/// 已解码为 8 位通道的载体图像。
#[derive(Debug, Clone, PartialEq)]
pub enum CoverImage {
    Rgb(RgbImage),
    Rgba(RgbaImage),
}

impl From<DynamicImage> for CoverImage {
    fn from(img: DynamicImage) -> Self {
        if img.color().has_alpha() {
            CoverImage::Rgba(img.into_rgba8())
        } else {
            CoverImage::Rgb(img.into_rgb8())
        }
    }
}

impl CoverImage {
    /// 打开并解码图像文件，格式由文件内容推断。
    pub fn open(path: &Path) -> ImageResult<Self> {
        let img = image::open(path)?;
        debug!("loaded {} as {:?}", path.display(), img.color());
        Ok(img.into())
    }

    /// 按扩展名选择格式保存。只启用了无损格式的编码器。
    pub fn save(&self, path: &Path) -> ImageResult<()> {
        match self {
            CoverImage::Rgb(img) => img.save(path),
            CoverImage::Rgba(img) => img.save(path),
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            CoverImage::Rgb(img) => img.dimensions(),
            CoverImage::Rgba(img) => img.dimensions(),
        }
    }

    pub fn capacity(&self) -> Capacity {
        let (width, height) = self.dimensions();
        Capacity::of(width, height)
    }

    pub fn encode(&mut self, payload: &[u8], filename: Option<&str>) -> Result<EncodeReport> {
        match self {
            CoverImage::Rgb(img) => codec::encode(img, payload, filename),
            CoverImage::Rgba(img) => codec::encode(img, payload, filename),
        }
    }

    pub fn decode(&self) -> Result<Decoded> {
        match self {
            CoverImage::Rgb(img) => codec::decode(img),
            CoverImage::Rgba(img) => codec::decode(img),
        }
    }

    pub fn detect(&self) -> DetectionReport {
        match self {
            CoverImage::Rgb(img) => detect::detect(img),
            CoverImage::Rgba(img) => detect::detect(img),
        }
    }
}
