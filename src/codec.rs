//! # 编解码器
//!
//! 将头部和载荷写入载体通道的最低位，或从中读回。
//! 所有校验都在修改像素之前完成，失败时缓冲区保持原样。

use crate::capacity::capacity_bits;
use crate::carrier::Carrier;
use crate::error::{Result, StegoError};
use crate::header::Header;
use crate::steganography::{BitReader, embed};
use log::debug;
use serde::Serialize;

/// 一次成功编码的统计信息。
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EncodeReport {
    pub width: u32,
    pub height: u32,
    pub capacity_bits: u64,
    pub used_bits: u64,
    /// `used_bits / capacity_bits`，取值 0.0 到 1.0。
    pub utilization: f64,
}

/// 解码得到的载荷及其文件名 (未提供时为空串)。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub payload: Vec<u8>,
    pub filename: String,
}

fn non_empty<C: Carrier>(image: &C) -> Result<(u32, u32)> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(StegoError::EmptyImage { width, height });
    }
    Ok((width, height))
}

/// 把 `payload` 连同可选的文件名隐藏到 `image` 中。
///
/// 只修改前 `(头部 + 载荷) * 8` 个载体通道的最低位，图像尺寸不变。
///
/// # Errors
///
/// * `EmptyImage` - 图像没有像素。
/// * `FilenameTooLong` / `PayloadTooLarge` - 长度字段无法表示。
/// * `CapacityExceeded` - 头部加载荷超出图像容量，附带所需位数与可用位数。
pub fn encode<C: Carrier>(
    image: &mut C,
    payload: &[u8],
    filename: Option<&str>,
) -> Result<EncodeReport> {
    let (width, height) = non_empty(image)?;
    let header = Header::new(payload.len(), filename.unwrap_or_default())?;

    let available_bits = capacity_bits(width, height);
    let required_bits = header.total_len() * 8;
    // 容量按整字节计算，末尾不足 8 位的通道不使用
    if header.total_len() > available_bits / 8 {
        return Err(StegoError::CapacityExceeded {
            required_bits,
            available_bits,
        });
    }

    let mut message = Vec::with_capacity(header.encoded_len() + payload.len());
    header.write_to(&mut message);
    message.extend_from_slice(payload);

    let written = embed(image.carriers_mut(), &message);
    debug!(
        "embedded {written} bits ({} header bytes, {} payload bytes) into {width}x{height} image",
        header.encoded_len(),
        payload.len()
    );

    Ok(EncodeReport {
        width,
        height,
        capacity_bits: available_bits,
        used_bits: required_bits,
        utilization: required_bits as f64 / available_bits as f64,
    })
}

/// 从 `image` 中恢复隐藏的载荷和文件名，不修改图像。
///
/// # Errors
///
/// * `EmptyImage` - 图像没有像素。
/// * `InvalidStegoImage` - 未找到魔数签名。
/// * `CorruptHeader` - 头部声明的长度超出图像容量。
pub fn decode<C: Carrier>(image: &C) -> Result<Decoded> {
    let (width, height) = non_empty(image)?;
    let available_bits = capacity_bits(width, height);

    let mut reader = BitReader::new(image.carriers());
    let header = Header::read_from(&mut reader, available_bits)?;
    debug!(
        "found header in {width}x{height} image: {} payload bytes, {} filename bytes",
        header.payload_len,
        header.filename.len()
    );

    let payload = reader
        .read_bytes(header.payload_len as usize)
        .ok_or(StegoError::CorruptHeader {
            required_bits: header.total_len() * 8,
            available_bits,
        })?;

    Ok(Decoded {
        payload,
        filename: header.filename_lossy(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capacity::capacity_bytes;
    use crate::constants::HEADER_FIXED_BYTES;
    use image::{RgbImage, RgbaImage};

    fn patterned(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x * 7 + y) as u8, (x * 13 + y * 3) as u8, (x ^ y) as u8])
        })
    }

    #[test]
    fn test_round_trip_with_filename() {
        let mut img = patterned(32, 32);
        let payload = b"secret.txt contents";
        encode(&mut img, payload, Some("secret.txt")).unwrap();

        let decoded = decode(&img).unwrap();
        assert_eq!(decoded.filename, "secret.txt");
        assert_eq!(decoded.payload, payload);
    }

    #[test]
    fn test_round_trip_empty_payload_and_name() {
        // 4x7 = 84 位，恰好容纳 80 位的固定头部
        let mut img = patterned(4, 7);
        encode(&mut img, b"", None).unwrap();
        let decoded = decode(&img).unwrap();
        assert!(decoded.payload.is_empty());
        assert!(decoded.filename.is_empty());

        // 3x8 = 72 位，比固定头部少一个字节
        let mut img = patterned(3, 8);
        assert_eq!(
            encode(&mut img, b"", None),
            Err(StegoError::CapacityExceeded {
                required_bits: 80,
                available_bits: 72,
            })
        );
    }

    #[test]
    fn test_ten_by_ten_scenario() {
        let mut img = patterned(10, 10);
        let report = encode(&mut img, b"hi", Some("")).unwrap();
        assert_eq!(report.capacity_bits, 300);
        assert_eq!(report.used_bits, 96);
        assert_eq!(decode(&img).unwrap().payload, b"hi");

        let mut img = patterned(10, 10);
        let original = img.clone();
        let err = encode(&mut img, &[0x5A; 40], None).unwrap_err();
        assert_eq!(
            err,
            StegoError::CapacityExceeded {
                required_bits: (HEADER_FIXED_BYTES as u64 + 40) * 8,
                available_bits: 300,
            }
        );
        assert_eq!(img, original, "failed encode must not touch the image");
    }

    #[test]
    fn test_exact_capacity_boundary() {
        let (w, h) = (10, 10);
        let fit = capacity_bytes(w, h) as usize - HEADER_FIXED_BYTES;

        let mut img = patterned(w, h);
        let report = encode(&mut img, &vec![0xC3; fit], None).unwrap();
        assert_eq!(report.used_bits, capacity_bytes(w, h) * 8);
        assert_eq!(decode(&img).unwrap().payload, vec![0xC3; fit]);

        let mut img = patterned(w, h);
        let err = encode(&mut img, &vec![0xC3; fit + 1], None).unwrap_err();
        assert_eq!(
            err,
            StegoError::CapacityExceeded {
                required_bits: (capacity_bytes(w, h) + 1) * 8,
                available_bits: 300,
            }
        );
    }

    #[test]
    fn test_only_leading_lsbs_change() {
        let original = patterned(16, 16);
        let mut img = original.clone();
        let payload = b"abcdefgh";
        encode(&mut img, payload, Some("f")).unwrap();
        assert_eq!(img.dimensions(), original.dimensions());

        let used = (HEADER_FIXED_BYTES + 1 + payload.len()) * 8;
        for (i, (a, b)) in original.carriers().zip(img.carriers()).enumerate() {
            if i < used {
                assert_eq!(a & 0xFE, b & 0xFE);
            } else {
                assert_eq!(a, b);
            }
        }
    }

    #[test]
    fn test_rgba_alpha_untouched() {
        let mut img = RgbaImage::from_pixel(12, 12, image::Rgba([10, 20, 30, 77]));
        encode(&mut img, b"with alpha", Some("a.bin")).unwrap();
        assert!(img.pixels().all(|p| p.0[3] == 77));

        let decoded = decode(&img).unwrap();
        assert_eq!(decoded.payload, b"with alpha");
        assert_eq!(decoded.filename, "a.bin");
    }

    #[test]
    fn test_plain_image_is_rejected() {
        let img = RgbImage::from_pixel(20, 20, image::Rgb([0, 0, 0]));
        assert_eq!(decode(&img), Err(StegoError::InvalidStegoImage));
    }

    #[test]
    fn test_tampered_length_is_corrupt() {
        let mut img = patterned(10, 10);
        encode(&mut img, b"hi", None).unwrap();
        // 把载荷长度字段的最高位置 1
        if let Some(channel) = img.carriers_mut().nth(40) {
            *channel |= 1;
        }

        let err = decode(&img).unwrap_err();
        assert!(matches!(err, StegoError::CorruptHeader { .. }));
        assert!(err.is_not_stego());
    }

    #[test]
    fn test_empty_image() {
        let mut img = RgbImage::new(0, 5);
        assert_eq!(
            encode(&mut img, b"", None),
            Err(StegoError::EmptyImage {
                width: 0,
                height: 5
            })
        );
        assert!(matches!(decode(&img), Err(StegoError::EmptyImage { .. })));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn round_trip_when_it_fits(
                payload in proptest::collection::vec(any::<u8>(), 0..400),
                name in "[a-zA-Z0-9_.-]{0,40}",
                seed in any::<u8>(),
            ) {
                let mut img = RgbImage::from_fn(30, 30, |x, y| {
                    image::Rgb([seed ^ x as u8, seed.wrapping_add(y as u8), (x * y) as u8])
                });
                let filename = if name.is_empty() { None } else { Some(name.as_str()) };
                let fits = (HEADER_FIXED_BYTES + name.len() + payload.len()) as u64
                    <= capacity_bytes(30, 30);

                match encode(&mut img, &payload, filename) {
                    Ok(_) => {
                        prop_assert!(fits);
                        let decoded = decode(&img).unwrap();
                        prop_assert_eq!(decoded.payload, payload);
                        prop_assert_eq!(decoded.filename, name);
                    }
                    Err(err) => {
                        prop_assert!(!fits);
                        let is_capacity_error = matches!(err, StegoError::CapacityExceeded { .. });
                        prop_assert!(is_capacity_error);
                    }
                }
            }
        }
    }
}
