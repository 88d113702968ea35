//! # 头部帧格式
//!
//! 字段依次为：魔数 (5 字节)、载荷长度 (大端 `u32`)、文件名长度 (`u8`)、文件名。
//! 字段之间没有填充，头部之后紧跟载荷。

use crate::constants::{HEADER_FIXED_BYTES, MAGIC, MAX_FILENAME_LEN};
use crate::error::{Result, StegoError};
use crate::steganography::BitReader;
use log::trace;

/// 嵌入数据的头部。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub payload_len: u32,
    pub filename: Vec<u8>,
}

impl Header {
    /// 为给定长度的载荷和文件名构造头部，并校验两个长度字段的范围。
    pub fn new(payload_len: usize, filename: &str) -> Result<Self> {
        let payload_len =
            u32::try_from(payload_len).map_err(|_| StegoError::PayloadTooLarge { len: payload_len })?;

        if filename.len() > MAX_FILENAME_LEN {
            return Err(StegoError::FilenameTooLong {
                len: filename.len(),
                max: MAX_FILENAME_LEN,
            });
        }

        Ok(Self {
            payload_len,
            filename: filename.as_bytes().to_vec(),
        })
    }

    /// 序列化后头部的字节数。
    pub fn encoded_len(&self) -> usize {
        HEADER_FIXED_BYTES + self.filename.len()
    }

    /// 头部加载荷的总字节数。
    pub fn total_len(&self) -> u64 {
        self.encoded_len() as u64 + u64::from(self.payload_len)
    }

    /// 把头部追加到 `out`。
    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(MAGIC);
        out.extend_from_slice(&self.payload_len.to_be_bytes());
        // `new` 保证文件名不超过 255 字节
        out.push(self.filename.len() as u8);
        out.extend_from_slice(&self.filename);
    }

    /// 从载体读取并校验头部。
    ///
    /// 魔数缺失时返回 `InvalidStegoImage`；长度字段与 `capacity_bits`
    /// 不符时返回 `CorruptHeader`。
    pub fn read_from<'a, I>(reader: &mut BitReader<I>, capacity_bits: u64) -> Result<Self>
    where
        I: Iterator<Item = &'a u8>,
    {
        let mut magic = [0u8; MAGIC.len()];
        reader
            .read_exact(&mut magic)
            .ok_or(StegoError::InvalidStegoImage)?;
        if &magic != MAGIC {
            return Err(StegoError::InvalidStegoImage);
        }

        let truncated = StegoError::CorruptHeader {
            required_bits: (HEADER_FIXED_BYTES * 8) as u64,
            available_bits: capacity_bits,
        };
        let payload_len = reader.read_u32().ok_or(truncated.clone())?;
        let filename_len = reader.read_u8().ok_or(truncated)?;
        trace!("header fields: payload_len={payload_len}, filename_len={filename_len}");

        let required_bits =
            (HEADER_FIXED_BYTES as u64 + u64::from(filename_len) + u64::from(payload_len)) * 8;
        if required_bits > capacity_bits {
            return Err(StegoError::CorruptHeader {
                required_bits,
                available_bits: capacity_bits,
            });
        }

        let filename = reader
            .read_bytes(usize::from(filename_len))
            .ok_or(StegoError::CorruptHeader {
                required_bits,
                available_bits: capacity_bits,
            })?;

        Ok(Self {
            payload_len,
            filename,
        })
    }

    /// 文件名按 UTF-8 解码，非法序列以替换字符代替。
    pub fn filename_lossy(&self) -> String {
        String::from_utf8_lossy(&self.filename).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::steganography::embed;

    fn carriers_for(bytes: &[u8]) -> Vec<u8> {
        let mut channels = vec![0u8; bytes.len() * 8];
        embed(channels.iter_mut(), bytes);
        channels
    }

    #[test]
    fn test_layout() {
        let header = Header::new(0x0102_0304, "ab").unwrap();
        let mut out = Vec::new();
        header.write_to(&mut out);
        assert_eq!(out, b"STEG1\x01\x02\x03\x04\x02ab");
        assert_eq!(header.encoded_len(), 12);
    }

    #[test]
    fn test_empty_filename() {
        let header = Header::new(2, "").unwrap();
        assert_eq!(header.encoded_len(), HEADER_FIXED_BYTES);
        assert_eq!(header.total_len(), 12);
    }

    #[test]
    fn test_filename_too_long() {
        let name = "x".repeat(256);
        assert_eq!(
            Header::new(1, &name),
            Err(StegoError::FilenameTooLong { len: 256, max: 255 })
        );
        assert!(Header::new(1, &"x".repeat(255)).is_ok());
    }

    #[test]
    fn test_read_back() {
        let header = Header::new(3, "note.md").unwrap();
        let mut bytes = Vec::new();
        header.write_to(&mut bytes);
        bytes.extend_from_slice(b"xyz");
        let channels = carriers_for(&bytes);

        let mut reader = BitReader::new(channels.iter());
        let parsed = Header::read_from(&mut reader, channels.len() as u64).unwrap();
        assert_eq!(parsed, header);
        assert_eq!(parsed.filename_lossy(), "note.md");
        assert_eq!(reader.consumed(), (header.encoded_len() * 8) as u64);
    }

    #[test]
    fn test_wrong_magic() {
        let channels = carriers_for(b"PNG\x00\x00\x00\x00\x00\x00\x00");
        let mut reader = BitReader::new(channels.iter());
        assert_eq!(
            Header::read_from(&mut reader, channels.len() as u64),
            Err(StegoError::InvalidStegoImage)
        );
    }

    #[test]
    fn test_too_short_for_magic() {
        let channels = vec![0u8; 20];
        let mut reader = BitReader::new(channels.iter());
        assert_eq!(
            Header::read_from(&mut reader, 20),
            Err(StegoError::InvalidStegoImage)
        );
    }

    #[test]
    fn test_length_beyond_capacity() {
        let mut bytes = Vec::new();
        Header::new(1000, "").unwrap().write_to(&mut bytes);
        let channels = carriers_for(&bytes);

        let mut reader = BitReader::new(channels.iter());
        assert_eq!(
            Header::read_from(&mut reader, channels.len() as u64),
            Err(StegoError::CorruptHeader {
                required_bits: 1010 * 8,
                available_bits: 80,
            })
        );
    }

    #[test]
    fn test_magic_without_lengths() {
        let channels = carriers_for(MAGIC);
        let mut reader = BitReader::new(channels.iter());
        let err = Header::read_from(&mut reader, channels.len() as u64).unwrap_err();
        assert!(matches!(err, StegoError::CorruptHeader { .. }));
    }

    #[test]
    fn test_invalid_utf8_filename_is_replaced() {
        let mut bytes = MAGIC.to_vec();
        bytes.extend_from_slice(&0u32.to_be_bytes());
        bytes.push(3);
        bytes.extend_from_slice(&[0x66, 0xFF, 0x6F]);
        let channels = carriers_for(&bytes);

        let mut reader = BitReader::new(channels.iter());
        let parsed = Header::read_from(&mut reader, channels.len() as u64).unwrap();
        assert_eq!(parsed.filename, vec![0x66, 0xFF, 0x6F]);
        assert_eq!(parsed.filename_lossy(), "f\u{FFFD}o");
    }
}
