//! # lsb_stego 库
//!
//! 本库包含 LSB 隐写工具的核心逻辑：容量估算、头部帧格式、
//! 编解码器与启发式检测，以及命令行前端使用的图像 I/O 与命令处理。
//!
//! 编解码器只借用像素缓冲区，不做任何文件或网络 I/O：
//!
//! ```
//! use image::RgbImage;
//! use lsb_stego::codec::{decode, encode};
//!
//! let mut cover = RgbImage::new(32, 32);
//! encode(&mut cover, b"hello", Some("hello.txt")).unwrap();
//!
//! let decoded = decode(&cover).unwrap();
//! assert_eq!(decoded.payload, b"hello");
//! assert_eq!(decoded.filename, "hello.txt");
//! ```

// 声明库包含的所有模块。

pub mod capacity;
pub mod carrier;
pub mod cli;
pub mod codec;
pub mod constants;
pub mod cover;
pub mod detect;
pub mod error;
pub mod handler;
pub mod header;
pub mod steganography;

pub use capacity::Capacity;
pub use carrier::Carrier;
pub use codec::{Decoded, EncodeReport, decode, encode};
pub use error::{Result, StegoError};
