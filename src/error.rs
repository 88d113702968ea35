//! 隐写编解码器的错误类型。

use thiserror::Error;

/// 隐写操作的结果类型别名。
pub type Result<T> = std::result::Result<T, StegoError>;

/// 编码、解码过程中可能出现的错误。
///
/// 所有错误都在修改像素或返回载荷之前同步检测，因此失败时不会留下部分结果。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StegoError {
    /// 图像宽或高为零，没有任何可用的载体位。
    #[error("Image has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    /// 头部加载荷超出了图像的载体位容量。
    #[error("Payload too large. Need {required_bits} bits, have {available_bits} bits.")]
    CapacityExceeded {
        required_bits: u64,
        available_bits: u64,
    },

    /// 未找到魔数签名：图像从未被编码，或已被有损处理。
    #[error("No hidden payload found: the image was not encoded by this tool or has been altered")]
    InvalidStegoImage,

    /// 头部长度字段与图像自身容量不符。
    #[error(
        "Corrupt header: declared content needs {required_bits} bits, image has {available_bits} bits"
    )]
    CorruptHeader {
        required_bits: u64,
        available_bits: u64,
    },

    /// 文件名超出单字节长度字段可表示的范围。
    #[error("Filename is {len} bytes long, at most {max} bytes are supported")]
    FilenameTooLong { len: usize, max: usize },

    /// 载荷超出 32 位长度字段可表示的范围。
    #[error("Payload of {len} bytes exceeds the 32-bit length field")]
    PayloadTooLarge { len: usize },
}

impl StegoError {
    /// 是否属于"图像中没有可识别的隐藏数据"一类错误。
    ///
    /// `InvalidStegoImage` 与 `CorruptHeader` 对用户呈现相同的提示，
    /// 仅在诊断时区分。
    pub fn is_not_stego(&self) -> bool {
        matches!(
            self,
            StegoError::InvalidStegoImage | StegoError::CorruptHeader { .. }
        )
    }
}
