/// 嵌入数据头部的魔数签名，用于识别经过本工具隐写的图像。
pub const MAGIC: &[u8; 5] = b"STEG1";

/// 载荷长度字段占用的字节数 (大端 `u32`)。
pub const PAYLOAD_LEN_BYTES: usize = 4;

/// 文件名长度字段占用的字节数 (`u8`)。
pub const FILENAME_LEN_BYTES: usize = 1;

/// 头部中固定长度部分的字节数：魔数 + 载荷长度 + 文件名长度。
/// 文件名本身紧随其后，长度可变。
pub const HEADER_FIXED_BYTES: usize = MAGIC.len() + PAYLOAD_LEN_BYTES + FILENAME_LEN_BYTES;

/// 文件名长度字段为单字节，因此文件名最多 255 字节。
pub const MAX_FILENAME_LEN: usize = u8::MAX as usize;

/// 每个像素中参与隐写的通道数 (R, G, B)，Alpha 通道不参与。
pub const CARRIER_CHANNELS: usize = 3;

/// 文本模式下写入头部的文件名。
pub const TEXT_PAYLOAD_NAME: &str = "message.txt";

/// 头部未携带可用文件名时，恢复结果使用的默认文件名。
pub const DEFAULT_PAYLOAD_NAME: &str = "payload.bin";

/// 未指定输出路径时，隐写结果图像的文件名前缀。
pub const HIDDEN_IMAGE_PREFIX: &str = "doctored_";

/// 未指定输出路径时，恢复出的载荷文件名前缀。
pub const RECOVERED_PREFIX: &str = "recovered_";
