//! # 位级读写
//!
//! 每个载体通道的最低位存放一个数据位，字节内按最高位优先展开。

/// 把 `data` 逐位写入 `carriers` 的最低位，返回写入的位数。
///
/// 调用方需先确认载体足够容纳 `data.len() * 8` 位；载体不足时多余的位被丢弃。
/// 数据之后的通道保持不变。
pub fn embed<'a>(carriers: impl Iterator<Item = &'a mut u8>, data: &[u8]) -> usize {
    let mut written = 0;
    for (channel, bit) in carriers.zip(msb_bits(data)) {
        *channel = (*channel & 0xFE) | bit;
        written += 1;
    }
    written
}

/// 把字节序列展开为位序列，每个字节最高位在前。
pub fn msb_bits(data: &[u8]) -> impl Iterator<Item = u8> + '_ {
    data.iter()
        .flat_map(|&byte| (0..8).rev().map(move |shift| (byte >> shift) & 1))
}

/// 顺序读取载体最低位的游标。
pub struct BitReader<I> {
    carriers: I,
    consumed: u64,
}

impl<'a, I> BitReader<I>
where
    I: Iterator<Item = &'a u8>,
{
    pub fn new(carriers: I) -> Self {
        Self {
            carriers,
            consumed: 0,
        }
    }

    /// 已读取的载体位数。
    pub fn consumed(&self) -> u64 {
        self.consumed
    }

    /// 读取一个字节；载体耗尽时返回 `None`。
    pub fn read_u8(&mut self) -> Option<u8> {
        let mut value = 0u8;
        for _ in 0..8 {
            let channel = self.carriers.next()?;
            value = (value << 1) | (channel & 1);
            self.consumed += 1;
        }
        Some(value)
    }

    /// 读取一个大端 `u32`。
    pub fn read_u32(&mut self) -> Option<u32> {
        let mut bytes = [0u8; 4];
        self.read_exact(&mut bytes)?;
        Some(u32::from_be_bytes(bytes))
    }

    pub fn read_exact(&mut self, buf: &mut [u8]) -> Option<()> {
        for slot in buf.iter_mut() {
            *slot = self.read_u8()?;
        }
        Some(())
    }

    /// 读取 `len` 个字节；载体不足时返回 `None`，不返回部分数据。
    pub fn read_bytes(&mut self, len: usize) -> Option<Vec<u8>> {
        let mut buf = vec![0u8; len];
        self.read_exact(&mut buf)?;
        Some(buf)
    }
}
