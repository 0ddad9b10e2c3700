//! 比特流构造模块
//!
//! 为仿真和测试构造输入bit流：空闲段、随机噪声、同步字、打包字节

use rand::Rng;

use rxlink_core::utils::bit_ops;

/// 比特流构造器
///
/// 按追加顺序拼接各段内容，`build`产出最终的bit序列
#[derive(Debug, Clone, Default)]
pub struct StreamBuilder {
    bits: Vec<u8>,
}

impl StreamBuilder {
    /// 创建空的比特流构造器
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加`count`个空闲bit（全0）
    pub fn push_idle(&mut self, count: usize) -> &mut Self {
        self.bits.extend(std::iter::repeat(0u8).take(count));
        self
    }

    /// 追加`count`个随机噪声bit
    ///
    /// # 参数
    /// - `count`: 噪声bit数
    /// - `rng`: 随机数发生器（由调用方提供以便复现）
    pub fn push_noise<R: Rng>(&mut self, count: usize, rng: &mut R) -> &mut Self {
        for _ in 0..count {
            self.bits.push(rng.random::<bool>() as u8);
        }
        self
    }

    /// 追加一段bit序列
    pub fn push_bits(&mut self, bits: &[u8]) -> &mut Self {
        self.bits.extend(bits.iter().map(|&b| b & 1));
        self
    }

    /// 追加打包字节，按MSB优先展开为bit
    pub fn push_bytes_msb(&mut self, bytes: &[u8]) -> &mut Self {
        self.bits.extend(bit_ops::unpack_msb(bytes));
        self
    }

    /// 当前累计的bit数
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// 产出最终的bit序列
    pub fn build(self) -> Vec<u8> {
        self.bits
    }
}
