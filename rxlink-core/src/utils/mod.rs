//! 工具模块
//!
//! 提供RXLink系统中常用的工具函数

use crate::error::DeframeError;

/// 将字节数组转换为十六进制字符串
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

/// 位操作工具
pub mod bit_ops {
    use super::DeframeError;

    /// 将bit序列按MSB优先打包为字节数组
    ///
    /// # 参数
    /// - `bits`: bit序列（每个元素取值0或1），长度必须为8的整数倍
    ///
    /// # 返回
    /// - `Ok(Vec<u8>)`: 打包后的字节数组
    /// - `Err(DeframeError)`: bit数不是整字节
    pub fn pack_msb(bits: &[u8]) -> Result<Vec<u8>, DeframeError> {
        if bits.len() % 8 != 0 {
            return Err(DeframeError::InvalidFrameFormat(format!(
                "Bit count {} is not a multiple of 8",
                bits.len()
            )));
        }

        let mut bytes = Vec::with_capacity(bits.len() / 8);
        for chunk in bits.chunks_exact(8) {
            bytes.push(byte_from_bits(chunk));
        }
        Ok(bytes)
    }

    /// 将字节数组按MSB优先展开为bit序列
    pub fn unpack_msb(bytes: &[u8]) -> Vec<u8> {
        let mut bits = Vec::with_capacity(bytes.len() * 8);
        for &byte in bytes {
            for i in 0..8 {
                bits.push((byte >> (7 - i)) & 1);
            }
        }
        bits
    }

    /// 将8个bit按MSB优先组合为一个字节
    ///
    /// 超过8个bit时只取前8个，不足8个时低位补齐为高位对齐后的值
    pub fn byte_from_bits(bits: &[u8]) -> u8 {
        let mut value = 0u8;
        for &bit in bits.iter().take(8) {
            value = (value << 1) | (bit & 1);
        }
        value
    }
}
