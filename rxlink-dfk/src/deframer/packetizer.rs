//! 打包器
//!
//! 负责把采集完成的帧bit序列转换为带元数据的输出包

use std::collections::HashMap;

use bytes::Bytes;
use rxlink_core::utils::bit_ops;
use rxlink_core::{DeframeError, PayloadEncoding};

/// 输出包的payload
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// 原始bit序列，每个元素取值0或1，按采集顺序排列
    Bits(Vec<u8>),
    /// MSB优先打包的字节
    Bytes(Bytes),
}

impl Payload {
    /// payload元素个数（bit模式为bit数，字节模式为字节数）
    pub fn len(&self) -> usize {
        match self {
            Payload::Bits(bits) => bits.len(),
            Payload::Bytes(bytes) => bytes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// bit模式下的bit序列
    pub fn as_bits(&self) -> Option<&[u8]> {
        match self {
            Payload::Bits(bits) => Some(bits),
            Payload::Bytes(_) => None,
        }
    }

    /// 字节模式下的字节序列
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Payload::Bits(_) => None,
            Payload::Bytes(bytes) => Some(bytes),
        }
    }
}

/// 输出包
///
/// 每个完成的帧恰好产生一个包，由元数据映射和payload组成
#[derive(Debug, Clone, PartialEq)]
pub struct Packet {
    /// 元数据，至少包含 {"name": <配置的标识符>}
    pub meta: HashMap<String, String>,
    pub payload: Payload,
}

impl Packet {
    /// 创建输出包并写入name元数据
    pub fn new(name: &str, payload: Payload) -> Self {
        let mut meta = HashMap::new();
        meta.insert("name".to_string(), name.to_string());
        Self { meta, payload }
    }

    /// 读取name元数据
    pub fn name(&self) -> Option<&str> {
        self.meta.get("name").map(String::as_str)
    }
}

/// 将完成的帧bit序列打包为输出包
///
/// 每个完成（未中止）的帧恰好调用一次
///
/// # 参数
/// - `name`: 配置的标识符
/// - `frame_bits`: 帧bit序列（长度已达到目标bit数）
/// - `encoding`: 输出编码方式
///
/// # 返回
/// - `Ok(Packet)`: 输出包
/// - `Err(DeframeError)`: 字节模式下bit数不是整字节（两种模式的目标
///   长度都只会是整字节，正常流程不会出现）
pub fn build_packet(
    name: &str,
    frame_bits: Vec<u8>,
    encoding: PayloadEncoding,
) -> Result<Packet, DeframeError> {
    let payload = match encoding {
        PayloadEncoding::Bits => Payload::Bits(frame_bits),
        PayloadEncoding::PackedBytes => {
            let bytes = bit_ops::pack_msb(&frame_bits)?;
            Payload::Bytes(Bytes::from(bytes))
        }
    };

    Ok(Packet::new(name, payload))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rxlink_core::utils::bit_ops;

    #[test]
    fn test_build_packet_bits() {
        let bits = bit_ops::unpack_msb(&[0xDE, 0xAD]);
        let packet = build_packet("boop", bits.clone(), PayloadEncoding::Bits).unwrap();

        assert_eq!(packet.name(), Some("boop"));
        assert_eq!(packet.payload.as_bits(), Some(bits.as_slice()));
    }

    #[test]
    fn test_build_packet_packed_bytes() {
        let bits = bit_ops::unpack_msb(&[0xDE, 0xAD, 0xBE, 0xEF]);
        let packet = build_packet("boop", bits, PayloadEncoding::PackedBytes).unwrap();

        assert_eq!(
            packet.payload.as_bytes(),
            Some([0xDE, 0xAD, 0xBE, 0xEF].as_slice())
        );
    }

    #[test]
    fn test_build_packet_rejects_partial_byte() {
        let result = build_packet("boop", vec![1, 0, 1], PayloadEncoding::PackedBytes);
        assert!(result.is_err());
    }

    #[test]
    fn test_meta_contains_name() {
        let packet = build_packet("rx0", vec![], PayloadEncoding::Bits).unwrap();
        assert_eq!(packet.meta.get("name"), Some(&"rx0".to_string()));
    }
}
