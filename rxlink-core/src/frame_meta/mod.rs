//! 帧格式元数据模块
//!
//! 定义解帧器配置与帧布局相关的元数据结构

use serde::{Deserialize, Serialize};

use crate::error::DeframeError;

/// 帧长度确定方式
///
/// 用带标签的变体代替"布尔+一堆可选字段"，使非法组合无法表达
/// （例如fixed模式下不存在长度字段偏移）。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FrameFormat {
    /// 定长帧：每帧的payload bit数在配置时静态已知
    Fixed {
        /// payload的bit长度（必须为8的整数倍且非零）
        payload_bits: usize,
    },
    /// 变长帧：帧长由同步字之后的单字节长度字段决定
    Variable {
        /// 同步字结束到长度字段起始之间的字节数（事务ID等头部材料）
        length_offset_bytes: usize,
        /// 长度字段取值上限（0表示不设上限），超出视为帧损坏
        max_payload_bytes: usize,
        /// payload之后附加的尾部字节数（计入帧，不计入长度字段）
        checksum_bytes: usize,
    },
}

/// 输出编码方式
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PayloadEncoding {
    /// 每个元素1个bit（0或1），按采集顺序排列
    Bits,
    /// 按MSB优先打包为字节
    PackedBytes,
}

/// 解帧器配置
///
/// 构造后不可变，在解帧器整个生命周期内有效
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeframerConfig {
    /// 标识符，附加到每个输出包的元数据中
    pub name: String,
    /// 同步字bit序列（每个元素取值0或1）
    pub sync_pattern: Vec<u8>,
    /// 帧长度确定方式
    pub format: FrameFormat,
    /// 输出编码方式
    pub encoding: PayloadEncoding,
}

impl DeframerConfig {
    /// 按位置参数构造配置（与宿主集成层的8字段配置面一致）
    ///
    /// # 参数
    /// - `name`: 标识符
    /// - `sync_pattern`: 同步字bit序列
    /// - `fixed_length`: true表示定长模式
    /// - `fixed_payload_bits`: 定长模式下payload的bit长度
    /// - `max_payload_bytes`: 长度字段取值上限（0表示不设上限）
    /// - `length_offset_bytes`: 长度字段的字节偏移（变长模式）
    /// - `checksum_bytes`: 尾部校验字节数（变长模式）
    /// - `emit_as_bytes`: true表示输出打包字节
    #[allow(clippy::too_many_arguments)]
    pub fn from_raw(
        name: &str,
        sync_pattern: Vec<u8>,
        fixed_length: bool,
        fixed_payload_bits: usize,
        max_payload_bytes: usize,
        length_offset_bytes: usize,
        checksum_bytes: usize,
        emit_as_bytes: bool,
    ) -> Self {
        let format = if fixed_length {
            FrameFormat::Fixed {
                payload_bits: fixed_payload_bits,
            }
        } else {
            FrameFormat::Variable {
                length_offset_bytes,
                max_payload_bytes,
                checksum_bytes,
            }
        };

        let encoding = if emit_as_bytes {
            PayloadEncoding::PackedBytes
        } else {
            PayloadEncoding::Bits
        };

        Self {
            name: name.to_string(),
            sync_pattern,
            format,
            encoding,
        }
    }

    /// 配置合法性校验
    ///
    /// # 返回
    /// - `Ok(())`: 配置合法
    /// - `Err(DeframeError)`: 配置非法
    pub fn validate(&self) -> Result<(), DeframeError> {
        if self.sync_pattern.is_empty() {
            return Err(DeframeError::InvalidConfig(
                "Sync pattern must not be empty".to_string(),
            ));
        }

        if self.sync_pattern.iter().any(|&b| b > 1) {
            return Err(DeframeError::InvalidConfig(
                "Sync pattern elements must be 0 or 1".to_string(),
            ));
        }

        if let FrameFormat::Fixed { payload_bits } = self.format {
            if payload_bits == 0 {
                return Err(DeframeError::InvalidConfig(
                    "Fixed payload length must not be zero".to_string(),
                ));
            }
            if payload_bits % 8 != 0 {
                return Err(DeframeError::InvalidConfig(format!(
                    "Fixed payload length must be a multiple of 8 bits, got {payload_bits}"
                )));
            }
        }

        Ok(())
    }
}

/// bit级范围（起始bit偏移 + bit长度）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BitRange {
    pub start: usize,
    pub len: usize,
}

impl BitRange {
    /// 范围结束位置（不含）
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// 变长帧的命名子范围布局
///
/// 帧缓冲区是一个只追加的bit序列，各子范围由偏移计算得出：
/// 头部材料、长度字段字节、payload、尾部校验字节。
/// 实现方可以据此断言精确边界，而不依赖位置上的巧合。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameLayout {
    /// 同步字之后的头部材料（事务ID等），可能为空
    pub header: BitRange,
    /// 单字节长度字段
    pub length_field: BitRange,
    /// 长度字段计数的payload数据
    pub payload: BitRange,
    /// 尾部校验字节，可能为空
    pub checksum: BitRange,
}

impl FrameLayout {
    /// 由变长模式参数和已解码的长度值计算帧布局
    ///
    /// # 参数
    /// - `length_offset_bytes`: 长度字段的字节偏移
    /// - `decoded_length`: 长度字段解码值（payload字节数）
    /// - `checksum_bytes`: 尾部校验字节数
    pub fn variable(
        length_offset_bytes: usize,
        decoded_length: usize,
        checksum_bytes: usize,
    ) -> Self {
        let header = BitRange {
            start: 0,
            len: length_offset_bytes * 8,
        };
        let length_field = BitRange {
            start: header.end(),
            len: 8,
        };
        let payload = BitRange {
            start: length_field.end(),
            len: decoded_length * 8,
        };
        let checksum = BitRange {
            start: payload.end(),
            len: checksum_bytes * 8,
        };

        Self {
            header,
            length_field,
            payload,
            checksum,
        }
    }

    /// 完整帧的总bit数
    pub fn total_bits(&self) -> usize {
        self.checksum.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_fixed() {
        let config = DeframerConfig::from_raw("boop", vec![1, 0, 1, 1], true, 32, 0, 0, 0, false);

        assert_eq!(config.name, "boop");
        assert_eq!(config.format, FrameFormat::Fixed { payload_bits: 32 });
        assert_eq!(config.encoding, PayloadEncoding::Bits);
    }

    #[test]
    fn test_from_raw_variable() {
        let config = DeframerConfig::from_raw("boop", vec![1, 0], false, 0, 4, 2, 2, true);

        assert_eq!(
            config.format,
            FrameFormat::Variable {
                length_offset_bytes: 2,
                max_payload_bytes: 4,
                checksum_bytes: 2,
            }
        );
        assert_eq!(config.encoding, PayloadEncoding::PackedBytes);
    }

    #[test]
    fn test_validate_rejects_empty_sync() {
        let config = DeframerConfig::from_raw("boop", vec![], true, 32, 0, 0, 0, false);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_binary_sync() {
        let config = DeframerConfig::from_raw("boop", vec![1, 2, 0], true, 32, 0, 0, 0, false);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unaligned_fixed_length() {
        // 定长模式payload必须为整字节
        let config = DeframerConfig::from_raw("boop", vec![1, 0], true, 13, 0, 0, 0, false);
        assert!(config.validate().is_err());

        let config = DeframerConfig::from_raw("boop", vec![1, 0], true, 0, 0, 0, 0, false);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_json_round_trip() {
        let config = DeframerConfig::from_raw("boop", vec![1, 1, 0, 1], false, 0, 64, 2, 2, true);

        let json = serde_json::to_string(&config).expect("Failed to serialize");
        let restored: DeframerConfig = serde_json::from_str(&json).expect("Failed to deserialize");

        assert_eq!(config, restored);
    }

    #[test]
    fn test_frame_layout_boundaries() {
        // 2字节头部 + 1字节长度 + 4字节payload + 2字节校验
        let layout = FrameLayout::variable(2, 4, 2);

        assert_eq!(layout.header, BitRange { start: 0, len: 16 });
        assert_eq!(layout.length_field, BitRange { start: 16, len: 8 });
        assert_eq!(layout.payload, BitRange { start: 24, len: 32 });
        assert_eq!(layout.checksum, BitRange { start: 56, len: 16 });
        assert_eq!(layout.total_bits(), 72);
    }

    #[test]
    fn test_frame_layout_no_header_no_checksum() {
        let layout = FrameLayout::variable(0, 4, 0);

        assert_eq!(layout.header.len, 0);
        assert_eq!(layout.length_field, BitRange { start: 0, len: 8 });
        assert_eq!(layout.payload, BitRange { start: 8, len: 32 });
        assert_eq!(layout.checksum.len, 0);
        assert_eq!(layout.total_bits(), 40);
    }
}
