//! RXLink Core Library
//!
//! This crate provides the core abstractions and data structures for the
//! RXLink (receive-side link deframing) system.

pub mod error;
pub mod frame_meta;
pub mod utils;

// 导出错误类型
pub use error::DeframeError;

// 导出帧格式元数据类型，便于其他模块使用
pub use frame_meta::*;

/// 比特流消费者接口 - 实现驱动方与解帧内核的分离
///
/// 上游协作方（码元同步器、仿真源等）逐bit或按任意大小的批次
/// 推送数据，两种方式的处理结果必须完全一致。
pub trait BitConsumer {
    /// 推入单个bit（取值0或1）
    fn push_bit(&mut self, bit: u8);

    /// 推入一批bit，严格按顺序逐bit处理
    fn push_bits(&mut self, bits: &[u8]) {
        for &bit in bits {
            self.push_bit(bit);
        }
    }
}
