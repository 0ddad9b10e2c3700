//! 解帧模块
//!
//! 提供从连续bit流中恢复离散数据包的完整状态机，支持：
//! - 同步字精确搜索
//! - 定长/变长两种帧长确定方式
//! - 损坏长度字段的静默丢弃与即时重同步
//! - bit序列或MSB优先打包字节两种输出编码

pub mod batch;
pub mod core;
pub mod packetizer;

pub use self::core::{DeframerStats, PacketDeframer};
pub use packetizer::{Packet, Payload};
