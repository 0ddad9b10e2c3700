//! PacketDeframer核心实现
//!
//! 单线程、单消费者的流式变换：逐bit驱动，搜索同步字、采集帧、
//! 解码长度字段并把完成的帧打包投递到输出信道。

use rxlink_core::utils::bit_ops;
use rxlink_core::{BitConsumer, DeframeError, DeframerConfig, FrameFormat};

use super::packetizer;
use crate::channel::PacketChannel;
use crate::sync::BitSynchronizer;

/// 解帧器当前阶段
#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    /// 搜索同步字
    Searching,
    /// 采集帧数据
    Collecting,
}

/// 解帧统计信息
///
/// 纯被动计数，不影响任何状态转移
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DeframerStats {
    /// 已消费的输入bit总数
    pub bits_consumed: u64,
    /// 同步字匹配次数
    pub syncs_detected: u64,
    /// 成功投递的帧数
    pub frames_emitted: u64,
    /// 因长度字段损坏而丢弃的帧数
    pub frames_aborted: u64,
}

/// 包解帧器
///
/// 状态机只有两个阶段：`Searching`（初始阶段，亦是每次投递或中止后
/// 返回的阶段）和`Collecting`。没有终止阶段，可在输入流上无限运行。
/// 每个状态转移都在单个bit的处理内完成并立即返回，流结束时若仍在
/// 采集中，残帧被直接丢弃，不投递也不报错。
pub struct PacketDeframer {
    config: DeframerConfig,
    phase: Phase,
    synchronizer: BitSynchronizer,
    /// 匹配之后采集到的帧bit（不含同步字本身）
    frame_buffer: Vec<u8>,
    /// 长度字段解码值（变长模式，读到长度字节后填充）
    decoded_length: Option<usize>,
    /// 完成当前帧所需的总bit数
    target_bits: Option<usize>,
    output: PacketChannel,
    stats: DeframerStats,
}

impl PacketDeframer {
    /// 创建新的包解帧器
    ///
    /// # 参数
    /// - `config`: 解帧配置（构造后不可变）
    ///
    /// # 返回
    /// - `Ok(PacketDeframer)`: 创建成功
    /// - `Err(DeframeError)`: 配置非法
    pub fn new(config: DeframerConfig) -> Result<Self, DeframeError> {
        config.validate()?;

        let synchronizer = BitSynchronizer::new(config.sync_pattern.clone());
        Ok(Self {
            config,
            phase: Phase::Searching,
            synchronizer,
            frame_buffer: Vec::new(),
            decoded_length: None,
            target_bits: None,
            output: PacketChannel::unbounded(),
            stats: DeframerStats::default(),
        })
    }

    /// 处理单个输入bit
    ///
    /// 搜索、采集、长度解码、投递/中止全部在本次调用内完成。
    /// 内部故障（长度损坏、残帧）被吸收为状态复位，绝不向外传播。
    pub fn push_bit(&mut self, bit: u8) {
        let bit = bit & 1;
        self.stats.bits_consumed += 1;

        match self.phase {
            Phase::Searching => {
                if self.synchronizer.push(bit) {
                    self.stats.syncs_detected += 1;
                    self.enter_collecting();
                }
            }
            Phase::Collecting => self.collect_bit(bit),
        }
    }

    /// 按序弹出下一个输出包，暂无消息时返回`None`
    pub fn receive_packet(&mut self) -> Option<packetizer::Packet> {
        self.output.receive()
    }

    /// 按下标读取已投递的包，越界返回`MessageOutOfRange`
    pub fn get_message(&self, index: usize) -> Result<&packetizer::Packet, DeframeError> {
        self.output.get_message(index)
    }

    /// 当前待消费的包数量
    pub fn packets_pending(&self) -> usize {
        self.output.len()
    }

    /// 是否处于采集阶段
    pub fn is_collecting(&self) -> bool {
        self.phase == Phase::Collecting
    }

    /// 当前帧已解码的长度字段值（变长模式，读到长度字节之前为`None`）
    pub fn decoded_length(&self) -> Option<usize> {
        self.decoded_length
    }

    /// 读取统计信息
    pub fn stats(&self) -> &DeframerStats {
        &self.stats
    }

    /// 清零统计信息
    pub fn reset_stats(&mut self) {
        self.stats = DeframerStats::default();
    }

    /// 读取解帧配置
    pub fn config(&self) -> &DeframerConfig {
        &self.config
    }

    /// 完全复位到构造时的状态（输出信道和统计一并清空）
    pub fn reset(&mut self) {
        self.synchronizer.reset();
        self.frame_buffer.clear();
        self.decoded_length = None;
        self.target_bits = None;
        self.phase = Phase::Searching;
        self.output.clear();
        self.stats = DeframerStats::default();
    }

    /// 同步字匹配成功，进入采集阶段
    ///
    /// 清空全部帧装配状态，下一个bit即为第一个payload bit
    fn enter_collecting(&mut self) {
        self.frame_buffer.clear();
        self.decoded_length = None;
        self.target_bits = match self.config.format {
            FrameFormat::Fixed { payload_bits } => Some(payload_bits),
            // 变长模式的目标长度要等读到长度字节后才可知
            FrameFormat::Variable { .. } => None,
        };
        self.synchronizer.reset();
        self.phase = Phase::Collecting;
    }

    /// 采集阶段处理单个bit
    fn collect_bit(&mut self, bit: u8) {
        self.frame_buffer.push(bit);

        if let FrameFormat::Variable {
            length_offset_bytes,
            max_payload_bytes,
            checksum_bytes,
        } = self.config.format
        {
            if self.target_bits.is_none() {
                // 头部材料 + 长度字节本身，全部保留在帧缓冲区内
                let header_bits = (length_offset_bytes + 1) * 8;
                if self.frame_buffer.len() == header_bits {
                    let length = bit_ops::byte_from_bits(
                        &self.frame_buffer[length_offset_bytes * 8..header_bits],
                    ) as usize;

                    if max_payload_bytes > 0 && length > max_payload_bytes {
                        // 长度字段损坏：静默丢弃整帧，从下一个bit起
                        // 继续逐bit扫描同步字，不跳过任何bit
                        self.abort_frame();
                        return;
                    }

                    self.decoded_length = Some(length);
                    self.target_bits =
                        Some((length_offset_bytes + 1 + length + checksum_bytes) * 8);
                }
            }
        }

        if let Some(target) = self.target_bits {
            if self.frame_buffer.len() == target {
                self.emit_frame();
            }
        }
    }

    /// 帧采集完成，打包并投递，复位回搜索阶段
    fn emit_frame(&mut self) {
        let bits = std::mem::take(&mut self.frame_buffer);
        match packetizer::build_packet(&self.config.name, bits, self.config.encoding) {
            Ok(packet) => {
                // 内部信道无界，投递不会失败
                if self.output.send(packet).is_ok() {
                    self.stats.frames_emitted += 1;
                }
            }
            Err(_) => {
                // 两种模式的目标长度都是整字节，打包失败不可达
                self.stats.frames_aborted += 1;
            }
        }
        self.return_to_searching();
    }

    /// 丢弃当前帧，不投递任何消息
    fn abort_frame(&mut self) {
        self.stats.frames_aborted += 1;
        self.frame_buffer.clear();
        self.return_to_searching();
    }

    /// 回到搜索阶段（投递或中止后的公共路径）
    fn return_to_searching(&mut self) {
        self.decoded_length = None;
        self.target_bits = None;
        self.synchronizer.reset();
        self.phase = Phase::Searching;
    }
}

impl BitConsumer for PacketDeframer {
    fn push_bit(&mut self, bit: u8) {
        PacketDeframer::push_bit(self, bit);
    }
}
