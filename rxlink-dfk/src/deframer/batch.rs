//! 批量处理模块
//!
//! 解帧器的批量输入/输出接口。输入按任意大小分块送入，
//! 内部严格逐bit处理，结果与逐bit调用完全一致。

use rxlink_core::utils::bit_ops;

use super::core::PacketDeframer;
use super::packetizer::Packet;

impl PacketDeframer {
    /// 批量推入bit序列
    ///
    /// # 参数
    /// - `bits`: bit序列（每个元素只取最低位），按顺序逐bit处理
    pub fn push_bits(&mut self, bits: &[u8]) {
        for &bit in bits {
            self.push_bit(bit);
        }
    }

    /// 推入打包字节，按MSB优先展开为bit后逐bit处理
    ///
    /// # 参数
    /// - `bytes`: 打包字节序列
    pub fn push_bytes_msb(&mut self, bytes: &[u8]) {
        self.push_bits(&bit_ops::unpack_msb(bytes));
    }

    /// 批量弹出输出包
    ///
    /// # 参数
    /// - `max_packets`: 最多弹出的包数
    ///
    /// # 返回
    /// - 按投递顺序排列的包列表（可能少于`max_packets`）
    pub fn drain_packets(&mut self, max_packets: usize) -> Vec<Packet> {
        let mut packets = Vec::with_capacity(max_packets.min(16));

        for _ in 0..max_packets {
            match self.receive_packet() {
                Some(packet) => packets.push(packet),
                None => break, // 没有更多输出包
            }
        }

        packets
    }

    /// 弹出当前所有可用的输出包
    pub fn drain_all_packets(&mut self) -> Vec<Packet> {
        let mut packets = Vec::new();

        while let Some(packet) = self.receive_packet() {
            packets.push(packet);
        }

        packets
    }
}
