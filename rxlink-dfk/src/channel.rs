//! 输出信道模块
//!
//! 实现解帧结果的按序投递队列

use std::collections::VecDeque;

use rxlink_core::DeframeError;

use crate::deframer::Packet;

/// 包投递信道
///
/// 按帧完成顺序缓存输出包。消费方有两种读取方式：
/// - `receive`: 按序弹出，队列空时返回`None`（"暂无消息"）
/// - `get_message`: 按下标读取，越界是消费方契约错误（"越界读取"）
///
/// 两种情况必须可区分，见`DeframeError::MessageOutOfRange`。
pub struct PacketChannel {
    buffer: VecDeque<Packet>,
    capacity: usize,
}

impl PacketChannel {
    /// 创建容量受限的信道
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: VecDeque::new(),
            capacity,
        }
    }

    /// 创建无界信道（解帧器内部使用，投递永不失败）
    pub fn unbounded() -> Self {
        Self::new(usize::MAX)
    }

    /// 投递一个包
    ///
    /// # 返回
    /// - `Ok(())`: 投递成功
    /// - `Err(DeframeError)`: 信道已满
    pub fn send(&mut self, packet: Packet) -> Result<(), DeframeError> {
        if self.buffer.len() >= self.capacity {
            return Err(DeframeError::ChannelFull(format!(
                "Channel at capacity {}",
                self.capacity
            )));
        }
        self.buffer.push_back(packet);
        Ok(())
    }

    /// 按投递顺序弹出下一个包，队列空时返回`None`
    pub fn receive(&mut self) -> Option<Packet> {
        self.buffer.pop_front()
    }

    /// 查看队首的包（不移除）
    pub fn peek(&self) -> Option<&Packet> {
        self.buffer.front()
    }

    /// 按下标读取已投递且未弹出的包
    ///
    /// # 参数
    /// - `index`: 包下标（0为最早投递的包）
    ///
    /// # 返回
    /// - `Ok(&Packet)`: 对应的包
    /// - `Err(DeframeError)`: 下标越界（消费方读取了不存在的消息）
    pub fn get_message(&self, index: usize) -> Result<&Packet, DeframeError> {
        self.buffer.get(index).ok_or_else(|| {
            DeframeError::MessageOutOfRange(format!(
                "Requested message {} but only {} available",
                index,
                self.buffer.len()
            ))
        })
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// 清空信道
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// 获取信道容量
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deframer::{Packet, Payload};

    fn dummy_packet(tag: u8) -> Packet {
        Packet::new("test", Payload::Bits(vec![tag & 1]))
    }

    #[test]
    fn test_send_receive_order() {
        let mut channel = PacketChannel::unbounded();

        channel.send(dummy_packet(0)).unwrap();
        channel.send(dummy_packet(1)).unwrap();
        assert_eq!(channel.len(), 2);

        let first = channel.receive().unwrap();
        assert_eq!(first.payload, Payload::Bits(vec![0]));
        let second = channel.receive().unwrap();
        assert_eq!(second.payload, Payload::Bits(vec![1]));
        assert!(channel.receive().is_none());
    }

    #[test]
    fn test_capacity_limit() {
        let mut channel = PacketChannel::new(1);

        channel.send(dummy_packet(0)).unwrap();
        let result = channel.send(dummy_packet(1));
        assert!(matches!(result, Err(DeframeError::ChannelFull(_))));
    }

    #[test]
    fn test_get_message_out_of_range() {
        let mut channel = PacketChannel::unbounded();
        channel.send(dummy_packet(1)).unwrap();

        assert!(channel.get_message(0).is_ok());
        // 越界读取必须报错，而不是返回"暂无消息"
        let result = channel.get_message(1);
        assert!(matches!(result, Err(DeframeError::MessageOutOfRange(_))));
    }

    #[test]
    fn test_peek_does_not_remove() {
        let mut channel = PacketChannel::unbounded();
        channel.send(dummy_packet(1)).unwrap();

        assert!(channel.peek().is_some());
        assert_eq!(channel.len(), 1);
    }
}
