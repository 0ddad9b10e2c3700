//! 位同步模块
//!
//! 实现bit流上的同步字精确匹配

use std::collections::VecDeque;

/// 位同步器
///
/// 维护一个与同步字等长的滑动窗口，每推入一个bit就与同步字
/// 做一次精确相等比较（无误码容忍、无相关门限，只做二值匹配）。
/// 除报告匹配外没有任何副作用，不会预读或缓存窗口之外的数据。
#[derive(Debug, Clone)]
pub struct BitSynchronizer {
    /// 同步字bit序列
    pattern: Vec<u8>,
    /// 最近看到的bit窗口（长度不超过同步字长度）
    window: VecDeque<u8>,
}

impl BitSynchronizer {
    /// 创建新的位同步器
    ///
    /// # 参数
    /// - `pattern`: 同步字bit序列（每个元素取值0或1）
    pub fn new(pattern: Vec<u8>) -> Self {
        let window = VecDeque::with_capacity(pattern.len() + 1);
        Self { pattern, window }
    }

    /// 推入一个bit并检查窗口是否与同步字匹配
    ///
    /// # 参数
    /// - `bit`: 输入bit（只取最低位）
    ///
    /// # 返回
    /// - `true`: 窗口与同步字精确匹配
    /// - `false`: 未匹配
    pub fn push(&mut self, bit: u8) -> bool {
        if self.pattern.is_empty() {
            return false;
        }

        self.window.push_back(bit & 1);
        if self.window.len() > self.pattern.len() {
            self.window.pop_front();
        }

        self.window.len() == self.pattern.len()
            && self.window.iter().eq(self.pattern.iter())
    }

    /// 清空滑动窗口
    ///
    /// 匹配成功进入采集阶段后调用，保证之后的重新搜索从头开始
    pub fn reset(&mut self) {
        self.window.clear();
    }

    /// 同步字长度（bit数）
    pub fn pattern_len(&self) -> usize {
        self.pattern.len()
    }
}
