//! 解帧错误定义

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum DeframeError {
    /// 无效的解帧配置
    InvalidConfig(String),
    /// 无效的帧格式
    InvalidFrameFormat(String),
    /// 长度错误
    LengthError(String),
    /// 消息索引越界（读取了尚未产生的消息）
    MessageOutOfRange(String),
    /// 输出信道已满
    ChannelFull(String),
    /// 其他错误
    Other(String),
}

impl fmt::Display for DeframeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeframeError::InvalidConfig(msg) => write!(f, "Invalid config: {msg}"),
            DeframeError::InvalidFrameFormat(msg) => write!(f, "Invalid frame format: {msg}"),
            DeframeError::LengthError(msg) => write!(f, "Length error: {msg}"),
            DeframeError::MessageOutOfRange(msg) => write!(f, "Message out of range: {msg}"),
            DeframeError::ChannelFull(msg) => write!(f, "Channel full: {msg}"),
            DeframeError::Other(msg) => write!(f, "Other error: {msg}"),
        }
    }
}

impl std::error::Error for DeframeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

impl From<String> for DeframeError {
    fn from(s: String) -> Self {
        DeframeError::Other(s)
    }
}

impl From<&str> for DeframeError {
    fn from(s: &str) -> Self {
        DeframeError::Other(s.to_string())
    }
}
