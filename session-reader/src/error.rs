//! Session 错误定义

use thiserror::Error;

/// 读取或解析 session 时可能出现的错误
#[derive(Error, Debug)]
pub enum SessionError {
    /// Key 在存储中不存在
    #[error("Session not found")]
    NotFound,

    /// Key 存在但值为空
    #[error("Empty session")]
    Empty,

    /// 原始值不是合法的 base64（标准字母表，带 padding）
    #[error(transparent)]
    Decode(#[from] base64::DecodeError),

    /// 解码后的内容不符合 `identifier:json-object` 格式
    #[error("Invalid payload: {0}")]
    InvalidPayload(#[source] PayloadError),

    /// 存储层错误（连接、协议），原样透传
    #[error(transparent)]
    Store(#[from] redis::RedisError),
}

impl SessionError {
    /// 是否为 session 不存在
    pub fn is_not_found(&self) -> bool {
        matches!(self, SessionError::NotFound)
    }
}

/// `InvalidPayload` 的根因
#[derive(Error, Debug)]
pub enum PayloadError {
    #[error("missing ':' separator")]
    MissingSeparator,

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl From<PayloadError> for SessionError {
    fn from(err: PayloadError) -> Self {
        SessionError::InvalidPayload(err)
    }
}

pub type Result<T> = std::result::Result<T, SessionError>;
