//! Session 读取器
//!
//! 按 key 取出原始值，再交给 payload 解码。不缓存、不重试，每次调用只请求一次存储。

use tracing::debug;

use crate::config::StoreConfig;
use crate::error::{Result, SessionError};
use crate::payload::{self, SessionData};
use crate::store::{RedisStore, SessionStore};

/// Session 读取器
pub struct SessionReader<S = RedisStore> {
    store: S,
}

impl SessionReader<RedisStore> {
    /// 连接 Redis 创建读取器，连接失败时返回存储层错误
    pub async fn connect(config: StoreConfig) -> Result<Self> {
        let store = RedisStore::connect(config).await?;
        Ok(Self::with_store(store))
    }

    /// 解码原始值（不访问存储）
    pub fn parse(raw: impl AsRef<[u8]>) -> Result<SessionData> {
        payload::parse_payload(raw)
    }
}

impl<S: SessionStore> SessionReader<S> {
    /// 使用已有的存储创建读取器
    pub fn with_store(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// 读取并解码 session
    pub async fn get_session(&self, key: &str) -> Result<SessionData> {
        let raw = self
            .store
            .fetch(key)
            .await?
            .ok_or(SessionError::NotFound)?;

        debug!("[SessionReader] Fetched {} ({} bytes)", key, raw.len());

        payload::parse_payload(&raw)
    }
}
