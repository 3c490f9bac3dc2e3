//! Session 存储层
//!
//! 只需要按 key 读取原始值；`None` 表示 key 不存在。

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, AsyncConnectionConfig, Client, RedisResult};
use tracing::{debug, info};

use crate::config::StoreConfig;

/// Key-value 存储抽象
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// 读取 key 对应的原始值，key 不存在时返回 `Ok(None)`
    async fn fetch(&self, key: &str) -> RedisResult<Option<Vec<u8>>>;
}

/// 基于 Redis 的存储
#[derive(Clone)]
pub struct RedisStore {
    conn: MultiplexedConnection,
    config: StoreConfig,
}

impl RedisStore {
    /// 连接 Redis 并 PING 一次，不可达时直接返回底层错误
    pub async fn connect(config: StoreConfig) -> RedisResult<Self> {
        let client = Client::open(config.connection_info())?;
        let conn_config = AsyncConnectionConfig::new()
            .set_connection_timeout(config.connect_timeout)
            .set_response_timeout(config.response_timeout);
        let mut conn = client
            .get_multiplexed_async_connection_with_config(&conn_config)
            .await?;

        let pong: String = redis::cmd("PING").query_async(&mut conn).await?;
        debug!("[RedisStore] PING -> {}", pong);

        info!(
            "[RedisStore] Connected to Redis at {}:{} (db {})",
            config.host, config.port, config.db
        );

        Ok(Self { conn, config })
    }
}

#[async_trait]
impl SessionStore for RedisStore {
    async fn fetch(&self, key: &str) -> RedisResult<Option<Vec<u8>>> {
        // MultiplexedConnection 可以廉价 clone，并发调用互不阻塞
        let mut conn = self.conn.clone();
        let value: Option<Vec<u8>> = conn.get(self.config.full_key(key)).await?;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local_config() -> StoreConfig {
        StoreConfig {
            password: None,
            db: 0,
            ..StoreConfig::new("localhost", 6379)
        }
    }

    #[tokio::test]
    async fn test_connect_unreachable_fails_fast() {
        let config = StoreConfig {
            connect_timeout: std::time::Duration::from_millis(500),
            ..StoreConfig::new("127.0.0.1", 1)
        };
        assert!(RedisStore::connect(config).await.is_err());
    }

    #[tokio::test]
    #[ignore = "requires a Redis server on localhost:6379"]
    async fn test_fetch_missing_key() {
        let store = RedisStore::connect(local_config()).await.unwrap();
        let value = store
            .fetch("session-reader:test:definitely-missing")
            .await
            .unwrap();
        assert!(value.is_none());
    }

    #[tokio::test]
    #[ignore = "requires a Redis server on localhost:6379"]
    async fn test_fetch_existing_key() {
        let store = RedisStore::connect(local_config()).await.unwrap();

        let mut conn = store.conn.clone();
        let key = "session-reader:test:fetch";
        conn.set_ex::<_, _, ()>(key, "YWFiYjp7ImEiOiJhIn0=", 30)
            .await
            .unwrap();

        let value = store.fetch(key).await.unwrap();
        assert_eq!(value.as_deref(), Some(&b"YWFiYjp7ImEiOiJhIn0="[..]));
    }
}
