//! Session Reader - 框架 session 读取层
//!
//! 从 Redis 读取 session 中间件写入的记录并解码：
//! - 按 key 读取原始值
//! - base64 解码，按第一个 `:` 切分 identifier 与 JSON
//! - 反序列化为通用的 JSON 对象

pub mod config;
pub mod error;
pub mod payload;
pub mod reader;
pub mod store;

pub use config::StoreConfig;
pub use error::{PayloadError, Result, SessionError};
pub use payload::{parse_payload, split_payload, Payload, SessionData};
pub use reader::SessionReader;
pub use store::{RedisStore, SessionStore};
