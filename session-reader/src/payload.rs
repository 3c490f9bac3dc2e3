//! Session payload 解码
//!
//! 存储格式：`base64_standard(<identifier> ':' <json-object>)`
//! - identifier 只作为前缀分隔，不做任何校验
//! - 只按第一个 `:` 切分，JSON 内部的 `:` 原样保留

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, PAD};
use base64::Engine;
use serde_json::{Map, Value};

use crate::error::{PayloadError, Result, SessionError};

/// Session 数据：字符串 key 到任意 JSON 值
pub type SessionData = Map<String, Value>;

const SEPARATOR: u8 = b':';

/// 标准字母表、要求 padding，允许末尾多余 bit（与 Go `base64.StdEncoding` 一致）
const SESSION_ENGINE: GeneralPurpose =
    GeneralPurpose::new(&alphabet::STANDARD, PAD.with_decode_allow_trailing_bits(true));

/// 解码后的两段内容
#[derive(Debug, Clone, PartialEq)]
pub struct Payload {
    /// 分隔符之前的字节（通常是 UUID 一类的标识）
    pub identifier: Vec<u8>,
    /// 分隔符之后解析出的数据
    pub data: SessionData,
}

/// 解析原始值，只返回 session 数据
pub fn parse_payload(raw: impl AsRef<[u8]>) -> Result<SessionData> {
    split_payload(raw).map(|payload| payload.data)
}

/// 解析原始值，同时保留 identifier
pub fn split_payload(raw: impl AsRef<[u8]>) -> Result<Payload> {
    let raw = raw.as_ref();
    if raw.is_empty() {
        return Err(SessionError::Empty);
    }

    let decoded = SESSION_ENGINE.decode(raw)?;

    let idx = decoded
        .iter()
        .position(|&b| b == SEPARATOR)
        .ok_or(PayloadError::MissingSeparator)?;

    let data = serde_json::from_slice::<SessionData>(&decoded[idx + 1..])
        .map_err(PayloadError::from)?;

    Ok(Payload {
        identifier: decoded[..idx].to_vec(),
        data,
    })
}
