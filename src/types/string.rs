// src/types/string.rs

//! String 类型的存取操作
//!
//! - SET key value → 无条件覆盖（不管原来是什么类型），同时清掉过期时间
//! - GET key       → 返回 value；key 不存在 / 类型不对时返回对应错误

use crate::engine::kv::Keyspace;
use crate::error::StoreError;
use crate::types::Value;

/// 将一个字符串写入指定的键，已有值（任意类型）会被覆盖，TTL 被清除。
pub fn set(ks: &mut Keyspace, key: &str, value: &str) {
    ks.data.insert(key.to_string(), Value::Str(value.to_string()));
    ks.expires.remove(key);
}

/// 从指定键读取一个字符串。
///
/// # 错误
/// - `StoreError::NotFound`  – 键不存在
/// - `StoreError::WrongType` – 键存在但不是 String
pub fn get(ks: &Keyspace, key: &str) -> Result<String, StoreError> {
    match ks.data.get(key) {
        Some(Value::Str(s)) => Ok(s.clone()),
        Some(_) => Err(StoreError::WrongType),
        None => Err(StoreError::NotFound),
    }
}
