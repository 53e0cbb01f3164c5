// src/engine/kv.rs

//! `Keyspace`：值表 + 过期表，同属一个一致性域。
//! 本身不加锁，由 [`Store`](super::Store) 统一持有读写锁。

use std::collections::{HashMap, HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::types::Value;

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyspace {
    /// key -> 值
    pub(crate) data: HashMap<String, Value>,
    /// key -> 过期时间（UNIX 秒）
    pub(crate) expires: HashMap<String, i64>,
}

impl Keyspace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// 删除 key 以及它的过期时间，返回旧值
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.expires.remove(key);
        self.data.remove(key)
    }

    /// FLUSHDB：清空所有值和过期时间
    pub fn clear(&mut self) {
        self.data.clear();
        self.expires.clear();
    }

    pub fn keys(&self) -> Vec<String> {
        self.data.keys().cloned().collect()
    }

    /// 把另一个 keyspace 合并进来，同名 key 无条件覆盖（值和过期时间分别覆盖）。
    /// 返回合并的值条目数量。
    pub fn merge(&mut self, other: Keyspace) -> usize {
        let merged = other.data.len();
        self.data.extend(other.data);
        self.expires.extend(other.expires);
        merged
    }

    // --- 按类型取值 ---

    pub(crate) fn list(&self, key: &str) -> Result<&VecDeque<String>, StoreError> {
        match self.data.get(key) {
            Some(Value::List(l)) => Ok(l),
            Some(_) => Err(StoreError::WrongType),
            None => Err(StoreError::NotFound),
        }
    }

    pub(crate) fn list_mut(&mut self, key: &str) -> Result<&mut VecDeque<String>, StoreError> {
        match self.data.get_mut(key) {
            Some(Value::List(l)) => Ok(l),
            Some(_) => Err(StoreError::WrongType),
            None => Err(StoreError::NotFound),
        }
    }

    /// key 不存在时创建空列表
    pub(crate) fn list_or_create(&mut self, key: &str) -> Result<&mut VecDeque<String>, StoreError> {
        match self
            .data
            .entry(key.to_string())
            .or_insert_with(|| Value::List(VecDeque::new()))
        {
            Value::List(l) => Ok(l),
            _ => Err(StoreError::WrongType),
        }
    }

    pub(crate) fn set(&self, key: &str) -> Result<&HashSet<String>, StoreError> {
        match self.data.get(key) {
            Some(Value::Set(s)) => Ok(s),
            Some(_) => Err(StoreError::WrongType),
            None => Err(StoreError::NotFound),
        }
    }

    pub(crate) fn set_mut(&mut self, key: &str) -> Result<&mut HashSet<String>, StoreError> {
        match self.data.get_mut(key) {
            Some(Value::Set(s)) => Ok(s),
            Some(_) => Err(StoreError::WrongType),
            None => Err(StoreError::NotFound),
        }
    }

    /// key 不存在时创建空集合
    pub(crate) fn set_or_create(&mut self, key: &str) -> Result<&mut HashSet<String>, StoreError> {
        match self
            .data
            .entry(key.to_string())
            .or_insert_with(|| Value::Set(HashSet::new()))
        {
            Value::Set(s) => Ok(s),
            _ => Err(StoreError::WrongType),
        }
    }
}
