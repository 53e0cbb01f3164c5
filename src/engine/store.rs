// src/engine/store.rs

//! `Store`：整个 keyspace 的唯一持有者。
//!
//! - 值表和过期表共用一把读写锁
//! - 写命令（含 SAVE / RESTORE 的编解码和文件 I/O）全程持有写锁
//! - 纯读命令持有读锁；SINTER 在一把读锁内完成，对所有参与的 key 原子
//! - `Clone` 只复制句柄，所有克隆共享同一个 keyspace

use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::{RwLock, RwLockUpgradableReadGuard};
use tracing::{info, warn};

use super::kv::Keyspace;
use crate::error::{SnapshotError, StoreError};
use crate::expire;
use crate::persistence::Persistence;
use crate::types::{list, set, string};

#[derive(Debug, Clone, Default)]
pub struct Store {
    inner: Arc<RwLock<Keyspace>>,
    pers: Arc<Persistence>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// 指定快照文件路径
    pub fn with_snapshot_path(path: impl Into<PathBuf>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Keyspace::new())),
            pers: Arc::new(Persistence::new(path)),
        }
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.pers.path().to_path_buf()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    // --- String ---

    pub fn get(&self, key: &str) -> Result<String, StoreError> {
        string::get(&self.inner.read(), key)
    }

    pub fn set(&self, key: &str, value: &str) {
        string::set(&mut self.inner.write(), key, value);
    }

    // --- List ---

    pub fn llen(&self, key: &str) -> Result<usize, StoreError> {
        list::llen(&self.inner.read(), key)
    }

    pub fn rpush(&self, key: &str, values: &[String]) -> Result<usize, StoreError> {
        list::rpush(&mut self.inner.write(), key, values)
    }

    pub fn lpop(&self, key: &str) -> Result<Option<String>, StoreError> {
        list::lpop(&mut self.inner.write(), key)
    }

    pub fn rpop(&self, key: &str) -> Result<Option<String>, StoreError> {
        list::rpop(&mut self.inner.write(), key)
    }

    pub fn lrange(&self, key: &str, start: u64, stop: u64) -> Result<Vec<String>, StoreError> {
        list::lrange(&self.inner.read(), key, start, stop)
    }

    // --- Set ---

    pub fn sadd(&self, key: &str, members: &[String]) -> Result<usize, StoreError> {
        set::sadd(&mut self.inner.write(), key, members)
    }

    pub fn scard(&self, key: &str) -> Result<usize, StoreError> {
        set::scard(&self.inner.read(), key)
    }

    pub fn smembers(&self, key: &str) -> Result<Vec<String>, StoreError> {
        set::smembers(&self.inner.read(), key)
    }

    pub fn srem(&self, key: &str, members: &[String]) -> Result<usize, StoreError> {
        set::srem(&mut self.inner.write(), key, members)
    }

    pub fn sinter(&self, keys: &[String]) -> Result<Vec<String>, StoreError> {
        set::sinter(&self.inner.read(), keys)
    }

    // --- Keyspace ---

    pub fn keys(&self) -> Vec<String> {
        self.inner.read().keys()
    }

    pub fn del(&self, key: &str) -> Result<(), StoreError> {
        self.inner
            .write()
            .remove(key)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }

    pub fn flushdb(&self) {
        self.inner.write().clear();
    }

    // --- 过期 ---

    pub fn expire(&self, key: &str, secs: i64) -> Result<i64, StoreError> {
        expire::expire(&mut self.inner.write(), key, secs, expire::now_secs())
    }

    pub fn ttl(&self, key: &str) -> Result<Option<i64>, StoreError> {
        expire::ttl(&self.inner.read(), key, expire::now_secs())
    }

    /// 清理截止时间 `<= now` 的 key，返回删掉的数量。
    ///
    /// 先用可升级读锁扫描，只有确实要删时才升级成写锁。
    pub fn sweep_expired(&self, now: i64) -> usize {
        let ks = self.inner.upgradable_read();
        let expired = expire::expired_keys(&ks, now);
        if expired.is_empty() {
            return 0;
        }
        let mut ks = RwLockUpgradableReadGuard::upgrade(ks);
        expire::evict(&mut ks, &expired)
    }

    // --- 快照 ---

    /// SAVE：持有写锁完成整个序列化和写文件
    pub fn save(&self) -> Result<(), SnapshotError> {
        let ks = self.inner.write();
        self.pers.save(&ks).inspect_err(|e| {
            warn!(path = %self.pers.path().display(), error = %e, "snapshot save failed");
        })
    }

    /// RESTORE：读快照并合并进当前 keyspace，同名 key 覆盖，其他 key 保留。
    /// 返回合并的 key 数量。
    pub fn restore(&self) -> Result<usize, SnapshotError> {
        let mut ks = self.inner.write();
        let loaded = self.pers.load().inspect_err(|e| {
            warn!(path = %self.pers.path().display(), error = %e, "snapshot restore failed");
        })?;
        let merged = ks.merge(loaded);
        info!(path = %self.pers.path().display(), merged, "snapshot restored");
        Ok(merged)
    }
}
