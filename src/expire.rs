// src/expire.rs

//! 过期策略：
//! - EXPIRE / TTL 只读写过期表（UNIX 秒）
//! - 读命令本身不检查过期，过期 key 由后台 cleaner 定时批量清理，
//!   所以一个 key 最多会在截止时间后再被读到一个轮询周期

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info};

use crate::engine::Store;
use crate::engine::kv::Keyspace;
use crate::error::StoreError;

/// 默认轮询周期
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_millis(500);

/// 返回当前的 UNIX 秒
pub fn now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

/// 设置 key 的过期时间，返回 `secs` 本身
pub fn expire(ks: &mut Keyspace, key: &str, secs: i64, now: i64) -> Result<i64, StoreError> {
    if !ks.contains(key) {
        return Err(StoreError::NotFound);
    }
    ks.expires.insert(key.to_string(), now.saturating_add(secs));
    Ok(secs)
}

/// 查询 key 的剩余秒数；没有设置过期返回 `None`
///
/// 已过截止时间但 cleaner 还没跑到时返回 0
pub fn ttl(ks: &Keyspace, key: &str, now: i64) -> Result<Option<i64>, StoreError> {
    if !ks.contains(key) {
        return Err(StoreError::NotFound);
    }
    Ok(ks.expires.get(key).map(|deadline| deadline.saturating_sub(now).max(0)))
}

/// 需要清理的 key：已到期的，以及值已经不存在的孤立过期条目
pub(crate) fn expired_keys(ks: &Keyspace, now: i64) -> Vec<String> {
    ks.expires
        .iter()
        .filter(|(key, deadline)| **deadline <= now || !ks.contains(key))
        .map(|(key, _)| key.clone())
        .collect()
}

/// 删除值表和过期表中的记录，返回实际删掉的值数量
pub(crate) fn evict(ks: &mut Keyspace, keys: &[String]) -> usize {
    keys.iter().filter(|key| ks.remove(key).is_some()).count()
}

/// 后台清理任务的句柄，drop 或 `stop()` 时结束任务
#[derive(Debug)]
pub struct Cleaner {
    handle: JoinHandle<()>,
}

impl Cleaner {
    pub fn stop(self) {
        self.handle.abort();
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for Cleaner {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// 在当前 tokio runtime 上启动后台清理任务
pub fn spawn_cleaner(store: Store, period: Duration) -> Cleaner {
    Cleaner {
        handle: tokio::spawn(start_cleaner(store, period)),
    }
}

/// 后台定时清理任务
pub async fn start_cleaner(store: Store, period: Duration) {
    info!(interval_ms = period.as_millis() as u64, "expire cleaner started");
    let mut iv = interval(period);
    iv.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // 第一次 tick 立即返回，跳过
    iv.tick().await;
    loop {
        iv.tick().await;
        let evicted = store.sweep_expired(now_secs());
        if evicted > 0 {
            debug!(evicted, "evicted expired keys");
        }
    }
}
