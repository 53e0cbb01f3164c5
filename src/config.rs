// src/config.rs

use serde::{Deserialize, Serialize};
use std::{fs, path::Path, time::Duration};
use anyhow::{Context, Result};

use crate::persistence::DEFAULT_SNAPSHOT_PATH;

/// 进程启动后，从 config.json 中读到的全局配置
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// HTTP 监听地址
    pub listen_addr: String,
    /// SAVE / RESTORE 使用的快照文件
    pub snapshot_path: String,
    /// 过期清理的轮询周期（毫秒）
    pub sweep_interval_ms: u64,
    /// 启动时如果快照文件存在，先 RESTORE 一次
    pub restore_on_start: bool,
    // 监控配置
    pub metrics_enabled: bool,
    pub slowlog_threshold_ms: u64,
    /// 默认日志级别，RUST_LOG 优先
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            listen_addr: "127.0.0.1:8080".to_string(),
            snapshot_path: DEFAULT_SNAPSHOT_PATH.to_string(),
            sweep_interval_ms: 500,
            restore_on_start: false,
            metrics_enabled: true,
            slowlog_threshold_ms: 10,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn sweep_interval(&self) -> Duration {
        // 0 会让 tokio interval panic
        Duration::from_millis(self.sweep_interval_ms.max(1))
    }

    pub fn slowlog_threshold(&self) -> Duration {
        Duration::from_millis(self.slowlog_threshold_ms)
    }
}

/// 从指定路径读取并反序列化 JSON 配置
///
/// 返回值的第二项表示这次是否新写入了默认配置文件。
/// 读配置时日志还没初始化，由调用方在安装 subscriber 之后再记录。
pub fn load<P: AsRef<Path>>(path: P) -> Result<(Config, bool)> {
    let path_ref = path.as_ref();

    // 如果配置文件不存在，创建默认配置
    if !path_ref.exists() {
        let default_cfg = Config::default();
        let default_json = serde_json::to_string_pretty(&default_cfg)?;
        fs::write(path_ref, default_json)
            .with_context(|| format!("Failed to write default config {:?}", path_ref))?;
        return Ok((default_cfg, true));
    }

    let data = fs::read_to_string(path_ref)
        .with_context(|| format!("Failed to read config file {:?}", path_ref))?;
    let cfg: Config = serde_json::from_str(&data)
        .with_context(|| format!("Failed to parse config file {:?}", path_ref))?;
    Ok((cfg, false))
}
