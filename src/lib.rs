// src/lib.rs
//! ledis 库：engine / types / expire / persistence / server / monitor

pub mod config;      // 配置加载
pub mod engine;      // 存储引擎 & 命令分发
pub mod error;       // 错误类型
pub mod expire;      // 过期策略
pub mod monitor;     // 监控
pub mod persistence; // 快照持久化
pub mod server;      // HTTP 层 & 分词
pub mod types;       // String / List / Set 数据结构
