// src/monitor/mod.rs
//! 监控模块：命令计数，以 Prometheus 文本格式导出
mod metrics;

pub use metrics::Metrics;
