// src/server.rs
//! 这是 ledis 服务的网络层：
//! - 监听 HTTP，`POST /` 的 body 就是一行命令
//! - 按 shell 规则分词
//! - 调度到 engine 执行
//! - 响应 body 原样返回 engine 的结果
//! - `GET /metrics` 导出 Prometheus 指标
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};
use warp::hyper::body::Bytes;
use warp::{Filter, http::StatusCode};

use crate::config::Config;
use crate::engine::{self, Store};
use crate::error::CommandError;
use crate::monitor::Metrics;

/// 单条命令 body 的上限
const MAX_BODY_BYTES: u64 = 1024 * 1024;

/// 各个请求共享的状态
pub struct AppState {
    pub store: Store,
    pub metrics: Arc<Metrics>,
    pub metrics_enabled: bool,
    pub slow_threshold: Duration,
}

impl AppState {
    pub fn new(cfg: &Config, store: Store, metrics: Arc<Metrics>) -> Self {
        AppState {
            store,
            metrics,
            metrics_enabled: cfg.metrics_enabled,
            slow_threshold: cfg.slowlog_threshold(),
        }
    }
}

/// 启动 HTTP 服务，直到 `shutdown` 完成
pub async fn serve<S>(cfg: &Config, state: Arc<AppState>, shutdown: S) -> Result<()>
where
    S: Future<Output = ()> + Send + 'static,
{
    let addr: SocketAddr = cfg
        .listen_addr
        .parse()
        .with_context(|| format!("invalid listen address '{}'", cfg.listen_addr))?;

    let (bound, server) = warp::serve(routes(state))
        .try_bind_with_graceful_shutdown(addr, shutdown)
        .with_context(|| format!("failed to bind {}", addr))?;
    info!(addr = %bound, "ledis server listening");

    server.await;
    info!("ledis server stopped");
    Ok(())
}

/// 全部路由：命令入口 + 指标，统一加 CORS
pub fn routes(
    state: Arc<AppState>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let cors = warp::cors()
        .allow_any_origin()
        .allow_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allow_header("content-type");

    let command = warp::post()
        .and(warp::path::end())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::bytes())
        .and(with_state(state.clone()))
        .map(|body: Bytes, state: Arc<AppState>| {
            handle_command(&String::from_utf8_lossy(&body), &state)
        });

    let metrics = warp::get()
        .and(warp::path("metrics"))
        .and(warp::path::end())
        .and(with_state(state))
        .map(|state: Arc<AppState>| {
            if state.metrics_enabled {
                let body = state.metrics.to_prometheus(state.store.len());
                warp::reply::with_status(body, StatusCode::OK)
            } else {
                warp::reply::with_status(String::new(), StatusCode::NOT_FOUND)
            }
        });

    command
        .or(metrics)
        .with(cors)
        .with(warp::trace::request())
}

fn with_state(
    state: Arc<AppState>,
) -> impl Filter<Extract = (Arc<AppState>,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || state.clone())
}

/// 单条命令的处理逻辑
/// - 分词失败直接返回 `ERROR: ...`
/// - 记录命令计数，超过阈值的慢命令打 warn
pub fn handle_command(line: &str, state: &AppState) -> String {
    let parts = match tokenize(line) {
        Ok(parts) => parts,
        Err(e) => return engine::render_error(e),
    };

    let name = parts.first().map(|s| s.to_uppercase()).unwrap_or_default();
    let started = Instant::now();
    let resp = engine::execute(parts, &state.store);
    let elapsed = started.elapsed();

    if engine::COMMANDS.contains(&name.as_str()) {
        state.metrics.record_command(&name);
    }
    if elapsed > state.slow_threshold {
        warn!(command = %name, elapsed_ms = elapsed.as_millis() as u64, "slow command");
    } else {
        debug!(command = %name, elapsed_us = elapsed.as_micros() as u64, "command executed");
    }
    resp
}

/// 按 shell 规则把一行命令切成参数（引号、反斜杠转义）
pub fn tokenize(line: &str) -> Result<Vec<String>, CommandError> {
    shell_words::split(line).map_err(|e| CommandError::Tokenize(e.to_string()))
}
