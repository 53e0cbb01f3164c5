// src/main.rs
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use ledis::{
    config,
    engine::Store,
    expire,
    monitor::Metrics,
    server::{self, AppState},
};

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "ledis", version, about = "In-memory key-value store with a text command protocol")]
struct Args {
    /// 配置文件路径，不存在时会写入默认配置
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    /// 覆盖配置中的监听地址
    #[arg(short, long)]
    listen: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // 日志级别来自配置，所以 subscriber 在读完配置之后才安装
    let (mut cfg, created) =
        config::load(&args.config).context("failed to load configuration")?;
    if let Some(listen) = args.listen {
        cfg.listen_addr = listen;
    }
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.log_level)),
        )
        .init();
    if created {
        info!(path = %args.config.display(), "config file not found, default config created");
    }

    let store = Store::with_snapshot_path(&cfg.snapshot_path);
    if cfg.restore_on_start {
        if store.snapshot_path().exists() {
            match store.restore() {
                Ok(merged) => info!(merged, "restored snapshot on startup"),
                Err(e) => warn!(error = %e, "startup restore failed, starting empty"),
            }
        } else {
            info!(path = %cfg.snapshot_path, "no snapshot file, starting empty");
        }
    }

    let cleaner = expire::spawn_cleaner(store.clone(), cfg.sweep_interval());
    let state = Arc::new(AppState::new(&cfg, store, Arc::new(Metrics::new())));

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
        info!("received ctrl-c, shutting down");
    };

    let result = server::serve(&cfg, state, shutdown).await;
    cleaner.stop();
    result
}
