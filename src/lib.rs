//! Deploy Status Dashboard - 部署状态仪表盘
//!
//! 模块化库入口

pub mod error;
pub mod config;
pub mod domain;
pub mod infra;
pub mod services;
pub mod state;
pub mod api;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::config::EnvConfig;
use crate::state::{get_shutdown_token, trigger_shutdown, AppState};

/// 命令行运行时配置
#[derive(Debug, Default)]
pub struct RuntimeConfig {
    /// 覆盖监听端口
    pub port_override: Option<u16>,
    /// 覆盖 systems 配置文件路径
    pub systems_file_override: Option<String>,
}

/// 初始化并运行服务
///
/// 配置加载失败视为致命错误，进程直接退出
pub async fn init_and_run(runtime: RuntimeConfig) {
    let mut config = EnvConfig::from_env();
    if let Some(port) = runtime.port_override {
        config.port = port;
    }
    if let Some(path) = runtime.systems_file_override {
        config.systems_file = path;
    }

    setup_logging(&config.environment, &config.logging_level);

    let state = match AppState::with_config(config) {
        Ok(state) => Arc::new(state),
        Err(e) => {
            tracing::error!(error = %e, "Failed to initialize application state");
            std::process::exit(1);
        }
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], state.config.port));
    let app = api::router(state);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, %addr, "Failed to bind listen address");
            std::process::exit(1);
        }
    };

    tracing::info!(
        %addr,
        version = config::env::constants::VERSION,
        "Deploy status dashboard listening"
    );

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "Server error");
    }
}

/// 初始化日志
///
/// local 环境使用人类可读格式，其余环境输出 JSON（便于日志采集）
fn setup_logging(environment: &str, logging_level: &str) {
    let filter = EnvFilter::try_new(format!(
        "deploy_status={},tower_http=info",
        logging_level.to_lowercase()
    ))
    .unwrap_or_else(|_| EnvFilter::new("info"));

    if environment == "local" {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    }

    tracing::info!(
        environment = %environment,
        level = %logging_level,
        "Logging configured"
    );
}

/// 等待关闭信号 (Ctrl-C 或全局 shutdown token)
async fn shutdown_signal() {
    let token = get_shutdown_token();
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received Ctrl-C, shutting down");
            trigger_shutdown();
        }
        _ = token.cancelled() => {
            tracing::info!("Shutdown token triggered");
        }
    }
}
