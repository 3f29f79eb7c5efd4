//! 应用状态

use std::time::Duration;

use reqwest::Client;
use tokio_util::sync::CancellationToken;

use crate::config::{EnvConfig, SystemsCatalog};
use crate::error::ConfigError;
use crate::infra::{GithubClient, VersionClient};
use crate::services::StatusResolver;
use crate::state::BuildInfo;

/// 全局 shutdown token，用于优雅关闭
static GLOBAL_SHUTDOWN: std::sync::OnceLock<CancellationToken> = std::sync::OnceLock::new();

/// 获取全局 shutdown token
pub fn get_shutdown_token() -> CancellationToken {
    GLOBAL_SHUTDOWN.get_or_init(CancellationToken::new).clone()
}

/// 触发全局 shutdown
pub fn trigger_shutdown() {
    if let Some(token) = GLOBAL_SHUTDOWN.get() {
        token.cancel();
    }
}

/// 应用状态
///
/// 目录与构建元数据在启动时加载一次，之后只读，可被并发读取
pub struct AppState {
    /// 环境配置
    pub config: EnvConfig,
    /// 系统目录
    pub catalog: SystemsCatalog,
    /// 构建元数据
    pub build_info: BuildInfo,
    /// 状态解析器
    pub resolver: StatusResolver,
    /// 共享 HTTP client（heartbeat 探测用）
    pub http: Client,
}

impl AppState {
    /// 从进程环境创建应用状态
    pub fn new() -> Result<Self, ConfigError> {
        Self::with_config(EnvConfig::from_env())
    }

    /// 用给定配置创建应用状态
    pub fn with_config(config: EnvConfig) -> Result<Self, ConfigError> {
        let catalog = SystemsCatalog::load(&config.systems_file)?;
        let build_info = BuildInfo::load(&config.version_file)?;

        tracing::info!(
            port = config.port,
            environment = %config.environment,
            systems_file = %config.systems_file,
            system_count = catalog.len(),
            github_api_url = %config.github_api_url,
            "Loaded configuration"
        );

        for name in catalog.system_names() {
            tracing::info!(system = %name, "Registered system");
        }

        let http = build_http_client(config.request_timeout);
        let resolver = StatusResolver::new(
            VersionClient::new(http.clone()),
            GithubClient::new(http.clone(), config.github_api_url.clone()),
        );

        Ok(Self {
            config,
            catalog,
            build_info,
            resolver,
            http,
        })
    }
}

/// 构建共享 HTTP client，全部出站请求复用同一个连接池
fn build_http_client(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .pool_max_idle_per_host(5)
        .pool_idle_timeout(Duration::from_secs(90))
        .build()
        .expect("Failed to create HTTP client")
}
