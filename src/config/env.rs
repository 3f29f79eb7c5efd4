//! 环境变量配置加载

use std::env;
use std::time::Duration;

/// 环境配置
#[derive(Clone, Debug)]
pub struct EnvConfig {
    /// 服务监听端口
    pub port: u16,
    /// 运行环境: "local"、"stage" 或 "prod"
    pub environment: String,
    /// 日志级别: "INFO" 或 "WARNING"
    pub logging_level: String,
    /// systems 配置文件路径
    pub systems_file: String,
    /// 构建元数据文件路径
    pub version_file: String,
    /// GitHub API 基地址
    pub github_api_url: String,
    /// GitHub 状态页地址（heartbeat 探测用）
    pub github_status_url: String,
    /// 单次出站请求超时
    pub request_timeout: Duration,
}

impl EnvConfig {
    /// 从环境变量加载配置
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(8000);

        let environment =
            env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "local".to_string());

        let logging_level =
            env::var("APP_LOGGING_LEVEL").unwrap_or_else(|_| "INFO".to_string());

        let systems_file =
            env::var("SYSTEMS_FILE").unwrap_or_else(|_| "systems.yaml".to_string());

        let version_file =
            env::var("VERSION_FILE").unwrap_or_else(|_| "version.json".to_string());

        let github_api_url = env::var("GITHUB_API_URL")
            .unwrap_or_else(|_| constants::GITHUB_API_URL.to_string());

        let github_status_url = env::var("GITHUB_STATUS_URL")
            .unwrap_or_else(|_| constants::GITHUB_STATUS_URL.to_string());

        let request_timeout = Duration::from_secs(
            env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(constants::REQUEST_TIMEOUT_SECS),
        );

        Self {
            port,
            environment,
            logging_level,
            systems_file,
            version_file,
            github_api_url,
            github_status_url,
            request_timeout,
        }
    }
}

/// 常量
pub mod constants {
    /// GitHub API 基地址
    pub const GITHUB_API_URL: &str = "https://api.github.com";

    /// GitHub 状态页地址
    pub const GITHUB_STATUS_URL: &str = "https://www.githubstatus.com/api/v2/status.json";

    /// 出站请求默认超时（秒）
    pub const REQUEST_TIMEOUT_SECS: u64 = 10;

    /// 版本号
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    /// 本项目仓库地址（version.json 缺失时的回退值）
    pub const SOURCE_REPO: &str = "https://github.com/xiaojinpro/deploy-status";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_github_defaults() {
        env::remove_var("GITHUB_API_URL");
        env::remove_var("REQUEST_TIMEOUT_SECS");
        let config = EnvConfig::from_env();
        assert_eq!(config.github_api_url, constants::GITHUB_API_URL);
        assert_eq!(config.github_status_url, constants::GITHUB_STATUS_URL);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_port_parsing() {
        env::set_var("PORT", "9123");
        let config = EnvConfig::from_env();
        assert_eq!(config.port, 9123);
        env::remove_var("PORT");
    }
}
