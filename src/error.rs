//! 统一错误处理
//!
//! `ApiError` 实现 `IntoResponse`，领域错误 (`ConfigError`/`ResolveError`)
//! 使用 thiserror 定义

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// API 错误响应结构
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// 统一 API 错误类型
#[derive(Debug)]
pub enum ApiError {
    /// 404 - 资源未找到
    NotFound(String),
    /// 500 - 内部错误
    Internal(String),
}

impl ApiError {
    /// 创建未找到错误
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound(resource.into())
    }

    /// 创建内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            ApiError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                "not_found",
                format!("{} not found", resource),
            ),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg),
        };

        let body = ErrorResponse::new(error_type, message);
        (status, Json(body)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::NotFound(r) => write!(f, "Not found: {}", r),
            ApiError::Internal(m) => write!(f, "Internal error: {}", m),
        }
    }
}

impl std::error::Error for ApiError {}

/// 便捷类型别名
pub type ApiResult<T> = Result<T, ApiError>;

/// 配置加载错误
///
/// 启动阶段出现即为致命错误，进程不再提供服务
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse systems file: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("failed to parse version file: {0}")]
    VersionJson(#[from] serde_json::Error),
    #[error("invalid systems config: {0}")]
    Invalid(String),
}

/// 单个环境解析过程中的错误
///
/// 只影响该环境自身，不影响同一系统下的其他环境
#[derive(Debug, Error)]
pub enum ResolveError {
    /// 上游返回非 2xx 状态码
    #[error("{url} returned HTTP {status}")]
    UpstreamStatus { status: u16, url: String },
    /// 网络传输失败（含超时）
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// 上游响应不是预期的 JSON 形状
    #[error("malformed response from {url}: {reason}")]
    MalformedResponse { url: String, reason: String },
    /// source 字段不是 https://github.com/{owner}/{repo} 形状
    #[error("source URL {url:?} is not shaped like https://github.com/owner/repo")]
    MalformedSourceUrl { url: String },
}

impl ResolveError {
    /// 错误分类标识，用于 JSON 输出
    pub fn kind(&self) -> &'static str {
        match self {
            ResolveError::UpstreamStatus { .. } => "upstream_error",
            ResolveError::Network { .. } => "network_error",
            ResolveError::MalformedResponse { .. } => "malformed_response",
            ResolveError::MalformedSourceUrl { .. } => "malformed_source_url",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_new() {
        let resp = ErrorResponse::new("test_error", "Test message");
        assert_eq!(resp.error, "test_error");
        assert_eq!(resp.message, "Test message");
        assert!(resp.details.is_none());
    }

    #[test]
    fn test_error_response_with_details() {
        let resp = ErrorResponse::new("test_error", "Test message").with_details("Extra info");
        assert_eq!(resp.details, Some("Extra info".to_string()));
    }

    #[test]
    fn test_resolve_error_kinds() {
        let err = ResolveError::UpstreamStatus {
            status: 500,
            url: "http://example.com/__version__".to_string(),
        };
        assert_eq!(err.kind(), "upstream_error");

        let err = ResolveError::MalformedSourceUrl {
            url: "not-a-url".to_string(),
        };
        assert_eq!(err.kind(), "malformed_source_url");
    }
}
