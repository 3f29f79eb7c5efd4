//! Dockerflow 健康检查与版本 API
//!
//! 包含 /__heartbeat__, /__lbheartbeat__, /__version__ 端点

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::warn;

use crate::state::{AppState, BuildInfo};

/// GitHub 状态页响应（只取需要的字段）
#[derive(Debug, Deserialize)]
struct GithubStatusPage {
    status: GithubStatusIndicator,
}

#[derive(Debug, Deserialize)]
struct GithubStatusIndicator {
    /// "none" 表示一切正常
    indicator: String,
}

/// 创建健康检查路由
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/__heartbeat__", get(heartbeat))
        .route("/__lbheartbeat__", get(lbheartbeat))
        .route("/__version__", get(version))
}

/// 心跳检查 - 探测 GitHub 状态页，GitHub 不可用时本服务也无法工作
///
/// GET /__heartbeat__
async fn heartbeat(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let resp = match state.http.get(&state.config.github_status_url).send().await {
        Ok(resp) => resp,
        Err(e) => {
            warn!(error = %e, "GitHub status page unreachable");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "github": "unreachable" })),
            );
        }
    };

    let status = resp.status();
    if !status.is_success() {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "github": status.as_u16() })),
        );
    }

    match resp.json::<GithubStatusPage>().await {
        Ok(page) if page.status.indicator == "none" => {
            (StatusCode::OK, Json(json!({ "github": "ok" })))
        }
        Ok(page) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "github": page.status.indicator })),
        ),
        Err(e) => {
            warn!(error = %e, "Failed to parse GitHub status page");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "github": "unparseable" })),
            )
        }
    }
}

/// 负载均衡心跳 - 固定返回空对象
///
/// GET /__lbheartbeat__
async fn lbheartbeat() -> impl IntoResponse {
    Json(json!({}))
}

/// 本服务自身的构建元数据
///
/// GET /__version__
async fn version(State(state): State<Arc<AppState>>) -> Json<BuildInfo> {
    Json(state.build_info.clone())
}
