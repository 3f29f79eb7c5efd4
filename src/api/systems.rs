//! 系统列表与系统详情 API
//!
//! 包含 / 和 /system/:system 端点

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

use crate::domain::ResolvedSystem;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// 系统列表响应
#[derive(Debug, Serialize)]
struct IndexResponse {
    /// 系统名，字典序
    systems: Vec<String>,
}

/// 创建系统路由
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(index))
        .route("/system/:system", get(system_detail))
}

/// 列出全部系统名
///
/// GET /
async fn index(State(state): State<Arc<AppState>>) -> Json<IndexResponse> {
    let systems = state
        .catalog
        .system_names()
        .into_iter()
        .map(str::to_string)
        .collect();
    Json(IndexResponse { systems })
}

/// 解析一个系统的部署状态
///
/// GET /system/:system
/// 系统不在目录中返回 404
async fn system_detail(
    Path(system): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ResolvedSystem>> {
    state
        .resolver
        .resolve_system(&system, &state.catalog)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::not_found("system"))
}
