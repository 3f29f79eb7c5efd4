//! 服务版本端点客户端
//!
//! 每个被跟踪的服务都暴露 GET {host}/__version__，返回
//! `{source, commit, version?, build?}`

use reqwest::Client;

use crate::domain::VersionInfo;
use crate::error::ResolveError;

/// /__version__ 端点客户端
///
/// 单次 GET，无重试；超时由共享 Client 统一设置
#[derive(Clone)]
pub struct VersionClient {
    client: Client,
}

impl VersionClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// 获取一个环境的版本信息
    pub async fn fetch(&self, host: &str) -> Result<VersionInfo, ResolveError> {
        let url = format!("{}/__version__", host);

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ResolveError::Network {
                url: url.clone(),
                source: e,
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ResolveError::UpstreamStatus {
                status: status.as_u16(),
                url,
            });
        }

        let info: VersionInfo =
            resp.json().await.map_err(|e| ResolveError::MalformedResponse {
                url: url.clone(),
                reason: e.to_string(),
            })?;

        if info.source.is_empty() || info.commit.is_empty() {
            return Err(ResolveError::MalformedResponse {
                url,
                reason: "empty source or commit field".to_string(),
            });
        }

        Ok(info)
    }
}
