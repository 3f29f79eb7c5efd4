//! GitHub compare API 客户端
//!
//! 查询给定 SHA 与默认分支之间的 commit 差距

use reqwest::Client;

use crate::domain::{CompareResult, RepoIdentity};
use crate::error::ResolveError;

/// 对比的目标分支
///
/// 已知限制：默认分支名硬编码为 main，不支持其他分支名
pub const DEFAULT_BRANCH: &str = "main";

/// GitHub compare API 客户端
#[derive(Clone)]
pub struct GithubClient {
    client: Client,
    /// API 基地址，测试中指向 mock server
    api_base: String,
}

impl GithubClient {
    pub fn new(client: Client, api_base: impl Into<String>) -> Self {
        let api_base = api_base.into();
        Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// 查询 from_sha 与 main 之间的差距
    pub async fn compare(
        &self,
        ident: &RepoIdentity,
        from_sha: &str,
    ) -> Result<CompareResult, ResolveError> {
        let url = format!(
            "{}/repos/{}/{}/compare/{}...{}",
            self.api_base, ident.owner, ident.repo, from_sha, DEFAULT_BRANCH
        );

        let resp = self
            .client
            .get(&url)
            .header("user-agent", "deploy-status")
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

        resp.json().await.map_err(|e| ResolveError::MalformedResponse {
            url: url.clone(),
            reason: e.to_string(),
        })
    }
}

/// 人类可读的 compare 页面链接（展示用，始终指向 github.com）
pub fn compare_page_url(ident: &RepoIdentity, from_sha: &str) -> String {
    format!(
        "https://github.com/{}/{}/compare/{}...{}",
        ident.owner, ident.repo, from_sha, DEFAULT_BRANCH
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_page_url() {
        let ident = RepoIdentity {
            owner: "acme".to_string(),
            repo: "widget".to_string(),
        };
        assert_eq!(
            compare_page_url(&ident, "bbbbb12345"),
            "https://github.com/acme/widget/compare/bbbbb12345...main"
        );
    }

    #[test]
    fn test_api_base_trailing_slash() {
        let client = GithubClient::new(Client::new(), "https://api.github.com/");
        assert_eq!(client.api_base, "https://api.github.com");
    }
}
