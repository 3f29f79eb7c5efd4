//! 部署状态领域模型
//!
//! 上游响应形状（/__version__ 与 GitHub compare API）以及解析后的
//! 每环境状态报告

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ResolveError;

/// version 字段缺失或为空时的哨兵值
pub const MISSING_TAG: &str = "(none)";

/// author.login 缺失时的哨兵值
pub const MISSING_AUTHOR: &str = "?";

/// 服务 /__version__ 端点的响应
///
/// `source` 与 `commit` 为必填；缺失时反序列化失败，由调用方归类为
/// malformed response
#[derive(Clone, Debug, Deserialize)]
pub struct VersionInfo {
    /// 仓库地址，预期形如 https://github.com/{owner}/{repo}
    pub source: String,
    /// 部署的 commit SHA
    pub commit: String,
    /// 版本标签，可选
    #[serde(default)]
    pub version: Option<String>,
}

impl VersionInfo {
    /// 展示用标签，缺失或空字符串替换为 "(none)"
    pub fn tag(&self) -> String {
        self.version
            .as_deref()
            .filter(|v| !v.is_empty())
            .unwrap_or(MISSING_TAG)
            .to_string()
    }
}

/// GitHub 仓库标识
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RepoIdentity {
    pub owner: String,
    pub repo: String,
}

impl RepoIdentity {
    /// 从 source URL 中解析 owner/repo
    ///
    /// 严格解析：路径必须恰好是两段非空内容，不处理 .git 后缀、
    /// 不跟随重定向
    pub fn from_source_url(source: &str) -> Result<Self, ResolveError> {
        let malformed = || ResolveError::MalformedSourceUrl {
            url: source.to_string(),
        };

        let parsed = Url::parse(source).map_err(|_| malformed())?;
        let segments: Vec<&str> = parsed.path().split('/').skip(1).collect();

        match segments.as_slice() {
            [owner, repo] if !owner.is_empty() && !repo.is_empty() => Ok(Self {
                owner: owner.to_string(),
                repo: repo.to_string(),
            }),
            _ => Err(malformed()),
        }
    }
}

/// GitHub compare API 响应
#[derive(Clone, Debug, Deserialize)]
pub struct CompareResult {
    /// 落后的 commit 总数
    pub total_commits: u64,
    /// commit 列表，第一个是最新（HEAD 侧）的 commit
    #[serde(default)]
    pub commits: Vec<CommitEntry>,
}

impl CompareResult {
    /// 展示用 commit 列表
    ///
    /// 保持上游顺序，丢弃合并提交（parents > 1）。is_head 按过滤前的
    /// 位置标记，所以 HEAD 若是合并提交则整个列表没有 head 标记
    pub fn display_commits(&self) -> Vec<DisplayCommit> {
        self.commits
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.parents.len() <= 1)
            .map(|(i, entry)| DisplayCommit {
                sha: entry.sha.clone(),
                is_head: i == 0,
                message: entry
                    .commit
                    .message
                    .lines()
                    .next()
                    .unwrap_or("")
                    .to_string(),
                author: entry
                    .author
                    .as_ref()
                    .and_then(|a| a.login.clone())
                    .unwrap_or_else(|| MISSING_AUTHOR.to_string()),
            })
            .collect()
    }
}

/// compare 响应中的单个 commit
#[derive(Clone, Debug, Deserialize)]
pub struct CommitEntry {
    pub sha: String,
    /// 只关心数量：多于一个父提交即为合并提交
    #[serde(default)]
    pub parents: Vec<serde_json::Value>,
    pub commit: CommitBody,
    #[serde(default)]
    pub author: Option<CommitAuthor>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CommitBody {
    pub message: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CommitAuthor {
    #[serde(default)]
    pub login: Option<String>,
}

/// 展示用 commit 摘要
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct DisplayCommit {
    pub sha: String,
    /// 是否为上游列表的首位（最新 commit）
    pub is_head: bool,
    /// commit message 的首行
    pub message: String,
    pub author: String,
}

/// 环境分类结果
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(tag = "state", rename_all = "kebab-case")]
pub enum DeployState {
    /// 部署的 commit 与默认分支顶端之间没有差距
    UpToDate,
    /// 落后 N 个 commit
    Behind {
        commits_behind: u64,
        compare_url: String,
    },
}

/// 单个环境解析成功后的状态
#[derive(Clone, Debug, Serialize)]
pub struct EnvironmentStatus {
    pub commit: String,
    pub source: String,
    pub tag: String,
    pub owner: String,
    pub repo: String,
    #[serde(flatten)]
    pub state: DeployState,
    /// 过滤后的非合并提交列表，up-to-date 时为空
    pub commits: Vec<DisplayCommit>,
}

/// 单个环境的错误报告
#[derive(Clone, Debug, Serialize)]
pub struct EnvironmentError {
    pub kind: String,
    pub message: String,
}

impl From<&ResolveError> for EnvironmentError {
    fn from(err: &ResolveError) -> Self {
        Self {
            kind: err.kind().to_string(),
            message: err.to_string(),
        }
    }
}

/// 单个环境的解析报告：成功或失败，失败不影响兄弟环境
#[derive(Clone, Debug, Serialize)]
pub struct EnvironmentReport {
    pub name: String,
    pub host: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EnvironmentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<EnvironmentError>,
}

/// 单个服务的解析报告
#[derive(Clone, Debug, Serialize)]
pub struct ServiceReport {
    pub name: String,
    /// 缺失时展示 "--"
    pub description: String,
    pub environments: Vec<EnvironmentReport>,
}

/// 整个系统的解析结果
#[derive(Clone, Debug, Serialize)]
pub struct ResolvedSystem {
    pub system: String,
    pub services: Vec<ServiceReport>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_repo_identity_round_trip() {
        let ident = RepoIdentity::from_source_url("https://github.com/acme/widget").unwrap();
        assert_eq!(ident.owner, "acme");
        assert_eq!(ident.repo, "widget");
    }

    #[test]
    fn test_repo_identity_malformed() {
        // 没有路径
        assert!(RepoIdentity::from_source_url("https://github.com").is_err());
        // 只有一段
        assert!(RepoIdentity::from_source_url("https://github.com/acme").is_err());
        // 三段
        assert!(
            RepoIdentity::from_source_url("https://github.com/acme/widget/extra").is_err()
        );
        // 尾部斜杠产生空的第三段
        assert!(RepoIdentity::from_source_url("https://github.com/acme/widget/").is_err());
        // 根本不是 URL
        assert!(RepoIdentity::from_source_url("not a url").is_err());
    }

    #[test]
    fn test_version_tag_defaults() {
        let info: VersionInfo = serde_json::from_value(json!({
            "source": "https://github.com/acme/widget",
            "commit": "abc123",
        }))
        .unwrap();
        assert_eq!(info.tag(), "(none)");

        let info: VersionInfo = serde_json::from_value(json!({
            "source": "https://github.com/acme/widget",
            "commit": "abc123",
            "version": "",
        }))
        .unwrap();
        assert_eq!(info.tag(), "(none)");

        let info: VersionInfo = serde_json::from_value(json!({
            "source": "https://github.com/acme/widget",
            "commit": "abc123",
            "version": "v2025.06.10",
        }))
        .unwrap();
        assert_eq!(info.tag(), "v2025.06.10");
    }

    #[test]
    fn test_version_missing_required_fields() {
        let result: Result<VersionInfo, _> =
            serde_json::from_value(json!({ "commit": "abc123" }));
        assert!(result.is_err());

        let result: Result<VersionInfo, _> =
            serde_json::from_value(json!({ "source": "https://github.com/a/b" }));
        assert!(result.is_err());
    }

    fn commit_entry(sha: &str, parent_count: usize, message: &str, login: Option<&str>) -> serde_json::Value {
        json!({
            "sha": sha,
            "parents": vec![json!({}); parent_count],
            "commit": { "message": message },
            "author": login.map(|l| json!({ "login": l })),
        })
    }

    #[test]
    fn test_merge_commits_filtered() {
        let result: CompareResult = serde_json::from_value(json!({
            "total_commits": 3,
            "commits": [
                commit_entry("head1", 1, "feat: one", Some("alice")),
                commit_entry("merge1", 2, "Merge pull request #7", Some("bob")),
                commit_entry("tail1", 1, "fix: two", Some("carol")),
            ],
        }))
        .unwrap();

        let displayed = result.display_commits();
        assert_eq!(displayed.len(), 2);
        assert_eq!(displayed[0].sha, "head1");
        assert!(displayed[0].is_head);
        assert_eq!(displayed[1].sha, "tail1");
        assert!(!displayed[1].is_head);
    }

    #[test]
    fn test_merge_commit_head_drops_marker() {
        let result: CompareResult = serde_json::from_value(json!({
            "total_commits": 2,
            "commits": [
                commit_entry("merge1", 2, "Merge pull request #8", Some("bob")),
                commit_entry("tail1", 1, "fix: two", Some("carol")),
            ],
        }))
        .unwrap();

        let displayed = result.display_commits();
        assert_eq!(displayed.len(), 1);
        // HEAD 是合并提交被丢弃，剩余条目不得标记为 head
        assert!(displayed.iter().all(|c| !c.is_head));
    }

    #[test]
    fn test_commit_message_first_line_only() {
        let result: CompareResult = serde_json::from_value(json!({
            "total_commits": 1,
            "commits": [
                commit_entry(
                    "abc",
                    1,
                    "chore: updated csp dependency\n\nThis version of csp fixes bug 111111.",
                    Some("willkg"),
                ),
            ],
        }))
        .unwrap();

        assert_eq!(result.display_commits()[0].message, "chore: updated csp dependency");
    }

    #[test]
    fn test_missing_author_login() {
        let result: CompareResult = serde_json::from_value(json!({
            "total_commits": 2,
            "commits": [
                commit_entry("abc", 1, "fix: thing", None),
                {
                    "sha": "def",
                    "parents": [{}],
                    "commit": { "message": "fix: other" },
                    "author": { "login": null },
                },
            ],
        }))
        .unwrap();

        let displayed = result.display_commits();
        assert_eq!(displayed[0].author, "?");
        assert_eq!(displayed[1].author, "?");
    }

    #[test]
    fn test_compare_without_commits_field() {
        let result: CompareResult =
            serde_json::from_value(json!({ "total_commits": 0 })).unwrap();
        assert!(result.commits.is_empty());
        assert!(result.display_commits().is_empty());
    }

    #[test]
    fn test_deploy_state_serialization() {
        let up_to_date = serde_json::to_value(DeployState::UpToDate).unwrap();
        assert_eq!(up_to_date, json!({ "state": "up-to-date" }));

        let behind = serde_json::to_value(DeployState::Behind {
            commits_behind: 2,
            compare_url: "https://github.com/acme/widget/compare/abc...main".to_string(),
        })
        .unwrap();
        assert_eq!(behind["state"], "behind");
        assert_eq!(behind["commits_behind"], 2);
    }
}
