//! 部署状态解析
//!
//! 对每个环境依次执行：获取版本 → 解析仓库标识 → 查询 commit 差距，
//! 最后归类为 up-to-date 或落后 N 个 commit。
//!
//! 各环境互相独立，并发解析后按目录声明顺序合并；单个环境失败只在
//! 自己的报告里体现，不影响兄弟环境。

use futures::future::join_all;
use tracing::{debug, warn};

use crate::config::{EnvironmentDef, ServiceDef, SystemsCatalog};
use crate::domain::{
    DeployState, EnvironmentReport, EnvironmentStatus, RepoIdentity, ResolvedSystem,
    ServiceReport,
};
use crate::error::ResolveError;
use crate::infra::github::compare_page_url;
use crate::infra::{GithubClient, VersionClient};

/// 服务 description 缺失时的展示值
const MISSING_DESCRIPTION: &str = "--";

/// 部署状态解析器
#[derive(Clone)]
pub struct StatusResolver {
    versions: VersionClient,
    github: GithubClient,
}

impl StatusResolver {
    pub fn new(versions: VersionClient, github: GithubClient) -> Self {
        Self { versions, github }
    }

    /// 解析一个系统的全部服务与环境
    ///
    /// 系统不在目录中返回 None，由 API 层转为 404
    pub async fn resolve_system(
        &self,
        name: &str,
        catalog: &SystemsCatalog,
    ) -> Option<ResolvedSystem> {
        let system = catalog.get(name)?;

        let services = join_all(
            system
                .services
                .iter()
                .map(|service| self.resolve_service(service)),
        )
        .await;

        Some(ResolvedSystem {
            system: name.to_string(),
            services,
        })
    }

    /// 解析单个服务：环境并发解析，join_all 保持声明顺序
    async fn resolve_service(&self, service: &ServiceDef) -> ServiceReport {
        let environments = join_all(
            service
                .environments
                .iter()
                .map(|environment| self.resolve_environment(environment)),
        )
        .await;

        ServiceReport {
            name: service.name.clone(),
            description: service
                .description
                .clone()
                .unwrap_or_else(|| MISSING_DESCRIPTION.to_string()),
            environments,
        }
    }

    /// 解析单个环境，失败转成报告内的错误字段
    async fn resolve_environment(&self, environment: &EnvironmentDef) -> EnvironmentReport {
        match self.resolve_environment_inner(environment).await {
            Ok(status) => {
                debug!(
                    environment = %environment.name,
                    host = %environment.host,
                    commit = %status.commit,
                    "Resolved environment"
                );
                EnvironmentReport {
                    name: environment.name.clone(),
                    host: environment.host.clone(),
                    status: Some(status),
                    error: None,
                }
            }
            Err(err) => {
                warn!(
                    environment = %environment.name,
                    host = %environment.host,
                    error = %err,
                    "Failed to resolve environment"
                );
                EnvironmentReport {
                    name: environment.name.clone(),
                    host: environment.host.clone(),
                    status: None,
                    error: Some((&err).into()),
                }
            }
        }
    }

    /// 环境解析管线：版本 → 仓库标识 → commit 差距 → 归类
    async fn resolve_environment_inner(
        &self,
        environment: &EnvironmentDef,
    ) -> Result<EnvironmentStatus, ResolveError> {
        let version = self.versions.fetch(&environment.host).await?;
        let ident = RepoIdentity::from_source_url(&version.source)?;
        let history = self.github.compare(&ident, &version.commit).await?;

        // total_commits == 0 一律视为最新，即便响应里带了 commits 字段
        let (state, commits) = if history.total_commits == 0 {
            (DeployState::UpToDate, Vec::new())
        } else {
            (
                DeployState::Behind {
                    commits_behind: history.total_commits,
                    compare_url: compare_page_url(&ident, &version.commit),
                },
                history.display_commits(),
            )
        };

        Ok(EnvironmentStatus {
            commit: version.commit.clone(),
            source: version.source.clone(),
            tag: version.tag(),
            owner: ident.owner,
            repo: ident.repo,
            state,
            commits,
        })
    }
}
