//! 基础设施模块
//!
//! 封装出站 HTTP 依赖（服务版本端点、GitHub API）

pub mod github;
pub mod version_client;

pub use github::GithubClient;
pub use version_client::VersionClient;
