//! 领域模型模块
//!
//! 纯数据结构，不依赖 axum/tokio

pub mod status;

pub use status::{
    CommitEntry, CompareResult, DeployState, DisplayCommit, EnvironmentError,
    EnvironmentReport, EnvironmentStatus, RepoIdentity, ResolvedSystem, ServiceReport,
    VersionInfo,
};
