//! 构建元数据
//!
//! /__version__ 端点返回的内容，启动时从 version.json 读取一次，
//! 之后不可变

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::env::constants;
use crate::error::ConfigError;

/// 构建元数据记录
///
/// 四个字段始终序列化（即便为空字符串），与部署管线写入的
/// version.json 形状一致
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BuildInfo {
    pub source: String,
    pub version: String,
    pub commit: String,
    pub build: String,
}

impl BuildInfo {
    /// 从 version.json 加载；文件不存在时回退到默认记录
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::fallback());
        }
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// 本地开发环境没有 version.json 时的默认记录
    fn fallback() -> Self {
        Self {
            source: constants::SOURCE_REPO.to_string(),
            version: String::new(),
            commit: String::new(),
            build: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_fallback_when_file_missing() {
        let info = BuildInfo::load("/nonexistent/version.json").unwrap();
        assert_eq!(info.source, constants::SOURCE_REPO);
        assert!(info.version.is_empty());
        assert!(info.commit.is_empty());
        assert!(info.build.is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"source": "https://github.com/acme/widget", "version": "v1", "commit": "abc", "build": "https://ci.example.com/123"}}"#
        )
        .unwrap();

        let info = BuildInfo::load(file.path()).unwrap();
        assert_eq!(info.source, "https://github.com/acme/widget");
        assert_eq!(info.version, "v1");
        assert_eq!(info.commit, "abc");
        assert_eq!(info.build, "https://ci.example.com/123");
    }

    #[test]
    fn test_invalid_json_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            BuildInfo::load(file.path()),
            Err(ConfigError::VersionJson(_))
        ));
    }

    #[test]
    fn test_serializes_all_four_keys() {
        let value = serde_json::to_value(BuildInfo::fallback()).unwrap();
        let mut keys: Vec<&str> =
            value.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["build", "commit", "source", "version"]);
    }
}
