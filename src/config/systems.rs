//! systems 配置文件加载
//!
//! 定义 系统 → 服务 → 环境 的静态目录，启动时加载一次，之后只读

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::ConfigError;

/// 部署环境定义
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnvironmentDef {
    /// 环境名，如 "stage"、"prod"
    pub name: String,
    /// 基地址，不带尾部斜杠
    pub host: String,
}

/// 服务定义
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceDef {
    pub name: String,
    pub description: Option<String>,
    /// 环境列表，保持声明顺序
    pub environments: Vec<EnvironmentDef>,
}

/// 系统定义
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SystemDef {
    /// 服务列表，保持声明顺序
    pub services: Vec<ServiceDef>,
}

/// 系统目录
///
/// BTreeMap 保证系统名去重且按字典序迭代
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SystemsCatalog {
    systems: BTreeMap<String, SystemDef>,
}

impl SystemsCatalog {
    /// 从 YAML 文件加载目录
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&raw)
    }

    /// 从 YAML 字符串加载目录
    pub fn from_yaml_str(raw: &str) -> Result<Self, ConfigError> {
        let mut catalog: SystemsCatalog = serde_yaml::from_str(raw)?;
        catalog.normalize()?;
        Ok(catalog)
    }

    /// 校验并规范化：host 去掉尾部斜杠，名称与 host 不允许为空
    fn normalize(&mut self) -> Result<(), ConfigError> {
        for (system_name, system) in &mut self.systems {
            if system_name.is_empty() {
                return Err(ConfigError::Invalid("empty system name".to_string()));
            }
            for service in &mut system.services {
                if service.name.is_empty() {
                    return Err(ConfigError::Invalid(format!(
                        "system {:?} has a service with no name",
                        system_name
                    )));
                }
                for environment in &mut service.environments {
                    if environment.name.is_empty() {
                        return Err(ConfigError::Invalid(format!(
                            "service {:?} has an environment with no name",
                            service.name
                        )));
                    }
                    let host = environment.host.trim_end_matches('/');
                    if host.is_empty() {
                        return Err(ConfigError::Invalid(format!(
                            "environment {:?} of service {:?} has no host",
                            environment.name, service.name
                        )));
                    }
                    environment.host = host.to_string();
                }
            }
        }
        Ok(())
    }

    /// 所有系统名，按字典序
    pub fn system_names(&self) -> Vec<&str> {
        self.systems.keys().map(String::as_str).collect()
    }

    /// 按名称查找系统
    pub fn get(&self, name: &str) -> Option<&SystemDef> {
        self.systems.get(name)
    }

    /// 系统数量
    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }
}
