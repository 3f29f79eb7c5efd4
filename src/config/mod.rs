//! 配置模块
//!
//! 环境变量解析与 systems 配置文件加载

pub mod env;
pub mod systems;

pub use env::EnvConfig;
pub use systems::{EnvironmentDef, ServiceDef, SystemDef, SystemsCatalog};
