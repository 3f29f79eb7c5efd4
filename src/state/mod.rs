//! 运行时状态模块
//!
//! 管理应用状态与构建元数据

pub mod app_state;
pub mod build_info;

pub use app_state::{get_shutdown_token, trigger_shutdown, AppState};
pub use build_info::BuildInfo;
