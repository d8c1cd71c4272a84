//! 配置管理
//!
//! 分层加载：`config.toml` -> `config.{APP_ENV}.toml` -> 环境变量，
//! 所有字段都有代码内默认值，没有配置文件也能启动。

mod r#impl;
mod structs;

pub use structs::*;
