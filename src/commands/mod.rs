//! # Tauri Command 处理模块
//!
//! 本模块包含所有注册到 Tauri 的 command 处理函数。
//! 每个子模块对应一个功能域：
//! - `form` - 文件选择、参数加载与修改、提交
//! - `settings` - 客户端配置读写

pub mod form;
pub mod settings;
