//! # 业务逻辑服务模块
//!
//! 包含客户端核心逻辑的实现，与 Tauri command 层解耦：
//! - `cache` - 服务端默认参数的单槽懒加载缓存
//! - `config` - 客户端配置文件读写
//! - `controller` - 表单控制器：串联缓存、文件绑定、变换请求和共享状态
//! - `file_binding` - 文件绑定适配器：把文件选择写入表单字段
//! - `form` - 共享表单状态与提交状态机
//! - `markov_client` - 变换请求客户端：multipart 提交与错误文案归一化

pub mod cache;
pub mod config;
pub mod controller;
pub mod file_binding;
pub mod form;
pub mod markov_client;
