//! # 数据模型模块
//!
//! 定义了与前端 TypeScript 类型一一对应的 Rust 数据结构。
//! 需要跨 IPC 传输的结构体均派生 `Serialize` 和 `Deserialize`。
//! - `file` - 选中文件及其摘要
//! - `form` - 共享表单状态和提交阶段
//! - `parameters` - 服务端默认参数和生成参数
//! - `result` - 变换结果
//! - `settings` - 客户端配置

pub mod file;
pub mod form;
pub mod parameters;
pub mod result;
pub mod settings;
