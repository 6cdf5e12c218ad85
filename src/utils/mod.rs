//! # 通用工具模块
//! - `path` - 配置目录和配置文件路径

pub mod path;
