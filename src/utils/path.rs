//! # 路径工具函数
//!
//! 提供与配置文件路径相关的工具函数：
//! - 获取 Markov Tool 自身配置目录路径（`~/.mo/MarkovTool/`）
//! - 获取客户端配置文件路径

use std::path::{Path, PathBuf};

/// 客户端配置文件名
pub const CLIENT_CONFIG_FILE: &str = "client-config.json";

/// 获取 Markov Tool 配置目录的绝对路径
///
/// 使用 `dirs` crate 获取跨平台的主目录路径。
///
/// # 错误
/// 如果无法确定用户主目录（如无 HOME 环境变量），返回错误信息。
///
/// # 示例
/// - Windows: `C:\Users\username\.mo\MarkovTool`
/// - Linux/macOS: `/home/username/.mo/MarkovTool`
pub fn get_config_dir() -> Result<PathBuf, String> {
    let home = dirs::home_dir().ok_or_else(|| "无法获取用户主目录".to_string())?;
    Ok(config_dir_in(&home))
}

/// 在指定主目录下拼出配置目录
pub fn config_dir_in(home: &Path) -> PathBuf {
    home.join(".mo").join("MarkovTool")
}

/// 获取客户端配置文件的绝对路径
pub fn get_client_config_path() -> Result<PathBuf, String> {
    Ok(get_config_dir()?.join(CLIENT_CONFIG_FILE))
}
