//! # 客户端配置 Tauri Commands
//!
//! - `read_client_config` / `save_client_config` - 读写 `~/.mo/MarkovTool/client-config.json`
//!
//! 保存后的配置在下次启动时生效，运行中的控制器继续使用启动时的配置。

use crate::models::settings::ClientConfig;
use crate::services::config;

/// 读取客户端配置
///
/// 配置文件不存在时返回默认配置；环境变量 `MARKOV_TOOL_SERVICE_URL` 会覆盖服务地址。
///
/// # 返回值
/// 返回当前生效的 ClientConfig
///
/// # 错误
/// 文件存在但无法读取或 JSON 解析失败时返回错误
#[tauri::command]
pub async fn read_client_config() -> Result<ClientConfig, String> {
    config::load_client_config().await.map_err(|e| e.to_string())
}

/// 保存客户端配置
///
/// # 参数
/// - `config` - 要保存的完整 ClientConfig
///
/// # 错误
/// 目录创建失败或文件写入失败时返回错误
#[tauri::command]
pub async fn save_client_config(config: ClientConfig) -> Result<(), String> {
    config::save_client_config(&config)
        .await
        .map_err(|e| e.to_string())
}
