//! # 客户端配置读写服务
//!
//! 从 `~/.mo/MarkovTool/client-config.json` 读取配置：
//! - 文件不存在时返回默认配置（首次使用）
//! - 文件存在但无法读取或解析时返回错误，避免静默使用错误的服务地址
//! - 环境变量 `MARKOV_TOOL_SERVICE_URL` 覆盖文件中的 `serviceUrl`
//!
//! 启动路径使用 `load_client_config_or_default`：配置损坏时记录警告并回退为默认配置，
//! 应用仍可启动；`read_client_config` command 则如实返回错误，供设置界面提示用户。

use std::path::Path;

use crate::error::ClientError;
use crate::models::settings::ClientConfig;
use crate::utils::path;

/// 覆盖服务地址的环境变量名
pub const SERVICE_URL_ENV: &str = "MARKOV_TOOL_SERVICE_URL";

/// 读取客户端配置并应用环境变量覆盖
pub async fn load_client_config() -> Result<ClientConfig, ClientError> {
    let config_path = path::get_client_config_path().map_err(ClientError::Config)?;
    let config = load_client_config_from(&config_path).await?;
    Ok(apply_service_url_override(
        config,
        std::env::var(SERVICE_URL_ENV).ok(),
    ))
}

/// 读取客户端配置，失败时回退为默认配置
///
/// 环境变量覆盖在回退后同样生效。
pub async fn load_client_config_or_default() -> ClientConfig {
    let config = match path::get_client_config_path() {
        Ok(config_path) => load_client_config_or_default_from(&config_path).await,
        Err(e) => {
            log::warn!("无法定位配置文件，使用默认配置: {}", e);
            ClientConfig::default()
        }
    };
    apply_service_url_override(config, std::env::var(SERVICE_URL_ENV).ok())
}

/// 从指定路径读取配置，文件无法读取或解析时回退为默认配置
pub async fn load_client_config_or_default_from(config_path: &Path) -> ClientConfig {
    match load_client_config_from(config_path).await {
        Ok(config) => config,
        Err(e) => {
            log::warn!("{}，使用默认配置", e);
            ClientConfig::default()
        }
    }
}

/// 保存客户端配置，配置目录不存在时自动创建
pub async fn save_client_config(config: &ClientConfig) -> Result<(), ClientError> {
    let config_path = path::get_client_config_path().map_err(ClientError::Config)?;
    save_client_config_to(&config_path, config).await
}

/// 从指定路径读取配置文件
pub async fn load_client_config_from(config_path: &Path) -> Result<ClientConfig, ClientError> {
    if !config_path.exists() {
        log::debug!("配置文件 {} 不存在，使用默认配置", config_path.display());
        return Ok(ClientConfig::default());
    }

    let content = tokio::fs::read_to_string(config_path)
        .await
        .map_err(|e| ClientError::Config(format!("读取配置文件失败: {}", e)))?;

    serde_json::from_str(&content)
        .map_err(|e| ClientError::Config(format!("解析配置文件失败: {}", e)))
}

/// 将配置以 2 空格缩进的 JSON 写入指定路径
pub async fn save_client_config_to(
    config_path: &Path,
    config: &ClientConfig,
) -> Result<(), ClientError> {
    if let Some(parent) = config_path.parent() {
        if !parent.exists() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| ClientError::Config(format!("创建配置目录失败: {}", e)))?;
        }
    }

    let content = serde_json::to_string_pretty(config)
        .map_err(|e| ClientError::Config(format!("序列化配置失败: {}", e)))?;

    tokio::fs::write(config_path, content)
        .await
        .map_err(|e| ClientError::Config(format!("写入配置文件失败: {}", e)))
}

/// 非空的覆盖值替换 `service_url`
pub fn apply_service_url_override(
    mut config: ClientConfig,
    service_url: Option<String>,
) -> ClientConfig {
    if let Some(url) = service_url.filter(|u| !u.trim().is_empty()) {
        log::info!("使用环境变量 {} 指定的服务地址: {}", SERVICE_URL_ENV, url);
        config.service_url = url.trim().to_string();
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::settings::SubmissionOrdering;

    #[tokio::test]
    async fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_client_config_from(&dir.path().join("none.json"))
            .await
            .unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[tokio::test]
    async fn test_save_then_load_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".mo").join("MarkovTool").join("client-config.json");
        let config = ClientConfig {
            service_url: "http://markov.internal:9000".to_string(),
            request_timeout_secs: Some(30),
            submission_ordering: SubmissionOrdering::LatestSubmitted,
            ..Default::default()
        };

        save_client_config_to(&path, &config).await.unwrap();
        let loaded = load_client_config_from(&path).await.unwrap();
        assert_eq!(loaded, config);
    }

    #[tokio::test]
    async fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client-config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = load_client_config_from(&path).await.unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }

    #[tokio::test]
    async fn test_malformed_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client-config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let config = load_client_config_or_default_from(&path).await;
        assert_eq!(config, ClientConfig::default());
    }

    #[tokio::test]
    async fn test_valid_file_is_used_by_fallback_loader() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client-config.json");
        std::fs::write(&path, r#"{"serviceUrl": "http://markov:9000"}"#).unwrap();

        let config = load_client_config_or_default_from(&path).await;
        assert_eq!(config.service_url, "http://markov:9000");
    }

    #[test]
    fn test_service_url_override() {
        let config = apply_service_url_override(
            ClientConfig::default(),
            Some(" http://other:1234 ".to_string()),
        );
        assert_eq!(config.service_url, "http://other:1234");

        let config = apply_service_url_override(ClientConfig::default(), Some("  ".to_string()));
        assert_eq!(config, ClientConfig::default());
    }
}
