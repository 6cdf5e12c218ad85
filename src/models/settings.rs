//! # 客户端配置数据模型
//!
//! 定义了客户端配置（ClientConfig）的 Rust 结构体，
//! 存储在 Markov Tool 自身的配置目录中（`~/.mo/MarkovTool/client-config.json`）。
//!
//! 对应前端 TypeScript 中的 `ClientConfig` 接口。

use serde::{Deserialize, Serialize};

/// 默认的远端服务地址
pub const DEFAULT_SERVICE_URL: &str = "http://localhost:8080";

/// 多个提交并发时，共享状态由哪个结果决定
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SubmissionOrdering {
    /// 最后返回的结果覆盖之前的结果，与发送顺序无关
    #[default]
    LastResolved,
    /// 只接受最近一次发出的提交的结果，较早提交的迟到结果被丢弃
    LatestSubmitted,
}

/// 客户端配置数据结构
///
/// 缺失的字段使用默认值，因此旧版本的配置文件也能被读取。
///
/// 对应前端 TypeScript 接口：
/// ```typescript
/// interface ClientConfig {
///   serviceUrl: string;
///   parametersPath: string;
///   uploadPath: string;
///   requestTimeoutSecs: number | null;
///   submissionOrdering: 'lastResolved' | 'latestSubmitted';
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientConfig {
    /// 远端服务的基础地址（不含路径），如 `http://localhost:8080`
    pub service_url: String,

    /// 默认参数端点路径
    pub parameters_path: String,

    /// 文件提交端点路径
    pub upload_path: String,

    /// 单次请求超时（秒）；为 `None` 时不设置超时，请求一直等待直到服务端响应
    pub request_timeout_secs: Option<u64>,

    pub submission_ordering: SubmissionOrdering,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            service_url: DEFAULT_SERVICE_URL.to_string(),
            parameters_path: "/parameters".to_string(),
            upload_path: "/upload".to_string(),
            request_timeout_secs: None,
            submission_ordering: SubmissionOrdering::LastResolved,
        }
    }
}

impl ClientConfig {
    /// 拼接基础地址与端点路径，两侧多余的 `/` 会被去掉
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.service_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub fn parameters_url(&self) -> String {
        self.endpoint(&self.parameters_path)
    }

    pub fn upload_url(&self) -> String {
        self.endpoint(&self.upload_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_slashes() {
        let config = ClientConfig {
            service_url: "http://host:9000/".to_string(),
            ..Default::default()
        };
        assert_eq!(config.parameters_url(), "http://host:9000/parameters");
        assert_eq!(config.upload_url(), "http://host:9000/upload");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"serviceUrl": "http://example"}"#).unwrap();
        assert_eq!(config.service_url, "http://example");
        assert_eq!(config.upload_path, "/upload");
        assert_eq!(config.submission_ordering, SubmissionOrdering::LastResolved);
    }

    #[test]
    fn test_ordering_serializes_camel_case() {
        let json = serde_json::to_string(&SubmissionOrdering::LatestSubmitted).unwrap();
        assert_eq!(json, r#""latestSubmitted""#);
    }
}
