//! # 马尔可夫链变换请求服务
//!
//! 把选中文件和生成参数打包成 multipart 请求体，`POST` 到远端服务的提交端点：
//! - `file`：文件内容（携带文件名和 MIME 类型）
//! - `prefixLen`：仅在设置时发送
//! - `maxTokens`：仅在设置时发送
//! - `tokenStrategy`：总是发送
//!
//! 数值均以十进制字符串发送。Content-Type 不手动设置，
//! 由 reqwest 根据 multipart 表单生成带 boundary 的头部。
//!
//! 本模块只负责单次请求，结果写入共享状态由 `controller` 完成。

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::error::ClientError;
use crate::models::file::SelectedFile;
use crate::models::parameters::GenerationParameters;
use crate::models::result::TransformResult;
use crate::models::settings::ClientConfig;

/// 失败响应体中我们关心的唯一字段
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// 按配置构建共享的 HTTP 客户端
///
/// 未配置超时时请求会一直等待，直到服务端响应或连接断开。
pub fn build_http_client(config: &ClientConfig) -> Result<reqwest::Client, ClientError> {
    let mut builder = reqwest::Client::builder();
    if let Some(secs) = config.request_timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    Ok(builder.build()?)
}

/// 除文件外的表单字段，按发送顺序排列
///
/// 未设置的可选参数不出现在结果中。
pub fn form_fields(params: &GenerationParameters) -> Vec<(&'static str, String)> {
    let mut fields = Vec::with_capacity(3);
    if let Some(prefix_len) = params.prefix_len {
        fields.push(("prefixLen", prefix_len.to_string()));
    }
    if let Some(max_tokens) = params.max_tokens {
        fields.push(("maxTokens", max_tokens.to_string()));
    }
    fields.push(("tokenStrategy", params.token_strategy.to_string()));
    fields
}

/// 构建 multipart 请求体
///
/// # 错误
/// 文件的 MIME 类型字符串非法时返回错误
pub fn build_form(file: &SelectedFile, params: &GenerationParameters) -> Result<Form, ClientError> {
    let part = Part::stream_with_length(reqwest::Body::from(file.bytes.clone()), file.size() as u64)
        .file_name(file.file_name.clone())
        .mime_str(&file.mime_type)?;

    let form = form_fields(params)
        .into_iter()
        .fold(Form::new().part("file", part), |form, (name, value)| {
            form.text(name, value)
        });

    Ok(form)
}

/// 从失败响应中读取 `message` 字段
///
/// 响应体为空、不是 JSON 或没有 `message` 字段时返回 `None`
pub(crate) async fn read_error_message(response: reqwest::Response) -> Option<String> {
    let body = response.bytes().await.ok()?;
    serde_json::from_slice::<ErrorBody>(&body).ok()?.message
}

/// 变换请求客户端
pub struct TransformClient {
    http: reqwest::Client,
    /// `POST /upload` 的完整地址
    url: String,
}

impl TransformClient {
    pub fn new(http: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }

    /// 提交文件和参数，返回服务端的变换结果
    ///
    /// # 错误
    /// - 网络失败：`ClientError::Transport`
    /// - 非 2xx 响应：`ClientError::Service`，附带响应体中的 `message`（如有）
    /// - 成功响应体不是 JSON：`ClientError::Decode`
    pub async fn transform(
        &self,
        file: &SelectedFile,
        params: &GenerationParameters,
    ) -> Result<TransformResult, ClientError> {
        let form = build_form(file, params)?;

        log::info!(
            "提交变换请求: file={} ({} 字节), params={:?}",
            file.file_name,
            file.size(),
            params
        );

        let response = self.http.post(&self.url).multipart(form).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = read_error_message(response).await;
            log::warn!("变换请求失败，状态码 {}，message={:?}", status, message);
            return Err(ClientError::Service {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SERVICE_DOWN_MESSAGE;
    use wiremock::matchers::{header_regex, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// 从原始 multipart 请求体中取出指定字段的值
    fn field_value(body: &str, name: &str) -> Option<String> {
        let marker = format!("name=\"{}\"", name);
        let start = body.find(&marker)?;
        let rest = &body[start..];
        let value_start = rest.find("\r\n\r\n")? + 4;
        let value = &rest[value_start..];
        let value_end = value.find("\r\n")?;
        Some(value[..value_end].to_string())
    }

    async fn received_body(server: &MockServer) -> String {
        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        String::from_utf8_lossy(&requests[0].body).to_string()
    }

    fn client_for(server: &MockServer) -> TransformClient {
        TransformClient::new(reqwest::Client::new(), format!("{}/upload", server.uri()))
    }

    #[test]
    fn test_form_fields_skip_unset_optionals() {
        let params = GenerationParameters {
            prefix_len: None,
            max_tokens: None,
            token_strategy: 1,
        };
        assert_eq!(form_fields(&params), vec![("tokenStrategy", "1".to_string())]);

        let params = GenerationParameters {
            prefix_len: Some(4),
            max_tokens: Some(200),
            token_strategy: 0,
        };
        assert_eq!(
            form_fields(&params),
            vec![
                ("prefixLen", "4".to_string()),
                ("maxTokens", "200".to_string()),
                ("tokenStrategy", "0".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_success_returns_decoded_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/upload"))
            .and(header_regex("content-type", "^multipart/form-data; boundary="))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"content": "generated", "states": []})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let file = SelectedFile::new("source.txt", "one two three");
        let params = GenerationParameters {
            prefix_len: Some(4),
            max_tokens: None,
            token_strategy: 1,
        };

        let result = client_for(&server).transform(&file, &params).await.unwrap();
        assert_eq!(result["content"], "generated");

        let body = received_body(&server).await;
        assert_eq!(field_value(&body, "prefixLen").as_deref(), Some("4"));
        assert_eq!(field_value(&body, "maxTokens"), None);
        assert_eq!(field_value(&body, "tokenStrategy").as_deref(), Some("1"));
        assert!(body.contains("filename=\"source.txt\""));
        assert!(body.contains("one two three"));
    }

    #[tokio::test]
    async fn test_omitted_prefix_len_is_not_sent() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let file = SelectedFile::new("a.txt", "x");
        let params = GenerationParameters {
            prefix_len: None,
            max_tokens: Some(10),
            token_strategy: 0,
        };
        client_for(&server).transform(&file, &params).await.unwrap();

        let body = received_body(&server).await;
        assert!(!body.contains("name=\"prefixLen\""));
        assert_eq!(field_value(&body, "maxTokens").as_deref(), Some("10"));
    }

    #[tokio::test]
    async fn test_failure_message_from_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(serde_json::json!({"message": "bad file"})),
            )
            .mount(&server)
            .await;

        let err = client_for(&server)
            .transform(&SelectedFile::new("a.txt", "x"), &GenerationParameters::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Service { status: 400, .. }));
        assert_eq!(err.user_message(), "bad file");
    }

    #[tokio::test]
    async fn test_failure_with_empty_body_falls_back() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .transform(&SelectedFile::new("a.txt", "x"), &GenerationParameters::default())
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), SERVICE_DOWN_MESSAGE);
    }

    #[tokio::test]
    async fn test_unreachable_service_falls_back() {
        let client = TransformClient::new(reqwest::Client::new(), "http://127.0.0.1:1/upload");
        let err = client
            .transform(&SelectedFile::new("a.txt", "x"), &GenerationParameters::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
        assert_eq!(err.user_message(), SERVICE_DOWN_MESSAGE);
    }

    #[tokio::test]
    async fn test_timeout_from_config() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({}))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let config = ClientConfig {
            request_timeout_secs: Some(1),
            ..Default::default()
        };
        let http = build_http_client(&config).unwrap();
        let client = TransformClient::new(http, format!("{}/upload", server.uri()));

        let err = client
            .transform(&SelectedFile::new("a.txt", "x"), &GenerationParameters::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Transport(ref e) if e.is_timeout()));
    }
}
