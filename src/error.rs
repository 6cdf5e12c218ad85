//! # 客户端错误类型
//!
//! 所有服务层函数返回 `Result<T, ClientError>`。
//! IPC command 层通过 `to_string()` / [`ClientError::user_message`] 转换为前端可展示的字符串。

use thiserror::Error;

/// 远端服务不可达、或失败响应中没有可用 `message` 时展示的固定文案
pub const SERVICE_DOWN_MESSAGE: &str = "Service seems to be down!";

/// 未选择文件就提交时展示的文案
pub const MISSING_FILE_MESSAGE: &str = "Please select a source file first.";

#[derive(Error, Debug)]
pub enum ClientError {
    /// 网络层失败：连接被拒绝、超时、DNS 失败等
    #[error("请求远端服务失败: {0}")]
    Transport(#[from] reqwest::Error),

    /// 服务返回了非 2xx 状态码
    ///
    /// `message` 取自响应体的 `message` 字段；响应体为空或无法解析时为 `None`
    #[error("远端服务返回错误状态 {status}")]
    Service {
        status: u16,
        message: Option<String>,
    },

    /// 响应体无法解码为预期的 JSON 结构
    #[error("解析服务响应失败: {0}")]
    Decode(String),

    /// 读取用户选中的文件失败
    #[error("读取文件失败: {0}")]
    Io(#[from] std::io::Error),

    /// 客户端配置文件读写失败
    #[error("客户端配置错误: {0}")]
    Config(String),

    /// 提交时表单中没有选中文件
    #[error("尚未选择源文件")]
    MissingFile,

    /// 所选 token 策略下标不在服务端声明的列表中
    #[error("未知的 token 策略下标 {index}（可用数量 {available}）")]
    UnknownTokenStrategy { index: usize, available: usize },
}

impl ClientError {
    /// 面向用户的错误文案
    ///
    /// 服务端提供了 `message` 时原样展示，未选择文件时提示先选择文件，
    /// 其余情况统一回退为 [`SERVICE_DOWN_MESSAGE`]。
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Service {
                message: Some(message),
                ..
            } => message.clone(),
            ClientError::MissingFile => MISSING_FILE_MESSAGE.to_string(),
            _ => SERVICE_DOWN_MESSAGE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_server_message() {
        let err = ClientError::Service {
            status: 400,
            message: Some("bad file".to_string()),
        };
        assert_eq!(err.user_message(), "bad file");
    }

    #[test]
    fn test_user_message_falls_back() {
        let err = ClientError::Service {
            status: 500,
            message: None,
        };
        assert_eq!(err.user_message(), SERVICE_DOWN_MESSAGE);

        let err = ClientError::Decode("eof".to_string());
        assert_eq!(err.user_message(), SERVICE_DOWN_MESSAGE);
    }
}
