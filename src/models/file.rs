//! # 选中文件数据模型
//!
//! `SelectedFile` 持有用户选中文件的完整内容，只存在于内存中；
//! 每次重新选择都会整体替换，不会保留旧文件的任何部分。
//! 前端只需要 `SelectedFileInfo` 摘要，文件内容不通过 IPC 回传。

use std::path::Path;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// 无法从扩展名推断时使用的 MIME 类型
const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// 用户选中的源文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    /// 文件名（不含目录），作为 multipart 的 filename 发送
    pub file_name: String,
    pub mime_type: String,
    /// 文件内容，`Bytes` 克隆只增加引用计数
    pub bytes: Bytes,
}

impl SelectedFile {
    /// 从内存内容构造，MIME 类型由文件扩展名推断
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        let file_name = file_name.into();
        let mime_type = mime_type_for(&file_name).to_string();
        Self {
            file_name,
            mime_type,
            bytes: bytes.into(),
        }
    }

    /// 从磁盘读取文件
    ///
    /// # 错误
    /// 文件不存在或无法读取时返回 I/O 错误
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self::new(file_name, content))
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    pub fn info(&self) -> SelectedFileInfo {
        SelectedFileInfo {
            file_name: self.file_name.clone(),
            mime_type: self.mime_type.clone(),
            size: self.size(),
        }
    }
}

/// 选中文件的摘要，供前端展示
///
/// 对应前端 TypeScript 接口：
/// ```typescript
/// interface SelectedFileInfo {
///   fileName: string;
///   mimeType: string;
///   size: number;
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedFileInfo {
    pub file_name: String,
    pub mime_type: String,
    pub size: usize,
}

/// 根据扩展名推断 MIME 类型
///
/// 源文件通常是纯文本，这里只识别常见的文本类扩展名。
fn mime_type_for(file_name: &str) -> &'static str {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("txt") | Some("text") | Some("log") => "text/plain",
        Some("md") | Some("markdown") => "text/markdown",
        Some("csv") => "text/csv",
        Some("html") | Some("htm") => "text/html",
        Some("json") => "application/json",
        _ => DEFAULT_MIME_TYPE,
    }
}
