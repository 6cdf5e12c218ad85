//! # 表单状态数据模型
//!
//! `FormState` 是整个客户端共享的应用状态：选中文件、生成参数、
//! 可选策略列表，以及最近一次提交的结果/错误。
//! 由 `services::form::FormStore` 独占写入，视图只读其快照。

use serde::{Deserialize, Serialize};

use super::file::{SelectedFile, SelectedFileInfo};
use super::parameters::GenerationParameters;
use super::result::TransformResult;

/// 单次提交的状态机阶段
///
/// `Idle → Sending → {Succeeded, Failed}`，两个结束态都是终态；
/// 新的提交重新进入 `Sending` 并丢弃上一次的结果。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Sending,
    Succeeded,
    Failed,
}

/// 共享表单状态
///
/// 不变式：`phase` 为 `Succeeded` 时仅 `result` 有值，为 `Failed` 时仅 `err_msg` 有值，
/// 其余阶段两者都为空。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    pub source_file: Option<SelectedFile>,
    pub parameters: GenerationParameters,
    /// 服务端声明的策略名称，默认参数加载前为空
    pub token_strategies: Vec<String>,
    pub result: Option<TransformResult>,
    pub err_msg: Option<String>,
    pub phase: SubmissionPhase,
}

impl FormState {
    /// 生成可序列化的视图快照（文件只保留摘要）
    pub fn view(&self) -> FormView {
        FormView {
            source_file: self.source_file.as_ref().map(SelectedFile::info),
            parameters: self.parameters.clone(),
            token_strategies: self.token_strategies.clone(),
            result: self.result.clone(),
            err_msg: self.err_msg.clone(),
            phase: self.phase,
        }
    }
}

/// 通过 IPC 传给前端的表单快照
///
/// 对应前端 TypeScript 接口：
/// ```typescript
/// interface FormView {
///   sourceFile: SelectedFileInfo | null;
///   parameters: GenerationParameters;
///   tokenStrategies: string[];
///   result: unknown | null;
///   errMsg: string | null;
///   phase: 'idle' | 'sending' | 'succeeded' | 'failed';
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormView {
    pub source_file: Option<SelectedFileInfo>,
    pub parameters: GenerationParameters,
    pub token_strategies: Vec<String>,
    pub result: Option<TransformResult>,
    pub err_msg: Option<String>,
    pub phase: SubmissionPhase,
}
