//! # 变换结果数据模型
//!
//! 变换结果对客户端来说是不透明的 JSON，原样保存并交给前端渲染。
//! 当前服务端返回 `{content, states}` 结构，`MarkovChainResult` 提供其类型化视图。

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `POST /upload` 成功响应体
///
/// 使用 `serde_json::Value` 保存，服务端增减字段时不会丢失数据。
pub type TransformResult = Value;

/// 服务端当前返回结构的类型化视图
///
/// 对应前端 TypeScript 接口：
/// ```typescript
/// interface MarkovChainResult {
///   content: string;
///   states: ChainState[];
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkovChainResult {
    /// 生成的文本
    pub content: String,

    /// 构建出的链中的所有状态节点
    #[serde(default)]
    pub states: Vec<ChainState>,
}

/// 链中的单个状态节点：前缀 token 及其后继 token 和对应权重
///
/// `suffixes[i]` 的权重为 `suffixes_weights[i]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainState {
    pub prefix: Vec<String>,
    pub suffixes: Vec<String>,
    pub suffixes_weights: Vec<u64>,
}

impl MarkovChainResult {
    /// 尝试把不透明结果解读为已知结构，结构不匹配时返回 `None`
    pub fn from_result(result: &TransformResult) -> Option<Self> {
        serde_json::from_value(result.clone()).ok()
    }
}
