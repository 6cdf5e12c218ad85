//! # 生成参数数据模型
//!
//! 定义服务端声明的默认参数（ParameterDefaults）和用户提交前可修改的
//! 生成参数（GenerationParameters）。
//!
//! 对应前端 TypeScript 中的 `ParameterDefaults`、`GenerationParameters` 接口。

use serde::{Deserialize, Serialize};

/// 服务端声明的默认参数
///
/// 由 `GET /parameters` 返回，客户端在一次会话内最多获取一次并缓存。
///
/// 对应前端 TypeScript 接口：
/// ```typescript
/// interface ParameterDefaults {
///   defaultPrefixLen: number;
///   defaultMaxTokens: number;
///   tokenStrategies: string[];
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDefaults {
    /// 默认前缀长度（n-gram 上下文窗口大小）
    pub default_prefix_len: u32,

    /// 默认最大生成 token 数
    pub default_max_tokens: u32,

    /// token 切分策略的显示名称，按服务端下标排序
    ///
    /// 提交时只发送下标，名称仅用于展示
    #[serde(default)]
    pub token_strategies: Vec<String>,
}

impl ParameterDefaults {
    /// 按下标查找策略显示名称，下标越界时返回 `None`
    pub fn strategy_name(&self, index: usize) -> Option<&str> {
        self.token_strategies.get(index).map(String::as_str)
    }
}

/// 用户提交前的生成参数
///
/// `prefix_len` 与 `max_tokens` 为 `None` 时不随请求发送，
/// 由服务端采用自己的默认值（目前为前缀长度 2、最大 token 数 1000）。
/// `token_strategy` 总是发送，服务端缺省为 0。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationParameters {
    pub prefix_len: Option<u32>,
    pub max_tokens: Option<u32>,
    pub token_strategy: usize,
}

impl GenerationParameters {
    /// 用服务端默认值初始化表单参数，策略默认选中第一个
    pub fn from_defaults(defaults: &ParameterDefaults) -> Self {
        Self {
            prefix_len: Some(defaults.default_prefix_len),
            max_tokens: Some(defaults.default_max_tokens),
            token_strategy: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_deserialize_from_server_payload() {
        let json = r#"{
            "defaultPrefixLen": 2,
            "defaultMaxTokens": 1000,
            "tokenStrategies": ["Word glued to punctuation", "Any single character"]
        }"#;
        let defaults: ParameterDefaults = serde_json::from_str(json).unwrap();
        assert_eq!(defaults.default_prefix_len, 2);
        assert_eq!(defaults.default_max_tokens, 1000);
        assert_eq!(defaults.strategy_name(1), Some("Any single character"));
        assert_eq!(defaults.strategy_name(2), None);
    }

    #[test]
    fn test_from_defaults_selects_first_strategy() {
        let defaults = ParameterDefaults {
            default_prefix_len: 3,
            default_max_tokens: 50,
            token_strategies: vec!["a".into(), "b".into()],
        };
        let params = GenerationParameters::from_defaults(&defaults);
        assert_eq!(params.prefix_len, Some(3));
        assert_eq!(params.max_tokens, Some(50));
        assert_eq!(params.token_strategy, 0);
    }
}
