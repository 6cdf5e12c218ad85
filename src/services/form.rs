//! # 共享表单状态服务
//!
//! `FormStore` 是客户端唯一的应用状态对象，所有写入都经过它：
//! - 文件绑定适配器写入选中文件
//! - 控制器写入默认参数、用户参数和提交结果
//!
//! ## 变更通知
//! 状态保存在 `tokio::sync::watch` 通道中，每次写入与通知在同一次
//! `send_modify` / `send_if_modified` 中完成，订阅者在下一次读取时一定能看到新值。
//! 被拒绝的修改不会触发通知。
//!
//! ## 提交状态机
//! `begin_submission` 进入 `Sending` 并清空上一轮的结果和错误，
//! `complete_submission` 写入 `Succeeded`（仅结果）或 `Failed`（仅错误）。
//! 每次提交分配一个递增序号，`SubmissionOrdering::LatestSubmitted`
//! 时只有最新序号的结果会被写入。

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;

use crate::error::ClientError;
use crate::models::form::{FormState, FormView, SubmissionPhase};
use crate::models::parameters::{GenerationParameters, ParameterDefaults};
use crate::models::result::TransformResult;
use crate::models::settings::SubmissionOrdering;

/// 共享表单状态
pub struct FormStore {
    tx: watch::Sender<FormState>,
    /// 最近一次发出的提交序号，0 表示尚未提交
    latest_submission: AtomicU64,
}

impl FormStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(FormState::default());
        Self {
            tx,
            latest_submission: AtomicU64::new(0),
        }
    }

    /// 订阅状态变更
    pub fn subscribe(&self) -> watch::Receiver<FormState> {
        self.tx.subscribe()
    }

    /// 当前状态的完整克隆
    pub fn snapshot(&self) -> FormState {
        self.tx.borrow().clone()
    }

    /// 当前状态的视图快照
    pub fn view(&self) -> FormView {
        self.tx.borrow().view()
    }

    /// 修改状态并通知所有订阅者
    ///
    /// 没有订阅者时同样会写入。
    pub fn update(&self, f: impl FnOnce(&mut FormState)) {
        self.tx.send_modify(f);
    }

    /// 按条件修改状态
    ///
    /// 闭包返回 `(是否修改, 输出)`；未修改时订阅者不会收到通知。
    fn modify<R: Default>(&self, f: impl FnOnce(&mut FormState) -> (bool, R)) -> R {
        let mut output = R::default();
        self.tx.send_if_modified(|state| {
            let (modified, out) = f(state);
            output = out;
            modified
        });
        output
    }

    /// 用服务端默认值填充参数和策略列表，策略选中第一个
    pub fn apply_defaults(&self, defaults: &ParameterDefaults) {
        self.update(|state| {
            state.parameters = GenerationParameters::from_defaults(defaults);
            state.token_strategies = defaults.token_strategies.clone();
        });
        log::debug!("表单参数已按默认值初始化: {:?}", defaults);
    }

    /// 更新用户选择的生成参数
    ///
    /// 默认参数加载后，策略下标必须落在服务端声明的列表内；
    /// 数值参数不做范围校验，由服务端决定是否接受。
    /// 被拒绝的修改不改变状态，也不通知订阅者。
    pub fn set_parameters(&self, params: GenerationParameters) -> Result<(), ClientError> {
        let rejected = self.modify(|state| {
            let available = state.token_strategies.len();
            if available > 0 && params.token_strategy >= available {
                let err = ClientError::UnknownTokenStrategy {
                    index: params.token_strategy,
                    available,
                };
                return (false, Some(err));
            }
            state.parameters = params;
            (true, None)
        });

        match rejected {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// 开始一次新的提交，返回其序号
    pub fn begin_submission(&self) -> u64 {
        self.modify(|state| {
            let seq = self.latest_submission.fetch_add(1, Ordering::SeqCst) + 1;
            state.phase = SubmissionPhase::Sending;
            state.result = None;
            state.err_msg = None;
            (true, seq)
        })
    }

    /// 写入一次提交的结果
    ///
    /// 成功时设置结果并清空错误，失败时清空结果并设置错误。
    /// 返回是否写入；按 `LatestSubmitted` 策略被更新的提交取代时返回 `false`，
    /// 此时订阅者不会收到通知。
    pub fn complete_submission(
        &self,
        seq: u64,
        outcome: Result<TransformResult, String>,
        ordering: SubmissionOrdering,
    ) -> bool {
        self.modify(|state| {
            if ordering == SubmissionOrdering::LatestSubmitted
                && seq != self.latest_submission.load(Ordering::SeqCst)
            {
                log::debug!("提交 #{} 已被更新的提交取代，丢弃其结果", seq);
                return (false, false);
            }

            match outcome {
                Ok(result) => {
                    state.result = Some(result);
                    state.err_msg = None;
                    state.phase = SubmissionPhase::Succeeded;
                }
                Err(message) => {
                    state.result = None;
                    state.err_msg = Some(message);
                    state.phase = SubmissionPhase::Failed;
                }
            }
            (true, true)
        })
    }
}

impl Default for FormStore {
    fn default() -> Self {
        Self::new()
    }
}
