//! # 表单控制器
//!
//! 把默认参数缓存、文件绑定适配器、变换请求客户端和共享表单状态串起来：
//! 1. 启动时通过 `load_parameters` 读取一次默认参数并填充表单
//! 2. 用户选择文件，由文件绑定适配器写入表单
//! 3. 用户提交，控制器读取表单快照并发起变换请求
//! 4. 结果或错误文案写回表单，视图通过订阅得到通知
//!
//! 多个提交并发时不做去重，共享状态由哪个结果决定见 `SubmissionOrdering`。

use std::path::Path;

use crate::error::ClientError;
use crate::models::file::SelectedFile;
use crate::models::form::SubmissionPhase;
use crate::models::parameters::{GenerationParameters, ParameterDefaults};
use crate::models::settings::ClientConfig;
use crate::services::cache::ParameterCache;
use crate::services::file_binding::FileBinding;
use crate::services::form::FormStore;
use crate::services::markov_client::{self, TransformClient};

/// 客户端应用状态
///
/// 在桌面壳中通过 Tauri 的 `manage()` 注册，所有 command 通过
/// `State<MarkovTool>` 访问同一个实例。
pub struct MarkovTool {
    config: ClientConfig,
    parameters: ParameterCache,
    transformer: TransformClient,
    form: FormStore,
    source_binding: FileBinding,
}

impl MarkovTool {
    /// 按配置创建控制器
    ///
    /// # 错误
    /// HTTP 客户端构建失败时返回错误
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http = markov_client::build_http_client(&config)?;
        Ok(Self::with_client(config, http))
    }

    /// 使用已有的 HTTP 客户端创建控制器，参数缓存和变换请求共享该客户端
    pub fn with_client(config: ClientConfig, http: reqwest::Client) -> Self {
        Self {
            parameters: ParameterCache::new(http.clone(), config.parameters_url()),
            transformer: TransformClient::new(http, config.upload_url()),
            form: FormStore::new(),
            source_binding: FileBinding::source_file(),
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn form(&self) -> &FormStore {
        &self.form
    }

    pub fn parameter_cache(&self) -> &ParameterCache {
        &self.parameters
    }

    /// 读取默认参数（首次调用才会请求服务端）并填充表单
    pub async fn load_parameters(&self) -> Result<ParameterDefaults, ClientError> {
        let defaults = self.parameters.get().await?;
        self.form.apply_defaults(&defaults);
        Ok(defaults)
    }

    /// 绑定已在内存中的选中文件列表，取第一个
    pub fn bind_source_files(&self, files: impl IntoIterator<Item = SelectedFile>) {
        self.source_binding.on_change(&self.form, files);
    }

    /// 读取磁盘文件并绑定为源文件，`None` 表示用户取消了选择
    pub async fn select_source_path(&self, path: Option<&Path>) -> Result<(), ClientError> {
        self.source_binding.select_path(&self.form, path).await
    }

    pub fn set_parameters(&self, params: GenerationParameters) -> Result<(), ClientError> {
        self.form.set_parameters(params)
    }

    /// 提交表单中当前的源文件和参数
    ///
    /// 未选择文件时不发起请求，直接以失败结束本次提交。
    pub async fn upload(&self) -> SubmissionPhase {
        let state = self.form.snapshot();
        match state.source_file {
            Some(file) => self.transform(file, state.parameters).await,
            None => {
                let seq = self.form.begin_submission();
                log::warn!("提交 #{} 未选择源文件", seq);
                self.form.complete_submission(
                    seq,
                    Err(ClientError::MissingFile.user_message()),
                    self.config.submission_ordering,
                );
                SubmissionPhase::Failed
            }
        }
    }

    /// 提交指定文件和参数，结果写入共享表单状态
    ///
    /// 返回本次提交自身的结束阶段；结果是否写入共享状态由排序策略决定。
    pub async fn transform(
        &self,
        file: SelectedFile,
        params: GenerationParameters,
    ) -> SubmissionPhase {
        let seq = self.form.begin_submission();
        log::info!("开始提交 #{}: {}", seq, file.file_name);

        let outcome = self
            .transformer
            .transform(&file, &params)
            .await
            .map_err(|e| {
                log::warn!("提交 #{} 失败: {}", seq, e);
                e.user_message()
            });

        let phase = if outcome.is_ok() {
            SubmissionPhase::Succeeded
        } else {
            SubmissionPhase::Failed
        };

        let applied =
            self.form
                .complete_submission(seq, outcome, self.config.submission_ordering);
        log::info!("提交 #{} 结束: {:?}（写入共享状态: {}）", seq, phase, applied);

        phase
    }
}
