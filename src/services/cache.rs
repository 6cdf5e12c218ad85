//! # 默认参数缓存服务
//!
//! 服务端声明的默认参数在一次会话内不会变化，因此只获取一次：
//! - **首次调用**：请求 `GET /parameters`，成功后写入单槽缓存
//! - **后续调用**：直接返回缓存，不再产生网络请求
//! - **获取失败**：错误返回给调用方，缓存保持未设置，下次调用会重新请求
//!
//! ## 缓存状态
//! 缓存有三种状态（见 [`CacheState`]）：未设置、请求中、已就绪。
//! 请求中时的并发调用者会等待同一次请求的结果，而不是各自再发一次。
//! 缓存没有过期时间，也不会被主动失效。

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::OnceCell;

use crate::error::ClientError;
use crate::models::parameters::ParameterDefaults;
use crate::services::markov_client;

/// 参数缓存的状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    /// 尚未获取，或上一次获取失败
    Unset,
    /// 首次获取正在进行
    Pending,
    /// 已缓存
    Ready,
}

/// 默认参数的单槽懒加载缓存
pub struct ParameterCache {
    http: reqwest::Client,
    /// `GET /parameters` 的完整地址
    url: String,
    slot: OnceCell<ParameterDefaults>,
    /// 获取进行中标记，仅用于对外报告 `Pending` 状态
    pending: AtomicBool,
}

/// 获取结束时（包括 future 被取消）清除进行中标记
struct PendingGuard<'a>(&'a AtomicBool);

impl<'a> PendingGuard<'a> {
    fn enter(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag)
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl ParameterCache {
    pub fn new(http: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
            slot: OnceCell::new(),
            pending: AtomicBool::new(false),
        }
    }

    /// 获取默认参数
    ///
    /// 缓存已就绪时立即返回缓存数据的克隆；否则发起（或等待进行中的）网络请求。
    ///
    /// # 错误
    /// 网络失败、非 2xx 响应或响应体解析失败时返回错误，缓存保持未设置
    pub async fn get(&self) -> Result<ParameterDefaults, ClientError> {
        if let Some(cached) = self.slot.get() {
            log::debug!("默认参数命中缓存");
            return Ok(cached.clone());
        }

        let defaults = self
            .slot
            .get_or_try_init(|| async {
                let _guard = PendingGuard::enter(&self.pending);
                self.fetch().await
            })
            .await?;

        Ok(defaults.clone())
    }

    /// 当前缓存状态
    pub fn state(&self) -> CacheState {
        if self.slot.initialized() {
            CacheState::Ready
        } else if self.pending.load(Ordering::SeqCst) {
            CacheState::Pending
        } else {
            CacheState::Unset
        }
    }

    async fn fetch(&self) -> Result<ParameterDefaults, ClientError> {
        log::info!("获取服务端默认参数: {}", self.url);

        let response = self.http.get(&self.url).send().await.map_err(|e| {
            log::warn!("获取默认参数失败: {}", e);
            ClientError::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = markov_client::read_error_message(response).await;
            log::warn!("获取默认参数失败，状态码 {}", status);
            return Err(ClientError::Service {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<ParameterDefaults>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }
}
