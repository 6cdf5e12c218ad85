//! # Markov Tool - 客户端核心库
//!
//! 马尔可夫链文本变换服务的客户端：用户选择文本文件、设置生成参数，
//! 提交到远端 HTTP 服务，并展示生成结果或错误信息。
//!
//! ## 模块结构
//! - `commands/` - Tauri command 处理函数（IPC 接口层，仅 `desktop` feature）
//! - `models/` - 数据模型（对应前端 TypeScript 类型）
//! - `services/` - 核心业务逻辑（参数缓存、文件绑定、变换请求、共享表单状态）
//! - `utils/` - 通用工具函数
//! - `error` - 客户端错误类型
//!
//! 核心逻辑不依赖 Tauri，可以在没有 webview 的环境中直接使用 `services::controller::MarkovTool`。

#[cfg(feature = "desktop")]
mod commands;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

/// 表单状态变化时推送给前端的事件名
pub const FORM_STATE_EVENT: &str = "form-state-changed";

#[cfg(feature = "desktop")]
use tauri::{Emitter, Manager};

#[cfg(feature = "desktop")]
use services::controller::MarkovTool;

/// Tauri 应用启动函数
///
/// 1. 注册对话框插件（原生文件选择器）
/// 2. 在 `setup` 钩子中按需注册日志插件、读取客户端配置（损坏时回退为默认配置）、创建控制器
/// 3. 将表单状态变化转发为 `form-state-changed` 事件
/// 4. 注册所有自定义 Tauri commands 并启动事件循环
///
/// # Panics
/// 如果 Tauri 应用启动失败（例如 HTTP 客户端构建失败或窗口创建失败），将触发 panic。
#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        // === 官方插件注册 ===
        // 对话框插件：提供原生文件选择器，`pick_source_file` 通过它获取源文件
        .plugin(tauri_plugin_dialog::init())
        // `setup` 闭包：在应用窗口创建之前执行的初始化钩子
        .setup(|app| {
            // 仅在开发调试模式下启用日志插件
            if cfg!(debug_assertions) {
                app.handle().plugin(
                    tauri_plugin_log::Builder::default()
                        .level(log::LevelFilter::Info)
                        .build(),
                )?;
            }

            // === 应用全局状态初始化 ===
            // 配置损坏时回退为默认配置，不阻止应用启动
            let config = tauri::async_runtime::block_on(
                services::config::load_client_config_or_default(),
            );
            log::info!("远端服务地址: {}", config.service_url);

            // 注册 MarkovTool 为 Tauri managed state，所有 command 函数可通过
            // `State<MarkovTool>` 参数注入访问同一份表单状态和参数缓存
            let tool = MarkovTool::new(config)?;
            let mut changes = tool.form().subscribe();
            app.manage(tool);

            // === 状态变更推送 ===
            // 每次表单写入后把最新快照作为 `form-state-changed` 事件推送给前端
            let handle = app.handle().clone();
            tauri::async_runtime::spawn(async move {
                while changes.changed().await.is_ok() {
                    let view = changes.borrow_and_update().view();
                    if let Err(e) = handle.emit(FORM_STATE_EVENT, view) {
                        log::warn!("推送表单状态失败: {}", e);
                    }
                }
            });

            Ok(())
        })
        // === 自定义 Tauri Commands 注册 ===
        // 所有 command 函数通过 `invoke_handler` 注册，前端通过 `invoke()` 调用
        .invoke_handler(tauri::generate_handler![
            // 表单 commands
            commands::form::get_form_state,
            commands::form::load_parameters,
            commands::form::pick_source_file,
            commands::form::bind_source_file,
            commands::form::set_generation_parameters,
            commands::form::submit_transform,
            // 配置 commands
            commands::settings::read_client_config,
            commands::settings::save_client_config,
        ])
        // `tauri::generate_context!()` 宏：在编译时读取 `tauri.conf.json` 生成应用上下文
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
