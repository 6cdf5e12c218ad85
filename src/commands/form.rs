//! # 表单 Tauri Commands
//!
//! 提供表单相关的 Tauri command 处理函数：
//! - `get_form_state` - 获取当前表单快照
//! - `load_parameters` - 加载服务端默认参数并填充表单
//! - `pick_source_file` - 打开原生文件对话框并绑定所选文件
//! - `bind_source_file` - 绑定前端传来的文件路径（如拖放）
//! - `set_generation_parameters` - 更新生成参数
//! - `submit_transform` - 提交当前表单
//!
//! 状态变化通过 `form-state-changed` 事件推送给前端，
//! command 的返回值只用于调用方立即刷新。

use std::path::PathBuf;

use tauri::{AppHandle, State};
use tauri_plugin_dialog::DialogExt;

use crate::models::file::SelectedFileInfo;
use crate::models::form::{FormView, SubmissionPhase};
use crate::models::parameters::{GenerationParameters, ParameterDefaults};
use crate::services::controller::MarkovTool;

/// 获取当前表单快照
///
/// 前端在页面加载时调用一次完成首次渲染，之后依赖 `form-state-changed` 事件刷新。
///
/// # 参数
/// - `tool` - Tauri managed state，表单控制器
///
/// # 返回值
/// 返回当前表单的视图快照（文件只包含摘要）
#[tauri::command]
pub async fn get_form_state(tool: State<'_, MarkovTool>) -> Result<FormView, String> {
    Ok(tool.form().view())
}

/// 加载服务端默认参数
///
/// 前端在页面加载时调用一次；会话内只有第一次调用会请求服务端。
///
/// # 参数
/// - `tool` - Tauri managed state，表单控制器
///
/// # 返回值
/// 返回服务端声明的默认参数，同时表单参数被填充为默认值、策略选中第一个
///
/// # 错误
/// 获取失败时返回面向用户的错误文案，下次调用会重新请求
#[tauri::command]
pub async fn load_parameters(tool: State<'_, MarkovTool>) -> Result<ParameterDefaults, String> {
    tool.load_parameters().await.map_err(|e| e.user_message())
}

/// 打开原生文件对话框并绑定所选文件
///
/// 用户取消选择时源文件字段被置空，返回 `None`。
///
/// # 参数
/// - `app` - 应用句柄，用于打开对话框
/// - `tool` - Tauri managed state，表单控制器
///
/// # 返回值
/// 返回绑定后源文件的摘要；取消选择时返回 `None`
///
/// # 错误
/// 对话框异常关闭、路径无法解析或文件无法读取时返回错误
#[tauri::command]
pub async fn pick_source_file(
    app: AppHandle,
    tool: State<'_, MarkovTool>,
) -> Result<Option<SelectedFileInfo>, String> {
    let (tx, rx) = tokio::sync::oneshot::channel();

    // 对话框回调在另一个线程上执行，通过 oneshot 把结果送回当前 command
    app.dialog()
        .file()
        .add_filter("文本文件", &["txt", "md", "csv", "log"])
        .add_filter("所有文件", &["*"])
        .pick_file(move |file_path| {
            let _ = tx.send(file_path);
        });

    let picked = rx
        .await
        .map_err(|e| format!("文件对话框异常关闭: {}", e))?;

    let path = match picked {
        Some(file_path) => Some(
            file_path
                .into_path()
                .map_err(|e| format!("无法解析所选文件路径: {}", e))?,
        ),
        None => None,
    };

    tool.select_source_path(path.as_deref())
        .await
        .map_err(|e| e.to_string())?;

    Ok(tool.form().view().source_file)
}

/// 绑定前端传来的文件路径
///
/// # 参数
/// - `file_path` - 文件的绝对路径；为 `None` 时清除已选文件
/// - `tool` - Tauri managed state，表单控制器
///
/// # 返回值
/// 返回绑定后源文件的摘要
///
/// # 错误
/// 文件无法读取时返回错误，已选文件保持不变
#[tauri::command]
pub async fn bind_source_file(
    file_path: Option<String>,
    tool: State<'_, MarkovTool>,
) -> Result<Option<SelectedFileInfo>, String> {
    let path = file_path.map(PathBuf::from);
    tool.select_source_path(path.as_deref())
        .await
        .map_err(|e| e.to_string())?;

    Ok(tool.form().view().source_file)
}

/// 更新生成参数
///
/// # 参数
/// - `parameters` - 用户填写的前缀长度、最大 token 数和策略下标
/// - `tool` - Tauri managed state，表单控制器
///
/// # 返回值
/// 返回更新后的表单快照
///
/// # 错误
/// 策略下标不在服务端声明的列表中时返回错误，表单参数保持不变
#[tauri::command]
pub async fn set_generation_parameters(
    parameters: GenerationParameters,
    tool: State<'_, MarkovTool>,
) -> Result<FormView, String> {
    tool.set_parameters(parameters).map_err(|e| e.to_string())?;
    Ok(tool.form().view())
}

/// 提交当前表单
///
/// 请求失败不会作为 command 错误返回：错误文案写入表单的 `errMsg`，
/// 这里只返回本次提交的结束阶段。
///
/// # 参数
/// - `tool` - Tauri managed state，表单控制器
///
/// # 返回值
/// 返回本次提交的结束阶段（`succeeded` 或 `failed`）
#[tauri::command]
pub async fn submit_transform(tool: State<'_, MarkovTool>) -> Result<SubmissionPhase, String> {
    Ok(tool.upload().await)
}
