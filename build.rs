//! # Markov Tool - Cargo 构建脚本
//!
//! 仅在启用 `desktop` feature 时调用 `tauri_build::build()`，
//! 根据 `tauri.conf.json` 生成 Tauri 运行时所需的资源绑定代码。
//! 纯客户端库构建不需要任何构建前处理。

fn main() {
    #[cfg(feature = "desktop")]
    tauri_build::build()
}
