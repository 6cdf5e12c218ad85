//! # Markov Tool - 桌面应用原生入口点
//!
//! 仅负责启动应用，插件注册、状态初始化、事件循环均在 `lib.rs` 的 `run()` 中完成。

// Prevents additional console window on Windows in release, DO NOT REMOVE!!
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

fn main() {
    markov_tool_lib::run();
}
