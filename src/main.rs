//! # skiafy - SVG 到 Skia vector icon 批量转换工具
//!
//! 将 SVG 文件、目录、字符串或标准输入转换为 Skia vector icon (`.icon`) 文件，
//! 转换前可先对 SVG 做清理优化。
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── batch/     (配对、目录展开、批量执行)
//!   │     ├── pipeline/  (单项转换流水线)
//!   │     ├── icon/      (SVG 优化与图标编码)
//!   │     └── models/    (输入/输出数据模型)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod error;
mod icon;
mod models;
mod pipeline;
mod utils;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let code = commands::run(std::env::args_os());
    std::process::exit(code);
}
