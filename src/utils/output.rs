//! # 美化输出工具
//!
//! 提供统一的终端输出样式。
//!
//! 标准输出可能承载转换结果，因此错误和警告一律写到标准错误。
//!
//! ## 依赖关系
//! - 被 `commands/`, `batch/`, `pipeline/` 使用
//! - 使用 `colored` crate

use colored::Colorize;

/// 文本输入在提示信息中显示的最大字符数
const LABEL_MAX_CHARS: usize = 32;

/// 打印错误消息
pub fn print_error(msg: &str) {
    eprintln!("{} {}", "[ERR]".red().bold(), msg);
}

/// 打印警告消息
pub fn print_warning(msg: &str) {
    eprintln!("{} {}", "[WARN]".yellow().bold(), msg);
}

/// 打印汇总消息
pub fn print_done(msg: &str) {
    eprintln!("{} {}", "[DONE]".green().bold(), msg);
}

/// 打印转换成功消息
pub fn print_conversion(from: &str, to: &str) {
    println!(
        "{} {} {} {}",
        "[OK]".green().bold(),
        from.dimmed(),
        "->".cyan(),
        to
    );
}

/// 压缩为单行并截断过长的文本
pub fn abbreviate(text: &str) -> String {
    let line = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if line.chars().count() <= LABEL_MAX_CHARS {
        return line;
    }
    let head: String = line.chars().take(LABEL_MAX_CHARS).collect();
    format!("{}...", head)
}
