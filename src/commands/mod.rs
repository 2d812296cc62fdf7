//! # 命令执行模块
//!
//! 解析命令行并分派到转换逻辑，决定进程退出码。
//!
//! ## 退出码
//! - `0`: 正常完成（包括 `--help`、`--version`，以及有单项失败的批次）
//! - `1`: 参数错误、没有输入、标准输入读取失败
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `utils/output.rs`
//! - 子模块: convert

pub mod convert;

use crate::cli::Cli;
use crate::error::{Result, SkiafyError};
use crate::utils::output;

use clap::{CommandFactory, FromArgMatches};
use std::ffi::OsString;
use std::io::IsTerminal;

/// 解析参数并执行，返回退出码
pub fn run<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    let no_arguments = args.len() <= 1;
    let mut command = Cli::command();

    let matches = match command.try_get_matches_from_mut(args) {
        Ok(matches) => matches,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() { 1 } else { 0 };
        }
    };

    match execute(&matches) {
        Ok(()) => 0,
        // 不带参数且没有管道输入时只显示帮助
        Err(SkiafyError::NoInputs) if no_arguments => {
            let _ = command.print_help();
            0
        }
        Err(e) => {
            if matches!(e, SkiafyError::NoInputs) {
                let _ = command.print_help();
            }
            output::print_error(&e.to_string());
            1
        }
    }
}

fn execute(matches: &clap::ArgMatches) -> Result<()> {
    let cli = Cli::from_arg_matches(matches)
        .map_err(|e| SkiafyError::InvalidArgument(e.to_string()))?;
    let stdin_piped = !std::io::stdin().is_terminal();
    let inputs = cli.batch_inputs(matches, stdin_piped);
    convert::execute(&inputs, cli.options())
}
