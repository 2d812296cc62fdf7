//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数。
//!
//! ## 参数结构
//! - `-s/--string`、`-i/--input`: 输入，可重复，二者按命令行中出现的顺序合并
//! - `-o/--output`: 输出，可重复
//! - 位置参数: 尾随输入（`--input` 的别名）
//! - 标准输入不是终端时，追加一个隐式的 `-` 尾随输入
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 生成 `batch::BatchInputs` 交给 `commands/convert.rs`

use crate::batch::BatchInputs;
use crate::models::{DestinationItem, SourceItem};
use crate::pipeline::ConvertOptions;

use clap::builder::NonEmptyStringValueParser;
use clap::{ArgAction, ArgMatches, Parser};

/// skiafy - SVG 到 Skia vector icon 的批量转换工具
#[derive(Parser, Debug)]
#[command(name = "skiafy")]
#[command(version, disable_version_flag = true)]
#[command(about = "Convert SVG files to Skia vector icon files", long_about = None)]
#[command(after_help = "Use \"-\" as INPUT for STDIN and as OUTPUT for STDOUT.\n\
For a folder INPUT, all *.svg files are converted to *.icon files.")]
pub struct Cli {
    /// Print version
    #[arg(short = 'v', long, action = ArgAction::Version)]
    version: Option<bool>,

    /// Do not optimize SVG input before conversion
    #[arg(short = 'n', long, env = "SKIAFY_NO_OPTIMIZE")]
    pub no_optimize: bool,

    /// Input SVG data string
    #[arg(short = 's', long = "string", value_name = "STRING", value_parser = NonEmptyStringValueParser::new())]
    pub strings: Vec<String>,

    /// Input file or folder, "-" for STDIN
    #[arg(short = 'i', long = "input", value_name = "INPUT", value_parser = NonEmptyStringValueParser::new())]
    pub inputs: Vec<String>,

    /// Output file or folder, "-" for STDOUT
    #[arg(short = 'o', long = "output", value_name = "OUTPUT", value_parser = NonEmptyStringValueParser::new())]
    pub outputs: Vec<String>,

    /// Only show error messages
    #[arg(short, long, env = "SKIAFY_QUIET")]
    pub quiet: bool,

    /// Output END line
    #[arg(short = 'e', long = "end", env = "SKIAFY_OUTPUT_END")]
    pub output_end: bool,

    /// Input files or folders (alias to --input)
    #[arg(value_name = "INPUT", trailing_var_arg = true, allow_hyphen_values = true)]
    pub trailing: Vec<String>,
}

impl Cli {
    /// 转换选项
    pub fn options(&self) -> ConvertOptions {
        ConvertOptions {
            optimize: !self.no_optimize,
            quiet: self.quiet,
            output_end: self.output_end,
        }
    }

    /// 整理输入/输出列表
    ///
    /// `matches` 用于恢复 `-s` 与 `-i` 之间的相对顺序。
    pub fn batch_inputs(&self, matches: &ArgMatches, stdin_piped: bool) -> BatchInputs {
        let mut ordered: Vec<(usize, SourceItem)> = Vec::new();
        if let Some(indices) = matches.indices_of("strings") {
            ordered.extend(indices.zip(&self.strings).map(|(i, v)| (i, SourceItem::literal(v.as_str()))));
        }
        if let Some(indices) = matches.indices_of("inputs") {
            ordered.extend(indices.zip(&self.inputs).map(|(i, v)| (i, SourceItem::path(v.as_str()))));
        }
        ordered.sort_by_key(|(i, _)| *i);

        let mut trailing: Vec<SourceItem> =
            self.trailing.iter().map(|v| SourceItem::path(v.as_str())).collect();
        if stdin_piped {
            trailing.push(SourceItem::stdin());
        }

        BatchInputs {
            sources: ordered.into_iter().map(|(_, item)| item).collect(),
            trailing,
            destinations: self
                .outputs
                .iter()
                .map(|v| DestinationItem::path(v.as_str(), format!("-o {}", v)))
                .collect(),
        }
    }
}
