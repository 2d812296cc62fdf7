//! # 批量执行器
//!
//! 顺序执行整个批次：读取标准输入 → 生成执行计划 → 逐项转换。
//!
//! ## 功能
//! - 任一输入为 `-` 时，先一次性读完标准输入再开始转换，所有 `-` 输入共享这份数据
//! - 先处理按位置配对的任务，再处理剩余输入和尾随输入
//! - 单项失败只记录，不中断批次
//!
//! ## 依赖关系
//! - 被 `commands/convert.rs` 调用
//! - 使用 `batch/planner.rs` 生成计划
//! - 使用 `pipeline/` 执行单项转换

use super::planner;
use crate::error::{Result, SkiafyError};
use crate::icon::{Encoder, Optimizer};
use crate::models::{DestinationItem, SourceItem};
use crate::pipeline::{ConvertOptions, Converter};
use crate::utils::output;

use std::io::{Read, Write};

/// 单项处理结果
#[derive(Debug, Clone)]
pub enum ProcessResult {
    /// 处理成功（目标）
    Success(String),
    /// 处理失败
    Failed(String, String), // (输入, 错误信息)
}

/// 批量处理结果统计
#[derive(Debug, Default)]
pub struct BatchResult {
    /// 成功数量
    pub success: usize,
    /// 失败数量
    pub failed: usize,
    /// 成功写出的目标
    pub outputs: Vec<String>,
    /// 失败详情
    pub failures: Vec<(String, String)>,
}

impl BatchResult {
    /// 合并处理结果
    pub fn merge(&mut self, result: ProcessResult) {
        match result {
            ProcessResult::Success(target) => {
                self.success += 1;
                self.outputs.push(target);
            }
            ProcessResult::Failed(input, err) => {
                self.failed += 1;
                self.failures.push((input, err));
            }
        }
    }

    /// 总处理数量
    pub fn total(&self) -> usize {
        self.success + self.failed
    }
}

/// 一次运行的全部输入/输出
#[derive(Debug, Default)]
pub struct BatchInputs {
    /// `-s` / `-i` 给出的输入（保持命令行顺序）
    pub sources: Vec<SourceItem>,
    /// 尾随的位置参数输入
    pub trailing: Vec<SourceItem>,
    /// `-o` 给出的输出
    pub destinations: Vec<DestinationItem>,
}

impl BatchInputs {
    /// 是否有输入需要读取标准输入
    pub fn needs_stdin(&self) -> bool {
        self.sources
            .iter()
            .chain(&self.trailing)
            .any(SourceItem::is_stdin)
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty() && self.trailing.is_empty()
    }
}

/// 批量执行器
pub struct BatchRunner<'a> {
    options: ConvertOptions,
    encoder: &'a dyn Encoder,
    optimizer: &'a dyn Optimizer,
}

impl<'a> BatchRunner<'a> {
    /// 创建新的批量执行器
    pub fn new(options: ConvertOptions, encoder: &'a dyn Encoder, optimizer: &'a dyn Optimizer) -> Self {
        Self {
            options,
            encoder,
            optimizer,
        }
    }

    /// 执行批次
    ///
    /// 只有读取标准输入失败会返回错误，此时还没有任何转换开始。
    pub fn run<R: Read, W: Write>(
        &self,
        inputs: &BatchInputs,
        stdin: R,
        stdout: W,
    ) -> Result<BatchResult> {
        let stdin_data = if inputs.needs_stdin() {
            Some(capture_stdin(stdin)?)
        } else {
            None
        };

        let plan = planner::plan(&inputs.sources, &inputs.trailing, &inputs.destinations);
        if let Some(message) = plan.discarded_message() {
            output::print_warning(&message);
        }

        let mut converter = Converter::new(self.options, self.encoder, self.optimizer, stdout)
            .with_stdin(stdin_data.as_deref());

        for (source, destination) in plan.jobs() {
            converter.convert(source, destination);
        }

        Ok(converter.finish())
    }
}

/// 读完标准输入（非 UTF-8 字节替换为 U+FFFD）
pub fn capture_stdin<R: Read>(mut stdin: R) -> Result<String> {
    let mut data = Vec::new();
    stdin
        .read_to_end(&mut data)
        .map_err(SkiafyError::StdinReadError)?;
    Ok(String::from_utf8_lossy(&data).into_owned())
}
