//! # 输入/输出配对
//!
//! 根据输入源和输出目标的顺序生成执行计划。
//!
//! ## 规则
//! 1. 前 `min(输入数, 输出数)` 个输入与输出按位置一一配对，不看类型
//! 2. 剩余输出中第一个目录作为默认输出目录，其后的输出全部忽略
//! 3. 剩余输入与尾随输入依次排队：同下标的剩余输出存在则使用之，否则使用默认输出目录
//!
//! 计划只保存对原始列表的引用与下标，不修改参数列表。
//!
//! ## 依赖关系
//! - 被 `batch/runner.rs` 调用
//! - 使用 `models/`

use crate::models::{DestinationItem, DestinationKind, SourceItem};

/// 执行计划
#[derive(Debug)]
pub struct ExecutionPlan<'a> {
    /// 按位置配对的输入/输出
    pub pairs: Vec<(&'a SourceItem, &'a DestinationItem)>,
    /// 配对之后剩余的输入，后接尾随输入
    pub remaining_sources: Vec<&'a SourceItem>,
    /// 配对之后剩余的输出（截止到默认输出目录为止）
    pub unpaired_destinations: &'a [DestinationItem],
    /// 默认输出目录
    pub default_destination: Option<&'a DestinationItem>,
    /// 被忽略的输出
    pub discarded: &'a [DestinationItem],
}

impl<'a> ExecutionPlan<'a> {
    /// 第 `index` 个剩余输入对应的输出
    pub fn destination_for(&self, index: usize) -> Option<&'a DestinationItem> {
        self.unpaired_destinations
            .get(index)
            .or(self.default_destination)
    }

    /// 按处理顺序列出所有 (输入, 输出) 任务
    pub fn jobs(&self) -> Vec<(&'a SourceItem, Option<&'a DestinationItem>)> {
        let paired = self.pairs.iter().map(|&(s, d)| (s, Some(d)));
        let queued = self
            .remaining_sources
            .iter()
            .enumerate()
            .map(|(i, &s)| (s, self.destination_for(i)));
        paired.chain(queued).collect()
    }

    /// 被忽略输出的提示文本（原始写法以空格连接）
    pub fn discarded_message(&self) -> Option<String> {
        if self.discarded.is_empty() {
            return None;
        }
        let tokens: Vec<&str> = self.discarded.iter().map(|d| d.token.as_str()).collect();
        Some(format!("ignore extra output arguments: {}", tokens.join(" ")))
    }
}

/// 生成执行计划
pub fn plan<'a>(
    sources: &'a [SourceItem],
    trailing: &'a [SourceItem],
    destinations: &'a [DestinationItem],
) -> ExecutionPlan<'a> {
    let n = sources.len().min(destinations.len());
    let (paired_sources, rest_sources) = sources.split_at(n);
    let (paired_destinations, rest_destinations) = destinations.split_at(n);

    let default_index = rest_destinations
        .iter()
        .position(|d| d.kind == DestinationKind::Directory);

    let (unpaired_destinations, discarded) = match default_index {
        Some(i) => rest_destinations.split_at(i + 1),
        None => (rest_destinations, &rest_destinations[rest_destinations.len()..]),
    };

    ExecutionPlan {
        pairs: paired_sources.iter().zip(paired_destinations).collect(),
        remaining_sources: rest_sources.iter().chain(trailing).collect(),
        unpaired_destinations,
        default_destination: default_index.map(|i| &rest_destinations[i]),
        discarded,
    }
}
