//! # 批量处理模块
//!
//! 把命令行给出的输入/输出组织成一个顺序执行的批次。
//!
//! ## 功能
//! - 递归收集目录中的 `.svg` 文件
//! - 输入/输出配对与默认输出目录选择
//! - 标准输入一次性读取
//! - 逐项执行与统计
//!
//! ## 依赖关系
//! - 被 `commands/convert.rs` 使用
//! - 使用 `pipeline/` 执行单项转换

pub mod collector;
pub mod planner;
pub mod runner;

pub use runner::{BatchInputs, BatchRunner};
