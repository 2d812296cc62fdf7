//! # 数据模型模块
//!
//! 定义命令行输入源与输出目标的数据模型。
//!
//! ## 依赖关系
//! - 被 `cli/`, `batch/`, `pipeline/` 使用
//! - 子模块: item

pub mod item;

pub use item::{DestinationItem, DestinationKind, SourceItem, SourceKind, STDIO};
