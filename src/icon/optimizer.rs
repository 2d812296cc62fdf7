//! # SVG 优化器
//!
//! 用 `usvg` 解析后重新序列化，得到规范化的 SVG：
//! 去掉注释、元数据、DOCTYPE、编辑器私有数据、未使用的 defs 和隐藏元素，
//! 基本图形转换为 path，样式表解析为属性。
//!
//! ## 依赖关系
//! - 被 `pipeline/` 通过 `Optimizer` trait 调用
//! - 使用 `usvg`

use super::{parse_svg, Optimizer};
use crate::error::Result;

/// 基于 usvg 的优化器
#[derive(Debug, Default, Clone, Copy)]
pub struct UsvgOptimizer;

impl UsvgOptimizer {
    pub fn new() -> Self {
        Self
    }
}

impl Optimizer for UsvgOptimizer {
    fn optimize(&self, svg: &str) -> Result<String> {
        let tree = parse_svg(svg)?;
        Ok(tree.to_string(&usvg::WriteOptions::default()))
    }
}
