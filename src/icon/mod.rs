//! # 图标转换模块
//!
//! SVG 优化与 Skia vector icon 编码。
//!
//! 转换流水线只依赖这里的两个 trait，具体实现基于 `usvg`。
//!
//! ## 依赖关系
//! - 被 `pipeline/` 使用
//! - 子模块: encoder, optimizer

pub mod encoder;
pub mod optimizer;

pub use encoder::SkiaIconEncoder;
pub use optimizer::UsvgOptimizer;

use crate::error::Result;

/// 编码选项
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodeOptions {
    /// 末尾输出 `END` 行
    pub output_end: bool,
}

/// SVG 到图标数据的编码器
pub trait Encoder {
    /// 相同输入和选项必须得到相同输出
    fn encode(&self, svg: &str, options: EncodeOptions) -> Result<Vec<u8>>;
}

/// SVG 清理优化
pub trait Optimizer {
    fn optimize(&self, svg: &str) -> Result<String>;
}

/// 解析 SVG 文本
pub(crate) fn parse_svg(svg: &str) -> Result<usvg::Tree> {
    let options = usvg::Options::default();
    usvg::Tree::from_str(svg, &options)
        .map_err(|e| crate::error::SkiafyError::InvalidSvg(e.to_string()))
}
