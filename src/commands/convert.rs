//! # 转换命令实现
//!
//! 组装编码器、优化器和批量执行器，执行一次完整的转换。
//!
//! ## 依赖关系
//! - 被 `commands/mod.rs` 调用
//! - 使用 `batch/`, `icon/`, `utils/output.rs`

use crate::batch::{BatchInputs, BatchRunner};
use crate::error::{Result, SkiafyError};
use crate::icon::{SkiaIconEncoder, UsvgOptimizer};
use crate::pipeline::ConvertOptions;
use crate::utils::output;

use std::io;

/// 执行转换
///
/// 单项失败不影响返回值，只有参数错误或标准输入读取失败才返回错误。
pub fn execute(inputs: &BatchInputs, options: ConvertOptions) -> Result<()> {
    if inputs.is_empty() {
        return Err(SkiafyError::NoInputs);
    }

    let encoder = SkiaIconEncoder::new();
    let optimizer = UsvgOptimizer::new();
    let runner = BatchRunner::new(options, &encoder, &optimizer);

    let result = runner.run(inputs, io::stdin().lock(), io::stdout())?;

    if !options.quiet && result.failed > 0 {
        output::print_done(&format!(
            "Converted {} of {} item(s), {} failed",
            result.success,
            result.total(),
            result.failed
        ));
    }

    Ok(())
}
