//! # 统一错误处理模块
//!
//! 定义 skiafy 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// skiafy 统一错误类型
#[derive(Error, Debug)]
pub enum SkiafyError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("read failed, file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("read failed, file: - (stdin)")]
    StdinReadError(#[source] std::io::Error),

    #[error("write {path} failed, reason: {source}, source: {input}")]
    FileWriteError {
        path: String,
        input: String,
        #[source]
        source: std::io::Error,
    },

    #[error("mkdir {path} failed, reason: {source}")]
    CreateDirError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // ─────────────────────────────────────────────────────────────
    // SVG 处理错误
    // ─────────────────────────────────────────────────────────────
    #[error("optimize failed for target: {target}, reason: {reason}")]
    OptimizeError { target: String, reason: String },

    #[error("encode failed for target: {target}, reason: {reason}")]
    EncodeError { target: String, reason: String },

    #[error("invalid SVG: {0}")]
    InvalidSvg(String),

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("no inputs found")]
    NoInputs,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, SkiafyError>;
