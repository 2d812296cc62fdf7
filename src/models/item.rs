//! # 输入/输出项模型
//!
//! 命令行中的每个输入源和输出目标在解析后都被归类为一个不可变的项。
//!
//! ## 约定
//! - 输入值 `-` 表示标准输入，输出值 `-` 表示标准输出，二者都归为 `File` 类型
//! - 路径是否存在在归类时不检查，读取时才会失败
//!
//! ## 依赖关系
//! - 被 `cli/`, `batch/`, `pipeline/` 使用
//! - 无外部模块依赖

use std::fmt;
use std::path::Path;

/// 标准输入/标准输出的占位值
pub const STDIO: &str = "-";

/// 输入源类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// 直接给出的 SVG 文本
    String,
    /// 文件路径（或 `-` 表示标准输入）
    File,
    /// 目录路径
    Directory,
}

/// 输出目标类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestinationKind {
    /// 文件路径（或 `-` 表示标准输出）
    File,
    /// 目录路径
    Directory,
}

/// 一个输入源
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceItem {
    pub kind: SourceKind,
    pub value: String,
}

impl SourceItem {
    /// SVG 文本输入
    pub fn literal(svg: impl Into<String>) -> Self {
        Self {
            kind: SourceKind::String,
            value: svg.into(),
        }
    }

    /// 按文件系统状态归类的路径输入
    pub fn path(path: impl Into<String>) -> Self {
        let value = path.into();
        let kind = if is_dir(&value) {
            SourceKind::Directory
        } else {
            SourceKind::File
        };
        Self { kind, value }
    }

    /// 标准输入
    pub fn stdin() -> Self {
        Self {
            kind: SourceKind::File,
            value: STDIO.to_string(),
        }
    }

    /// 是否读取标准输入
    pub fn is_stdin(&self) -> bool {
        self.kind == SourceKind::File && self.value == STDIO
    }
}

/// 一个输出目标
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationItem {
    pub kind: DestinationKind,
    pub value: String,
    /// 命令行中的原始写法，仅用于提示被忽略的输出
    pub token: String,
}

impl DestinationItem {
    /// 按文件系统状态归类的输出路径
    pub fn path(path: impl Into<String>, token: impl Into<String>) -> Self {
        let value = path.into();
        let kind = if is_dir(&value) {
            DestinationKind::Directory
        } else {
            DestinationKind::File
        };
        Self {
            kind,
            value,
            token: token.into(),
        }
    }

    /// 是否写到标准输出
    pub fn is_stdout(&self) -> bool {
        self.kind == DestinationKind::File && self.value == STDIO
    }
}

impl fmt::Display for DestinationItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token)
    }
}

/// 路径存在且为目录
pub fn is_dir(path: &str) -> bool {
    path != STDIO && Path::new(path).is_dir()
}
