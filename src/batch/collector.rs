//! # 文件收集器
//!
//! 递归收集目录下匹配后缀的文件，返回相对于该目录的路径。
//!
//! ## 功能
//! - 深度优先递归遍历
//! - 按文件名排序，保证同一文件系统上顺序可复现
//! - 后缀匹配区分大小写，空后缀匹配所有文件
//! - 目录为空或不存在时返回空列表
//!
//! ## 依赖关系
//! - 被 `pipeline/` 调用
//! - 使用 `walkdir` 遍历目录

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// SVG 文件后缀
pub const SVG_SUFFIX: &str = ".svg";

/// 文件收集器
pub struct FileCollector {
    /// 根目录
    root: PathBuf,
    /// 文件名后缀
    suffix: String,
}

impl FileCollector {
    /// 创建新的文件收集器（默认匹配所有文件）
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            suffix: String::new(),
        }
    }

    /// 设置文件名后缀
    pub fn with_suffix(mut self, suffix: &str) -> Self {
        self.suffix = suffix.to_string();
        self
    }

    /// 收集所有匹配的文件（相对路径）
    pub fn collect(&self) -> Vec<PathBuf> {
        WalkDir::new(&self.root)
            .min_depth(1)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| !e.file_type().is_dir())
            .filter(|e| self.matches_suffix(e.file_name().to_str()))
            .filter_map(|e| {
                e.path()
                    .strip_prefix(&self.root)
                    .ok()
                    .map(Path::to_path_buf)
            })
            .collect()
    }

    fn matches_suffix(&self, name: Option<&str>) -> bool {
        match name {
            Some(name) => self.suffix.is_empty() || name.ends_with(&self.suffix),
            None => false,
        }
    }
}
