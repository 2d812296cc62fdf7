//! # 转换流水线
//!
//! 对一个 (输入, 输出) 任务执行：读取 → 可选优化 → 编码 → 写出。
//!
//! ## 目标解析
//! | 输入 | 输出 | 行为 |
//! |---|---|---|
//! | 目录 | 无 | 目录内所有 `.svg` 原地转换 |
//! | 目录 | 目录 | 按相对路径镜像写到输出目录，按需创建子目录 |
//! | 目录 | 文件 | 第一个文件写到输出文件，其余原地转换 |
//! | 文本 | 无 / 目录 | 写到标准输出 |
//! | 文本 | 文件 | 写到该文件 |
//! | 文件 | 无 | 同名 `.icon` 文件（`-` 仍为标准输出） |
//! | 文件 | 目录 | 标准输入写到标准输出，否则写到 `<目录>/<文件名>.icon` |
//! | 文件 | 文件 | 写到该文件（`-` 为标准输出） |
//!
//! 任一阶段失败只影响当前文件：优化或编码失败时不写任何内容。
//!
//! ## 依赖关系
//! - 被 `batch/runner.rs` 调用
//! - 使用 `batch/collector.rs` 展开目录
//! - 使用 `icon/` 的 `Encoder` 与 `Optimizer`

use crate::batch::collector::{FileCollector, SVG_SUFFIX};
use crate::batch::runner::{BatchResult, ProcessResult};
use crate::error::{Result, SkiafyError};
use crate::icon::{EncodeOptions, Encoder, Optimizer};
use crate::models::{DestinationItem, DestinationKind, SourceItem, SourceKind, STDIO};
use crate::utils::output;

use std::borrow::Cow;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// 图标文件扩展名
pub const ICON_EXTENSION: &str = "icon";

/// 运行级转换选项
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOptions {
    /// 编码前先优化 SVG
    pub optimize: bool,
    /// 只输出错误信息
    pub quiet: bool,
    /// 末尾输出 `END` 行
    pub output_end: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            optimize: true,
            quiet: false,
            output_end: false,
        }
    }
}

/// 写出目标
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Stdout,
    File(PathBuf),
}

impl Target {
    /// `-` 解析为标准输出
    pub fn from_value(value: &str) -> Self {
        if value == STDIO {
            Target::Stdout
        } else {
            Target::File(PathBuf::from(value))
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Stdout => write!(f, "{}", STDIO),
            Target::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// 将路径的扩展名替换为 `.icon`（`-` 保持不变）
pub fn icon_target(source: &str) -> Target {
    match Target::from_value(source) {
        Target::Stdout => Target::Stdout,
        Target::File(path) => Target::File(path.with_extension(ICON_EXTENSION)),
    }
}

/// 单项转换器
pub struct Converter<'a, W: Write> {
    options: ConvertOptions,
    encoder: &'a dyn Encoder,
    optimizer: &'a dyn Optimizer,
    stdin: Option<&'a str>,
    stdout: W,
    result: BatchResult,
}

impl<'a, W: Write> Converter<'a, W> {
    pub fn new(
        options: ConvertOptions,
        encoder: &'a dyn Encoder,
        optimizer: &'a dyn Optimizer,
        stdout: W,
    ) -> Self {
        Self {
            options,
            encoder,
            optimizer,
            stdin: None,
            stdout,
            result: BatchResult::default(),
        }
    }

    /// 设置已读取的标准输入
    pub fn with_stdin(mut self, stdin: Option<&'a str>) -> Self {
        self.stdin = stdin;
        self
    }

    /// 结束并返回统计结果
    pub fn finish(self) -> BatchResult {
        self.result
    }

    /// 转换一个任务
    pub fn convert(&mut self, source: &SourceItem, destination: Option<&DestinationItem>) {
        match (source.kind, destination) {
            (SourceKind::Directory, None) => {
                let dir = Path::new(&source.value);
                let files = expand(dir);
                self.convert_files(&files, dir, dir, false);
            }
            (
                SourceKind::Directory,
                Some(DestinationItem {
                    kind: DestinationKind::Directory,
                    value: out_dir,
                    ..
                }),
            ) => {
                let dir = Path::new(&source.value);
                let files = expand(dir);
                self.convert_files(&files, dir, Path::new(out_dir), true);
            }
            (
                SourceKind::Directory,
                Some(DestinationItem {
                    kind: DestinationKind::File,
                    value: out_file,
                    ..
                }),
            ) => {
                let dir = Path::new(&source.value);
                let files = expand(dir);
                if let Some((first, rest)) = files.split_first() {
                    let input = dir.join(first).display().to_string();
                    self.convert_file(&input, Target::from_value(out_file));
                    self.convert_files(rest, dir, dir, false);
                }
            }
            (SourceKind::String, None)
            | (
                SourceKind::String,
                Some(DestinationItem {
                    kind: DestinationKind::Directory,
                    ..
                }),
            ) => {
                self.convert_literal(&source.value, Target::Stdout);
            }
            (
                SourceKind::String,
                Some(DestinationItem {
                    kind: DestinationKind::File,
                    value: out_file,
                    ..
                }),
            ) => {
                self.convert_literal(&source.value, Target::from_value(out_file));
            }
            (SourceKind::File, None) => {
                self.convert_file(&source.value, icon_target(&source.value));
            }
            (
                SourceKind::File,
                Some(DestinationItem {
                    kind: DestinationKind::Directory,
                    value: out_dir,
                    ..
                }),
            ) => {
                let target = if source.is_stdin() {
                    Target::Stdout
                } else {
                    let name = Path::new(&source.value)
                        .file_name()
                        .map(|n| Path::new(n).with_extension(ICON_EXTENSION))
                        .unwrap_or_default();
                    Target::File(Path::new(out_dir).join(name))
                };
                self.convert_file(&source.value, target);
            }
            (
                SourceKind::File,
                Some(DestinationItem {
                    kind: DestinationKind::File,
                    value: out_file,
                    ..
                }),
            ) => {
                self.convert_file(&source.value, Target::from_value(out_file));
            }
        }
    }

    /// 转换目录中的一组文件（相对路径），写到 `to_dir` 下的对应位置
    fn convert_files(&mut self, files: &[PathBuf], from_dir: &Path, to_dir: &Path, create_dir: bool) {
        for file in files {
            let input = from_dir.join(file).display().to_string();
            let target = to_dir.join(file.with_extension(ICON_EXTENSION));

            if create_dir {
                if let Err(e) = ensure_parent_dir(&target) {
                    self.record(&input, Err(e));
                    continue;
                }
            }

            self.convert_file(&input, Target::File(target));
        }
    }

    /// 转换一个文件（`-` 为标准输入）
    fn convert_file(&mut self, input: &str, target: Target) {
        let outcome = self
            .read_source(input)
            .and_then(|svg| self.convert_data(input, &svg, &target));
        self.record(input, outcome.map(|_| target));
    }

    /// 转换命令行给出的 SVG 文本
    fn convert_literal(&mut self, svg: &str, target: Target) {
        let label = output::abbreviate(svg);
        let outcome = self.convert_data(&label, svg, &target);
        self.record(&label, outcome.map(|_| target));
    }

    fn read_source(&self, input: &str) -> Result<Cow<'a, str>> {
        if input == STDIO {
            return Ok(Cow::Borrowed(self.stdin.unwrap_or_default()));
        }
        fs::read(input)
            .map(|bytes| Cow::Owned(String::from_utf8_lossy(&bytes).into_owned()))
            .map_err(|e| SkiafyError::FileReadError {
                path: input.to_string(),
                source: e,
            })
    }

    /// 优化 → 编码 → 写出
    fn convert_data(&mut self, label: &str, svg: &str, target: &Target) -> Result<()> {
        let svg = if self.options.optimize {
            Cow::Owned(
                self.optimizer
                    .optimize(svg)
                    .map_err(|e| SkiafyError::OptimizeError {
                        target: target.to_string(),
                        reason: e.to_string(),
                    })?,
            )
        } else {
            Cow::Borrowed(svg)
        };

        let options = EncodeOptions {
            output_end: self.options.output_end,
        };
        let data = self
            .encoder
            .encode(&svg, options)
            .map_err(|e| SkiafyError::EncodeError {
                target: target.to_string(),
                reason: e.to_string(),
            })?;

        self.write(label, target, &data)
    }

    fn write(&mut self, label: &str, target: &Target, data: &[u8]) -> Result<()> {
        let write_error = |e: std::io::Error| SkiafyError::FileWriteError {
            path: target.to_string(),
            input: label.to_string(),
            source: e,
        };

        match target {
            Target::Stdout => {
                self.stdout.write_all(data).map_err(write_error)?;
                self.stdout.write_all(b"\n").map_err(write_error)?;
                self.stdout.flush().map_err(write_error)?;
            }
            Target::File(path) => {
                fs::write(path, data).map_err(write_error)?;
                if !self.options.quiet {
                    output::print_conversion(label, &target.to_string());
                }
            }
        }
        Ok(())
    }

    fn record(&mut self, input: &str, outcome: Result<Target>) {
        match outcome {
            Ok(target) => self.result.merge(ProcessResult::Success(target.to_string())),
            Err(e) => {
                output::print_error(&e.to_string());
                self.result
                    .merge(ProcessResult::Failed(input.to_string(), e.to_string()));
            }
        }
    }
}

/// 展开目录中的 `.svg` 文件
fn expand(dir: &Path) -> Vec<PathBuf> {
    FileCollector::new(dir).with_suffix(SVG_SUFFIX).collect()
}

/// 创建目标文件的所有上级目录（已存在不算错误）
fn ensure_parent_dir(target: &Path) -> Result<()> {
    match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|e| SkiafyError::CreateDirError {
                path: parent.display().to_string(),
                source: e,
            })
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use tempfile::TempDir;

    /// 输出 `ICON:<svg>` 的编码器
    struct EchoEncoder;

    impl Encoder for EchoEncoder {
        fn encode(&self, svg: &str, options: EncodeOptions) -> Result<Vec<u8>> {
            let mut out = format!("ICON:{}", svg.trim());
            if options.output_end {
                out.push_str("\nEND");
            }
            Ok(out.into_bytes())
        }
    }

    /// 总是失败的优化器，记录收到的输入
    #[derive(Default)]
    struct FailingOptimizer {
        seen: RefCell<Vec<String>>,
    }

    impl Optimizer for FailingOptimizer {
        fn optimize(&self, svg: &str) -> Result<String> {
            self.seen.borrow_mut().push(svg.to_string());
            Err(SkiafyError::InvalidSvg("nope".to_string()))
        }
    }

    fn quiet(optimize: bool) -> ConvertOptions {
        ConvertOptions {
            optimize,
            quiet: true,
            output_end: false,
        }
    }

    fn s(p: &Path) -> String {
        p.display().to_string()
    }

    fn write_svg(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, format!("<svg id=\"{}\"/>", rel)).unwrap();
    }

    fn run(
        source: SourceItem,
        destination: Option<DestinationItem>,
        stdin: Option<&str>,
    ) -> (BatchResult, String) {
        let optimizer = FailingOptimizer::default();
        let mut stdout = Vec::new();
        let result = {
            let mut converter =
                Converter::new(quiet(false), &EchoEncoder, &optimizer, &mut stdout).with_stdin(stdin);
            converter.convert(&source, destination.as_ref());
            converter.finish()
        };
        (result, String::from_utf8(stdout).unwrap())
    }

    #[test]
    fn test_icon_target() {
        assert_eq!(icon_target("-"), Target::Stdout);
        assert_eq!(icon_target("a/b.svg"), Target::File(PathBuf::from("a/b.icon")));
        assert_eq!(icon_target("noext"), Target::File(PathBuf::from("noext.icon")));
    }

    #[test]
    fn test_directory_to_directory_mirrors_tree() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        write_svg(src.path(), "a.svg");
        write_svg(src.path(), "sub/b.svg");

        let (result, stdout) = run(
            SourceItem::path(s(src.path())),
            Some(DestinationItem::path(s(out.path()), "-o out")),
            None,
        );

        assert_eq!(result.success, 2);
        assert!(stdout.is_empty());
        assert_eq!(
            fs::read_to_string(out.path().join("a.icon")).unwrap(),
            "ICON:<svg id=\"a.svg\"/>"
        );
        assert!(out.path().join("sub").is_dir());
        assert!(out.path().join("sub/b.icon").exists());
    }

    #[test]
    fn test_directory_to_directory_existing_subdir() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        write_svg(src.path(), "sub/b.svg");
        fs::create_dir_all(out.path().join("sub")).unwrap();

        let (result, _) = run(
            SourceItem::path(s(src.path())),
            Some(DestinationItem::path(s(out.path()), "-o out")),
            None,
        );

        assert_eq!(result.success, 1);
        assert!(out.path().join("sub/b.icon").exists());
    }

    #[test]
    fn test_directory_to_directory_mkdir_failure_is_isolated() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        write_svg(src.path(), "a.svg");
        write_svg(src.path(), "blocked/b.svg");
        fs::write(out.path().join("blocked"), "not a dir").unwrap();

        let (result, _) = run(
            SourceItem::path(s(src.path())),
            Some(DestinationItem::path(s(out.path()), "-o out")),
            None,
        );

        assert_eq!(result.success, 1);
        assert_eq!(result.failed, 1);
        assert!(result.failures[0].1.starts_with("mkdir"));
        assert!(out.path().join("a.icon").exists());
    }

    #[test]
    fn test_directory_to_file_first_match_rest_in_place() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        write_svg(src.path(), "a.svg");
        write_svg(src.path(), "b.svg");
        let out_file = out.path().join("out.icon");

        let (result, _) = run(
            SourceItem::path(s(src.path())),
            Some(DestinationItem::path(s(&out_file), "-o out.icon")),
            None,
        );

        assert_eq!(result.success, 2);
        assert_eq!(
            fs::read_to_string(&out_file).unwrap(),
            "ICON:<svg id=\"a.svg\"/>"
        );
        assert!(!src.path().join("a.icon").exists());
        assert_eq!(
            fs::read_to_string(src.path().join("b.icon")).unwrap(),
            "ICON:<svg id=\"b.svg\"/>"
        );
    }

    #[test]
    fn test_directory_in_place() {
        let src = TempDir::new().unwrap();
        write_svg(src.path(), "a.svg");
        write_svg(src.path(), "sub/b.svg");
        fs::write(src.path().join("readme.txt"), "skip").unwrap();

        let (result, _) = run(SourceItem::path(s(src.path())), None, None);

        assert_eq!(result.success, 2);
        assert!(src.path().join("a.icon").exists());
        assert!(src.path().join("sub/b.icon").exists());
        assert!(!src.path().join("readme.icon").exists());
    }

    #[test]
    fn test_empty_directory_does_nothing() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();

        let (result, _) = run(
            SourceItem::path(s(src.path())),
            Some(DestinationItem::path(s(&out.path().join("x.icon")), "-o x.icon")),
            None,
        );

        assert_eq!(result.total(), 0);
        assert!(!out.path().join("x.icon").exists());
    }

    #[test]
    fn test_string_without_destination_goes_to_stdout() {
        let (result, stdout) = run(SourceItem::literal("<svg/>"), None, None);

        assert_eq!(result.success, 1);
        assert_eq!(result.outputs, vec!["-"]);
        assert_eq!(stdout, "ICON:<svg/>\n");
    }

    #[test]
    fn test_string_to_directory_downgrades_to_stdout() {
        let out = TempDir::new().unwrap();

        let (_, stdout) = run(
            SourceItem::literal("<svg/>"),
            Some(DestinationItem::path(s(out.path()), "-o out")),
            None,
        );

        assert_eq!(stdout, "ICON:<svg/>\n");
        assert_eq!(fs::read_dir(out.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_string_to_file() {
        let out = TempDir::new().unwrap();
        let out_file = out.path().join("s.icon");

        let (_, stdout) = run(
            SourceItem::literal("<svg/>"),
            Some(DestinationItem::path(s(&out_file), "-o s.icon")),
            None,
        );

        assert!(stdout.is_empty());
        assert_eq!(fs::read_to_string(out_file).unwrap(), "ICON:<svg/>");
    }

    #[test]
    fn test_file_without_destination_writes_adjacent() {
        let dir = TempDir::new().unwrap();
        write_svg(dir.path(), "logo.svg");

        let (result, _) = run(SourceItem::path(s(&dir.path().join("logo.svg"))), None, None);

        assert_eq!(result.success, 1);
        assert!(dir.path().join("logo.icon").exists());
    }

    #[test]
    fn test_file_to_directory_uses_basename() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        write_svg(src.path(), "nested/logo.svg");

        run(
            SourceItem::path(s(&src.path().join("nested/logo.svg"))),
            Some(DestinationItem::path(s(out.path()), "-o out")),
            None,
        );

        assert!(out.path().join("logo.icon").exists());
    }

    #[test]
    fn test_stdin_to_directory_downgrades_to_stdout() {
        let out = TempDir::new().unwrap();

        let (_, stdout) = run(
            SourceItem::stdin(),
            Some(DestinationItem::path(s(out.path()), "-o out")),
            Some("<piped/>"),
        );

        assert_eq!(stdout, "ICON:<piped/>\n");
        assert_eq!(fs::read_dir(out.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_file_to_stdout_destination() {
        let dir = TempDir::new().unwrap();
        write_svg(dir.path(), "a.svg");

        let (_, stdout) = run(
            SourceItem::path(s(&dir.path().join("a.svg"))),
            Some(DestinationItem::path("-", "-o -")),
            None,
        );

        assert_eq!(stdout, "ICON:<svg id=\"a.svg\"/>\n");
    }

    #[test]
    fn test_non_utf8_file_is_decoded_lossily() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("latin1.svg");
        fs::write(&input, [b'<', b's', 0xe9, b'/', b'>']).unwrap();

        let (result, _) = run(SourceItem::path(s(&input)), None, None);

        assert_eq!(result.success, 1);
        assert_eq!(
            fs::read_to_string(dir.path().join("latin1.icon")).unwrap(),
            "ICON:<s\u{FFFD}/>"
        );
    }

    #[test]
    fn test_missing_file_reports_read_failure() {
        let dir = TempDir::new().unwrap();
        let missing = s(&dir.path().join("missing.svg"));

        let (result, _) = run(SourceItem::path(missing.clone()), None, None);

        assert_eq!(result.failed, 1);
        assert_eq!(result.failures[0].0, missing);
        assert!(result.failures[0].1.starts_with("read failed"));
        assert!(!dir.path().join("missing.icon").exists());
    }

    #[test]
    fn test_write_failure_names_source_and_target() {
        let dir = TempDir::new().unwrap();
        write_svg(dir.path(), "a.svg");
        let target = dir.path().join("no_such_dir").join("a.icon");

        let (result, _) = run(
            SourceItem::path(s(&dir.path().join("a.svg"))),
            Some(DestinationItem::path(s(&target), "-o a.icon")),
            None,
        );

        assert_eq!(result.failed, 1);
        let message = &result.failures[0].1;
        assert!(message.contains(&s(&target)));
        assert!(message.contains("a.svg"));
    }

    #[test]
    fn test_optimize_failure_writes_nothing() {
        let dir = TempDir::new().unwrap();
        write_svg(dir.path(), "a.svg");
        let optimizer = FailingOptimizer::default();
        let mut stdout = Vec::new();

        let result = {
            let mut converter =
                Converter::new(quiet(true), &EchoEncoder, &optimizer, &mut stdout);
            converter.convert(&SourceItem::path(s(&dir.path().join("a.svg"))), None);
            converter.convert(&SourceItem::literal("<svg/>"), None);
            converter.finish()
        };

        assert_eq!(result.failed, 2);
        assert_eq!(optimizer.seen.borrow().len(), 2);
        assert!(result.failures[0].1.contains("a.icon"));
        assert!(!dir.path().join("a.icon").exists());
        assert!(stdout.is_empty());
    }

    #[test]
    fn test_end_marker_option() {
        let optimizer = FailingOptimizer::default();
        let mut stdout = Vec::new();
        let options = ConvertOptions {
            optimize: false,
            quiet: true,
            output_end: true,
        };

        {
            let mut converter = Converter::new(options, &EchoEncoder, &optimizer, &mut stdout);
            converter.convert(&SourceItem::literal("<svg/>"), None);
        }

        assert_eq!(String::from_utf8(stdout).unwrap(), "ICON:<svg/>\nEND\n");
    }
}
