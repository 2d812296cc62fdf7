//! # Skia vector icon 编码器
//!
//! 将 SVG 中的可见路径按文档顺序输出为 Skia vector icon 指令，每行一条：
//!
//! ```text
//! CANVAS_DIMENSIONS, 24,
//! PATH_COLOR_ARGB, 0xFF, 0x44, 0x88, 0xCC,
//! MOVE_TO, 2, 2,
//! H_LINE_TO, 22,
//! CLOSE,
//! NEW_PATH,
//! ...
//! END
//! ```
//!
//! ## 规则
//! - 画布宽度为默认的 48 时省略 `CANVAS_DIMENSIONS`
//! - 不透明黑色填充省略 `PATH_COLOR_ARGB`
//! - 只有描边没有填充的路径输出 `STROKE`（方形线帽追加 `CAP_SQUARE`）
//! - 坐标已应用路径的绝对变换，保留 3 位小数，小数值带 `f` 后缀
//! - 最后一行不带逗号
//!
//! ## 依赖关系
//! - 被 `pipeline/` 通过 `Encoder` trait 调用
//! - 使用 `usvg` 解析和规范化 SVG

use super::{parse_svg, EncodeOptions, Encoder};
use crate::error::Result;

use usvg::tiny_skia_path::{PathSegment, Point};
use usvg::{Node, Paint};

/// Skia 图标的默认画布尺寸
const DEFAULT_CANVAS_SIZE: f32 = 48.0;

/// Skia vector icon 编码器
#[derive(Debug, Default, Clone, Copy)]
pub struct SkiaIconEncoder;

impl SkiaIconEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl Encoder for SkiaIconEncoder {
    fn encode(&self, svg: &str, options: EncodeOptions) -> Result<Vec<u8>> {
        let tree = parse_svg(svg)?;
        let mut writer = IconWriter::default();

        let width = tree.size().width();
        if (width - DEFAULT_CANVAS_SIZE).abs() > f32::EPSILON {
            writer.command("CANVAS_DIMENSIONS", &[width]);
        }

        let mut paths = Vec::new();
        collect_paths(tree.root(), &mut paths);

        for (i, path) in paths.iter().enumerate() {
            if i > 0 {
                writer.command("NEW_PATH", &[]);
            }
            writer.path(path);
        }

        if options.output_end {
            writer.lines.push("END".to_string());
        }

        Ok(writer.finish().into_bytes())
    }
}

/// 按文档顺序收集可见路径
fn collect_paths<'a>(group: &'a usvg::Group, out: &mut Vec<&'a usvg::Path>) {
    for node in group.children() {
        match node {
            Node::Group(g) => collect_paths(g, out),
            Node::Path(p) if p.is_visible() => out.push(&**p),
            _ => {}
        }
    }
}

#[derive(Default)]
struct IconWriter {
    lines: Vec<String>,
}

impl IconWriter {
    fn command(&mut self, name: &str, args: &[f32]) {
        let mut line = name.to_string();
        for arg in args {
            line.push_str(", ");
            line.push_str(&format_number(*arg));
        }
        line.push(',');
        self.lines.push(line);
    }

    fn color(&mut self, paint: &Paint, opacity: f32) {
        let Paint::Color(c) = paint else {
            return;
        };
        let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
        if alpha == 0xFF && c.red == 0 && c.green == 0 && c.blue == 0 {
            return;
        }
        self.lines.push(format!(
            "PATH_COLOR_ARGB, 0x{:02X}, 0x{:02X}, 0x{:02X}, 0x{:02X},",
            alpha, c.red, c.green, c.blue
        ));
    }

    fn path(&mut self, path: &usvg::Path) {
        match (path.fill(), path.stroke()) {
            (Some(fill), _) => self.color(fill.paint(), fill.opacity().get()),
            (None, Some(stroke)) => {
                self.color(stroke.paint(), stroke.opacity().get());
                self.command("STROKE", &[stroke.width().get()]);
                if matches!(stroke.linecap(), usvg::LineCap::Square) {
                    self.command("CAP_SQUARE", &[]);
                }
            }
            (None, None) => {}
        }

        let transform = path.abs_transform();
        let data = if transform.is_identity() {
            path.data().clone()
        } else {
            path.data()
                .clone()
                .transform(transform)
                .unwrap_or_else(|| path.data().clone())
        };

        let mut current = Point::zero();
        let mut start = Point::zero();
        for segment in data.segments() {
            match segment {
                PathSegment::MoveTo(p) => {
                    self.command("MOVE_TO", &[p.x, p.y]);
                    current = p;
                    start = p;
                }
                PathSegment::LineTo(p) => {
                    if same(p.y, current.y) {
                        self.command("H_LINE_TO", &[p.x]);
                    } else if same(p.x, current.x) {
                        self.command("V_LINE_TO", &[p.y]);
                    } else {
                        self.command("LINE_TO", &[p.x, p.y]);
                    }
                    current = p;
                }
                PathSegment::QuadTo(p1, p) => {
                    self.command("QUADRATIC_TO", &[p1.x, p1.y, p.x, p.y]);
                    current = p;
                }
                PathSegment::CubicTo(p1, p2, p) => {
                    self.command("CUBIC_TO", &[p1.x, p1.y, p2.x, p2.y, p.x, p.y]);
                    current = p;
                }
                PathSegment::Close => {
                    self.command("CLOSE", &[]);
                    current = start;
                }
            }
        }
    }

    fn finish(mut self) -> String {
        if let Some(last) = self.lines.last_mut() {
            if last.ends_with(',') {
                last.pop();
            }
        }
        self.lines.join("\n")
    }
}

/// 两个坐标在输出精度下相等
fn same(a: f32, b: f32) -> bool {
    format_number(a) == format_number(b)
}

/// 保留 3 位小数，去掉多余的 0，小数值加 `f` 后缀
fn format_number(value: f32) -> String {
    let rounded = (f64::from(value) * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        return "0".to_string();
    }
    if rounded.fract() == 0.0 {
        return format!("{}", rounded as i64);
    }
    let text = format!("{:.3}", rounded);
    format!("{}f", text.trim_end_matches('0'))
}
