/*
 * @Author       : 老董
 * @Date         : 2026-10-12
 * @Description  : 画布摘要：以表格列出每个节点的输入形状、输出形状和推断任务（类似 Keras 的 summary）
 */

use crate::canvas::{Canvas, CanvasNode};
use crate::shape::Shape;

const HEADERS: [&str; 5] = ["节点", "类型", "输入形状", "输出形状", "任务"];

/// 返回画布摘要字符串（Unicode 文本表格，用于控制台输出）
///
/// 需要先把传播结果回写到画布（`Canvas::apply_report`），否则形状列都是 `-`。
///
/// # 示例
/// ```ignore
/// // ┌──────────┬──────────┬──────────┬──────────┬──────────┐
/// // │ 节点     │ 类型     │ 输入形状 │ 输出形状 │ 任务     │
/// // ├──────────┼──────────┼──────────┼──────────┼──────────┤
/// // │ conv1    │ 卷积层   │ 28×28×1  │ 26×26×32 │ -        │
/// // ...
/// ```
pub fn summary_string(canvas: &Canvas) -> String {
    let rows: Vec<[String; 5]> = canvas.nodes().iter().map(row_of).collect();

    // 计算各列宽度
    let mut widths = HEADERS.map(|h| display_width(h).max(8));
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(display_width(cell));
        }
    }

    let rule = |left: &str, mid: &str, right: &str| {
        let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{left}{}{right}\n", segments.join(mid))
    };
    let line = |cells: &[String]| {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!(" {} ", pad(cell, *w)))
            .collect();
        format!("│{}│\n", padded.join("│"))
    };

    let mut output = String::new();
    output.push_str(&rule("┌", "┬", "┐"));
    output.push_str(&line(&HEADERS.map(str::to_string)));
    output.push_str(&rule("├", "┼", "┤"));
    for row in &rows {
        output.push_str(&line(row));
    }
    output.push_str(&rule("└", "┴", "┘"));
    output
}

/// 返回画布摘要的 Markdown 格式字符串
pub fn summary_markdown(canvas: &Canvas, title: &str) -> String {
    let mut output = format!("# 画布摘要: {title}\n\n");
    output.push_str(&format!("| {} |\n", HEADERS.join(" | ")));
    output.push_str("|------|------|----------|----------|------|\n");
    for row in canvas.nodes().iter().map(row_of) {
        output.push_str(&format!("| {} |\n", row.join(" | ")));
    }
    output.push_str(&format!(
        "\n**节点数**: {}  \n**连线数**: {}\n",
        canvas.nodes_count(),
        canvas.edges().len()
    ));
    output
}

fn row_of(node: &CanvasNode) -> [String; 5] {
    let annotation = &node.annotation;
    [
        node.id.to_string(),
        node.kind().label().to_string(),
        shape_cell(annotation.actual_input_shape.as_ref()),
        shape_cell(annotation.computed_shape.as_ref()),
        annotation
            .inferred_task
            .as_ref()
            .map_or_else(|| "-".to_string(), |t| t.description.clone()),
    ]
}

fn shape_cell(shape: Option<&Shape>) -> String {
    shape.map_or_else(|| "-".to_string(), ToString::to_string)
}

/// 计算字符串显示宽度：中日韩文字与全角符号占 2 列，其余（含 `×`、制表符）占 1 列
pub(crate) fn display_width(s: &str) -> usize {
    s.chars().map(|c| if is_wide(c) { 2 } else { 1 }).sum()
}

fn is_wide(c: char) -> bool {
    matches!(
        u32::from(c),
        0x1100..=0x115F
            | 0x2E80..=0x303E
            | 0x3041..=0x33FF
            | 0x3400..=0x4DBF
            | 0x4E00..=0x9FFF
            | 0xA000..=0xA4CF
            | 0xAC00..=0xD7A3
            | 0xF900..=0xFAFF
            | 0xFE30..=0xFE4F
            | 0xFF00..=0xFF60
            | 0xFFE0..=0xFFE6
    )
}

fn pad(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(display_width(s));
    format!("{s}{}", " ".repeat(fill))
}
