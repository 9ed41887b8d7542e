use crate::canvas::{
    Canvas, CanvasError, CanvasNode, ConvConfig, InputConfig, LayerSpec, NodeKind,
};
use crate::engine::describe::display_width;
use crate::engine::{Propagator, summary_markdown, summary_string};

fn annotated_canvas() -> Result<Canvas, CanvasError> {
    let mut canvas = Canvas::new();
    canvas.add_node(CanvasNode::new("in", InputConfig::custom(28, 28, 1)))?;
    canvas.add_node(CanvasNode::new("conv1", ConvConfig::default()))?;
    canvas.add_node(CanvasNode::new("out", LayerSpec::blank(NodeKind::Output)))?;
    canvas.connect("in", "conv1")?;
    canvas.connect("conv1", "out")?;
    let report = Propagator::default().run_canvas(&canvas);
    canvas.apply_report(&report);
    Ok(canvas)
}

#[test]
fn test_summary_string() -> Result<(), CanvasError> {
    let summary = summary_string(&annotated_canvas()?);
    println!("{summary}");

    let lines: Vec<&str> = summary.lines().collect();
    // 上边框 + 表头 + 分隔线 + 3 行 + 下边框
    assert_eq!(lines.len(), 7);
    assert!(lines[0].starts_with('┌') && lines[0].ends_with('┐'));
    assert!(lines[1].contains("输入形状"));
    assert!(lines[4].contains("conv1") && lines[4].contains("卷积层"));
    assert!(lines[4].contains("28×28×1") && lines[4].contains("26×26×32"));
    assert!(lines[5].contains("张量输出"));
    assert!(lines[6].starts_with('└'));

    // 边框、表头和数据行的显示宽度一致
    let widths: Vec<usize> = lines.iter().map(|l| display_width(l)).collect();
    assert!(widths.windows(2).all(|w| w[0] == w[1]), "{widths:?}");
    Ok(())
}

#[test]
fn test_summary_markdown() -> Result<(), CanvasError> {
    let markdown = summary_markdown(&annotated_canvas()?, "小网络");

    assert!(markdown.starts_with("# 画布摘要: 小网络\n"));
    assert!(markdown.contains("| in | 输入层 | - | - | - |"));
    assert!(markdown.contains("| conv1 | 卷积层 | 28×28×1 | 26×26×32 | - |"));
    assert!(markdown.contains("| out | 输出层 | - | 26×26×32 | 张量输出 |"));
    assert!(markdown.ends_with("**节点数**: 3  \n**连线数**: 2\n"));
    Ok(())
}

#[test]
fn test_summary_empty_canvas() {
    let summary = summary_string(&Canvas::new());
    assert_eq!(summary.lines().count(), 4);
}

#[test]
fn test_display_width_narrow_symbols() {
    // `×` 和制表符是窄字符，只有中日韩文字占 2 列
    assert_eq!(display_width("26×26×32"), 8);
    assert_eq!(display_width("─┼│"), 3);
    assert_eq!(display_width("卷积层"), 6);
    assert_eq!(display_width("10 维向量"), 9);
    assert_eq!(display_width("（ＡＢ）"), 8);
}
