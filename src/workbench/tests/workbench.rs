/*
 * @Author       : 老董
 * @Date         : 2026-10-13
 * @Description  : 工作台（编辑 → 传播 → 历史 → 通知）单元测试
 */

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc;

use crate::assert_err;
use crate::canvas::{
    Canvas, CanvasError, CanvasNode, ConvConfig, DenseConfig, InputConfig, NodeId, NodeKind,
    PoolConfig, Position,
};
use crate::engine::{EngineOptions, PropagationReport, TaskKind};
use crate::shape::Shape;
use crate::workbench::{ChannelSink, Workbench};

/// 输入(28×28×1) → 卷积 → 输出
fn small_bench() -> Result<(Workbench, NodeId, NodeId, NodeId), CanvasError> {
    let mut bench = Workbench::default();
    let input = bench.drop_node(NodeKind::Input, Position::new(0.0, 0.0));
    let conv = bench.drop_node(NodeKind::Conv, Position::new(300.0, 0.0));
    let output = bench.drop_node(NodeKind::Output, Position::new(600.0, 0.0));
    bench.save_config(&input, InputConfig::custom(28, 28, 1))?;
    bench.connect(&input, &conv)?;
    bench.connect(&conv, &output)?;
    Ok((bench, input, conv, output))
}

#[test]
fn test_workbench_edit_propagates() -> Result<(), CanvasError> {
    let (bench, _, conv, output) = small_bench()?;

    let report = bench.last_report().unwrap();
    assert_eq!(report.shape_of(&output), Some(&Shape::tensor(26, 26, 32)));

    // 注解已回写到画布
    let conv_node = bench.canvas().node(&conv).unwrap();
    assert_eq!(conv_node.annotation.input_channels, Some(1));
    assert_eq!(
        conv_node.annotation.computed_shape,
        Some(Shape::tensor(26, 26, 32))
    );

    println!("✅ 每次编辑后自动传播并回写注解");
    Ok(())
}

#[test]
fn test_workbench_drop_node_avoids_collision() {
    let mut bench = Workbench::default();
    let first = bench.drop_node(NodeKind::Input, Position::new(0.0, 0.0));
    let second = bench.drop_node(NodeKind::Watch, Position::new(0.0, 0.0));

    assert_eq!(first.as_str(), "dndnode_0");
    assert_eq!(second.as_str(), "dndnode_1");

    let a = bench.canvas().node(&first).unwrap().position;
    let b = bench.canvas().node(&second).unwrap().position;
    assert_eq!(a, Position::new(0.0, 0.0));
    assert_ne!(a, b);
}

#[test]
fn test_workbench_save_config_reshapes_output() -> Result<(), CanvasError> {
    let (mut bench, _, conv, output) = small_bench()?;

    let report = bench.save_config(&conv, ConvConfig::new((3, 3), 1, 1, 1))?;
    assert_eq!(
        report.task_of(&output).map(|t| t.kind),
        Some(TaskKind::Reconstruction)
    );

    assert_err!(
        bench.save_config(&conv, PoolConfig::default()),
        CanvasError::InvalidOperation(msg) if msg.contains("conv")
    );
    assert_err!(
        bench.save_config(&NodeId::from("ghost"), DenseConfig::new(2)),
        CanvasError::NodeNotFound("ghost")
    );
    Ok(())
}

#[test]
fn test_workbench_undo_redo() -> Result<(), CanvasError> {
    let (mut bench, input, conv, output) = small_bench()?;
    let edits = bench.history().len();

    bench.delete_nodes(&[conv.clone()]);
    assert_eq!(bench.history().len(), edits + 1);
    // 卷积层删除后输出层与输入层不再连通：直接输出输入形状
    assert_eq!(
        bench.last_report().and_then(|r| r.shape_of(&output)),
        Some(&Shape::tensor(28, 28, 1))
    );

    assert!(bench.undo());
    assert!(bench.canvas().contains(&conv));
    assert_eq!(bench.canvas().edges().len(), 2);
    assert_eq!(
        bench.last_report().and_then(|r| r.shape_of(&output)),
        Some(&Shape::tensor(26, 26, 32))
    );

    assert!(bench.redo());
    assert!(!bench.canvas().contains(&conv));
    assert!(!bench.redo());

    // 撤销到最初的空画布
    while bench.undo() {}
    assert!(bench.canvas().is_empty());
    assert!(!bench.canvas().contains(&input));
    Ok(())
}

#[test]
fn test_workbench_noop_edits_skip_history() -> Result<(), CanvasError> {
    let (mut bench, input, _, _) = small_bench()?;
    let edits = bench.history().len();

    assert_eq!(bench.delete_nodes(&[NodeId::from("ghost")]), 0);
    assert_err!(bench.connect("ghost", &input), CanvasError::NodeNotFound("ghost"));
    let moved = bench.move_node(&input, Position::new(0.0, 500.0))?;
    assert_eq!(moved, Position::new(0.0, 500.0));

    assert_eq!(bench.history().len(), edits);
    Ok(())
}

#[test]
fn test_workbench_move_node_avoids_collision() -> Result<(), CanvasError> {
    let (mut bench, input, conv, _) = small_bench()?;

    let conv_position = bench.canvas().node(&conv).unwrap().position;
    let moved = bench.move_node(&input, conv_position)?;
    assert_ne!(moved, conv_position);
    assert_eq!(bench.canvas().node(&input).unwrap().position, moved);

    assert_err!(
        bench.move_node(&NodeId::from("ghost"), Position::new(5000.0, 5000.0)),
        CanvasError::NodeNotFound("ghost")
    );
    Ok(())
}

#[test]
fn test_workbench_history_capacity() {
    let options = EngineOptions {
        history_capacity: 3,
        ..EngineOptions::default()
    };
    let mut bench = Workbench::new(options);
    for i in 0..5 {
        bench.drop_node(NodeKind::Watch, Position::new(f64::from(i) * 500.0, 0.0));
    }
    assert_eq!(bench.history().len(), 3);

    assert!(bench.undo());
    assert!(bench.undo());
    assert!(!bench.undo());
    assert_eq!(bench.canvas().nodes_count(), 3);
}

#[test]
fn test_workbench_notifies_sinks() -> Result<(), CanvasError> {
    let mut bench = Workbench::default();

    let seen = Rc::new(RefCell::new(Vec::new()));
    let seen_in_sink = Rc::clone(&seen);
    bench.subscribe(move |report: &PropagationReport| {
        seen_in_sink.borrow_mut().push(report.annotations.len());
    });
    let (sender, receiver) = mpsc::channel();
    bench.subscribe(ChannelSink(sender));

    let input = bench.drop_node(NodeKind::Input, Position::new(0.0, 0.0));
    let output = bench.drop_node(NodeKind::Output, Position::new(300.0, 0.0));
    bench.save_config(&input, InputConfig::custom(8, 8, 1))?;
    bench.connect(&input, &output)?;

    // 前两次没有已配置的输入，报告为空
    assert_eq!(*seen.borrow(), vec![0, 0, 1, 1]);

    let reports: Vec<PropagationReport> = receiver.try_iter().collect();
    assert_eq!(reports.len(), 4);
    assert_eq!(
        reports.last().and_then(|r| r.shape_of(&output)),
        Some(&Shape::tensor(8, 8, 1))
    );

    // 接收端关闭后继续编辑也不会出错
    drop(receiver);
    bench.clear();
    assert!(bench.canvas().is_empty());
    assert_eq!(seen.borrow().len(), 5);
    Ok(())
}

#[test]
fn test_workbench_same_config_keeps_shapes() -> Result<(), CanvasError> {
    let (mut bench, _, conv, _) = small_bench()?;
    let before = bench.last_report().cloned().unwrap();

    let same = bench.canvas().node(&conv).unwrap().layer.clone();
    let after = bench.save_config(&conv, same)?;
    assert!(before.same_content(after));
    Ok(())
}

#[test]
fn test_workbench_drop_node_records_one_edit() -> Result<(), CanvasError> {
    let mut canvas = Canvas::new();
    canvas.add_node(CanvasNode::new("dndnode_0", InputConfig::custom(8, 8, 1)))?;
    canvas.add_node(CanvasNode::new("dndnode_1", InputConfig::default()))?;
    let mut bench = Workbench::with_canvas(canvas, EngineOptions::default());
    let edits = bench.history().len();

    // 已被占用的 ID 会被跳过，新节点总能加入
    let id = bench.drop_node(NodeKind::Watch, Position::new(0.0, 0.0));
    assert_eq!(id.as_str(), "dndnode_2");
    assert_eq!(bench.canvas().nodes_count(), 3);
    assert_eq!(bench.history().len(), edits + 1);
    Ok(())
}
