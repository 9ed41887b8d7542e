//! # Net Canvas
//!
//! `net_canvas`是神经网络拓扑画布背后的形状传播引擎：用户在画布上摆放输入层、卷积层、池化层、
//! 全连接层、观察窗和输出层并连线，引擎据此推导每个可达节点上流过的张量/向量形状，
//! 并根据最终形状推断网络大概在做什么任务（分类、回归、重建、特征提取）。
//!
//! 渲染、拖放事件、配置弹窗等界面部分不在本库内：界面把节点/连线交给引擎，
//! 引擎返回注解报告，由界面回写到节点上。
//!
//! ```ignore
//! use net_canvas::canvas::{ConvConfig, DenseConfig, InputConfig, NodeKind, Position};
//! use net_canvas::workbench::Workbench;
//!
//! let mut bench = Workbench::default();
//! let input = bench.drop_node(NodeKind::Input, Position::new(0.0, 0.0));
//! let conv = bench.drop_node(NodeKind::Conv, Position::new(200.0, 0.0));
//! let output = bench.drop_node(NodeKind::Output, Position::new(400.0, 0.0));
//! bench.save_config(&input, InputConfig::custom(28, 28, 1))?;
//! bench.save_config(&conv, ConvConfig::new((3, 3), 1, 0, 32))?;
//! bench.connect(input, conv.clone())?;
//! let report = bench.connect(conv, output.clone())?;
//! println!("{}", report.shape_of(&output).unwrap()); // 26×26×32
//! ```

pub mod canvas;
pub mod engine;
pub mod shape;
pub mod utils;
pub mod workbench;
