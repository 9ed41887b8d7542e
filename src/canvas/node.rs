/*
 * @Author       : 老董
 * @Date         : 2026-10-09
 * @Description  : 画布节点与连线
 *
 * 节点 = 标识 + 层配置（用户编辑）+ 位置（界面使用）+ 计算注解（引擎回写）。
 * 引擎只读层配置，只写注解，两者互不覆盖。
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{LayerSpec, NodeKind, TraitLayer};
use crate::engine::TaskInference;
use crate::shape::Shape;

/// 节点 ID（前端形如 `dndnode_0`）
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&NodeId> for NodeId {
    fn from(id: &NodeId) -> Self {
        id.clone()
    }
}

/// 画布坐标
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// 引擎回写到节点上的计算结果（每次传播全部重算）
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeAnnotation {
    /// 流经本节点后的形状（输出层/观察窗/变换层）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub computed_shape: Option<Shape>,
    /// 推断的任务类型（仅输出层）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inferred_task: Option<TaskInference>,
    /// 进入本层之前的形状（仅变换层）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_input_shape: Option<Shape>,
    /// 卷积层实际使用的输入通道数
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_channels: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

impl NodeAnnotation {
    pub fn is_empty(&self) -> bool {
        self.computed_shape.is_none()
            && self.inferred_task.is_none()
            && self.actual_input_shape.is_none()
            && self.input_channels.is_none()
    }

    /// 去掉时间戳后的内容，用于比较两次传播结果是否一致
    pub fn without_timestamp(&self) -> Self {
        Self {
            last_updated: None,
            ..self.clone()
        }
    }
}

/// 画布上的一个节点
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CanvasNode {
    pub id: NodeId,
    pub layer: LayerSpec,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub annotation: NodeAnnotation,
}

impl CanvasNode {
    pub fn new(id: impl Into<NodeId>, layer: impl Into<LayerSpec>) -> Self {
        Self {
            id: id.into(),
            layer: layer.into(),
            position: Position::default(),
            annotation: NodeAnnotation::default(),
        }
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn kind(&self) -> NodeKind {
        self.layer.kind()
    }
}

/// 有向连线（source → target），除连通关系外不携带任何属性
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
}

impl Edge {
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    pub fn touches(&self, id: &NodeId) -> bool {
        &self.source == id || &self.target == id
    }
}
