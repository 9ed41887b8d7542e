/*
 * @Author       : 老董
 * @Date         : 2026-10-10
 * @Description  : 画布（Canvas）：节点与连线的集合，以及对它们的编辑操作
 *
 * 公开 API：
 * - `Canvas`: 节点 + 连线 的快照，支持增删改
 * - `CanvasDocument`: 整个画布的 JSON 描述（保存/加载）
 * - `LayerSpec` 及各层配置：节点类型与用户可编辑字段
 * - `CanvasError`: 错误类型
 */

mod display;
mod error;
mod layer;
pub mod layout;
mod node;
mod preset;

#[cfg(test)]
mod tests;

pub use display::format_node_caption;
pub use error::CanvasError;
pub use layer::{
    ConvConfig, DenseConfig, FormatType, GenericConfig, InputChannels, InputConfig, LayerSpec,
    NodeKind, OutputConfig, OutputType, PoolConfig, PoolingType, TraitLayer, WatchConfig,
};
pub use layout::LayoutOptions;
pub use node::{CanvasNode, Edge, NodeAnnotation, NodeId, Position};
pub use preset::DatasetPreset;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::engine::PropagationReport;

/// 画布：节点与连线的有序集合
///
/// 节点顺序即插入顺序，连线顺序决定路径搜索时的邻居优先级。
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    nodes: Vec<CanvasNode>,
    edges: Vec<Edge>,
    #[serde(skip)]
    id_counter: usize,
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &[CanvasNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn nodes_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    pub fn node(&self, id: &NodeId) -> Option<&CanvasNode> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.node(id).is_some()
    }

    pub fn nodes_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &CanvasNode> {
        self.nodes.iter().filter(move |n| n.kind() == kind)
    }

    /// 生成一个画布内未被占用的新 ID（`dndnode_<n>`）
    pub fn next_node_id(&mut self) -> NodeId {
        loop {
            let id = NodeId(format!("dndnode_{}", self.id_counter));
            self.id_counter += 1;
            if !self.contains(&id) {
                return id;
            }
        }
    }

    /// 添加节点，ID 不可重复
    pub fn add_node(&mut self, node: CanvasNode) -> Result<(), CanvasError> {
        if self.contains(&node.id) {
            return Err(CanvasError::DuplicateNodeId(node.id));
        }
        self.nodes.push(node);
        Ok(())
    }

    /// 连接两个已存在的节点；允许同一源节点多条出边，也允许重复连线
    pub fn connect(
        &mut self,
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
    ) -> Result<(), CanvasError> {
        let edge = Edge::new(source, target);
        for id in [&edge.source, &edge.target] {
            if !self.contains(id) {
                return Err(CanvasError::NodeNotFound(id.clone()));
            }
        }
        self.edges.push(edge);
        Ok(())
    }

    /// 删除节点及其所有相关连线，返回实际删除的节点数（不存在的 ID 忽略）
    pub fn remove_nodes(&mut self, ids: &[NodeId]) -> usize {
        let before = self.nodes.len();
        self.nodes.retain(|n| !ids.contains(&n.id));
        self.edges.retain(|e| !ids.iter().any(|id| e.touches(id)));
        before - self.nodes.len()
    }

    /// 保存节点配置：只替换用户可编辑部分，层类型必须一致
    pub fn update_config(&mut self, id: &NodeId, layer: LayerSpec) -> Result<(), CanvasError> {
        let node = self
            .nodes
            .iter_mut()
            .find(|n| &n.id == id)
            .ok_or_else(|| CanvasError::NodeNotFound(id.clone()))?;
        if node.kind() != layer.kind() {
            return Err(CanvasError::InvalidOperation(format!(
                "节点 {id} 的类型为 {}，不能保存为 {} 配置",
                node.kind().as_str(),
                layer.kind().as_str()
            )));
        }
        node.layer = layer;
        Ok(())
    }

    pub fn set_position(&mut self, id: &NodeId, position: Position) -> Result<(), CanvasError> {
        let node = self
            .nodes
            .iter_mut()
            .find(|n| &n.id == id)
            .ok_or_else(|| CanvasError::NodeNotFound(id.clone()))?;
        node.position = position;
        Ok(())
    }

    /// 清空画布
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
    }

    /// 把一次传播的结果回写到节点注解上
    ///
    /// 报告里没有的节点注解被清空，避免残留上一次的结果。
    pub fn apply_report(&mut self, report: &PropagationReport) {
        for node in &mut self.nodes {
            node.annotation = report
                .annotations
                .get(&node.id)
                .cloned()
                .unwrap_or_default();
        }
    }

    // ========== 文档（保存/加载）==========

    pub fn to_document(&self, name: &str) -> CanvasDocument {
        CanvasDocument {
            version: env!("CARGO_PKG_VERSION").to_string(),
            name: name.to_string(),
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
        }
    }

    /// 从文档恢复画布，节点 ID 重复时报错
    pub fn from_document(document: CanvasDocument) -> Result<Self, CanvasError> {
        let mut canvas = Self::new();
        for node in document.nodes {
            canvas.add_node(node)?;
        }
        canvas.edges = document.edges;
        Ok(canvas)
    }
}

/// 画布的可序列化描述
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasDocument {
    /// 格式版本（用于向后兼容）
    pub version: String,
    /// 画布名称
    pub name: String,
    pub nodes: Vec<CanvasNode>,
    pub edges: Vec<Edge>,
}

impl CanvasDocument {
    /// 转换为 JSON 字符串
    pub fn to_json(&self) -> Result<String, CanvasError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// 从 JSON 字符串解析
    pub fn from_json(json: &str) -> Result<Self, CanvasError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), CanvasError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CanvasError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
