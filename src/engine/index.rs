//! 邻接表：由连线列表构建，回答"节点 X 的直接后继有哪些"

use std::collections::HashMap;

use crate::canvas::{Edge, NodeId};

/// 图索引
///
/// 每个节点的后继按连线插入顺序保存，重复连线与自环都原样保留。
#[derive(Clone, Debug, Default)]
pub struct GraphIndex {
    successors: HashMap<NodeId, Vec<NodeId>>,
    predecessors: HashMap<NodeId, Vec<NodeId>>,
    edge_count: usize,
}

impl GraphIndex {
    pub fn from_edges(edges: &[Edge]) -> Self {
        let mut index = Self::default();
        for edge in edges {
            index
                .successors
                .entry(edge.source.clone())
                .or_default()
                .push(edge.target.clone());
            index
                .predecessors
                .entry(edge.target.clone())
                .or_default()
                .push(edge.source.clone());
        }
        index.edge_count = edges.len();
        index
    }

    /// 直接后继（按连线插入顺序）
    pub fn neighbors(&self, id: &NodeId) -> &[NodeId] {
        self.successors.get(id).map_or(&[], Vec::as_slice)
    }

    /// 直接前驱（按连线插入顺序）
    pub fn predecessors(&self, id: &NodeId) -> &[NodeId] {
        self.predecessors.get(id).map_or(&[], Vec::as_slice)
    }

    pub const fn edge_count(&self) -> usize {
        self.edge_count
    }
}
