/*
 * @Author       : 老董
 * @Date         : 2026-10-11
 * @Description  : 路径搜索：在图索引上从源节点做广度优先搜索到目标节点
 *
 * - 返回跳数最少的一条路径（含首尾节点）；不可达时返回空
 * - 同样跳数时按连线插入顺序，先被发现的邻居胜出，因此结果是确定的
 * - visited 集合保证在有环/自环的图上也能终止
 */

use std::collections::{HashMap, HashSet, VecDeque};

use super::GraphIndex;
use crate::canvas::{Edge, NodeId};

/// 广度优先搜索 `source` → `target` 的最短路径
pub fn find_path(source: &NodeId, target: &NodeId, index: &GraphIndex) -> Vec<NodeId> {
    if source == target {
        return vec![source.clone()];
    }

    // 记录每个节点第一次被发现时的来源，用于回溯路径
    let mut came_from: HashMap<&NodeId, &NodeId> = HashMap::new();
    let mut visited: HashSet<&NodeId> = HashSet::from([source]);
    let mut queue: VecDeque<&NodeId> = VecDeque::from([source]);

    while let Some(current) = queue.pop_front() {
        for neighbor in index.neighbors(current) {
            if !visited.insert(neighbor) {
                continue;
            }
            came_from.insert(neighbor, current);
            if neighbor == target {
                return backtrack(&came_from, source, neighbor);
            }
            queue.push_back(neighbor);
        }
    }

    Vec::new()
}

/// 直接基于连线列表搜索（内部临时构建图索引）
pub fn find_path_in_edges(source: &NodeId, target: &NodeId, edges: &[Edge]) -> Vec<NodeId> {
    find_path(source, target, &GraphIndex::from_edges(edges))
}

/// 从 `source` 出发可达的全部节点（含自身）
pub fn reachable_from<'a>(source: &'a NodeId, index: &'a GraphIndex) -> HashSet<&'a NodeId> {
    let mut visited: HashSet<&NodeId> = HashSet::from([source]);
    let mut queue: VecDeque<&NodeId> = VecDeque::from([source]);
    while let Some(current) = queue.pop_front() {
        for neighbor in index.neighbors(current) {
            if visited.insert(neighbor) {
                queue.push_back(neighbor);
            }
        }
    }
    visited
}

fn backtrack(came_from: &HashMap<&NodeId, &NodeId>, source: &NodeId, target: &NodeId) -> Vec<NodeId> {
    let mut path = vec![target.clone()];
    let mut current = target;
    while current != source {
        match came_from.get(current) {
            Some(prev) => {
                path.push((*prev).clone());
                current = *prev;
            }
            None => break,
        }
    }
    path.reverse();
    path
}
