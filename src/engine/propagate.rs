/*
 * @Author       : 老董
 * @Date         : 2026-10-12
 * @Description  : 形状传播：沿 输入层 → 目标节点 的路径逐层折叠形状计算
 *
 * 一次传播（pass）做三件事：
 * 1. 每个输出层：找到从输入层到它的路径，折叠路径上的中间层得到最终形状，并推断任务类型；
 *    没有路径时直接把输入形状当作输出（视为重建候选，而不是错误）
 * 2. 每个可达的观察窗：折叠到观察窗之前为止的形状（观察窗本身不参与变换）
 * 3. 每个可达的卷积/池化/全连接层：记录进入该层之前的形状以及该层的输出形状
 *
 * 引擎不持有任何跨调用状态，输入是节点与连线的显式快照，输出是注解报告；
 * 同一快照重复传播得到的注解除时间戳外完全一致。
 */

use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

use super::path::{find_path, reachable_from};
use super::{GraphIndex, LayerDefaults, TaskInference, infer_task};
use crate::canvas::{Canvas, CanvasNode, Edge, LayerSpec, NodeAnnotation, NodeId, NodeKind, TraitLayer};
use crate::shape::Shape;

/// 传播过程中发现、但不影响结果的问题
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropagationWarning {
    /// 输入层没有配置尺寸，被跳过
    UnconfiguredInput { node: NodeId },
    /// 路径上的 `merge` 节点还有其他可达的上游分支，这些分支的变换没有被计入 `target`
    AlternateBranchIgnored { target: NodeId, merge: NodeId },
}

impl fmt::Display for PropagationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnconfiguredInput { node } => write!(f, "输入层 {node} 未配置，已跳过"),
            Self::AlternateBranchIgnored { target, merge } => write!(
                f,
                "到 {target} 的路径在 {merge} 处汇合了多个分支，只计算了其中一条"
            ),
        }
    }
}

/// 一次传播的结果
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PropagationReport {
    pub timestamp: DateTime<Utc>,
    /// 按节点 ID 排序，保证输出顺序稳定
    pub annotations: BTreeMap<NodeId, NodeAnnotation>,
    pub warnings: Vec<PropagationWarning>,
}

impl PropagationReport {
    fn new(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            annotations: BTreeMap::new(),
            warnings: Vec::new(),
        }
    }

    pub fn annotation(&self, id: &NodeId) -> Option<&NodeAnnotation> {
        self.annotations.get(id)
    }

    pub fn shape_of(&self, id: &NodeId) -> Option<&Shape> {
        self.annotation(id).and_then(|a| a.computed_shape.as_ref())
    }

    pub fn task_of(&self, id: &NodeId) -> Option<&TaskInference> {
        self.annotation(id).and_then(|a| a.inferred_task.as_ref())
    }

    /// 忽略时间戳后两次结果是否一致
    pub fn same_content(&self, other: &Self) -> bool {
        self.warnings == other.warnings
            && self.annotations.len() == other.annotations.len()
            && self
                .annotations
                .iter()
                .zip(&other.annotations)
                .all(|((id1, a1), (id2, a2))| {
                    id1 == id2 && a1.without_timestamp() == a2.without_timestamp()
                })
    }
}

/// 形状传播引擎
#[derive(Clone, Debug, Default)]
pub struct Propagator {
    defaults: LayerDefaults,
}

impl Propagator {
    pub const fn new(defaults: LayerDefaults) -> Self {
        Self { defaults }
    }

    pub const fn defaults(&self) -> &LayerDefaults {
        &self.defaults
    }

    /// 对画布当前快照做一次传播
    pub fn run_canvas(&self, canvas: &Canvas) -> PropagationReport {
        self.run(canvas.nodes(), canvas.edges())
    }

    /// 以当前时间作为本次传播的时间戳
    pub fn run(&self, nodes: &[CanvasNode], edges: &[Edge]) -> PropagationReport {
        self.run_at(nodes, edges, Utc::now())
    }

    /// 以给定时间戳做一次传播
    pub fn run_at(
        &self,
        nodes: &[CanvasNode],
        edges: &[Edge],
        timestamp: DateTime<Utc>,
    ) -> PropagationReport {
        let mut report = PropagationReport::new(timestamp);
        let pass = Pass::new(self, nodes, edges, &mut report.warnings);

        if pass.sources.is_empty() {
            debug!("未找到已配置的输入层，跳过本次传播");
            return report;
        }

        for node in nodes {
            let annotation = match node.kind() {
                NodeKind::Output => Some(pass.annotate_output(node, &mut report.warnings)),
                NodeKind::Watch => pass.annotate_watch(node),
                kind if kind.is_transform() => pass.annotate_layer(node),
                _ => None,
            };
            if let Some(mut annotation) = annotation {
                annotation.last_updated = Some(timestamp);
                report.annotations.insert(node.id.clone(), annotation);
            }
        }

        report
    }

    /// 折叠路径：从 `source` 形状出发，依次经过路径上首尾之间的节点（跳过观察窗）
    pub fn fold_path(
        &self,
        path: &[NodeId],
        lookup: &HashMap<&NodeId, &CanvasNode>,
        source: &Shape,
    ) -> Shape {
        let inner = path.get(1..path.len().saturating_sub(1)).unwrap_or(&[]);
        inner
            .iter()
            .filter_map(|id| lookup.get(id))
            .filter(|node| node.kind() != NodeKind::Watch)
            .fold(source.clone(), |shape, node| {
                let next = node.layer.output_shape(&shape, &self.defaults);
                debug!("经过 {}({}) 后的形状: {next}", node.kind().label(), node.id);
                next
            })
    }
}

/// 已配置的输入层及其源形状
struct Source<'a> {
    id: &'a NodeId,
    shape: Shape,
}

/// 单次传播的工作区
struct Pass<'a> {
    propagator: &'a Propagator,
    lookup: HashMap<&'a NodeId, &'a CanvasNode>,
    index: GraphIndex,
    sources: Vec<Source<'a>>,
}

impl<'a> Pass<'a> {
    fn new(
        propagator: &'a Propagator,
        nodes: &'a [CanvasNode],
        edges: &[Edge],
        warnings: &mut Vec<PropagationWarning>,
    ) -> Self {
        let mut sources = Vec::new();
        for node in nodes {
            let LayerSpec::Input(config) = &node.layer else {
                continue;
            };
            match config.source_shape() {
                Some(shape) => sources.push(Source { id: &node.id, shape }),
                None => {
                    warn!("输入层 {} 无配置，已跳过", node.id);
                    warnings.push(PropagationWarning::UnconfiguredInput {
                        node: node.id.clone(),
                    });
                }
            }
        }

        Self {
            propagator,
            lookup: nodes.iter().map(|n| (&n.id, n)).collect(),
            index: GraphIndex::from_edges(edges),
            sources,
        }
    }

    /// 第一个能到达 `target` 的输入层及路径
    fn route(&self, target: &NodeId) -> Option<(&Source<'a>, Vec<NodeId>)> {
        self.sources.iter().find_map(|source| {
            let path = find_path(source.id, target, &self.index);
            (!path.is_empty()).then_some((source, path))
        })
    }

    fn fold(&self, path: &[NodeId], source: &Shape) -> Shape {
        self.propagator.fold_path(path, &self.lookup, source)
    }

    fn annotate_output(
        &self,
        node: &CanvasNode,
        warnings: &mut Vec<PropagationWarning>,
    ) -> NodeAnnotation {
        let (shape, input_shape) = match self.route(&node.id) {
            Some((source, path)) => {
                debug!("网络传播路径: {path:?}");
                self.check_branches(source, &node.id, &path, warnings);
                (self.fold(&path, &source.shape), &source.shape)
            }
            None => {
                // 未连接：直接输出输入形状
                let source = &self.sources[0];
                debug!("输出层 {} 与输入层 {} 之间没有路径，按直接输出处理", node.id, source.id);
                (source.shape.clone(), &source.shape)
            }
        };

        let task = infer_task(&shape, Some(input_shape));
        debug!("输出层 {} 的形状: {shape}，推断任务: {}", node.id, task.description);

        NodeAnnotation {
            computed_shape: Some(shape),
            inferred_task: Some(task),
            ..NodeAnnotation::default()
        }
    }

    fn annotate_watch(&self, node: &CanvasNode) -> Option<NodeAnnotation> {
        let (source, path) = self.route(&node.id)?;
        Some(NodeAnnotation {
            computed_shape: Some(self.fold(&path, &source.shape)),
            ..NodeAnnotation::default()
        })
    }

    fn annotate_layer(&self, node: &CanvasNode) -> Option<NodeAnnotation> {
        let (source, path) = self.route(&node.id)?;
        let input_shape = self.fold(&path, &source.shape);
        let output_shape = node.layer.output_shape(&input_shape, &self.propagator.defaults);
        let input_channels = match &node.layer {
            LayerSpec::Conv(config) => config.resolved_input_channels(&input_shape),
            _ => None,
        };

        Some(NodeAnnotation {
            computed_shape: Some(output_shape),
            actual_input_shape: Some(input_shape),
            input_channels,
            ..NodeAnnotation::default()
        })
    }

    /// 路径上某节点若有多个可达前驱，说明存在没有被计入的并行分支
    fn check_branches(
        &self,
        source: &Source<'_>,
        target: &NodeId,
        path: &[NodeId],
        warnings: &mut Vec<PropagationWarning>,
    ) {
        let reachable = reachable_from(source.id, &self.index);
        for merge in path.iter().skip(1) {
            // 自环不算并行分支
            let upstream: HashSet<&NodeId> = self
                .index
                .predecessors(merge)
                .iter()
                .filter(|pred| *pred != merge && reachable.contains(pred))
                .collect();
            if upstream.len() > 1 {
                let warning = PropagationWarning::AlternateBranchIgnored {
                    target: target.clone(),
                    merge: merge.clone(),
                };
                warn!("{warning}");
                if !warnings.contains(&warning) {
                    warnings.push(warning);
                }
            }
        }
    }
}
