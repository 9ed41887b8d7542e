/*
 * @Author       : 老董
 * @Date         : 2026-10-13
 * @Description  : 工作台（Workbench）：界面与引擎之间的会话层
 *
 * 界面的每一次结构/配置编辑都通过这里完成：
 *   编辑画布 → 对显式快照做一次传播 → 回写注解 → 记录历史 → 通知订阅者
 * 引擎本身没有全局状态，工作台只是把这几步串起来。
 */

mod events;
mod history;

#[cfg(test)]
mod tests;

pub use events::{AnnotationSink, ChannelSink};
pub use history::History;

use log::{error, info};
use std::sync::Arc;

use crate::canvas::{
    Canvas, CanvasError, CanvasNode, LayerSpec, NodeId, NodeKind, Position, layout,
};
use crate::engine::{EngineOptions, PropagationReport, Propagator};

pub struct Workbench {
    canvas: Canvas,
    options: EngineOptions,
    propagator: Propagator,
    history: History<Canvas>,
    sinks: Vec<Box<dyn AnnotationSink>>,
    last_report: Option<PropagationReport>,
}

impl Workbench {
    pub fn new(options: EngineOptions) -> Self {
        Self::with_canvas(Canvas::new(), options)
    }

    /// 以已有画布开始会话（例如从文档加载），先做一次传播
    pub fn with_canvas(canvas: Canvas, options: EngineOptions) -> Self {
        let mut workbench = Self {
            canvas,
            propagator: Propagator::new(options.defaults.clone()),
            history: History::new(options.history_capacity),
            options,
            sinks: Vec::new(),
            last_report: None,
        };
        workbench.commit();
        workbench
    }

    pub fn subscribe(&mut self, sink: impl AnnotationSink + 'static) {
        self.sinks.push(Box::new(sink));
    }

    pub const fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub const fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub const fn history(&self) -> &History<Canvas> {
        &self.history
    }

    pub const fn last_report(&self) -> Option<&PropagationReport> {
        self.last_report.as_ref()
    }

    // ========== 编辑操作 ==========

    /// 拖放一个新节点：自动分配 ID，并把位置调整到不与已有节点重叠的地方
    pub fn drop_node(&mut self, kind: NodeKind, at: Position) -> NodeId {
        let id = self.canvas.next_node_id();
        let position = layout::find_free_position(at, self.canvas.nodes(), &self.options.layout);
        let node = CanvasNode::new(id.clone(), LayerSpec::blank(kind)).with_position(position);
        // ID 由画布生成，不会重复；万一失败，不记录历史也不传播
        match self.canvas.add_node(node) {
            Ok(()) => {
                info!("节点已添加: {id}（{}）", kind.label());
                self.commit();
            }
            Err(e) => error!("添加节点失败: {e}"),
        }
        id
    }

    /// 添加一个 ID 由调用方指定的节点
    pub fn add_node(&mut self, node: CanvasNode) -> Result<NodeId, CanvasError> {
        let id = node.id.clone();
        self.canvas.add_node(node)?;
        info!("节点已添加: {id}");
        self.commit();
        Ok(id)
    }

    pub fn connect(
        &mut self,
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
    ) -> Result<&PropagationReport, CanvasError> {
        let (source, target) = (source.into(), target.into());
        self.canvas.connect(source.clone(), target.clone())?;
        info!("连接建立: {source} → {target}");
        Ok(self.commit())
    }

    /// 删除节点及相关连线，返回删除的节点数；一个都没删掉时不记录历史
    pub fn delete_nodes(&mut self, ids: &[NodeId]) -> usize {
        let removed = self.canvas.remove_nodes(ids);
        if removed == 0 {
            info!("没有可删除的节点");
            return 0;
        }
        info!("已删除 {removed} 个节点及其相关连接");
        self.commit();
        removed
    }

    /// 保存节点配置（配置弹窗的"保存"）
    pub fn save_config(
        &mut self,
        id: &NodeId,
        layer: impl Into<LayerSpec>,
    ) -> Result<&PropagationReport, CanvasError> {
        self.canvas.update_config(id, layer.into())?;
        info!("节点 {id} 配置已保存");
        Ok(self.commit())
    }

    /// 移动节点：碰撞时调整到最近的空位，返回最终位置（不触发传播，也不进历史）
    pub fn move_node(&mut self, id: &NodeId, to: Position) -> Result<Position, CanvasError> {
        let opts = &self.options.layout;
        let position = if layout::collides(to, Some(id), self.canvas.nodes(), opts) {
            let others: Vec<CanvasNode> = self
                .canvas
                .nodes()
                .iter()
                .filter(|n| &n.id != id)
                .cloned()
                .collect();
            layout::find_free_position(to, &others, opts)
        } else {
            to
        };
        self.canvas.set_position(id, position)?;
        Ok(position)
    }

    /// 清空画布
    pub fn clear(&mut self) {
        self.canvas.clear();
        info!("画布已清空");
        self.commit();
    }

    // ========== 撤销/重做 ==========

    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.undo() else {
            return false;
        };
        self.restore(snapshot);
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.history.redo() else {
            return false;
        };
        self.restore(snapshot);
        true
    }

    // ========== 传播 ==========

    /// 对当前画布做一次传播，回写注解并通知订阅者
    pub fn propagate(&mut self) -> &PropagationReport {
        let report = self.propagator.run_canvas(&self.canvas);
        self.canvas.apply_report(&report);
        for sink in &mut self.sinks {
            sink.on_annotations(&report);
        }
        self.last_report.insert(report)
    }

    /// 记录历史后传播；快照里的注解在恢复时会重新计算
    fn commit(&mut self) -> &PropagationReport {
        self.history.push(self.canvas.clone());
        self.propagate()
    }

    fn restore(&mut self, snapshot: Arc<Canvas>) {
        self.canvas = Canvas::clone(&snapshot);
        self.propagate();
    }
}

impl Default for Workbench {
    fn default() -> Self {
        Self::new(EngineOptions::default())
    }
}
