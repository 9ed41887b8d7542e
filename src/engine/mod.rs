/*
 * @Author       : 老董
 * @Date         : 2026-10-12
 * @Description  : 形状传播引擎
 *
 * 组成（自底向上）：
 * - `GraphIndex`: 由连线构建的邻接表
 * - `find_path`: 广度优先的最短路径搜索
 * - `Propagator`: 沿路径折叠逐层形状计算，产出 `PropagationReport`
 * - `infer_task`: 根据最终形状推断任务类型
 */

mod describe;
mod index;
mod options;
mod path;
mod propagate;
mod task;

#[cfg(test)]
mod tests;

pub use describe::{summary_markdown, summary_string};
pub use index::GraphIndex;
pub use options::{EngineOptions, LayerDefaults};
pub use path::{find_path, find_path_in_edges, reachable_from};
pub use propagate::{PropagationReport, PropagationWarning, Propagator};
pub use task::{TaskInference, TaskKind, classification_hint, infer_task};
