/*
 * @Author       : 老董
 * @Date         : 2026-10-10
 * @Description  : 节点放置的碰撞规避
 *
 * 节点按固定占位矩形（默认 150×70，外加 20 的间距）判断是否重叠；
 * 重叠时从期望位置出发做螺旋搜索，每圈 8 个方向（45° 一步）。
 */

use serde::{Deserialize, Serialize};

use super::{CanvasNode, NodeId, Position};

/// 布局参数
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutOptions {
    pub node_width: f64,
    pub node_height: f64,
    /// 节点间最小间距
    pub padding: f64,
    /// 螺旋搜索的半径步长
    pub spiral_step: f64,
    /// 最多尝试的候选位置数
    pub max_attempts: usize,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            node_width: 150.0,
            node_height: 70.0,
            padding: 20.0,
            spiral_step: 30.0,
            max_attempts: 50,
        }
    }
}

/// 把 `position` 处的节点与 `others` 逐个比较，`skip` 指定的节点（通常是自己）不参与
pub fn collides(
    position: Position,
    skip: Option<&NodeId>,
    others: &[CanvasNode],
    opts: &LayoutOptions,
) -> bool {
    others
        .iter()
        .filter(|node| Some(&node.id) != skip)
        .any(|node| {
            let dx = (position.x - node.position.x).abs();
            let dy = (position.y - node.position.y).abs();
            dx < opts.node_width + opts.padding && dy < opts.node_height + opts.padding
        })
}

/// 寻找离 `initial` 最近的无碰撞位置
///
/// 螺旋搜索用尽尝试次数仍未找到时，退回到按已有节点数向右下偏移的位置。
pub fn find_free_position(
    initial: Position,
    others: &[CanvasNode],
    opts: &LayoutOptions,
) -> Position {
    let mut attempts = 0;
    let mut radius = 0.0;

    while attempts < opts.max_attempts {
        for angle in (0..360_i32).step_by(45) {
            let radian = f64::from(angle).to_radians();
            let candidate = Position::new(
                initial.x + radius * radian.cos(),
                initial.y + radius * radian.sin(),
            );
            if !collides(candidate, None, others, opts) {
                return candidate;
            }

            attempts += 1;
            if attempts >= opts.max_attempts {
                break;
            }
        }
        radius += opts.spiral_step;
    }

    let offset = others.len() as f64 * opts.spiral_step;
    Position::new(initial.x + offset, initial.y + offset)
}
