/*
 * @Author       : 老董
 * @Date         : 2026-10-10
 * @Description  : 节点放置碰撞规避单元测试
 */

use crate::canvas::layout::{collides, find_free_position};
use crate::canvas::{CanvasNode, LayoutOptions, NodeId, Position, WatchConfig};

fn node_at(id: &str, x: f64, y: f64) -> CanvasNode {
    CanvasNode::new(id, WatchConfig::default()).with_position(Position::new(x, y))
}

#[test]
fn test_collides_uses_box_plus_padding() {
    let opts = LayoutOptions::default();
    let others = [node_at("a", 0.0, 0.0)];

    assert!(collides(Position::new(169.0, 0.0), None, &others, &opts));
    assert!(!collides(Position::new(170.0, 0.0), None, &others, &opts));
    assert!(collides(Position::new(0.0, 89.0), None, &others, &opts));
    assert!(!collides(Position::new(0.0, 90.0), None, &others, &opts));
    assert!(!collides(Position::new(0.0, 0.0), None, &[], &opts));
}

#[test]
fn test_collides_skips_self() {
    let opts = LayoutOptions::default();
    let others = [node_at("a", 0.0, 0.0)];

    assert!(!collides(Position::new(10.0, 10.0), Some(&NodeId::from("a")), &others, &opts));
    assert!(collides(Position::new(10.0, 10.0), Some(&NodeId::from("b")), &others, &opts));
}

#[test]
fn test_find_free_position_keeps_free_spot() {
    let opts = LayoutOptions::default();
    let others = [node_at("a", 0.0, 0.0)];

    let wanted = Position::new(500.0, 500.0);
    assert_eq!(find_free_position(wanted, &others, &opts), wanted);
}

#[test]
fn test_find_free_position_spirals_out() {
    let opts = LayoutOptions::default();
    let others = [node_at("a", 0.0, 0.0)];

    let found = find_free_position(Position::new(0.0, 0.0), &others, &opts);
    assert!(!collides(found, None, &others, &opts));
    // 第一个空位在正下方（半径 90，角度 90°）
    assert!(found.x.abs() < 1e-9, "x = {}", found.x);
    assert!((found.y - 90.0).abs() < 1e-9, "y = {}", found.y);
}

#[test]
fn test_find_free_position_fallback_offset() {
    let opts = LayoutOptions {
        max_attempts: 0,
        ..LayoutOptions::default()
    };
    let others = [node_at("a", 0.0, 0.0), node_at("b", 0.0, 0.0)];

    let found = find_free_position(Position::new(10.0, 20.0), &others, &opts);
    assert_eq!(found, Position::new(70.0, 80.0));
}
