use std::sync::Arc;

use crate::workbench::History;

#[test]
fn test_history_undo_redo() {
    let mut history: History<i32> = History::new(10);
    assert!(history.is_empty());
    assert!(!history.can_undo());

    history.push(1);
    history.push(2);
    history.push(3);
    assert_eq!(history.len(), 3);
    assert_eq!(history.current().map(|s| **s), Some(3));

    assert_eq!(history.undo().map(|s| *s), Some(2));
    assert_eq!(history.undo().map(|s| *s), Some(1));
    assert_eq!(history.undo(), None);
    assert!(history.can_redo());

    assert_eq!(history.redo().map(|s| *s), Some(2));
    assert_eq!(history.redo().map(|s| *s), Some(3));
    assert_eq!(history.redo(), None);
}

#[test]
fn test_history_push_discards_redo_branch() {
    let mut history: History<&str> = History::new(10);
    history.push("a");
    history.push("b");
    history.push("c");
    history.undo();
    history.undo();

    history.push("d");
    assert_eq!(history.len(), 2);
    assert!(!history.can_redo());
    assert_eq!(history.current().map(|s| **s), Some("d"));
    assert_eq!(history.undo().map(|s| *s), Some("a"));
}

#[test]
fn test_history_capacity_drops_oldest() {
    let mut history: History<i32> = History::new(3);
    for i in 0..5 {
        history.push(i);
    }
    assert_eq!(history.len(), 3);
    assert_eq!(history.undo().map(|s| *s), Some(3));
    assert_eq!(history.undo().map(|s| *s), Some(2));
    assert_eq!(history.undo(), None);

    // 容量至少为 1
    let mut history: History<i32> = History::new(0);
    history.push(1);
    history.push(2);
    assert_eq!(history.capacity(), 1);
    assert_eq!(history.len(), 1);
    assert!(!history.can_undo());
}

#[test]
fn test_history_shares_snapshots() {
    let mut history: History<Vec<i32>> = History::new(4);
    let snapshot = Arc::new(vec![1, 2, 3]);
    history.push(Arc::clone(&snapshot));
    history.push(vec![4]);

    let restored = history.undo().unwrap();
    assert!(Arc::ptr_eq(&restored, &snapshot));

    history.clear();
    assert!(history.is_empty());
    assert!(history.current().is_none());
}
