/*
 * @Author       : 老董
 * @Date         : 2026-10-13
 * @Description  : 撤销历史：定长环形缓冲区 + 显式游标
 *
 * 保存的是不可变快照（Arc），游标指向"当前"快照：
 * - push：丢弃游标之后的重做分支，追加新快照；超过容量时丢弃最旧的
 * - undo/redo：移动游标并返回对应快照
 */

use std::collections::VecDeque;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct History<T> {
    snapshots: VecDeque<Arc<T>>,
    cursor: usize,
    capacity: usize,
}

impl<T> History<T> {
    /// 容量至少为 1
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            snapshots: VecDeque::with_capacity(capacity),
            cursor: 0,
            capacity,
        }
    }

    pub fn push(&mut self, snapshot: impl Into<Arc<T>>) {
        if !self.snapshots.is_empty() {
            self.snapshots.truncate(self.cursor + 1);
        }
        self.snapshots.push_back(snapshot.into());
        if self.snapshots.len() > self.capacity {
            self.snapshots.pop_front();
        }
        self.cursor = self.snapshots.len() - 1;
    }

    /// 回到上一个快照；已在最早的快照时返回 None
    pub fn undo(&mut self) -> Option<Arc<T>> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        self.snapshots.get(self.cursor).cloned()
    }

    /// 前进到下一个快照；没有可重做的快照时返回 None
    pub fn redo(&mut self) -> Option<Arc<T>> {
        if self.cursor + 1 >= self.snapshots.len() {
            return None;
        }
        self.cursor += 1;
        self.snapshots.get(self.cursor).cloned()
    }

    pub fn current(&self) -> Option<&Arc<T>> {
        self.snapshots.get(self.cursor)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
        self.cursor = 0;
    }
}
