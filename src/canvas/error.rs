//! 画布编辑与文档读写的错误类型定义

use super::NodeId;
use thiserror::Error;

/// 画布相关错误
///
/// 形状传播本身不会出错（所有分支都有兜底），这里只覆盖画布编辑和 JSON/文件读写。
#[derive(Debug, Error)]
pub enum CanvasError {
    /// 节点不存在
    #[error("节点不存在: {0}")]
    NodeNotFound(NodeId),

    /// 节点 ID 重复
    #[error("节点 ID 重复: {0}")]
    DuplicateNodeId(NodeId),

    /// 非法操作
    #[error("非法操作: {0}")]
    InvalidOperation(String),

    /// JSON 解析/生成错误
    #[error("JSON 错误: {0}")]
    Json(#[from] serde_json::Error),

    /// IO 错误
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),
}
