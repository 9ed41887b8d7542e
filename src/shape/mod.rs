/*
 * @Author       : 老董
 * @Date         : 2026-10-09
 * @Description  : 形状（Shape）：画布上流经每个节点的数据形状
 *
 * 只有三种形态：
 * - 张量 tensor { height, width, channels }：空间特征图
 * - 向量 vector { size }：展平后的特征向量
 * - 未知 unknown { description }：未连接/未配置，只携带描述
 *
 * 维度使用 i64：配置不合理时（例如卷积核大于输入）会得到非正维度，
 * 这类退化值原样向下游传播，不做截断。
 */

pub mod calc;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use calc::{conv2d_output, dense_output, pool2d_output};

/// 流经节点的数据形状
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    /// 空间特征图（高、宽、通道）
    Tensor {
        height: i64,
        width: i64,
        channels: i64,
    },
    /// 展平的特征向量
    Vector { size: i64 },
    /// 无法确定的形状
    Unknown { description: String },
}

impl Shape {
    pub const fn tensor(height: i64, width: i64, channels: i64) -> Self {
        Self::Tensor {
            height,
            width,
            channels,
        }
    }

    pub const fn vector(size: i64) -> Self {
        Self::Vector { size }
    }

    pub fn unknown(description: impl Into<String>) -> Self {
        Self::Unknown {
            description: description.into(),
        }
    }

    pub const fn is_tensor(&self) -> bool {
        matches!(self, Self::Tensor { .. })
    }

    pub const fn is_vector(&self) -> bool {
        matches!(self, Self::Vector { .. })
    }

    /// 通道数（仅张量有意义）
    pub const fn channels(&self) -> Option<i64> {
        match self {
            Self::Tensor { channels, .. } => Some(*channels),
            _ => None,
        }
    }

    /// 元素总数：张量为 h*w*c，向量为 size，未知形状为 None
    ///
    /// 用 i128 计算，超大维度相乘时饱和而不是溢出。
    pub const fn element_count(&self) -> Option<i128> {
        match self {
            Self::Tensor {
                height,
                width,
                channels,
            } => Some(
                (*height as i128)
                    .saturating_mul(*width as i128)
                    .saturating_mul(*channels as i128),
            ),
            Self::Vector { size } => Some(*size as i128),
            Self::Unknown { .. } => None,
        }
    }

    /// 两个张量的高、宽、通道是否完全一致
    pub fn same_dims(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::Tensor {
                    height: h1,
                    width: w1,
                    channels: c1,
                },
                Self::Tensor {
                    height: h2,
                    width: w2,
                    channels: c2,
                },
            ) => h1 == h2 && w1 == w2 && c1 == c2,
            _ => false,
        }
    }
}

/// 张量显示为 `28×28×1`，向量显示为 `10 维向量`
impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tensor {
                height,
                width,
                channels,
            } => write!(f, "{height}×{width}×{channels}"),
            Self::Vector { size } => write!(f, "{size} 维向量"),
            Self::Unknown { description } => write!(f, "{description}"),
        }
    }
}
