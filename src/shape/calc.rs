/*
 * @Author       : 老董
 * @Date         : 2026-10-09
 * @Description  : 逐层形状计算：(输入形状, 层配置) → 输出形状
 *
 * 卷积：
 *   H' = floor((H + 2*padding - kernel_h) / stride) + 1
 *   W' = floor((W + 2*padding - kernel_w) / stride) + 1
 *   C' = output_channels（由层自身声明，与输入通道无关）
 * 池化：
 *   H' = floor(H / stride)，W' = floor(W / stride)，C' = C
 * 全连接：
 *   恒为 vector { size: units }（隐式展平）
 *
 * 卷积/池化遇到向量输入时原样返回（不报错，也不做 reshape）。
 */

use num_integer::Integer;

use super::Shape;
use crate::canvas::{ConvConfig, DenseConfig, PoolConfig};
use crate::engine::LayerDefaults;

/// 卷积层输出形状
pub fn conv2d_output(input: &Shape, config: &ConvConfig, defaults: &LayerDefaults) -> Shape {
    let (height, width) = match input {
        Shape::Tensor { height, width, .. } => (*height, *width),
        // 向量/未知形状上卷积无定义，保持原形状
        _ => return input.clone(),
    };

    let padding = config.padding(defaults);
    let stride = config.stride(defaults);
    let out_height = conv_dim(height, padding, config.kernel_height(defaults), stride);
    let out_width = conv_dim(width, padding, config.kernel_width(defaults), stride);

    Shape::tensor(out_height, out_width, config.output_channels(defaults))
}

/// floor((dim + 2*padding - kernel) / stride) + 1，中间结果饱和
fn conv_dim(dim: i64, padding: i64, kernel: i64, stride: i64) -> i64 {
    let numerator = dim
        .saturating_add(padding.saturating_mul(2))
        .saturating_sub(kernel);
    Integer::div_floor(&numerator, &stride).saturating_add(1)
}

/// 池化层输出形状（池化类型不影响结果）
pub fn pool2d_output(input: &Shape, config: &PoolConfig, defaults: &LayerDefaults) -> Shape {
    match input {
        Shape::Tensor {
            height,
            width,
            channels,
        } => {
            let stride = config.stride(defaults);
            Shape::tensor(
                Integer::div_floor(height, &stride),
                Integer::div_floor(width, &stride),
                *channels,
            )
        }
        _ => input.clone(),
    }
}

/// 全连接层输出形状
pub fn dense_output(_input: &Shape, config: &DenseConfig, defaults: &LayerDefaults) -> Shape {
    Shape::vector(config.units(defaults))
}
