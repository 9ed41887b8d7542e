/*
 * @Author       : 老董
 * @Date         : 2026-10-10
 * @Description  : 画布节点上显示的一行说明文字
 */

use super::{CanvasNode, FormatType, InputChannels, LayerSpec, OutputType, PoolingType};
use crate::engine::LayerDefaults;
use crate::shape::Shape;

/// 生成节点的说明文字
///
/// # Arguments
/// * `node` - 画布节点（含配置和计算注解）
/// * `defaults` - 缺失字段的兜底值，与形状计算使用同一套
///
/// # Returns
/// 例如卷积层：`3×3 步长1 填充0 | 1→32通道`
pub fn format_node_caption(node: &CanvasNode, defaults: &LayerDefaults) -> String {
    let annotation = &node.annotation;
    match &node.layer {
        LayerSpec::Input(config) => match (config.source_shape(), config.dataset_type) {
            (Some(shape), Some(preset)) if config.format_type == FormatType::Dataset => {
                format!("{} ({shape})", preset.name())
            }
            (Some(shape), _) => shape.to_string(),
            (None, _) => "点击配置".to_string(),
        },
        LayerSpec::Conv(config) => {
            // auto 时优先显示实际的上游通道数
            let input_ch = match (config.input_channels, annotation.input_channels) {
                (InputChannels::Fixed(n), _) => n.to_string(),
                (InputChannels::Auto, Some(n)) => n.to_string(),
                (InputChannels::Auto, None) => "自动".to_string(),
            };
            format!(
                "{}×{} 步长{} 填充{} | {}→{}通道",
                config.kernel_width(defaults),
                config.kernel_height(defaults),
                config.stride(defaults),
                config.padding(defaults),
                input_ch,
                config.output_channels(defaults)
            )
        }
        LayerSpec::Pool(config) => {
            let kind = match config.pooling_type {
                PoolingType::Max => "最大",
                PoolingType::Average => "平均",
            };
            let kernel = config.kernel_size(defaults);
            format!("{kind}池化 {kernel}×{kernel} 步长{}", config.stride(defaults))
        }
        LayerSpec::Dense(config) => format!(
            "{}神经元 {}",
            config.units(defaults),
            config.activation().to_uppercase()
        ),
        LayerSpec::Output(config) => {
            if let (Some(shape), Some(task)) = (&annotation.computed_shape, &annotation.inferred_task)
            {
                return format!("{} | {}", task.description, output_shape_text(shape));
            }
            match config.output_type {
                Some(output_type @ OutputType::Classification) => format!(
                    "{}: {} 类",
                    output_type.task_description(),
                    config.class_count.unwrap_or_default()
                ),
                Some(output_type @ OutputType::Regression) => format!(
                    "{}: {} 维",
                    output_type.task_description(),
                    config.regression_dim.unwrap_or_default()
                ),
                Some(output_type) => output_type.task_description().to_string(),
                None => "等待网络连接".to_string(),
            }
        }
        LayerSpec::Watch(_) => annotation
            .computed_shape
            .as_ref()
            .map_or_else(|| "等待计算".to_string(), ToString::to_string),
        LayerSpec::Generic(config) => config.label.clone().unwrap_or_default(),
    }
}

fn output_shape_text(shape: &Shape) -> String {
    match shape {
        Shape::Vector { size } => format!("{size} 维输出"),
        other => other.to_string(),
    }
}
