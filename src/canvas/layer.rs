/*
 * @Author       : 老董
 * @Date         : 2026-10-09
 * @Description  : 画布节点的层类型与逐层配置
 *
 * 每种节点类型对应一个配置结构体，字段名与前端 JSON 保持一致（camelCase）。
 * 用户可编辑字段全部是 Option：缺失时由 `LayerDefaults` 兜底，而不是报错。
 */

use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};

use super::DatasetPreset;
use crate::engine::LayerDefaults;
use crate::shape::{Shape, conv2d_output, dense_output, pool2d_output};

/// 节点类型
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Input,
    Output,
    Conv,
    Pool,
    Dense,
    Watch,
    Generic,
}

impl NodeKind {
    /// 是否会改变流经的形状（卷积/池化/全连接）
    pub const fn is_transform(self) -> bool {
        matches!(self, Self::Conv | Self::Pool | Self::Dense)
    }

    /// 侧边栏上的中文名称
    pub const fn label(self) -> &'static str {
        match self {
            Self::Input => "输入层",
            Self::Output => "输出层",
            Self::Conv => "卷积层",
            Self::Pool => "池化层",
            Self::Dense => "全连接层",
            Self::Watch => "观察窗",
            Self::Generic => "通用层",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Output => "output",
            Self::Conv => "conv",
            Self::Pool => "pool",
            Self::Dense => "dense",
            Self::Watch => "watch",
            Self::Generic => "generic",
        }
    }
}

#[enum_dispatch(LayerSpec)]
pub trait TraitLayer {
    fn kind(&self) -> NodeKind;

    /// 根据上游形状计算本层输出形状，默认恒等
    fn output_shape(&self, input: &Shape, _defaults: &LayerDefaults) -> Shape {
        input.clone()
    }
}

/// 节点的层类型及其配置
///
/// JSON 形如 `{"kind": "conv", "config": {"kernelWidth": 3, ...}}`。
#[enum_dispatch]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "config", rename_all = "lowercase")]
pub enum LayerSpec {
    Input(InputConfig),
    Output(OutputConfig),
    Conv(ConvConfig),
    Pool(PoolConfig),
    Dense(DenseConfig),
    Watch(WatchConfig),
    Generic(GenericConfig),
}

impl LayerSpec {
    /// 刚拖放到画布上、尚未配置的层
    pub fn blank(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Input => InputConfig::default().into(),
            NodeKind::Output => OutputConfig::default().into(),
            NodeKind::Conv => ConvConfig::default().into(),
            NodeKind::Pool => PoolConfig::default().into(),
            NodeKind::Dense => DenseConfig::default().into(),
            NodeKind::Watch => WatchConfig::default().into(),
            NodeKind::Generic => GenericConfig::default().into(),
        }
    }
}

// ==================== 输入层 ====================

/// 输入尺寸的来源：自定义 或 数据集预设
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatType {
    #[default]
    Custom,
    Dataset,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InputConfig {
    pub format_type: FormatType,
    pub height: Option<i64>,
    pub width: Option<i64>,
    pub channels: Option<i64>,
    pub dataset_type: Option<DatasetPreset>,
}

impl InputConfig {
    pub const fn custom(height: i64, width: i64, channels: i64) -> Self {
        Self {
            format_type: FormatType::Custom,
            height: Some(height),
            width: Some(width),
            channels: Some(channels),
            dataset_type: None,
        }
    }

    pub const fn dataset(preset: DatasetPreset) -> Self {
        let (height, width, channels) = preset.dims();
        Self {
            format_type: FormatType::Dataset,
            height: Some(height),
            width: Some(width),
            channels: Some(channels),
            dataset_type: Some(preset),
        }
    }

    /// 源形状：三个维度齐全时取显式值，否则退回预设，再否则视为未配置
    pub fn source_shape(&self) -> Option<Shape> {
        match (self.height, self.width, self.channels, self.dataset_type) {
            (Some(h), Some(w), Some(c), _) => Some(Shape::tensor(h, w, c)),
            (_, _, _, Some(preset)) => {
                let (h, w, c) = preset.dims();
                Some(Shape::tensor(h, w, c))
            }
            _ => None,
        }
    }

    pub fn total_size(&self) -> Option<i128> {
        self.source_shape().and_then(|s| s.element_count())
    }
}

impl TraitLayer for InputConfig {
    fn kind(&self) -> NodeKind {
        NodeKind::Input
    }
}

// ==================== 输出层 ====================

/// 用户在输出层上声明的任务意图（仅展示用，不参与计算）
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputType {
    Classification,
    Regression,
    Reconstruction,
}

impl OutputType {
    pub const fn task_description(self) -> &'static str {
        match self {
            Self::Classification => "分类任务",
            Self::Regression => "回归任务",
            Self::Reconstruction => "重建任务",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OutputConfig {
    pub output_type: Option<OutputType>,
    pub class_count: Option<i64>,
    pub regression_dim: Option<i64>,
}

impl TraitLayer for OutputConfig {
    fn kind(&self) -> NodeKind {
        NodeKind::Output
    }
}

// ==================== 卷积层 ====================

/// 卷积层的输入通道：显式给定，或 `"auto"` 表示继承上游通道数
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawInputChannels", into = "RawInputChannels")]
pub enum InputChannels {
    #[default]
    Auto,
    Fixed(i64),
}

#[derive(Clone, Copy, Serialize, Deserialize)]
#[serde(untagged)]
enum RawInputChannels {
    Fixed(i64),
    Keyword(ChannelKeyword),
}

#[derive(Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ChannelKeyword {
    Auto,
}

impl From<RawInputChannels> for InputChannels {
    fn from(raw: RawInputChannels) -> Self {
        match raw {
            RawInputChannels::Fixed(n) => Self::Fixed(n),
            RawInputChannels::Keyword(ChannelKeyword::Auto) => Self::Auto,
        }
    }
}

impl From<InputChannels> for RawInputChannels {
    fn from(channels: InputChannels) -> Self {
        match channels {
            InputChannels::Fixed(n) => Self::Fixed(n),
            InputChannels::Auto => Self::Keyword(ChannelKeyword::Auto),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConvConfig {
    pub kernel_width: Option<i64>,
    pub kernel_height: Option<i64>,
    pub stride: Option<i64>,
    pub padding: Option<i64>,
    pub input_channels: InputChannels,
    pub output_channels: Option<i64>,
}

impl ConvConfig {
    pub const fn new(kernel: (i64, i64), stride: i64, padding: i64, output_channels: i64) -> Self {
        Self {
            kernel_width: Some(kernel.0),
            kernel_height: Some(kernel.1),
            stride: Some(stride),
            padding: Some(padding),
            input_channels: InputChannels::Auto,
            output_channels: Some(output_channels),
        }
    }

    pub fn with_input_channels(mut self, input_channels: InputChannels) -> Self {
        self.input_channels = input_channels;
        self
    }

    pub fn kernel_width(&self, defaults: &LayerDefaults) -> i64 {
        self.kernel_width.unwrap_or(defaults.conv_kernel)
    }

    pub fn kernel_height(&self, defaults: &LayerDefaults) -> i64 {
        self.kernel_height.unwrap_or(defaults.conv_kernel)
    }

    /// 非正步长视同缺失（缺省值同样至少为 1）
    pub fn stride(&self, defaults: &LayerDefaults) -> i64 {
        self.stride
            .filter(|s| *s > 0)
            .unwrap_or(defaults.conv_stride)
            .max(1)
    }

    pub fn padding(&self, defaults: &LayerDefaults) -> i64 {
        self.padding.unwrap_or(defaults.conv_padding)
    }

    pub fn output_channels(&self, defaults: &LayerDefaults) -> i64 {
        self.output_channels.unwrap_or(defaults.conv_output_channels)
    }

    /// 实际输入通道数：`auto` 时取上游张量的通道数（仅作记录，不影响计算）
    pub fn resolved_input_channels(&self, upstream: &Shape) -> Option<i64> {
        match self.input_channels {
            InputChannels::Fixed(n) => Some(n),
            InputChannels::Auto => upstream.channels(),
        }
    }
}

impl TraitLayer for ConvConfig {
    fn kind(&self) -> NodeKind {
        NodeKind::Conv
    }

    fn output_shape(&self, input: &Shape, defaults: &LayerDefaults) -> Shape {
        conv2d_output(input, self, defaults)
    }
}

// ==================== 池化层 ====================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoolingType {
    #[default]
    Max,
    Average,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PoolConfig {
    pub pooling_type: PoolingType,
    pub kernel_size: Option<i64>,
    pub stride: Option<i64>,
}

impl PoolConfig {
    pub const fn new(pooling_type: PoolingType, kernel_size: i64, stride: i64) -> Self {
        Self {
            pooling_type,
            kernel_size: Some(kernel_size),
            stride: Some(stride),
        }
    }

    pub fn kernel_size(&self, defaults: &LayerDefaults) -> i64 {
        self.kernel_size.unwrap_or(defaults.pool_kernel)
    }

    pub fn stride(&self, defaults: &LayerDefaults) -> i64 {
        self.stride
            .filter(|s| *s > 0)
            .unwrap_or(defaults.pool_stride)
            .max(1)
    }
}

impl TraitLayer for PoolConfig {
    fn kind(&self) -> NodeKind {
        NodeKind::Pool
    }

    fn output_shape(&self, input: &Shape, defaults: &LayerDefaults) -> Shape {
        pool2d_output(input, self, defaults)
    }
}

// ==================== 全连接层 ====================

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DenseConfig {
    pub units: Option<i64>,
    pub activation: Option<String>,
}

impl DenseConfig {
    pub fn new(units: i64) -> Self {
        Self {
            units: Some(units),
            activation: None,
        }
    }

    pub fn with_activation(mut self, activation: &str) -> Self {
        self.activation = Some(activation.to_string());
        self
    }

    pub fn units(&self, defaults: &LayerDefaults) -> i64 {
        self.units.unwrap_or(defaults.dense_units)
    }

    pub fn activation(&self) -> &str {
        self.activation.as_deref().unwrap_or("relu")
    }
}

impl TraitLayer for DenseConfig {
    fn kind(&self) -> NodeKind {
        NodeKind::Dense
    }

    fn output_shape(&self, input: &Shape, defaults: &LayerDefaults) -> Shape {
        dense_output(input, self, defaults)
    }
}

// ==================== 观察窗 / 通用层 ====================

/// 观察窗没有配置，只是路径上的观测点
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchConfig {}

impl TraitLayer for WatchConfig {
    fn kind(&self) -> NodeKind {
        NodeKind::Watch
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenericConfig {
    pub label: Option<String>,
}

impl TraitLayer for GenericConfig {
    fn kind(&self) -> NodeKind {
        NodeKind::Generic
    }
}
