//! 输入层的数据集预设格式

use serde::{Deserialize, Serialize};

/// 预定义的数据集格式（选中后输入层的高、宽、通道随之确定）
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DatasetPreset {
    #[serde(rename = "MNIST")]
    Mnist,
    #[serde(rename = "FashionMNIST")]
    FashionMnist,
    #[serde(rename = "CIFAR-10")]
    Cifar10,
    #[serde(rename = "PASCAL-VOC")]
    PascalVoc,
    #[serde(rename = "ImageNet")]
    ImageNet,
}

impl DatasetPreset {
    pub const ALL: [Self; 5] = [
        Self::Mnist,
        Self::FashionMnist,
        Self::Cifar10,
        Self::PascalVoc,
        Self::ImageNet,
    ];

    /// (height, width, channels)
    pub const fn dims(self) -> (i64, i64, i64) {
        match self {
            Self::Mnist | Self::FashionMnist => (28, 28, 1),
            Self::Cifar10 => (32, 32, 3),
            Self::PascalVoc | Self::ImageNet => (224, 224, 3),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Mnist => "MNIST",
            Self::FashionMnist => "FashionMNIST",
            Self::Cifar10 => "CIFAR-10",
            Self::PascalVoc => "PASCAL-VOC",
            Self::ImageNet => "ImageNet",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Mnist | Self::FashionMnist => "28×28 灰度图像",
            Self::Cifar10 => "32×32 彩色图像",
            Self::PascalVoc | Self::ImageNet => "224×224 彩色图像",
        }
    }
}
