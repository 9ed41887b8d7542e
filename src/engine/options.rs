//! 引擎配置：层字段缺省值、撤销历史长度、布局参数
//!
//! 所有字段都有缺省值，JSON 中只需给出想覆盖的部分：
//!
//! ```ignore
//! let options = EngineOptions::from_json(r#"{"defaults": {"denseUnits": 64}}"#)?;
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::canvas::{CanvasError, LayoutOptions};

/// 层配置缺失字段时使用的缺省值
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayerDefaults {
    pub conv_kernel: i64,
    pub conv_stride: i64,
    pub conv_padding: i64,
    pub conv_output_channels: i64,
    pub pool_kernel: i64,
    pub pool_stride: i64,
    pub dense_units: i64,
}

impl Default for LayerDefaults {
    fn default() -> Self {
        Self {
            conv_kernel: 3,
            conv_stride: 1,
            conv_padding: 0,
            conv_output_channels: 32,
            pool_kernel: 2,
            pool_stride: 2,
            dense_units: 128,
        }
    }
}

/// 引擎整体配置
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineOptions {
    pub defaults: LayerDefaults,
    /// 撤销历史最多保留的快照数
    pub history_capacity: usize,
    pub layout: LayoutOptions,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            defaults: LayerDefaults::default(),
            history_capacity: 50,
            layout: LayoutOptions::default(),
        }
    }
}

impl EngineOptions {
    pub fn from_json(json: &str) -> Result<Self, CanvasError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CanvasError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, CanvasError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
