/*
 * @Author       : 老董
 * @Date         : 2026-10-11
 * @Description  : 任务类型推断：根据最终输出形状（与输入形状对照）猜测网络在做什么
 *
 * 判定顺序：
 * 1. 输出张量与输入张量高、宽、通道完全一致 → 重建
 * 2. 输出为向量：1 → 二分类或回归；2 → 二分类或坐标；3~1000 → 多分类；>1000 → 高维回归
 * 3. 输出为张量：元素数少于输入 → 特征提取，否则 → 张量输出
 * 4. 其余 → 未知（detail 中放原始形状的 JSON）
 *
 * 这是一个全函数：任何输入都恰好得到一个结果，不会出错。
 */

use serde::{Deserialize, Serialize};

use crate::shape::Shape;

/// 推断出的任务类型
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    Reconstruction,
    BinaryClassificationOrRegression,
    BinaryClassificationOrCoordinate,
    MulticlassClassification,
    HighDimensionalRegression,
    FeatureExtraction,
    TensorOutput,
    Unknown,
}

/// 任务推断结果
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskInference {
    #[serde(rename = "type")]
    pub kind: TaskKind,
    pub description: String,
    pub detail: String,
    /// 多分类时对常见类别数的提示（如 `MNIST/CIFAR-10`）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl TaskInference {
    fn new(kind: TaskKind, description: &str, detail: String) -> Self {
        Self {
            kind,
            description: description.to_string(),
            detail,
            hint: None,
        }
    }
}

/// 常见分类任务的类别数提示
pub fn classification_hint(class_count: i64) -> &'static str {
    match class_count {
        2 => "二分类",
        10 => "MNIST/CIFAR-10",
        100 => "CIFAR-100",
        1000 => "ImageNet",
        _ => "自定义分类",
    }
}

/// 根据输出形状（以及输入形状）推断任务类型
pub fn infer_task(output: &Shape, input: Option<&Shape>) -> TaskInference {
    if let Some(input) = input
        && output.same_dims(input)
    {
        return TaskInference::new(
            TaskKind::Reconstruction,
            "重建任务",
            format!("重建 {output} 图像"),
        );
    }

    match *output {
        Shape::Vector { size: 1 } => {
            return TaskInference::new(
                TaskKind::BinaryClassificationOrRegression,
                "二分类或回归",
                "1维输出 (二分类概率或单值回归)".to_string(),
            );
        }
        Shape::Vector { size: 2 } => {
            return TaskInference::new(
                TaskKind::BinaryClassificationOrCoordinate,
                "二分类或坐标回归",
                "2维输出 (二分类logits或坐标预测)".to_string(),
            );
        }
        Shape::Vector { size } if (3..=1000).contains(&size) => {
            let hint = classification_hint(size);
            return TaskInference {
                hint: Some(hint.to_string()),
                ..TaskInference::new(
                    TaskKind::MulticlassClassification,
                    "多分类任务",
                    format!("{size}类分类 ({hint})"),
                )
            };
        }
        Shape::Vector { size } if size > 1000 => {
            return TaskInference::new(
                TaskKind::HighDimensionalRegression,
                "高维回归",
                format!("{size}维输出向量"),
            );
        }
        _ => {}
    }

    if output.is_tensor() {
        let output_size = output.element_count().unwrap_or_default();
        let input_size = input
            .filter(|s| s.is_tensor())
            .and_then(Shape::element_count)
            .unwrap_or_default();

        return if input_size > 0 && output_size < input_size {
            TaskInference::new(
                TaskKind::FeatureExtraction,
                "特征提取",
                format!("提取特征 {output}"),
            )
        } else {
            TaskInference::new(TaskKind::TensorOutput, "张量输出", format!("{output} 张量"))
        };
    }

    // 非正尺寸的向量、未知形状都落到这里
    let detail = serde_json::to_string(output).unwrap_or_else(|_| format!("{output:?}"));
    TaskInference::new(TaskKind::Unknown, "未知任务类型", detail)
}
