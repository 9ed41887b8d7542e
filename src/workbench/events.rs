//! 传播结果的通知接口：引擎 → 界面
//!
//! 界面通过 `Workbench::subscribe` 注册回调或通道，每次传播结束后收到完整报告。

use log::debug;
use std::sync::mpsc::Sender;

use crate::engine::PropagationReport;

/// 注解更新的接收方
pub trait AnnotationSink {
    fn on_annotations(&mut self, report: &PropagationReport);
}

impl<F> AnnotationSink for F
where
    F: FnMut(&PropagationReport),
{
    fn on_annotations(&mut self, report: &PropagationReport) {
        self(report);
    }
}

/// 把报告发送到通道的接收方
pub struct ChannelSink(pub Sender<PropagationReport>);

impl AnnotationSink for ChannelSink {
    fn on_annotations(&mut self, report: &PropagationReport) {
        if self.0.send(report.clone()).is_err() {
            debug!("注解通道的接收端已关闭");
        }
    }
}
