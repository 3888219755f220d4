//! 提示框自动关闭 - 业务能力层
//!
//! 初始化时已存在的 `.alert` 元素在固定延迟后通过注入的 `Dismissible` 关闭

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

use crate::dom::{Document, DocumentHandle, NodeId, Selector};
use crate::markup;

/// 关闭提示框的能力
pub trait Dismissible: Send + Sync {
    fn dismiss(&self, doc: &mut Document, alert: NodeId);
}

/// 默认实现：去掉 `show` 后把元素从文档中移除，已移除的元素不做处理
#[derive(Debug, Default, Clone, Copy)]
pub struct RemoveOnDismiss;

impl Dismissible for RemoveOnDismiss {
    fn dismiss(&self, doc: &mut Document, alert: NodeId) {
        if !doc.is_connected(alert) {
            debug!("提示框 {} 已不在文档中", doc.describe(alert));
            return;
        }
        doc.remove_class(alert, markup::ALERT_SHOW_CLASS);
        doc.remove(alert);
    }
}

/// 提示框关闭调度器
#[derive(Debug)]
pub struct AlertDismisser {
    alerts: Vec<NodeId>,
    delay: Duration,
}

impl AlertDismisser {
    /// 只收集此刻已存在的提示框
    pub fn bind(doc: &Document, delay: Duration) -> Self {
        let alerts = doc.query_selector_all(doc.root(), &Selector::class(markup::ALERT_CLASS));
        debug!("发现 {} 个提示框", alerts.len());
        Self { alerts, delay }
    }

    pub fn alerts(&self) -> &[NodeId] {
        &self.alerts
    }

    /// 每个提示框一个延迟任务
    pub fn schedule(
        self,
        document: &DocumentHandle,
        dismisser: Arc<dyn Dismissible>,
    ) -> Vec<JoinHandle<()>> {
        let delay = self.delay;
        self.alerts
            .into_iter()
            .map(|alert| {
                let document = document.clone();
                let dismisser = Arc::clone(&dismisser);
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    document.write(|doc| dismisser.dismiss(doc, alert));
                })
            })
            .collect()
    }
}
