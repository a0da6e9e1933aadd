use crate::message::{NotifyChannel, NotifyMessage};
use crate::notifier::Notifier;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info};

/// 通知管理器
///
/// 持有各渠道的通知器，投递失败只记录日志。
pub struct NotifyManager {
    notifiers: Arc<RwLock<HashMap<NotifyChannel, Box<dyn Notifier>>>>,
}

impl NotifyManager {
    pub fn new() -> Self {
        Self {
            notifiers: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// 注册通知器，同一渠道重复注册会覆盖
    pub async fn register(&self, channel: NotifyChannel, notifier: Box<dyn Notifier>) {
        let mut notifiers = self.notifiers.write().await;
        info!(
            notifier = notifier.name(),
            enabled = notifier.is_enabled(),
            "Registered notifier"
        );
        notifiers.insert(channel, notifier);
    }

    /// 是否存在已启用的通知器
    pub async fn has_enabled(&self) -> bool {
        let notifiers = self.notifiers.read().await;
        notifiers.values().any(|n| n.is_enabled())
    }

    /// 发送通知到所有已启用渠道，返回成功投递的数量
    pub async fn broadcast(&self, message: &NotifyMessage) -> usize {
        let notifiers = self.notifiers.read().await;
        let mut delivered = 0;

        for notifier in notifiers.values() {
            if notifier.is_enabled() && Self::deliver(notifier.as_ref(), message).await {
                delivered += 1;
            }
        }

        delivered
    }

    async fn deliver(notifier: &dyn Notifier, message: &NotifyMessage) -> bool {
        match notifier.send(message).await {
            Ok(result) if result.success => {
                info!(
                    notifier = notifier.name(),
                    priority = %message.priority,
                    "Notification sent: {}",
                    message.title
                );
                true
            }
            Ok(result) => {
                error!(
                    notifier = notifier.name(),
                    "Notification failed: {}",
                    result.message
                );
                false
            }
            Err(e) => {
                error!(notifier = notifier.name(), error = %e, "Notification error");
                false
            }
        }
    }
}

impl Default for NotifyManager {
    fn default() -> Self {
        Self::new()
    }
}
