use crate::message::NotifyMessage;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::StatusCode;

/// 单次投递结果
///
/// 接收端拒绝（非 2xx）不是错误，只体现在 `success = false`；
/// 连不上接收端等传输错误由 `Notifier::send` 以 `Err` 返回。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyResult {
    pub success: bool,
    /// 接收端返回的 HTTP 状态码
    pub status: Option<u16>,
    pub message: String,
}

impl NotifyResult {
    pub fn success() -> Self {
        Self {
            success: true,
            status: None,
            message: "delivered".to_string(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            status: None,
            message: message.into(),
        }
    }

    /// 按接收端的响应状态判定
    pub fn from_status(channel: &str, status: StatusCode) -> Self {
        let success = status.is_success();
        let message = if success {
            format!("{} accepted with status {}", channel, status)
        } else {
            format!("{} failed with status: {}", channel, status)
        };

        Self {
            success,
            status: Some(status.as_u16()),
            message,
        }
    }
}

/// 告警投递渠道
#[async_trait]
pub trait Notifier: Send + Sync {
    /// 投递一次，不重试
    async fn send(&self, message: &NotifyMessage) -> Result<NotifyResult>;

    fn name(&self) -> &str;

    /// 未配置地址的渠道返回 false，管理器会跳过它
    fn is_enabled(&self) -> bool {
        true
    }
}
