use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 通知优先级（取值与 ntfy 的 `X-Priority` 一致）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotifyPriority {
    Urgent,
    High,
    Default,
    Low,
}

impl NotifyPriority {
    /// 按信号格数映射优先级，格数越低越紧急
    pub fn for_bars(bars: f64) -> Self {
        if bars < 2.0 {
            NotifyPriority::Urgent
        } else if bars < 3.0 {
            NotifyPriority::High
        } else if bars < 4.0 {
            NotifyPriority::Default
        } else {
            NotifyPriority::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NotifyPriority::Urgent => "urgent",
            NotifyPriority::High => "high",
            NotifyPriority::Default => "default",
            NotifyPriority::Low => "low",
        }
    }
}

impl fmt::Display for NotifyPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 通知渠道
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotifyChannel {
    Ntfy,
    Webhook,
}

/// 通知消息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyMessage {
    /// 标题
    pub title: String,

    /// 内容
    pub content: String,

    /// 优先级
    pub priority: NotifyPriority,

    /// 时间
    pub timestamp: DateTime<Utc>,
}

impl NotifyMessage {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        priority: NotifyPriority,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            priority,
            timestamp: Utc::now(),
        }
    }
}

impl fmt::Display for NotifyMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.content)
    }
}
