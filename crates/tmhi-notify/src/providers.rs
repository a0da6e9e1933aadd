use crate::message::NotifyMessage;
use crate::notifier::{Notifier, NotifyResult};
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 通知请求的超时时间
pub const NOTIFY_TIMEOUT: Duration = Duration::from_secs(10);

fn default_http_client() -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder().timeout(NOTIFY_TIMEOUT).build()?)
}

// ============================================================================
// ntfy 通知
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NtfyConfig {
    /// 主题地址，例如 `https://ntfy.sh/my-gateway`
    pub url: String,
}

pub struct NtfyNotifier {
    config: NtfyConfig,
    client: reqwest::Client,
}

impl NtfyNotifier {
    pub fn new(config: NtfyConfig) -> Result<Self> {
        Ok(Self::with_client(config, default_http_client()?))
    }

    pub fn with_client(config: NtfyConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }
}

#[async_trait]
impl Notifier for NtfyNotifier {
    async fn send(&self, message: &NotifyMessage) -> Result<NotifyResult> {
        let response = self
            .client
            .post(&self.config.url)
            .header("Content-Type", "application/json")
            .header("X-Title", message.title.as_str())
            .header("X-Priority", message.priority.as_str())
            .body(message.to_string())
            .send()
            .await?;

        Ok(NotifyResult::from_status(self.name(), response.status()))
    }

    fn name(&self) -> &str {
        "ntfy"
    }

    fn is_enabled(&self) -> bool {
        !self.config.url.trim().is_empty()
    }
}

// ============================================================================
// Webhook 通知
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookConfig {
    pub url: String,
    pub headers: Option<std::collections::HashMap<String, String>>,
}

pub struct WebhookNotifier {
    config: WebhookConfig,
    client: reqwest::Client,
}

impl WebhookNotifier {
    pub fn new(config: WebhookConfig) -> Result<Self> {
        Ok(Self::with_client(config, default_http_client()?))
    }

    pub fn with_client(config: WebhookConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn send(&self, message: &NotifyMessage) -> Result<NotifyResult> {
        let mut request = self.client.post(&self.config.url);

        if let Some(headers) = &self.config.headers {
            for (key, value) in headers {
                request = request.header(key, value);
            }
        }

        let response = request.json(message).send().await?;

        Ok(NotifyResult::from_status(self.name(), response.status()))
    }

    fn name(&self) -> &str {
        "webhook"
    }

    fn is_enabled(&self) -> bool {
        !self.config.url.trim().is_empty()
    }
}
