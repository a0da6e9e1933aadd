use crate::error::{FetchError, Result};
use async_trait::async_trait;
use std::time::Duration;
use tmhi_types::{GatewayResponse, Reading};
use tracing::debug;

/// 网关信号状态接口
pub const DEFAULT_GATEWAY_URL: &str = "http://192.168.12.1/TMI/v1/gateway?get=signal";

/// 信号数据源 trait
#[async_trait]
pub trait SignalSource: Send + Sync {
    /// 采集一次信号；失败时本周期不产生记录
    async fn fetch(&self) -> Result<Reading>;

    /// 数据源名称
    fn name(&self) -> &str;
}

/// 网关 HTTP 客户端
pub struct GatewayClient {
    url: String,
    client: reqwest::Client,
}

impl GatewayClient {
    pub fn new(url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            url: url.into(),
            client,
        }
    }

    /// 预设超时的 HTTP 客户端：整体 30s，连接 10s，空闲连接 90s
    pub fn default_http_client() -> reqwest::Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
    }
}

#[async_trait]
impl SignalSource for GatewayClient {
    async fn fetch(&self) -> Result<Reading> {
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.bytes().await?;
        let parsed = GatewayResponse::from_slice(&body)?;

        debug!(url = %self.url, bytes = body.len(), "Fetched gateway signal status");
        Ok(Reading::from_response(parsed))
    }

    fn name(&self) -> &str {
        "gateway"
    }
}
