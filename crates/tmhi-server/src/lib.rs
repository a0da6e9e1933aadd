pub mod api;
pub mod cli;
pub mod config;
pub mod logging;

use anyhow::{anyhow, Result};
use axum::Router;
use std::sync::Arc;
use tmhi_monitor::{GatewayClient, HistoryStore, Monitor, Poller, HISTORY_CAPACITY};
use tmhi_notify::{
    NotifyChannel, NotifyManager, NtfyConfig, NtfyNotifier, WebhookConfig, WebhookNotifier,
};
use tmhi_shutdown::{ShutdownCoordinator, ShutdownListener, DEFAULT_GRACE_PERIOD};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

pub use crate::config::AppConfig;

/// HTTP 层共享状态，只读访问历史
pub struct AppState {
    pub history: Arc<HistoryStore>,
}

fn non_blank(url: &Option<String>) -> Option<&str> {
    url.as_deref().map(str::trim).filter(|u| !u.is_empty())
}

/// 按配置注册通知渠道，地址为空的渠道不注册
pub async fn build_notify_manager(config: &crate::config::NotifyConfig) -> Result<NotifyManager> {
    let manager = NotifyManager::new();

    if let Some(url) = non_blank(&config.ntfy_url) {
        let notifier = NtfyNotifier::new(NtfyConfig {
            url: url.to_string(),
        })?;
        manager.register(NotifyChannel::Ntfy, Box::new(notifier)).await;
    }

    if let Some(url) = non_blank(&config.webhook_url) {
        let notifier = WebhookNotifier::new(WebhookConfig {
            url: url.to_string(),
            headers: None,
        })?;
        manager.register(NotifyChannel::Webhook, Box::new(notifier)).await;
    }

    Ok(manager)
}

/// 运行 HTTP 服务直到收到关闭信号
pub async fn serve(
    listener: TcpListener,
    router: Router,
    mut shutdown: ShutdownListener,
) -> std::io::Result<()> {
    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            shutdown.recv().await;
        })
        .await
}

/// 组装并运行整个服务：采集 → 编排 → HTTP
pub async fn run(config: AppConfig) -> Result<()> {
    let coordinator = ShutdownCoordinator::builder()
        .with_grace_period(DEFAULT_GRACE_PERIOD)
        .build();

    let history = Arc::new(HistoryStore::new(HISTORY_CAPACITY));

    let notify = Arc::new(build_notify_manager(&config.notify).await?);
    if !notify.has_enabled().await {
        warn!("No notification channel configured, alerts will only be logged");
    }

    let source = Arc::new(GatewayClient::new(
        config.monitor.gateway_url.clone(),
        GatewayClient::default_http_client()?,
    ));
    let poller = Poller::new(source, config.poll_interval());
    let monitor = Monitor::new(history.clone(), config.alert_policy(), notify);

    let listener = TcpListener::bind(config.listen_addr()).await?;
    info!(
        addr = %config.listen_addr(),
        "Open application on http://localhost:{}",
        config.server.port
    );

    let router = api::create_router(Arc::new(AppState { history }));
    let mut server = tokio::spawn(serve(listener, router, coordinator.listener()));

    let (tx, rx) = mpsc::channel(1);
    let poller_task = tokio::spawn(poller.run(tx, coordinator.listener()));
    let monitor_task = tokio::spawn(monitor.run(rx, coordinator.listener()));

    let server_exit = tokio::select! {
        signal = coordinator.wait() => {
            signal?;
            None
        }
        res = &mut server => Some(res),
    };

    if server_exit.is_some() {
        coordinator.signal_handler().trigger_shutdown();
    }

    coordinator.drain("monitor", monitor_task).await;
    coordinator.drain("poller", poller_task).await;

    match server_exit {
        None => {
            coordinator.drain("http-server", server).await;
            info!("Shutdown complete");
            Ok(())
        }
        Some(Ok(Ok(()))) => Err(anyhow!("HTTP server stopped unexpectedly")),
        Some(Ok(Err(e))) => {
            error!(error = %e, "HTTP server failed");
            Err(e.into())
        }
        Some(Err(e)) => Err(anyhow!("HTTP server task panicked: {}", e)),
    }
}
