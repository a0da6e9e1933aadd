#![allow(dead_code)]

use anyhow::Result as AnyResult;
use async_trait::async_trait;
use axum::{http::StatusCode, routing::get, Router};
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tmhi_monitor::{FetchError, Result, SignalSource};
use tmhi_notify::{Notifier, NotifyMessage, NotifyResult};
use tmhi_types::{FiveGSignal, Reading, SignalInfo};

/// 启动一个模拟网关，固定返回给定状态码和响应体
pub async fn spawn_gateway(status: StatusCode, body: &'static str) -> SocketAddr {
    let app = Router::new().route(
        "/TMI/v1/gateway",
        get(move || async move { (status, body) }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    addr
}

pub fn gateway_url(addr: SocketAddr) -> String {
    format!("http://{}/TMI/v1/gateway?get=signal", addr)
}

pub fn signal_with_bars(bars: f64) -> SignalInfo {
    SignalInfo {
        five_g: FiveGSignal {
            bars,
            rsrp: -105,
            rsrq: -13,
            sinr: 1,
            ..Default::default()
        },
        ..Default::default()
    }
}

/// 按脚本返回结果的数据源：`Some(bars)` 成功，`None` 失败；脚本耗尽后一直失败
pub struct ScriptedSource {
    script: Mutex<VecDeque<Option<f64>>>,
}

impl ScriptedSource {
    pub fn new(script: &[Option<f64>]) -> Self {
        Self {
            script: Mutex::new(script.iter().copied().collect()),
        }
    }
}

#[async_trait]
impl SignalSource for ScriptedSource {
    async fn fetch(&self) -> Result<Reading> {
        let next = self.script.lock().unwrap().pop_front().flatten();
        match next {
            Some(bars) => Ok(Reading::new(signal_with_bars(bars))),
            None => Err(FetchError::Other(anyhow::anyhow!("scripted failure"))),
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// 记录收到的通知
pub struct RecordingNotifier {
    pub sent: Arc<AtomicUsize>,
    pub messages: Arc<Mutex<Vec<NotifyMessage>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(AtomicUsize::new(0)),
            messages: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, message: &NotifyMessage) -> AnyResult<NotifyResult> {
        self.sent.fetch_add(1, Ordering::SeqCst);
        self.messages.lock().unwrap().push(message.clone());
        Ok(NotifyResult::success())
    }

    fn name(&self) -> &str {
        "recording"
    }
}
