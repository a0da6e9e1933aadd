use tokio::signal;
use tokio::sync::broadcast;
use tracing::info;

/// 关闭信号类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownSignal {
    /// SIGTERM
    Term,

    /// SIGINT - Ctrl+C
    Interrupt,

    /// 手动触发
    Manual,
}

/// 信号处理器
///
/// 进程内唯一的取消源，各任务通过 [`ShutdownListener`] 订阅。
pub struct SignalHandler {
    shutdown_tx: broadcast::Sender<ShutdownSignal>,
}

impl SignalHandler {
    pub fn new() -> (Self, broadcast::Receiver<ShutdownSignal>) {
        let (tx, rx) = broadcast::channel(16);
        (Self { shutdown_tx: tx }, rx)
    }

    /// 等待广播通道上的信号（手动触发或系统信号转发）
    pub async fn wait_for_signal(&self) -> ShutdownSignal {
        let mut rx = self.shutdown_tx.subscribe();
        rx.recv().await.unwrap_or(ShutdownSignal::Manual)
    }

    /// 等待系统信号并广播给所有订阅者
    #[cfg(unix)]
    pub async fn wait_for_system_signal(&self) -> std::io::Result<ShutdownSignal> {
        use signal::unix::{signal, SignalKind};

        let mut sigterm = signal(SignalKind::terminate())?;
        let mut sigint = signal(SignalKind::interrupt())?;

        let received = tokio::select! {
            _ = sigterm.recv() => {
                info!("Received SIGTERM");
                ShutdownSignal::Term
            }
            _ = sigint.recv() => {
                info!("Received SIGINT");
                ShutdownSignal::Interrupt
            }
        };

        let _ = self.shutdown_tx.send(received);
        Ok(received)
    }

    /// 等待系统信号（Windows 版本）
    #[cfg(not(unix))]
    pub async fn wait_for_system_signal(&self) -> std::io::Result<ShutdownSignal> {
        signal::ctrl_c().await?;
        info!("Received Ctrl+C");
        let _ = self.shutdown_tx.send(ShutdownSignal::Interrupt);
        Ok(ShutdownSignal::Interrupt)
    }

    /// 手动触发关闭
    pub fn trigger_shutdown(&self) {
        info!("Manual shutdown triggered");
        let _ = self.shutdown_tx.send(ShutdownSignal::Manual);
    }

    /// 订阅关闭信号
    pub fn subscribe(&self) -> broadcast::Receiver<ShutdownSignal> {
        self.shutdown_tx.subscribe()
    }

    /// 创建一个关闭监听器
    pub fn listener(&self) -> ShutdownListener {
        ShutdownListener::new(self.subscribe())
    }
}

impl Default for SignalHandler {
    fn default() -> Self {
        Self::new().0
    }
}

/// 关闭监听器
///
/// 通道关闭或消息滞后都视为已收到关闭信号。`recv` 可安全地用在 `select!` 中。
pub struct ShutdownListener {
    rx: broadcast::Receiver<ShutdownSignal>,
}

impl ShutdownListener {
    pub fn new(rx: broadcast::Receiver<ShutdownSignal>) -> Self {
        Self { rx }
    }

    pub async fn recv(&mut self) -> ShutdownSignal {
        self.rx.recv().await.unwrap_or(ShutdownSignal::Manual)
    }
}
