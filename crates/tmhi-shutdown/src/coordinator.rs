use crate::signal::{ShutdownListener, ShutdownSignal, SignalHandler};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::{info, warn};

/// 默认宽限期
pub const DEFAULT_GRACE_PERIOD: Duration = Duration::from_secs(5);

/// 任务排空结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrainOutcome {
    /// 宽限期内自行结束
    Completed,

    /// 超过宽限期被强制中止
    Aborted,
}

/// 关闭协调器
pub struct ShutdownCoordinator {
    signal_handler: SignalHandler,
    grace_period: Duration,
}

impl ShutdownCoordinator {
    pub fn builder() -> ShutdownCoordinatorBuilder {
        ShutdownCoordinatorBuilder::new()
    }

    /// 获取信号处理器的引用
    pub fn signal_handler(&self) -> &SignalHandler {
        &self.signal_handler
    }

    pub fn listener(&self) -> ShutdownListener {
        self.signal_handler.listener()
    }

    pub fn grace_period(&self) -> Duration {
        self.grace_period
    }

    /// 等待系统信号或手动触发
    pub async fn wait(&self) -> std::io::Result<ShutdownSignal> {
        info!("Shutdown coordinator started, waiting for signal...");

        let signal = tokio::select! {
            res = self.signal_handler.wait_for_system_signal() => res?,
            signal = self.signal_handler.wait_for_signal() => signal,
        };

        info!(signal = ?signal, "Received shutdown signal");
        Ok(signal)
    }

    /// 在宽限期内等待任务结束，超时则中止
    pub async fn drain<T>(&self, name: &str, handle: JoinHandle<T>) -> DrainOutcome {
        let abort = handle.abort_handle();

        match timeout(self.grace_period, handle).await {
            Ok(Ok(_)) => {
                info!(task = name, "Task stopped");
                DrainOutcome::Completed
            }
            Ok(Err(e)) => {
                warn!(task = name, error = %e, "Task ended abnormally");
                DrainOutcome::Completed
            }
            Err(_) => {
                abort.abort();
                warn!(
                    task = name,
                    grace_period = ?self.grace_period,
                    "Task did not stop within grace period, aborted"
                );
                DrainOutcome::Aborted
            }
        }
    }
}

/// 关闭协调器构建器
pub struct ShutdownCoordinatorBuilder {
    signal_handler: Option<SignalHandler>,
    grace_period: Duration,
}

impl ShutdownCoordinatorBuilder {
    pub fn new() -> Self {
        Self {
            signal_handler: None,
            grace_period: DEFAULT_GRACE_PERIOD,
        }
    }

    pub fn with_signal_handler(mut self, handler: SignalHandler) -> Self {
        self.signal_handler = Some(handler);
        self
    }

    pub fn with_grace_period(mut self, grace_period: Duration) -> Self {
        self.grace_period = grace_period;
        self
    }

    pub fn build(self) -> ShutdownCoordinator {
        let signal_handler = self
            .signal_handler
            .unwrap_or_else(|| SignalHandler::new().0);

        ShutdownCoordinator {
            signal_handler,
            grace_period: self.grace_period,
        }
    }
}

impl Default for ShutdownCoordinatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
