use crate::source::SignalSource;
use std::sync::Arc;
use std::time::Duration;
use tmhi_shutdown::ShutdownListener;
use tmhi_types::Reading;
use tokio::sync::mpsc;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

/// 生产环境采集周期
pub const PRODUCTION_INTERVAL: Duration = Duration::from_secs(60);

/// 调试模式采集周期
pub const DEBUG_INTERVAL: Duration = Duration::from_secs(5);

/// 采集统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollerStats {
    pub attempts: u64,
    pub delivered: u64,
    pub failures: u64,
}

/// 定时采集器
///
/// 启动时立即采集一次，之后按固定周期采集。采集失败只记录日志，不重试。
pub struct Poller {
    source: Arc<dyn SignalSource>,
    period: Duration,
}

impl Poller {
    pub fn new(source: Arc<dyn SignalSource>, period: Duration) -> Self {
        Self { source, period }
    }

    /// 运行采集循环
    ///
    /// 记录通过 `tx` 交给编排器，通道满时等待（背压）。收到关闭信号或
    /// 接收端关闭后返回；正在进行的请求不会被中断。
    pub async fn run(
        self,
        tx: mpsc::Sender<Reading>,
        mut shutdown: ShutdownListener,
    ) -> PollerStats {
        let mut ticker = interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut stats = PollerStats::default();

        info!(
            source = self.source.name(),
            period = ?self.period,
            "Poller started"
        );

        loop {
            tokio::select! {
                biased;
                _ = shutdown.recv() => {
                    info!("Poller received shutdown signal");
                    break;
                }
                _ = ticker.tick() => {}
            }

            stats.attempts += 1;

            let reading = match self.source.fetch().await {
                Ok(reading) => reading,
                Err(e) => {
                    stats.failures += 1;
                    warn!(source = self.source.name(), error = %e, "Error fetching update, skipping cycle");
                    continue;
                }
            };

            tokio::select! {
                biased;
                _ = shutdown.recv() => {
                    info!("Poller received shutdown signal while delivering");
                    break;
                }
                sent = tx.send(reading) => {
                    if sent.is_err() {
                        info!("Reading receiver closed, poller stopping");
                        break;
                    }
                    stats.delivered += 1;
                    debug!(delivered = stats.delivered, "Reading delivered");
                }
            }
        }

        info!(
            attempts = stats.attempts,
            delivered = stats.delivered,
            failures = stats.failures,
            "Poller stopped"
        );
        stats
    }
}
