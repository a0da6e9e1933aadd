use crate::alert::{AlertEvaluator, AlertPolicy};
use crate::history::HistoryStore;
use chrono::Utc;
use std::sync::Arc;
use tmhi_notify::NotifyManager;
use tmhi_shutdown::ShutdownListener;
use tmhi_types::Reading;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// 编排统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MonitorStats {
    pub readings: u64,
    pub alerts: u64,
}

/// 信号监控器
///
/// 唯一的历史写入方和告警状态持有者。对每条到达的记录依次：
/// 写入历史、判定告警、输出日志。
pub struct Monitor {
    /// 历史记录（HTTP 层持有只读副本）
    history: Arc<HistoryStore>,

    /// 告警判定
    evaluator: AlertEvaluator,

    /// 通知管理器
    notify: Arc<NotifyManager>,
}

impl Monitor {
    pub fn new(history: Arc<HistoryStore>, policy: AlertPolicy, notify: Arc<NotifyManager>) -> Self {
        Self {
            history,
            evaluator: AlertEvaluator::new(policy),
            notify,
        }
    }

    pub fn history(&self) -> Arc<HistoryStore> {
        self.history.clone()
    }

    pub fn evaluator(&self) -> &AlertEvaluator {
        &self.evaluator
    }

    /// 运行编排循环，直到收到关闭信号或采集端关闭
    ///
    /// 退出时不等待已派发的通知。
    pub async fn run(
        mut self,
        mut readings: mpsc::Receiver<Reading>,
        mut shutdown: ShutdownListener,
    ) -> MonitorStats {
        let mut stats = MonitorStats::default();

        info!(
            min_bars = self.evaluator.policy().min_bars,
            capacity = self.history.capacity(),
            "Monitor started"
        );

        loop {
            tokio::select! {
                biased;
                _ = shutdown.recv() => {
                    info!("Shutting down gracefully...");
                    break;
                }
                next = readings.recv() => match next {
                    Some(reading) => {
                        stats.readings += 1;
                        if self.handle_reading(reading).await.is_some() {
                            stats.alerts += 1;
                        }
                    }
                    None => {
                        info!("Poller channel closed, monitor stopping");
                        break;
                    }
                }
            }
        }

        info!(readings = stats.readings, alerts = stats.alerts, "Monitor stopped");
        stats
    }

    /// 处理一条新记录
    ///
    /// 触发告警时返回通知任务的句柄（值为成功投递的渠道数）。
    pub async fn handle_reading(&mut self, reading: Reading) -> Option<JoinHandle<usize>> {
        self.history.append(reading.clone()).await;

        let recent = self.history.recent(self.evaluator.policy().streak_len).await;
        let dispatched = self.evaluator.evaluate(&recent, Utc::now()).map(|alert| {
            warn!(
                bars = alert.reading.bars(),
                min_bars = alert.min_bars,
                priority = %alert.priority,
                "Signal persistently below threshold, dispatching alert"
            );

            let notify = self.notify.clone();
            let message = alert.to_message();
            tokio::spawn(async move { notify.broadcast(&message).await })
        });

        let five_g = &reading.signal.five_g;
        info!(
            bars = five_g.bars,
            rsrp = five_g.rsrp,
            rsrq = five_g.rsrq,
            sinr = five_g.sinr,
            "{}",
            reading
        );

        dispatched
    }
}
