use chrono::{DateTime, Utc};
use std::time::Duration;
use tmhi_notify::{NotifyMessage, NotifyPriority};
use tmhi_types::Reading;
use tracing::debug;

/// 默认最低信号格数
pub const DEFAULT_MIN_BARS: f64 = 2.0;

/// 连续低于阈值多少条才告警
pub const ALERT_STREAK: usize = 5;

/// 两次告警之间的最短间隔
pub const ALERT_COOLDOWN: Duration = Duration::from_secs(15 * 60);

pub const ALERT_TITLE: &str = "TMHI Signal Low";

/// 告警策略：阈值 + 持续 + 冷却
#[derive(Debug, Clone)]
pub struct AlertPolicy {
    pub min_bars: f64,
    pub streak_len: usize,
    pub cooldown: Duration,
}

impl AlertPolicy {
    pub fn with_min_bars(min_bars: f64) -> Self {
        Self {
            min_bars,
            ..Default::default()
        }
    }
}

impl Default for AlertPolicy {
    fn default() -> Self {
        Self {
            min_bars: DEFAULT_MIN_BARS,
            streak_len: ALERT_STREAK,
            cooldown: ALERT_COOLDOWN,
        }
    }
}

/// 一次已决定发送的告警
#[derive(Debug, Clone)]
pub struct SignalAlert {
    pub reading: Reading,
    pub min_bars: f64,
    pub priority: NotifyPriority,
}

impl SignalAlert {
    pub fn to_message(&self) -> NotifyMessage {
        let five_g = &self.reading.signal.five_g;
        let content = format!(
            "Signal strength is below threshold!\nCurrent: {:.1} bars (minimum: {})\nRSRP: {}, RSRQ: {}, SINR: {}",
            five_g.bars, self.min_bars, five_g.rsrp, five_g.rsrq, five_g.sinr
        );
        NotifyMessage::new(ALERT_TITLE, content, self.priority)
    }
}

/// 告警判定
///
/// `last_notified_at` 在决定发送时即更新，投递失败也不回滚。
#[derive(Debug)]
pub struct AlertEvaluator {
    policy: AlertPolicy,
    last_notified_at: Option<DateTime<Utc>>,
}

impl AlertEvaluator {
    pub fn new(policy: AlertPolicy) -> Self {
        Self {
            policy,
            last_notified_at: None,
        }
    }

    pub fn policy(&self) -> &AlertPolicy {
        &self.policy
    }

    pub fn last_notified_at(&self) -> Option<DateTime<Utc>> {
        self.last_notified_at
    }

    /// 对最新一条记录做告警判定
    ///
    /// `recent` 为按时间排序的最近记录，最后一条是刚到达的记录。
    pub fn evaluate(&mut self, recent: &[Reading], now: DateTime<Utc>) -> Option<SignalAlert> {
        let latest = recent.last()?;
        if !self.is_low(latest) {
            return None;
        }

        if recent.len() < self.policy.streak_len {
            debug!(
                have = recent.len(),
                need = self.policy.streak_len,
                "Low signal, not enough history yet"
            );
            return None;
        }

        let window = &recent[recent.len() - self.policy.streak_len..];
        if !window.iter().all(|r| self.is_low(r)) {
            debug!(bars = latest.bars(), "Low signal, streak not yet persistent");
            return None;
        }

        if let Some(last) = self.last_notified_at {
            if self.in_cooldown(last, now) {
                debug!(last_notified_at = %last, "Low signal, alert suppressed by cooldown");
                return None;
            }
        }

        self.last_notified_at = Some(now);

        Some(SignalAlert {
            reading: latest.clone(),
            min_bars: self.policy.min_bars,
            priority: NotifyPriority::for_bars(latest.bars()),
        })
    }

    // NaN 不算低信号
    fn is_low(&self, reading: &Reading) -> bool {
        reading.bars() < self.policy.min_bars
    }

    // 时钟回拨（elapsed 为负）同样视为冷却中
    fn in_cooldown(&self, last: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match now.signed_duration_since(last).to_std() {
            Ok(elapsed) => elapsed < self.policy.cooldown,
            Err(_) => true,
        }
    }
}
