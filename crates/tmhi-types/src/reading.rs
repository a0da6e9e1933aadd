use crate::signal::{GatewayResponse, SignalInfo};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 一次采集到的信号快照
///
/// `captured_at` 取本地采集时间，网关响应里没有时间字段。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    #[serde(rename = "date", with = "rfc3339")]
    pub captured_at: DateTime<Utc>,

    pub signal: SignalInfo,
}

impl Reading {
    pub fn new(signal: SignalInfo) -> Self {
        Self::with_time(signal, Utc::now())
    }

    pub fn with_time(signal: SignalInfo, captured_at: DateTime<Utc>) -> Self {
        Self { captured_at, signal }
    }

    pub fn from_response(response: GatewayResponse) -> Self {
        Self::new(response.signal)
    }

    pub fn bars(&self) -> f64 {
        self.signal.five_g.bars
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let five_g = &self.signal.five_g;
        write!(
            f,
            "Signal 5G Bars: {:.1}, RSRP: {}, RSRQ: {}, SINR: {}",
            five_g.bars, five_g.rsrp, five_g.rsrq, five_g.sinr
        )
    }
}

/// RFC3339（秒级精度）序列化适配
mod rfc3339 {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Secs, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
