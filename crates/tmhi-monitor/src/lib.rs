pub mod alert;
pub mod error;
pub mod history;
pub mod monitor;
pub mod poller;
pub mod source;

pub use alert::{
    AlertEvaluator, AlertPolicy, SignalAlert, ALERT_COOLDOWN, ALERT_STREAK, DEFAULT_MIN_BARS,
};
pub use error::{FetchError, Result};
pub use history::{HistoryStore, HISTORY_CAPACITY};
pub use monitor::{Monitor, MonitorStats};
pub use poller::{Poller, PollerStats, DEBUG_INTERVAL, PRODUCTION_INTERVAL};
pub use source::{GatewayClient, SignalSource, DEFAULT_GATEWAY_URL};
