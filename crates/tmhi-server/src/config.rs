use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tmhi_monitor::{AlertPolicy, DEBUG_INTERVAL, DEFAULT_GATEWAY_URL, DEFAULT_MIN_BARS, PRODUCTION_INTERVAL};

/// 环境变量前缀，例如 `TMHI__SERVER__PORT=9090`
pub const ENV_PREFIX: &str = "TMHI";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid config path: {0}")]
    Path(String),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub monitor: MonitorConfig,
    #[serde(default)]
    pub notify: NotifyConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MonitorConfig {
    /// 网关信号接口地址
    #[serde(default = "default_gateway_url")]
    pub gateway_url: String,

    /// 低于该格数视为低信号
    #[serde(default = "default_min_bars")]
    pub min_bars: f64,

    /// 调试模式：5 秒采集一次
    #[serde(default)]
    pub debug: bool,
}

/// 通知配置，地址为空表示不启用
#[derive(Debug, Deserialize, Clone, Default)]
pub struct NotifyConfig {
    #[serde(default)]
    pub ntfy_url: Option<String>,
    #[serde(default)]
    pub webhook_url: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

// 默认值函数
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_gateway_url() -> String {
    DEFAULT_GATEWAY_URL.to_string()
}

fn default_min_bars() -> f64 {
    DEFAULT_MIN_BARS
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            gateway_url: default_gateway_url(),
            min_bars: default_min_bars(),
            debug: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    /// 加载配置：默认值 → TOML 文件（不存在则跳过）→ `TMHI__*` 环境变量
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        if path.exists() {
            let path_str = path
                .to_str()
                .ok_or_else(|| ConfigError::Path(path.display().to_string()))?;
            builder = builder.add_source(File::new(path_str, FileFormat::Toml));
        }

        let settings = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let min_bars = self.monitor.min_bars;
        if !min_bars.is_finite() || min_bars <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "monitor.min_bars must be a positive number, got {}",
                min_bars
            )));
        }

        if self.server.port == 0 {
            return Err(ConfigError::Invalid("server.port must be non-zero".into()));
        }

        if self.monitor.gateway_url.trim().is_empty() {
            return Err(ConfigError::Invalid("monitor.gateway_url must not be empty".into()));
        }

        Ok(())
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn poll_interval(&self) -> Duration {
        if self.monitor.debug {
            DEBUG_INTERVAL
        } else {
            PRODUCTION_INTERVAL
        }
    }

    pub fn alert_policy(&self) -> AlertPolicy {
        AlertPolicy::with_min_bars(self.monitor.min_bars)
    }
}
