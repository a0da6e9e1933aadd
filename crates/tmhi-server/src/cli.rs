use crate::config::{AppConfig, ConfigError};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Config file path (skipped when missing)
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// HTTP listen port
    #[arg(long)]
    pub port: Option<u16>,

    /// Alert when the 5G bars stay below this value
    #[arg(long = "minbars")]
    pub min_bars: Option<f64>,

    /// ntfy topic URL for alerts
    #[arg(long)]
    pub ntfy: Option<String>,

    /// Webhook URL for alerts
    #[arg(long)]
    pub webhook: Option<String>,

    /// Poll every 5 seconds instead of every minute
    #[arg(long)]
    pub debug: bool,

    /// Log level or filter directive, e.g. `debug` or `tmhi_monitor=trace`
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Args {
    /// 命令行参数覆盖配置文件和环境变量
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(min_bars) = self.min_bars {
            config.monitor.min_bars = min_bars;
        }
        if let Some(url) = &self.ntfy {
            config.notify.ntfy_url = Some(url.clone());
        }
        if let Some(url) = &self.webhook {
            config.notify.webhook_url = Some(url.clone());
        }
        if self.debug {
            config.monitor.debug = true;
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
    }

    /// 加载、覆盖并校验配置
    pub fn load_config(&self) -> Result<AppConfig, ConfigError> {
        let mut config = AppConfig::load(&self.config)?;
        self.apply(&mut config);
        config.validate()?;
        Ok(config)
    }
}
