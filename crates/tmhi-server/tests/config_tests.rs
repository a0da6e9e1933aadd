use clap::Parser;
use std::io::Write;
use tmhi_server::cli::Args;
use tmhi_server::config::{AppConfig, ConfigError, LogFormat};

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig::load(&dir.path().join("absent.toml")).unwrap();

    assert_eq!(config.server.port, 8080);
    assert_eq!(config.monitor.min_bars, 2.0);
    assert!(!config.monitor.debug);
}

#[test]
fn test_load_from_file() {
    let file = write_config(
        r#"
[server]
port = 9000

[monitor]
gateway_url = "http://10.0.0.1/TMI/v1/gateway?get=signal"
min_bars = 3.0
debug = true

[notify]
ntfy_url = "https://ntfy.sh/home-gateway"

[logging]
level = "debug"
format = "json"
"#,
    );

    let config = AppConfig::load(file.path()).unwrap();

    assert_eq!(config.server.port, 9000);
    assert_eq!(config.monitor.gateway_url, "http://10.0.0.1/TMI/v1/gateway?get=signal");
    assert_eq!(config.monitor.min_bars, 3.0);
    assert!(config.monitor.debug);
    assert_eq!(config.notify.ntfy_url.as_deref(), Some("https://ntfy.sh/home-gateway"));
    assert!(config.notify.webhook_url.is_none());
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.format, LogFormat::Json);
}

#[test]
fn test_partial_file_keeps_defaults() {
    let file = write_config("[monitor]\nmin_bars = 1.5\n");

    let config = AppConfig::load(file.path()).unwrap();

    assert_eq!(config.monitor.min_bars, 1.5);
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.logging.format, LogFormat::Pretty);
}

#[test]
fn test_malformed_file_is_error() {
    let file = write_config("[server\nport = ");

    assert!(matches!(
        AppConfig::load(file.path()),
        Err(ConfigError::Load(_))
    ));
}

#[test]
fn test_cli_overrides_file() {
    let file = write_config("[server]\nport = 9000\n\n[monitor]\nmin_bars = 3.0\n");
    let path = file.path().to_str().unwrap().to_string();

    let args = Args::parse_from(["tmhi-status", "--config", &path, "--minbars", "1.0"]);
    let config = args.load_config().unwrap();

    assert_eq!(config.server.port, 9000);
    assert_eq!(config.monitor.min_bars, 1.0);
}

#[test]
fn test_invalid_threshold_rejected() {
    let file = write_config("[monitor]\nmin_bars = 0\n");
    let path = file.path().to_str().unwrap().to_string();

    let args = Args::parse_from(["tmhi-status", "--config", &path]);
    assert!(matches!(args.load_config(), Err(ConfigError::Invalid(_))));
}

#[test]
fn test_env_overrides_file() {
    let file = write_config("[server]\nhost = \"127.0.0.1\"\n");

    std::env::set_var("TMHI__SERVER__HOST", "192.168.1.10");
    let config = AppConfig::load(file.path());
    std::env::remove_var("TMHI__SERVER__HOST");

    assert_eq!(config.unwrap().server.host, "192.168.1.10");
}
