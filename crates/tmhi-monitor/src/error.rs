use thiserror::Error;

/// 信号采集错误
///
/// 所有变体都只影响当前周期：记录日志后跳过，下一次定时采集照常进行。
#[derive(Error, Debug)]
pub enum FetchError {
    /// 网络、超时或读取响应体失败
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// 网关返回非 2xx 状态码
    #[error("Gateway returned status: {0}")]
    Status(reqwest::StatusCode),

    /// 响应体不是合法的信号 JSON
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// 其他错误
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// 采集结果类型
pub type Result<T> = std::result::Result<T, FetchError>;
