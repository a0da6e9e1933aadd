use serde::{Deserialize, Deserializer, Serialize};

/// 网关对未接入的字段可能返回 `null`，按零值处理
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// 网关返回的信号信息
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalInfo {
    /// 5G 信号
    #[serde(rename = "5g", deserialize_with = "null_as_default")]
    pub five_g: FiveGSignal,

    /// 通用连接信息
    #[serde(deserialize_with = "null_as_default")]
    pub generic: GenericSignal,
}

/// 5G 信号指标
///
/// `bars` 是告警使用的主指标，其余字段仅作展示。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FiveGSignal {
    #[serde(deserialize_with = "null_as_default")]
    pub antenna_used: String,
    #[serde(deserialize_with = "null_as_default")]
    pub bands: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub bars: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub cid: i64,
    #[serde(rename = "gNBID", deserialize_with = "null_as_default")]
    pub gnb_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub rsrp: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub rsrq: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub rssi: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub sinr: i32,
}

/// 通用连接信息
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenericSignal {
    #[serde(deserialize_with = "null_as_default")]
    pub apn: String,
    #[serde(rename = "hasIPv6", deserialize_with = "null_as_default")]
    pub has_ipv6: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub registration: String,
    #[serde(deserialize_with = "null_as_default")]
    pub roaming: bool,
}

/// 网关 `/TMI/v1/gateway?get=signal` 的响应体
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GatewayResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub signal: SignalInfo,
}

impl GatewayResponse {
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }
}
