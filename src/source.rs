//! データ取得元
//!
//! `fetch(endpoint)` で JSON 値を 1 つ返すデータソースを抽象化する。
//! 開発時はモック、`api_base_url` 設定時は HTTP を使う。

pub mod generator;
pub mod http;
pub mod mock;

pub use generator::MockDataGenerator;
pub use http::HttpDataSource;
pub use mock::MockDataSource;

use crate::config::Settings;
use crate::error::{PaydashError, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::str::FromStr;

/// API エンドポイント
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Payments,
    Chargebacks,
    Dashboard,
    Returns,
}

impl Endpoint {
    pub fn all() -> &'static [Endpoint] {
        &[
            Endpoint::Payments,
            Endpoint::Chargebacks,
            Endpoint::Dashboard,
            Endpoint::Returns,
        ]
    }

    /// ベース URL からの相対パス
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Payments => "api/payments",
            Endpoint::Chargebacks => "api/chargebacks",
            Endpoint::Dashboard => "api/dashboard",
            Endpoint::Returns => "api/returns",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

impl FromStr for Endpoint {
    type Err = PaydashError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim_matches('/');
        Endpoint::all()
            .iter()
            .copied()
            .find(|e| e.path() == trimmed)
            .ok_or_else(|| PaydashError::UnknownEndpoint(s.to_string()))
    }
}

/// データソース trait
pub trait DataSource: Send + Sync {
    /// エンドポイントから JSON 値を 1 つ取得する
    fn fetch<'a>(
        &'a self,
        endpoint: Endpoint,
    ) -> Pin<Box<dyn Future<Output = Result<Value>> + Send + 'a>>;

    /// 取得元の表示名
    fn name(&self) -> &'static str;
}

/// 取得した JSON を型に変換する
pub fn decode<T: DeserializeOwned>(endpoint: Endpoint, value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| PaydashError::UnexpectedPayload {
        endpoint: endpoint.path().to_string(),
        message: e.to_string(),
    })
}

/// エンドポイントから取得して型に変換する
pub async fn fetch_as<T: DeserializeOwned>(
    source: &dyn DataSource,
    endpoint: Endpoint,
) -> Result<T> {
    let value = source.fetch(endpoint).await?;
    decode(endpoint, value)
}

/// 設定に応じたデータソースを生成する
///
/// `api_base_url` があれば HTTP、なければモック。
pub fn from_settings(settings: &Settings) -> Box<dyn DataSource> {
    match settings.api_base_url.as_deref() {
        Some(base_url) => {
            log::info!("using HTTP data source at {base_url}");
            Box::new(HttpDataSource::new(base_url))
        }
        None => {
            let latency = settings.mock_latency();
            log::info!("using mock data source (latency: {latency:?})");
            Box::new(MockDataSource::new(MockDataGenerator::new(), latency))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_parses_with_or_without_slashes() {
        assert_eq!("api/payments".parse::<Endpoint>().unwrap(), Endpoint::Payments);
        assert_eq!("/api/returns".parse::<Endpoint>().unwrap(), Endpoint::Returns);
    }

    #[test]
    fn unknown_endpoint_is_error() {
        assert!(matches!(
            "api/users".parse::<Endpoint>(),
            Err(PaydashError::UnknownEndpoint(_))
        ));
    }

    #[test]
    fn decode_reports_endpoint_on_shape_mismatch() {
        let err = decode::<Vec<u32>>(Endpoint::Dashboard, Value::String("x".into())).unwrap_err();
        assert!(err.to_string().contains("api/dashboard"));
    }

    #[test]
    fn settings_without_base_url_use_mock() {
        let settings = Settings::default();
        assert_eq!(from_settings(&settings).name(), "mock");
    }

    #[test]
    fn settings_with_base_url_use_http() {
        let settings = Settings {
            api_base_url: Some("http://localhost:9".to_string()),
            ..Settings::default()
        };
        assert_eq!(from_settings(&settings).name(), "http");
    }
}
