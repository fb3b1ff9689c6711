//! HTTP データソース

use super::{DataSource, Endpoint};
use crate::error::{PaydashError, Result};
use reqwest::Client;
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

const USER_AGENT: &str = "paydash-cli";
const TIMEOUT: Duration = Duration::from_secs(30);

/// `{base_url}/api/...` から JSON を取得するデータソース
pub struct HttpDataSource {
    client: Client,
    base_url: String,
}

impl HttpDataSource {
    pub fn new(base_url: &str) -> Self {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// エンドポイントの URL
    pub fn url_for(&self, endpoint: Endpoint) -> String {
        format!("{}/{}", self.base_url, endpoint.path())
    }
}

impl DataSource for HttpDataSource {
    fn fetch<'a>(
        &'a self,
        endpoint: Endpoint,
    ) -> Pin<Box<dyn Future<Output = Result<Value>> + Send + 'a>> {
        Box::pin(async move {
            let url = self.url_for(endpoint);
            log::debug!("GET {url}");

            let response = self.client.get(&url).send().await?;
            let status = response.status().as_u16();

            if !response.status().is_success() {
                let message = response.text().await.unwrap_or_default();
                log::warn!("GET {url} failed with status {status}");
                return Err(PaydashError::Api { status, message });
            }

            Ok(response.json::<Value>().await?)
        })
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_base_and_path() {
        let source = HttpDataSource::new("http://localhost:3000/");
        assert_eq!(
            source.url_for(Endpoint::Payments),
            "http://localhost:3000/api/payments"
        );
    }

    #[tokio::test]
    async fn unreachable_host_is_network_error() {
        let source = HttpDataSource::new("http://127.0.0.1:9");
        let err = source.fetch(Endpoint::Dashboard).await.unwrap_err();
        assert!(matches!(err, PaydashError::Network(_)));
    }
}
