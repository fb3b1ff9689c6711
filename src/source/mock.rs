//! モックデータソース
//!
//! 応答の前に擬似的な待ち時間を挟み、生成器のデータを JSON で返す。

use super::generator::{CHARGEBACK_COUNT, DASHBOARD_COUNT, PAYMENT_COUNT};
use super::{DataSource, Endpoint, MockDataGenerator};
use crate::error::Result;
use rand::Rng;
use serde_json::Value;
use std::future::Future;
use std::ops::Range;
use std::pin::Pin;
use std::time::Duration;

/// 待ち時間を指定しない場合の範囲（ミリ秒）
const DEFAULT_LATENCY_MS: Range<u64> = 200..400;

/// モックデータソース
#[derive(Debug, Clone)]
pub struct MockDataSource {
    generator: MockDataGenerator,
    latency: Option<Duration>,
}

impl MockDataSource {
    /// `latency` が `None` なら 200〜399ms のランダムな待ち時間
    pub fn new(generator: MockDataGenerator, latency: Option<Duration>) -> Self {
        Self { generator, latency }
    }

    fn latency(&self) -> Duration {
        self.latency
            .unwrap_or_else(|| Duration::from_millis(rand::rng().random_range(DEFAULT_LATENCY_MS)))
    }

    fn generate(&self, endpoint: Endpoint) -> Result<Value> {
        let value = match endpoint {
            Endpoint::Payments => serde_json::to_value(self.generator.payments(PAYMENT_COUNT))?,
            Endpoint::Chargebacks => {
                serde_json::to_value(self.generator.chargebacks(CHARGEBACK_COUNT))?
            }
            Endpoint::Dashboard => serde_json::to_value(self.generator.dashboard(DASHBOARD_COUNT))?,
            Endpoint::Returns => serde_json::to_value(self.generator.returns())?,
        };
        Ok(value)
    }
}

impl DataSource for MockDataSource {
    fn fetch<'a>(
        &'a self,
        endpoint: Endpoint,
    ) -> Pin<Box<dyn Future<Output = Result<Value>> + Send + 'a>> {
        Box::pin(async move {
            let latency = self.latency();
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }
            log::debug!("mock {endpoint} served after {latency:?}");
            self.generate(endpoint)
        })
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
