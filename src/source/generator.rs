//! モックデータ生成
//!
//! 支払い・チャージバック・返品・ダッシュボード集計のダミーデータを生成する。
//! シードを指定すると同じデータを再現できる。

use crate::pages::dashboard::DashboardSegment;
use crate::pages::returns::ReturnNode;
use crate::table::Row;
use chrono::{Days, Local, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// /api/payments の件数
pub const PAYMENT_COUNT: usize = 50;
/// /api/chargebacks の件数
pub const CHARGEBACK_COUNT: usize = 35;
/// /api/dashboard の件数
pub const DASHBOARD_COUNT: usize = 30;
/// /api/returns の親ノード件数
pub const RETURN_COUNT: usize = 8;

const CATEGORIES: &[&str] = &[
    "Electronics", "Clothing", "Food", "Books", "Toys", "Sports",
    "Health", "Beauty", "Home", "Garden", "Auto", "Music",
    "Movies", "Games", "Travel", "Pets", "Office", "Tools",
    "Jewelry", "Art", "Software", "Hardware", "Education", "Finance",
    "Insurance", "Legal", "Marketing", "Consulting", "Logistics", "Energy",
];

const PAYMENT_STATUSES: &[&str] = &["Completed", "Pending", "Failed", "Refunded"];
const PAYMENT_METHODS: &[&str] = &["Credit Card", "Debit Card", "PayPal", "Bank Transfer", "Crypto"];

const CHARGEBACK_REASONS: &[&str] = &[
    "Unauthorized",
    "Product not received",
    "Duplicate charge",
    "Not as described",
    "Subscription cancellation",
];
const CHARGEBACK_OUTCOMES: &[&str] = &["Won", "Lost", "Pending", "Under Review"];

const RETURN_REASONS: &[&str] = &[
    "Defective",
    "Wrong item",
    "Changed mind",
    "Not as described",
    "Damaged in transit",
];
const RETURN_STATUSES: &[&str] = &["Approved", "Pending", "Rejected", "Processing"];
const REFUND_METHODS: &[&str] = &["Original payment", "Store credit", "Bank transfer"];

/// 日付の生成範囲の開始日
fn first_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or(NaiveDate::MIN)
}

fn pick<'a>(rng: &mut impl Rng, items: &[&'a str]) -> &'a str {
    items[rng.random_range(0..items.len())]
}

/// 小数第2位で丸めた金額（`base` 以上 `base + span` 未満）
fn amount(rng: &mut impl Rng, span: f64, base: f64) -> f64 {
    ((rng.random::<f64>() * span + base) * 100.0).round() / 100.0
}

/// モックデータ生成器
#[derive(Debug, Clone)]
pub struct MockDataGenerator {
    seed: Option<u64>,
    today: NaiveDate,
}

impl Default for MockDataGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDataGenerator {
    /// 毎回異なるデータを生成する生成器
    pub fn new() -> Self {
        Self {
            seed: None,
            today: Local::now().date_naive(),
        }
    }

    /// シード固定の生成器
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::new()
        }
    }

    /// 日付範囲の終端を固定する
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }

    /// 2024-01-01 から今日までのランダムな日付（YYYY-MM-DD）
    fn random_date(&self, rng: &mut impl Rng) -> String {
        let start = first_day();
        let span = (self.today - start).num_days().max(0) as u64;
        let offset = rng.random_range(0..=span);
        start
            .checked_add_days(Days::new(offset))
            .unwrap_or(start)
            .format("%Y-%m-%d")
            .to_string()
    }

    /// ダッシュボード集計（カテゴリ × 値）
    pub fn dashboard(&self, count: usize) -> Vec<DashboardSegment> {
        let mut rng = self.rng();
        CATEGORIES
            .iter()
            .take(count)
            .map(|label| DashboardSegment {
                label: label.to_string(),
                value: rng.random_range(100..1100),
            })
            .collect()
    }

    /// 支払い一覧（id は 1000 から連番）
    pub fn payments(&self, count: usize) -> Vec<Row> {
        let mut rng = self.rng();
        let now = Utc::now().timestamp_millis();
        (0..count)
            .map(|i| {
                Row::new()
                    .with("id", 1000 + i as i64)
                    .with("date", self.random_date(&mut rng))
                    .with("customer", format!("Customer {}", i + 1))
                    .with("amount", amount(&mut rng, 5000.0, 10.0))
                    .with("method", pick(&mut rng, PAYMENT_METHODS))
                    .with("status", pick(&mut rng, PAYMENT_STATUSES))
                    .with("reference", format!("PAY-{now}-{i}"))
            })
            .collect()
    }

    /// チャージバック一覧（id は 5000 から連番）
    pub fn chargebacks(&self, count: usize) -> Vec<Row> {
        let mut rng = self.rng();
        let now = Utc::now().timestamp_millis();
        (0..count)
            .map(|i| {
                Row::new()
                    .with("id", 5000 + i as i64)
                    .with("date", self.random_date(&mut rng))
                    .with("originalPayment", format!("PAY-{}", now - i as i64 * 100_000))
                    .with("customer", format!("Customer {}", rng.random_range(1..=50u32)))
                    .with("amount", amount(&mut rng, 2000.0, 5.0))
                    .with("reason", pick(&mut rng, CHARGEBACK_REASONS))
                    .with("outcome", pick(&mut rng, CHARGEBACK_OUTCOMES))
            })
            .collect()
    }

    /// 返品ツリー（親: 返品、子: 返品明細）
    pub fn returns(&self) -> Vec<ReturnNode> {
        let mut rng = self.rng();
        (0..RETURN_COUNT)
            .map(|i| {
                let number = 2000 + i;
                let data = Row::new()
                    .with("id", format!("RET-{number}"))
                    .with("date", self.random_date(&mut rng))
                    .with("customer", format!("Customer {}", i + 1))
                    .with("totalAmount", amount(&mut rng, 1000.0, 50.0))
                    .with("status", pick(&mut rng, RETURN_STATUSES))
                    .with("items", rng.random_range(1..=4u32));

                let child_count: usize = rng.random_range(1..=3);
                let children = (0..child_count)
                    .map(|j| {
                        ReturnNode::leaf(
                            Row::new()
                                .with("id", format!("ITEM-{number}-{j}"))
                                .with("date", self.random_date(&mut rng))
                                .with("customer", "")
                                .with("totalAmount", amount(&mut rng, 300.0, 10.0))
                                .with("reason", pick(&mut rng, RETURN_REASONS))
                                .with("refundMethod", pick(&mut rng, REFUND_METHODS))
                                .with("status", pick(&mut rng, RETURN_STATUSES))
                                .with("items", ""),
                        )
                    })
                    .collect();

                ReturnNode { data, children }
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "generator_test.rs"]
mod tests;
