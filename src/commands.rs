use crate::cli::{Cli, Command};
use crate::error::PaydashError;
use crate::output::CommandSummary;
use crate::pages::{chargebacks, payments, RowAction};
use crate::source::{self, DataSource, Endpoint};
use crate::table::{DynamicTable, Row, TableConfig};
use clap::ValueEnum;
use indicatif::{ProgressBar, ProgressStyle};
use serde::de::DeserializeOwned;
use std::time::Duration;

pub mod browse;
pub mod export;
pub mod list;
pub mod summary;

pub async fn dispatch(cli: Cli) -> Result<(), String> {
    let settings = cli.source.settings();
    match cli.command {
        Command::List(args) => list::run(args, &settings).await,
        Command::Export(args) => export::run(args, &settings).await,
        Command::Summary(args) => summary::run(args, &settings).await,
        Command::Browse(args) => browse::run(args, settings).await,
    }
}

/// 動的テーブルで扱うデータセット
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TableDataset {
    Payments,
    Chargebacks,
}

impl TableDataset {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            TableDataset::Payments => Endpoint::Payments,
            TableDataset::Chargebacks => Endpoint::Chargebacks,
        }
    }
}

/// スピナーを表示しながら取得する
pub async fn fetch_with_spinner<T: DeserializeOwned>(
    source: &dyn DataSource,
    endpoint: Endpoint,
) -> Result<T, String> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(format!("Fetching {} ({})...", endpoint, source.name()));
    pb.enable_steady_tick(Duration::from_millis(80));

    let result = source::fetch_as(source, endpoint).await;
    pb.finish_and_clear();

    result.map_err(|e| {
        log::error!("fetch {endpoint} failed: {e}");
        e.to_string()
    })
}

/// 取得したデータでテーブルを組み立てる
pub async fn load_table(
    source: &dyn DataSource,
    dataset: TableDataset,
) -> Result<DynamicTable<RowAction>, String> {
    let (skeleton, build): (_, fn(Vec<Row>) -> TableConfig<RowAction>) = match dataset {
        TableDataset::Payments => (payments::skeleton_config(), payments::table_config),
        TableDataset::Chargebacks => (chargebacks::skeleton_config(), chargebacks::table_config),
    };

    let mut table = DynamicTable::loading(skeleton);
    let rows: Vec<Row> = fetch_with_spinner(source, dataset.endpoint()).await?;
    table.set_config(build(rows));
    Ok(table)
}

/// `FIELD=TEXT` を分解する
pub fn parse_filter(expr: &str) -> Result<(String, String), PaydashError> {
    match expr.split_once('=') {
        Some((field, text)) if !field.trim().is_empty() => {
            Ok((field.trim().to_string(), text.to_string()))
        }
        _ => Err(PaydashError::InvalidFilter(expr.to_string())),
    }
}

/// 検索条件をテーブルに適用する
pub fn apply_query(
    table: &mut DynamicTable<RowAction>,
    search: Option<&str>,
    filters: &[String],
) -> Result<(), String> {
    if let Some(text) = search {
        if !table.apply_global_filter(text) {
            eprintln!(
                "{}",
                CommandSummary::warning("--search ignored: this table has no searchable columns")
            );
        }
    }
    for expr in filters {
        let (field, text) = parse_filter(expr).map_err(|e| e.to_string())?;
        table
            .apply_column_filter(&field, &text)
            .map_err(|e| e.to_string())?;
    }
    log::debug!(
        "query: search={:?} filters={:?}",
        table.filter().global_filter(),
        table.filter().column_filters()
    );
    Ok(())
}
