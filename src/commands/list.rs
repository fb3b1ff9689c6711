//! paydash list コマンド
//!
//! 支払い・チャージバック・返品の一覧を表示する。

use super::{apply_query, fetch_with_spinner, load_table, TableDataset};
use crate::config::Settings;
use crate::output::CommandSummary;
use crate::pages::returns::{self, ReturnNode, ReturnTree};
use crate::source::{self, Endpoint};
use crate::table::{Column, Row};
use clap::{Parser, ValueEnum};
use comfy_table::{presets::UTF8_FULL, Table};
use serde_json::{Map, Value};

/// 一覧表示の対象
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Dataset {
    Payments,
    Chargebacks,
    Returns,
}

#[derive(Debug, Parser)]
pub struct Args {
    /// Dataset to list
    #[arg(value_enum)]
    pub dataset: Dataset,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,

    /// Case-insensitive search across searchable columns
    #[arg(long, value_name = "TEXT")]
    pub search: Option<String>,

    /// Per-column filter (repeatable)
    #[arg(long = "filter", value_name = "FIELD=TEXT")]
    pub filters: Vec<String>,
}

pub async fn run(args: Args, settings: &Settings) -> Result<(), String> {
    let source = source::from_settings(settings);

    let dataset = match args.dataset {
        Dataset::Payments => TableDataset::Payments,
        Dataset::Chargebacks => TableDataset::Chargebacks,
        Dataset::Returns => {
            if args.search.is_some() || !args.filters.is_empty() {
                return Err("Search and filters are not available for returns".to_string());
            }
            let nodes: Vec<ReturnNode> =
                fetch_with_spinner(source.as_ref(), Endpoint::Returns).await?;
            return print_returns(nodes, args.json);
        }
    };

    let mut table = load_table(source.as_ref(), dataset).await?;
    apply_query(&mut table, args.search.as_deref(), &args.filters)?;

    let columns = &table.config().columns;
    let rows = table.filtered_rows();

    if args.json {
        print_json(&project(columns, rows))?;
    } else {
        print_table(columns, rows.iter());
        println!("{}", CommandSummary::rows(rows.len(), table.display_rows().len()));
    }
    Ok(())
}

/// 設定されたカラムのみを順番どおりに取り出す
fn project(columns: &[Column], rows: &[Row]) -> Vec<Map<String, Value>> {
    rows.iter()
        .map(|row| {
            columns
                .iter()
                .map(|c| {
                    let value = row.get(&c.field).cloned().unwrap_or(Value::Null);
                    (c.field.clone(), value)
                })
                .collect()
        })
        .collect()
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;
    println!("{}", json);
    Ok(())
}

fn build_table<'a>(columns: &[Column], rows: impl Iterator<Item = &'a Row>) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(columns.iter().map(|c| c.header.as_str()));
    for row in rows {
        table.add_row(columns.iter().map(|c| row.cell_text(&c.field)));
    }
    table
}

fn print_table<'a>(columns: &[Column], rows: impl Iterator<Item = &'a Row>) {
    println!("{}", build_table(columns, rows));
}

fn print_returns(nodes: Vec<ReturnNode>, json: bool) -> Result<(), String> {
    if json {
        return print_json(&nodes);
    }

    let total = nodes.len();
    let mut tree = ReturnTree::new(nodes);
    tree.expand_all();

    // 子ノードは ID を字下げして表示
    let rows: Vec<Row> = tree
        .visible_rows()
        .into_iter()
        .map(|r| {
            let mut row = r.row.clone();
            if r.depth > 0 {
                row.set("id", format!("└ {}", r.row.cell_text("id")));
            }
            row
        })
        .collect();

    print_table(&returns::columns(), rows.iter());
    println!("{}", CommandSummary::rows(total, total));
    Ok(())
}

#[cfg(test)]
#[path = "list_test.rs"]
mod tests;
