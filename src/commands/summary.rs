//! paydash summary コマンド
//!
//! ダッシュボードのカテゴリ別集計を表示する。

use super::fetch_with_spinner;
use crate::config::Settings;
use crate::pages::dashboard::{self, DashboardSegment};
use crate::source::{self, Endpoint};
use clap::Parser;
use comfy_table::{presets::UTF8_FULL, CellAlignment, Table};
use owo_colors::OwoColorize;

#[derive(Debug, Parser)]
pub struct Args {
    /// Show the detail of one category (case-insensitive)
    #[arg(long, value_name = "NAME")]
    pub category: Option<String>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: Args, settings: &Settings) -> Result<(), String> {
    let source = source::from_settings(settings);
    let segments: Vec<DashboardSegment> =
        fetch_with_spinner(source.as_ref(), Endpoint::Dashboard).await?;

    match args.category.as_deref() {
        Some(name) => {
            let segment = dashboard::find_segment(&segments, name)
                .ok_or_else(|| format!("Unknown category: {}", name))?;
            if args.json {
                print_json(segment)
            } else {
                print_detail(&segments, segment);
                Ok(())
            }
        }
        None if args.json => print_json(&segments),
        None => {
            println!("{}", build_table(&segments));
            let total: u64 = segments.iter().map(|s| s.value).sum();
            println!("{} categories, total {}", segments.len(), total.bold());
            Ok(())
        }
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;
    println!("{}", json);
    Ok(())
}

fn build_table(segments: &[DashboardSegment]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Category", "Value", "Share"]);
    for segment in segments {
        table.add_row(vec![
            segment.label.clone(),
            segment.value.to_string(),
            format!("{:.1}%", dashboard::share(segments, segment)),
        ]);
    }
    for index in 1..=2 {
        if let Some(column) = table.column_mut(index) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }
    table
}

fn print_detail(segments: &[DashboardSegment], segment: &DashboardSegment) {
    let rank = segments
        .iter()
        .filter(|s| s.value > segment.value)
        .count()
        + 1;

    println!("{}", segment.label.bold());
    println!("  Value: {}", segment.value);
    println!("  Share: {:.1}%", dashboard::share(segments, segment));
    println!("  Rank:  {} of {}", rank, segments.len());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_lists_each_segment_with_share() {
        let segments = vec![
            DashboardSegment {
                label: "Books".to_string(),
                value: 150,
            },
            DashboardSegment {
                label: "Toys".to_string(),
                value: 50,
            },
        ];

        let rendered = build_table(&segments).to_string();
        assert!(rendered.contains("Books"));
        assert!(rendered.contains("75.0%"));
        assert!(rendered.contains("25.0%"));
    }
}
