//! paydash export コマンド
//!
//! ダイナミックテーブルの検索・論理削除・選択を適用してからエクスポートする。

use super::{apply_query, load_table, TableDataset};
use crate::config::Settings;
use crate::output::CommandSummary;
use crate::pages::RowAction;
use crate::sink::DirectorySink;
use crate::source;
use crate::table::{DynamicTable, ExportFormat, ExportScope, RowId};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
pub struct Args {
    /// Dataset to export
    #[arg(value_enum)]
    pub dataset: TableDataset,

    /// Output format
    #[arg(long, value_enum, default_value_t = ExportFormat::Excel)]
    pub format: ExportFormat,

    /// Export all rows or only the selected ones
    #[arg(long, value_enum, default_value_t = ExportScope::All)]
    pub scope: ExportScope,

    /// Case-insensitive search across searchable columns
    #[arg(long, value_name = "TEXT")]
    pub search: Option<String>,

    /// Per-column filter (repeatable)
    #[arg(long = "filter", value_name = "FIELD=TEXT")]
    pub filters: Vec<String>,

    /// Soft-delete a row before exporting (repeatable)
    #[arg(long = "delete", value_name = "ID")]
    pub delete: Vec<String>,

    /// Select a row for --scope selection (repeatable)
    #[arg(long = "select", value_name = "ID")]
    pub select: Vec<String>,

    /// Output directory
    #[arg(long, short, default_value = ".")]
    pub output: PathBuf,
}

pub async fn run(args: Args, settings: &Settings) -> Result<(), String> {
    let source = source::from_settings(settings);
    let mut table = load_table(source.as_ref(), args.dataset).await?;

    prepare(&mut table, &args)?;

    let sink = DirectorySink::new(&args.output);
    let receipt = table.execute_export(&sink).map_err(|e| e.to_string())?;

    println!(
        "{}",
        CommandSummary::exported(receipt.rows, &sink.path_for(&receipt.filename))
    );
    Ok(())
}

/// 論理削除・選択・検索条件を適用し、エクスポートダイアログを設定する
fn prepare(table: &mut DynamicTable<RowAction>, args: &Args) -> Result<(), String> {
    table.open_export_dialog().map_err(|e| e.to_string())?;

    for id in &args.delete {
        table.delete_id(RowId::parse(id));
    }

    for id in &args.select {
        let id = RowId::parse(id);
        let row = table
            .display_rows()
            .iter()
            .find(|r| r.has_id(&id))
            .cloned();
        match row {
            Some(row) => {
                table.select_row(&row);
            }
            None => eprintln!(
                "{}",
                CommandSummary::warning(format!("--select {id} ignored: row not found"))
            ),
        }
    }

    apply_query(table, args.search.as_deref(), &args.filters)?;

    if let Some(dialog) = table.export_dialog_mut() {
        dialog.set_format(args.format);
        dialog.set_scope(args.scope);
    }
    Ok(())
}

#[cfg(test)]
#[path = "export_test.rs"]
mod tests;
