//! 支払い画面

use super::{build_columns_from_data, RowAction};
use crate::table::{Column, Row, Severity, TableAction, TableConfig};

/// エクスポートファイル名（拡張子なし）
pub const EXPORT_FILENAME: &str = "payments-export";

const SKELETON_HEADERS: &[&str] = &[
    "Id", "Date", "Customer", "Amount", "Method", "Status", "Reference",
];

/// 読み込み中に表示する仮カラム
pub fn skeleton_columns() -> Vec<Column> {
    SKELETON_HEADERS
        .iter()
        .map(|h| {
            Column::new(h.to_lowercase(), *h)
                .with_filterable(true)
                .with_searchable(true)
        })
        .collect()
}

fn actions() -> Vec<TableAction<RowAction>> {
    vec![
        TableAction::new("✎", "Edit payment", |row: &Row| RowAction::Edit(row.clone()))
            .with_severity(Severity::Info),
        TableAction::new("🗑", "Delete payment", |row: &Row| RowAction::Delete(row.clone()))
            .with_severity(Severity::Danger),
    ]
}

fn base_config(columns: Vec<Column>, data: Vec<Row>) -> TableConfig<RowAction> {
    TableConfig::new(columns, data)
        .with_export(Some(EXPORT_FILENAME))
        .with_selection(true)
        .with_actions(actions())
}

/// 読み込み中の設定
pub fn skeleton_config() -> TableConfig<RowAction> {
    base_config(skeleton_columns(), Vec::new())
}

/// 取得データから設定を組み立てる
pub fn table_config(data: Vec<Row>) -> TableConfig<RowAction> {
    let columns = build_columns_from_data(&data, true, true);
    base_config(columns, data)
}
