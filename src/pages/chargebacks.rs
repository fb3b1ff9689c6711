//! チャージバック画面

use super::{build_columns_from_data, RowAction};
use crate::table::{Column, Row, TableConfig};

const SKELETON_HEADERS: &[&str] = &[
    "Id", "Date", "Original Payment", "Customer", "Amount", "Reason", "Outcome",
];

/// 読み込み中に表示する仮カラム（フィールド名は見出しの小文字・空白除去）
pub fn skeleton_columns() -> Vec<Column> {
    SKELETON_HEADERS
        .iter()
        .map(|h| Column::new(h.to_lowercase().replace(' ', ""), *h))
        .collect()
}

pub fn skeleton_config() -> TableConfig<RowAction> {
    TableConfig::new(skeleton_columns(), Vec::new())
}

/// 取得データから設定を組み立てる（エクスポート・検索なし）
pub fn table_config(data: Vec<Row>) -> TableConfig<RowAction> {
    let columns = build_columns_from_data(&data, false, false);
    TableConfig::new(columns, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::has_searchable_columns;

    #[test]
    fn skeleton_fields_drop_spaces() {
        let columns = skeleton_columns();
        assert_eq!(columns[2].field, "originalpayment");
        assert_eq!(columns[2].header, "Original Payment");
    }

    #[test]
    fn config_is_plain_table() {
        let data = vec![Row::new().with("id", 5000).with("originalPayment", "PAY-1")];
        let config = table_config(data);

        assert!(!config.export_enabled);
        assert!(!config.selection_enabled);
        assert!(config.actions.is_empty());
        assert!(!has_searchable_columns(&config.columns));
        assert_eq!(config.columns[1].header, "Original Payment");
    }
}
