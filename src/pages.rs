//! 画面ごとのテーブル設定
//!
//! 取得したデータからカラムを組み立て、各画面の `TableConfig` を生成する。

pub mod chargebacks;
pub mod dashboard;
pub mod payments;
pub mod returns;

use crate::table::{Column, Row};
use regex::Regex;
use std::sync::LazyLock;

/// 行アクションが画面に返すメッセージ
#[derive(Debug, Clone, PartialEq)]
pub enum RowAction {
    Edit(Row),
    Delete(Row),
}

static UPPERCASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Z])").expect("valid regex"));

/// フィールド名を見出しに変換する（`originalPayment` → `Original Payment`）
pub fn humanize_header(field: &str) -> String {
    let mut chars = field.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let rest = UPPERCASE.replace_all(chars.as_str(), " $1");
    format!("{}{}", first.to_uppercase(), rest)
}

/// 先頭行のフィールド順でカラムを組み立てる（データが空ならカラムなし）
pub fn build_columns_from_data(data: &[Row], filterable: bool, searchable: bool) -> Vec<Column> {
    let Some(first) = data.first() else {
        return Vec::new();
    };
    first
        .fields()
        .map(|field| {
            Column::new(field, humanize_header(field))
                .with_filterable(filterable)
                .with_searchable(searchable)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn humanizes_camel_case_fields() {
        assert_eq!(humanize_header("originalPayment"), "Original Payment");
        assert_eq!(humanize_header("refundMethod"), "Refund Method");
        assert_eq!(humanize_header("id"), "Id");
        assert_eq!(humanize_header(""), "");
    }

    #[test]
    fn columns_follow_first_row_key_order() {
        let data = vec![Row::new()
            .with("id", 1)
            .with("totalAmount", 10.5)
            .with("status", "Pending")];

        let columns = build_columns_from_data(&data, true, false);

        let fields: Vec<_> = columns.iter().map(|c| c.field.as_str()).collect();
        assert_eq!(fields, vec!["id", "totalAmount", "status"]);
        assert_eq!(columns[1].header, "Total Amount");
        assert!(columns.iter().all(|c| c.filterable && !c.searchable));
    }

    #[test]
    fn empty_data_has_no_columns() {
        assert!(build_columns_from_data(&[], true, true).is_empty());
    }
}
