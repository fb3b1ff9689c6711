//! 検索/フィルタロジック
//!
//! グローバル検索文字列とカラム別フィルタ文字列を保持し、
//! 現在有効な絞り込み条件（アクティブ述語）として行に適用する。

use super::model::{Column, Row};
use std::collections::BTreeMap;

/// 設定された全カラムのフィールド名（宣言順）
pub fn filter_fields(columns: &[Column]) -> Vec<&str> {
    columns.iter().map(|c| c.field.as_str()).collect()
}

/// 検索可能なカラムが1つでもあるか
pub fn has_searchable_columns(columns: &[Column]) -> bool {
    columns.iter().any(|c| c.searchable)
}

/// グローバル検索の対象となるフィールド名
pub fn searchable_fields(columns: &[Column]) -> Vec<&str> {
    columns
        .iter()
        .filter(|c| c.searchable)
        .map(|c| c.field.as_str())
        .collect()
}

/// case-insensitive な部分一致
fn contains_ignore_case(haystack: &str, query_lower: &str) -> bool {
    haystack.to_lowercase().contains(query_lower)
}

/// 検索/フィルタ条件
///
/// - グローバル検索: 検索可能カラムのいずれかに部分一致
/// - カラム別フィルタ: 該当フィールドに部分一致（フィールドごとに独立）
/// - すべての条件は AND で合成する
/// - 空文字列の条件は常に一致する
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCoordinator {
    global: String,
    columns: BTreeMap<String, String>,
}

impl FilterCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_global_filter(&mut self, text: impl Into<String>) {
        self.global = text.into();
    }

    pub fn global_filter(&self) -> &str {
        &self.global
    }

    /// カラム別フィルタを設定（他フィールドの条件には影響しない）
    pub fn set_column_filter(&mut self, field: impl Into<String>, text: impl Into<String>) {
        self.columns.insert(field.into(), text.into());
    }

    /// カラム別フィルタの現在値（未設定なら空文字列）
    pub fn column_filter(&self, field: &str) -> &str {
        self.columns.get(field).map(String::as_str).unwrap_or("")
    }

    pub fn column_filters(&self) -> &BTreeMap<String, String> {
        &self.columns
    }

    /// 全条件をクリア
    pub fn clear(&mut self) {
        self.global.clear();
        self.columns.clear();
    }

    /// 絞り込み条件が有効か
    pub fn is_active(&self) -> bool {
        !self.global.is_empty() || self.columns.values().any(|v| !v.is_empty())
    }

    /// 行が全条件に一致するか
    pub fn matches(&self, columns: &[Column], row: &Row) -> bool {
        if !self.global.is_empty() {
            let query = self.global.to_lowercase();
            let hit = searchable_fields(columns)
                .into_iter()
                .any(|field| contains_ignore_case(&row.cell_text(field), &query));
            if !hit {
                return false;
            }
        }

        self.columns
            .iter()
            .filter(|(_, text)| !text.is_empty())
            .all(|(field, text)| contains_ignore_case(&row.cell_text(field), &text.to_lowercase()))
    }

    /// 条件に一致する行を順序を保って返す
    pub fn apply(&self, columns: &[Column], rows: &[Row]) -> Vec<Row> {
        if !self.is_active() {
            return rows.to_vec();
        }

        rows.iter()
            .filter(|row| self.matches(columns, row))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
#[path = "filter_test.rs"]
mod tests;
