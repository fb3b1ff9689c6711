//! 表示行の算出
//!
//! 元データと論理削除済み ID 集合から表示行を求める。
//! 検索/フィルタは `filter` モジュールの責務で、ここでは扱わない。

use super::model::{Row, RowId};
use std::collections::HashSet;

/// 論理削除済みの行 ID 集合
///
/// 元データには一切触れない。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SoftDeleteSet {
    ids: HashSet<RowId>,
}

impl SoftDeleteSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// ID を追加（既に含まれていれば何もしない）
    pub fn insert(&mut self, id: RowId) -> bool {
        self.ids.insert(id)
    }

    pub fn contains(&self, id: &RowId) -> bool {
        self.ids.contains(id)
    }

    /// 行が論理削除済みか
    pub fn excludes(&self, row: &Row) -> bool {
        row.id().is_some_and(|id| self.ids.contains(&id))
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// 指定した行集合に存在する ID のみ残す
    pub fn retain_existing(&mut self, rows: &[Row]) {
        let existing: HashSet<RowId> = rows.iter().filter_map(Row::id).collect();
        self.ids.retain(|id| existing.contains(id));
    }
}

impl FromIterator<RowId> for SoftDeleteSet {
    fn from_iter<I: IntoIterator<Item = RowId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

/// 表示行を算出
///
/// - 入力の相対順序を保つ
/// - 常に新しいコレクションを返す（入力は変更しない）
pub fn compute_view(rows: &[Row], deleted: &SoftDeleteSet) -> Vec<Row> {
    if deleted.is_empty() {
        return rows.to_vec();
    }

    rows.iter()
        .filter(|row| !deleted.excludes(row))
        .cloned()
        .collect()
}

#[cfg(test)]
#[path = "view_test.rs"]
mod tests;
