//! 選択行の追跡
//!
//! 選択は行 ID で管理し、選択順を保持する。
//! 論理削除された行は即座に選択から外す。

use super::model::{Row, RowId};
use std::collections::HashMap;

/// 選択中の行スナップショット一覧
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionTracker {
    rows: Vec<Row>,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// 選択中の行（選択順）
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn is_selected(&self, id: &RowId) -> bool {
        self.rows.iter().any(|r| r.has_id(id))
    }

    /// 行を選択に追加
    ///
    /// ID を持たない行・既に選択中の行は追加しない。
    pub fn select(&mut self, row: &Row) -> bool {
        match row.id() {
            Some(id) if !self.is_selected(&id) => {
                self.rows.push(row.clone());
                true
            }
            _ => false,
        }
    }

    /// 行を選択から外す
    pub fn deselect(&mut self, row: &Row) -> bool {
        match row.id() {
            Some(id) => self.remove_id(&id),
            None => false,
        }
    }

    /// 選択状態を反転し、反転後に選択中かどうかを返す
    pub fn toggle(&mut self, row: &Row) -> bool {
        if self.deselect(row) {
            false
        } else {
            self.select(row)
        }
    }

    /// 指定した行をすべて選択（既存の選択は維持）
    pub fn select_all(&mut self, rows: &[Row]) {
        for row in rows {
            self.select(row);
        }
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// 行の論理削除に追従する
    pub fn on_row_deleted(&mut self, id: &RowId) {
        self.remove_id(id);
    }

    /// データ差し替え時に、新しいデータに存在する行だけを残す
    ///
    /// 残った選択は新しいデータ側のスナップショットに置き換える。
    pub fn retain_existing(&mut self, rows: &[Row]) {
        let latest: HashMap<RowId, &Row> =
            rows.iter().filter_map(|r| r.id().map(|id| (id, r))).collect();

        self.rows = self
            .rows
            .iter()
            .filter_map(|selected| {
                selected
                    .id()
                    .and_then(|id| latest.get(&id).map(|row| (*row).clone()))
            })
            .collect();
    }

    fn remove_id(&mut self, id: &RowId) -> bool {
        let before = self.rows.len();
        self.rows.retain(|r| !r.has_id(id));
        self.rows.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: i64, name: &str) -> Row {
        Row::new().with("id", id).with("name", name)
    }

    #[test]
    fn select_is_idempotent_by_identity() {
        let mut selection = SelectionTracker::new();
        assert!(selection.select(&row(1, "Alice")));
        assert!(!selection.select(&row(1, "Alice (copy)")));
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn deselect_removes_by_identity() {
        let mut selection = SelectionTracker::new();
        selection.select(&row(1, "Alice"));
        selection.select(&row(2, "Bob"));

        assert!(selection.deselect(&row(1, "renamed")));
        assert_eq!(selection.rows(), &[row(2, "Bob")]);
    }

    #[test]
    fn deleting_selected_row_prunes_selection() {
        let mut selection = SelectionTracker::new();
        selection.select(&row(1, "Alice"));
        selection.select(&row(2, "Bob"));

        selection.on_row_deleted(&RowId::Int(1));

        assert_eq!(selection.rows(), &[row(2, "Bob")]);
    }

    #[test]
    fn deleting_unselected_row_keeps_selection() {
        let mut selection = SelectionTracker::new();
        selection.select(&row(2, "Bob"));
        selection.on_row_deleted(&RowId::Int(5));
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn toggle_flips_membership() {
        let mut selection = SelectionTracker::new();
        assert!(selection.toggle(&row(3, "Charlie")));
        assert!(selection.is_selected(&RowId::Int(3)));
        assert!(!selection.toggle(&row(3, "Charlie")));
        assert!(selection.is_empty());
    }

    #[test]
    fn rows_without_id_cannot_be_selected() {
        let mut selection = SelectionTracker::new();
        assert!(!selection.select(&Row::new().with("name", "anonymous")));
        assert!(selection.is_empty());
    }

    #[test]
    fn select_all_preserves_order_and_existing() {
        let mut selection = SelectionTracker::new();
        selection.select(&row(2, "Bob"));
        selection.select_all(&[row(1, "Alice"), row(2, "Bob"), row(3, "Charlie")]);

        let ids: Vec<RowId> = selection.rows().iter().filter_map(Row::id).collect();
        assert_eq!(ids, vec![RowId::Int(2), RowId::Int(1), RowId::Int(3)]);
    }

    #[test]
    fn retain_existing_refreshes_snapshots() {
        let mut selection = SelectionTracker::new();
        selection.select(&row(1, "Alice"));
        selection.select(&row(2, "Bob"));

        selection.retain_existing(&[row(2, "Bobby"), row(3, "Charlie")]);

        assert_eq!(selection.rows(), &[row(2, "Bobby")]);
    }
}
