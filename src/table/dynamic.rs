//! ダイナミックテーブル
//!
//! テーブル設定 1 つにつき 1 インスタンス。論理削除・選択・検索条件・
//! エクスポートダイアログの状態を保持し、変更のたびに表示行を再計算する。
//!
//! 状態遷移:
//! - `Loading → Ready`（設定の到着で遷移）
//! - `Ready` 中のエクスポートダイアログ: `closed → open → closed`
//!   （キャンセルまたはエクスポート成功で閉じる。再度開くとデフォルト設定）

use super::action::ActionDispatcher;
use super::export::{self, ExportRequest, ExportSource};
use super::filter::{self, FilterCoordinator};
use super::model::{ExportFormat, ExportScope, Row, RowId, TableConfig};
use super::selection::SelectionTracker;
use super::view::{compute_view, SoftDeleteSet};
use crate::error::{PaydashError, Result};
use crate::sink::DownloadSink;

/// 読み込み中に表示するプレースホルダー行数
pub const SKELETON_ROWS: usize = 10;

/// テーブルのライフサイクル
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TablePhase {
    Loading,
    Ready,
}

/// エクスポートダイアログ（開くたびに新しいインスタンス）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExportDialog {
    pub request: ExportRequest,
}

impl ExportDialog {
    pub fn set_format(&mut self, format: ExportFormat) {
        self.request.format = format;
    }

    pub fn set_scope(&mut self, scope: ExportScope) {
        self.request.scope = scope;
    }

    pub fn toggle_format(&mut self) {
        self.request.format = self.request.format.toggled();
    }

    pub fn toggle_scope(&mut self) {
        self.request.scope = self.request.scope.toggled();
    }
}

/// エクスポート完了の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReceipt {
    pub filename: String,
    pub rows: usize,
}

/// ダイナミックテーブルのインスタンス
pub struct DynamicTable<M = ()> {
    config: TableConfig<M>,
    phase: TablePhase,
    deleted: SoftDeleteSet,
    selection: SelectionTracker,
    filter: FilterCoordinator,
    /// 論理削除を反映した表示行
    display: Vec<Row>,
    /// 表示行に検索条件を適用した行
    filtered: Vec<Row>,
    export_dialog: Option<ExportDialog>,
}

impl<M> DynamicTable<M> {
    /// 準備完了状態のテーブルを作成
    pub fn new(config: TableConfig<M>) -> Self {
        let mut table = Self {
            config,
            phase: TablePhase::Ready,
            deleted: SoftDeleteSet::new(),
            selection: SelectionTracker::new(),
            filter: FilterCoordinator::new(),
            display: Vec::new(),
            filtered: Vec::new(),
            export_dialog: None,
        };
        table.refresh();
        table
    }

    /// 読み込み中のテーブルを作成（プレースホルダー用の設定を渡す）
    pub fn loading(config: TableConfig<M>) -> Self {
        let mut table = Self::new(config);
        table.phase = TablePhase::Loading;
        table
    }

    // ------------------------------------------------------------------------
    // 設定
    // ------------------------------------------------------------------------

    pub fn config(&self) -> &TableConfig<M> {
        &self.config
    }

    pub fn phase(&self) -> TablePhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == TablePhase::Loading
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.phase = if loading {
            TablePhase::Loading
        } else {
            TablePhase::Ready
        };
    }

    /// 設定を差し替える
    ///
    /// 論理削除と選択は新しいデータに残っている ID のみ引き継ぐ。
    /// 検索条件とエクスポートダイアログはリセットする。
    pub fn set_config(&mut self, config: TableConfig<M>) {
        self.deleted.retain_existing(&config.data);
        self.selection.retain_existing(&config.data);
        if !config.selection_enabled {
            self.selection.clear();
        }
        self.filter.clear();
        self.export_dialog = None;
        self.config = config;
        self.phase = TablePhase::Ready;
        self.refresh();
        log::debug!(
            "table config replaced: {} row(s), {} deleted, {} selected",
            self.config.data.len(),
            self.deleted.len(),
            self.selection.len()
        );
    }

    fn refresh(&mut self) {
        self.display = compute_view(&self.config.data, &self.deleted);
        self.filtered = self.filter.apply(&self.config.columns, &self.display);
    }

    // ------------------------------------------------------------------------
    // 表示行
    // ------------------------------------------------------------------------

    /// 論理削除を反映した表示行
    pub fn display_rows(&self) -> &[Row] {
        &self.display
    }

    /// 検索条件を適用した表示行
    pub fn filtered_rows(&self) -> &[Row] {
        &self.filtered
    }

    /// 1ページあたりの行数（ページ分割なしなら全行）
    fn per_page(&self) -> usize {
        if self.config.paginator {
            self.config.rows_per_page.max(1)
        } else {
            self.filtered.len().max(1)
        }
    }

    /// ページ数（最低 1）
    pub fn page_count(&self) -> usize {
        self.filtered.len().div_ceil(self.per_page()).max(1)
    }

    /// 指定ページの行
    pub fn page(&self, index: usize) -> &[Row] {
        let per_page = self.per_page();
        let start = (index * per_page).min(self.filtered.len());
        let end = (start + per_page).min(self.filtered.len());
        &self.filtered[start..end]
    }

    pub fn filter_fields(&self) -> Vec<&str> {
        filter::filter_fields(&self.config.columns)
    }

    pub fn has_searchable_columns(&self) -> bool {
        filter::has_searchable_columns(&self.config.columns)
    }

    // ------------------------------------------------------------------------
    // 検索/フィルタ
    // ------------------------------------------------------------------------

    pub fn filter(&self) -> &FilterCoordinator {
        &self.filter
    }

    /// グローバル検索を設定
    ///
    /// 検索可能なカラムがない、またはグローバル検索が無効な設定では何もしない。
    pub fn apply_global_filter(&mut self, text: &str) -> bool {
        if !self.config.global_filter || !self.has_searchable_columns() {
            log::debug!("global filter ignored: no searchable columns");
            return false;
        }
        self.filter.set_global_filter(text);
        self.refresh();
        true
    }

    /// カラム別フィルタを設定
    pub fn apply_column_filter(&mut self, field: &str, text: &str) -> Result<()> {
        let column = self
            .config
            .column(field)
            .ok_or_else(|| PaydashError::UnknownColumn(field.to_string()))?;
        if !column.filterable {
            return Err(PaydashError::ColumnNotFilterable(field.to_string()));
        }
        self.filter.set_column_filter(field, text);
        self.refresh();
        Ok(())
    }

    /// カラム別フィルタの現在値
    pub fn column_search_value(&self, field: &str) -> &str {
        self.filter.column_filter(field)
    }

    pub fn clear_filters(&mut self) {
        self.filter.clear();
        self.refresh();
    }

    // ------------------------------------------------------------------------
    // 論理削除
    // ------------------------------------------------------------------------

    /// 行を論理削除（元データは変更しない）
    pub fn delete_row(&mut self, row: &Row) {
        if let Some(id) = row.id() {
            self.delete_id(id);
        }
    }

    /// ID を指定して論理削除（データに存在しない ID は無視）
    pub fn delete_id(&mut self, id: RowId) {
        if !self.config.data.iter().any(|r| r.has_id(&id)) {
            log::debug!("delete ignored: row {id} not found");
            return;
        }
        self.selection.on_row_deleted(&id);
        if self.deleted.insert(id) {
            self.refresh();
        }
    }

    pub fn is_deleted(&self, id: &RowId) -> bool {
        self.deleted.contains(id)
    }

    pub fn deleted_count(&self) -> usize {
        self.deleted.len()
    }

    // ------------------------------------------------------------------------
    // 選択
    // ------------------------------------------------------------------------

    pub fn selection(&self) -> &SelectionTracker {
        &self.selection
    }

    /// 選択を反転（選択無効の設定、論理削除済みの行では何もしない）
    pub fn toggle_selection(&mut self, row: &Row) -> bool {
        if !self.config.selection_enabled || self.deleted.excludes(row) {
            return false;
        }
        self.selection.toggle(row)
    }

    /// 行を選択に加える（選択済みならそのまま）
    ///
    /// 選択無効の設定、論理削除済みの行では何もしない。
    pub fn select_row(&mut self, row: &Row) -> bool {
        if !self.config.selection_enabled || self.deleted.excludes(row) {
            return false;
        }
        self.selection.select(row)
    }

    /// 絞り込み後の行をすべて選択、全選択済みなら全解除
    pub fn toggle_select_all(&mut self) {
        if !self.config.selection_enabled {
            return;
        }
        let all_selected = !self.filtered.is_empty()
            && self
                .filtered
                .iter()
                .all(|r| r.id().is_some_and(|id| self.selection.is_selected(&id)));
        if all_selected {
            self.selection.clear();
        } else {
            self.selection.select_all(&self.filtered);
        }
    }

    // ------------------------------------------------------------------------
    // アクション
    // ------------------------------------------------------------------------

    pub fn dispatcher(&self) -> ActionDispatcher<'_, M> {
        ActionDispatcher::new(&self.config.actions, &self.deleted)
    }

    /// `index` 番目のアクションを行に対して呼び出す
    pub fn invoke_action(&self, index: usize, row: &Row) -> Result<M> {
        self.dispatcher().invoke(index, row)
    }

    // ------------------------------------------------------------------------
    // エクスポート
    // ------------------------------------------------------------------------

    pub fn export_dialog(&self) -> Option<&ExportDialog> {
        self.export_dialog.as_ref()
    }

    pub fn export_dialog_mut(&mut self) -> Option<&mut ExportDialog> {
        self.export_dialog.as_mut()
    }

    pub fn is_export_dialog_open(&self) -> bool {
        self.export_dialog.is_some()
    }

    /// エクスポートダイアログを開く（常にデフォルト設定）
    pub fn open_export_dialog(&mut self) -> Result<()> {
        if !self.config.export_enabled {
            return Err(PaydashError::ExportDisabled);
        }
        self.export_dialog = Some(ExportDialog::default());
        Ok(())
    }

    pub fn cancel_export(&mut self) {
        self.export_dialog = None;
    }

    /// エクスポートを実行してダイアログを閉じる
    ///
    /// ダイアログが開いていなければデフォルト設定で実行する。
    /// シンクへの保存に失敗した場合はダイアログを開いたままにする。
    pub fn execute_export(&mut self, sink: &dyn DownloadSink) -> Result<ExportReceipt> {
        if !self.config.export_enabled {
            return Err(PaydashError::ExportDisabled);
        }
        let request = self
            .export_dialog
            .map(|d| d.request)
            .unwrap_or_default();

        let source = ExportSource {
            visible: &self.display,
            filtered: self.filter.is_active().then_some(self.filtered.as_slice()),
            selection: self.selection.rows(),
        };
        let rows = source.rows(request.scope);
        let file = export::export(
            self.config.export_basename(),
            &self.config.columns,
            rows,
            request.format,
        )?;
        sink.save(&file)?;

        log::info!("exported {} row(s) to {}", rows.len(), file.filename);
        let receipt = ExportReceipt {
            filename: file.filename,
            rows: rows.len(),
        };
        self.export_dialog = None;
        Ok(receipt)
    }
}

#[cfg(test)]
#[path = "dynamic_test.rs"]
mod tests;
