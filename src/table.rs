//! 汎用ダイナミックテーブル
//!
//! 宣言的な設定（カラム・データ・アクション・エクスポート・選択）から
//! 表示行の算出、検索/フィルタ、選択、論理削除、エクスポートを行う。
//!
//! ## モジュール構成
//!
//! - `model`: Row / Column / TableConfig などのデータモデル
//! - `view`: 論理削除を反映した表示行の算出
//! - `selection`: 選択行の追跡
//! - `filter`: グローバル検索とカラム別フィルタ
//! - `export`: CSV / XLSX エクスポート
//! - `action`: 行アクションの呼び出し
//! - `dynamic`: 上記を束ねたテーブルインスタンス

pub mod action;
pub mod dynamic;
pub mod export;
pub mod filter;
pub mod model;
pub mod selection;
pub mod view;

pub use action::ActionDispatcher;
pub use dynamic::{DynamicTable, ExportDialog, TablePhase};
pub use export::{ExportFile, ExportRequest, ExportSource};
pub use filter::{filter_fields, has_searchable_columns, FilterCoordinator};
pub use model::{
    Column, ExportFormat, ExportScope, Row, RowId, Severity, TableAction, TableConfig,
};
pub use selection::SelectionTracker;
pub use view::{compute_view, SoftDeleteSet};
