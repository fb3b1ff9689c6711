//! テーブルのデータモデル
//!
//! 行・カラム・アクション・テーブル設定を定義する。
//! 行は呼び出し側の所有物であり、テーブルは行を書き換えない。

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// 識別子として扱うフィールド名
pub const ID_FIELD: &str = "id";

/// 1ページあたりのデフォルト行数
pub const DEFAULT_ROWS_PER_PAGE: usize = 10;

/// デフォルトのエクスポートファイル名（拡張子なし）
pub const DEFAULT_EXPORT_BASENAME: &str = "export";

// ============================================================================
// RowId（行の識別子）
// ============================================================================

/// 行の識別子
///
/// 数値 `1` と文字列 `"1"` は別の識別子として扱う。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RowId {
    /// 整数 ID
    Int(i64),
    /// 文字列 ID
    Text(String),
    /// 上記以外のスカラー値（JSON 表現で保持）
    Other(String),
}

impl RowId {
    /// JSON 値から識別子を取り出す（null は識別子なし）
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Number(n) => Some(match n.as_i64() {
                Some(i) => RowId::Int(i),
                None => RowId::Other(n.to_string()),
            }),
            Value::String(s) => Some(RowId::Text(s.clone())),
            other => Some(RowId::Other(other.to_string())),
        }
    }

    /// コマンドライン入力から識別子を解釈する（整数として読めれば整数）
    pub fn parse(input: &str) -> Self {
        match input.parse::<i64>() {
            Ok(i) => RowId::Int(i),
            Err(_) => RowId::Text(input.to_string()),
        }
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowId::Int(i) => write!(f, "{i}"),
            RowId::Text(s) | RowId::Other(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for RowId {
    fn from(value: i64) -> Self {
        RowId::Int(value)
    }
}

impl From<&str> for RowId {
    fn from(value: &str) -> Self {
        RowId::Text(value.to_string())
    }
}

// ============================================================================
// Row（行）
// ============================================================================

/// テーブルの1行（フィールド名 → スカラー値）
///
/// キーの順序は入力時の順序を保持する。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(Map<String, Value>);

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// フィールドを追加した行を返す
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    /// フィールドの値を設定（行のコピーに対してのみ使う）
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(field.into(), value.into());
    }

    /// 行の識別子
    pub fn id(&self) -> Option<RowId> {
        self.0.get(ID_FIELD).and_then(RowId::from_value)
    }

    /// 指定した識別子を持つか
    pub fn has_id(&self, id: &RowId) -> bool {
        self.id().as_ref() == Some(id)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// セルの表示文字列
    ///
    /// フィールドが存在しない場合・null の場合は空文字列。
    pub fn cell_text(&self, field: &str) -> String {
        match self.0.get(field) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    /// フィールド名を入力順に列挙
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl From<Map<String, Value>> for Row {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

// ============================================================================
// Column（カラム定義）
// ============================================================================

/// カラム定義
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// 行から値を引くフィールド名
    pub field: String,
    /// 見出し
    pub header: String,
    /// カラム別フィルタ入力を持つか
    #[serde(default)]
    pub filterable: bool,
    /// グローバル検索の対象か
    #[serde(default)]
    pub searchable: bool,
}

impl Column {
    pub fn new(field: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            header: header.into(),
            filterable: false,
            searchable: false,
        }
    }

    /// フィルタ可否を設定
    pub fn with_filterable(mut self, filterable: bool) -> Self {
        self.filterable = filterable;
        self
    }

    /// 検索可否を設定
    pub fn with_searchable(mut self, searchable: bool) -> Self {
        self.searchable = searchable;
        self
    }
}

// ============================================================================
// TableAction（行アクション）
// ============================================================================

/// アクションボタンの重要度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Info,
    Warn,
    Danger,
    Secondary,
    Contrast,
}

/// 行アクションのコールバック
pub type ActionCallback<M> = Arc<dyn Fn(&Row) -> M + Send + Sync>;

/// 行ごとに表示されるアクション
///
/// コールバックの戻り値 `M` はテーブルを埋め込んだ画面へそのまま返される。
pub struct TableAction<M> {
    pub icon: String,
    pub tooltip: String,
    pub severity: Option<Severity>,
    callback: ActionCallback<M>,
}

impl<M> TableAction<M> {
    pub fn new(
        icon: impl Into<String>,
        tooltip: impl Into<String>,
        callback: impl Fn(&Row) -> M + Send + Sync + 'static,
    ) -> Self {
        Self {
            icon: icon.into(),
            tooltip: tooltip.into(),
            severity: None,
            callback: Arc::new(callback),
        }
    }

    /// 重要度を設定
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    /// コールバックを1回だけ呼び出す
    pub fn invoke(&self, row: &Row) -> M {
        (self.callback)(row)
    }
}

impl<M> Clone for TableAction<M> {
    fn clone(&self) -> Self {
        Self {
            icon: self.icon.clone(),
            tooltip: self.tooltip.clone(),
            severity: self.severity,
            callback: Arc::clone(&self.callback),
        }
    }
}

impl<M> fmt::Debug for TableAction<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableAction")
            .field("icon", &self.icon)
            .field("tooltip", &self.tooltip)
            .field("severity", &self.severity)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Export 設定
// ============================================================================

/// エクスポート形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Excel,
    Csv,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Excel => "xlsx",
            ExportFormat::Csv => "csv",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Excel => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            ExportFormat::Csv => "text/csv;charset=utf-8;",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Excel => "Excel",
            ExportFormat::Csv => "CSV",
        }
    }

    /// もう一方の形式
    pub fn toggled(&self) -> Self {
        match self {
            ExportFormat::Excel => ExportFormat::Csv,
            ExportFormat::Csv => ExportFormat::Excel,
        }
    }
}

/// エクスポート範囲
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportScope {
    #[default]
    All,
    Selection,
}

impl ExportScope {
    pub fn label(&self) -> &'static str {
        match self {
            ExportScope::All => "Export All",
            ExportScope::Selection => "Only Selection",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            ExportScope::All => ExportScope::Selection,
            ExportScope::Selection => ExportScope::All,
        }
    }
}

// ============================================================================
// TableConfig（テーブル設定）
// ============================================================================

/// テーブル設定
///
/// 画面側が描画サイクルごとに1つ渡す。差し替えると派生状態はリセットされる。
pub struct TableConfig<M = ()> {
    pub columns: Vec<Column>,
    pub data: Vec<Row>,
    pub actions: Vec<TableAction<M>>,
    pub export_enabled: bool,
    pub export_filename: Option<String>,
    pub selection_enabled: bool,
    pub rows_per_page: usize,
    /// false ならページ分割せず1ページに全行を出す
    pub paginator: bool,
    pub global_filter: bool,
}

impl<M> TableConfig<M> {
    pub fn new(columns: Vec<Column>, data: Vec<Row>) -> Self {
        Self {
            columns,
            data,
            actions: Vec::new(),
            export_enabled: false,
            export_filename: None,
            selection_enabled: false,
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
            paginator: true,
            global_filter: true,
        }
    }

    pub fn with_actions(mut self, actions: Vec<TableAction<M>>) -> Self {
        self.actions = actions;
        self
    }

    /// エクスポートを有効化（ファイル名は拡張子なし）
    pub fn with_export(mut self, filename: Option<&str>) -> Self {
        self.export_enabled = true;
        self.export_filename = filename.map(str::to_string);
        self
    }

    pub fn with_selection(mut self, enabled: bool) -> Self {
        self.selection_enabled = enabled;
        self
    }

    pub fn with_rows_per_page(mut self, rows: usize) -> Self {
        self.rows_per_page = rows.max(1);
        self
    }

    pub fn with_paginator(mut self, enabled: bool) -> Self {
        self.paginator = enabled;
        self
    }

    /// エクスポートファイル名のベース部分
    pub fn export_basename(&self) -> &str {
        self.export_filename
            .as_deref()
            .unwrap_or(DEFAULT_EXPORT_BASENAME)
    }

    /// フィールド名でカラムを検索
    pub fn column(&self, field: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.field == field)
    }
}

impl<M> Default for TableConfig<M> {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}

impl<M> Clone for TableConfig<M> {
    fn clone(&self) -> Self {
        Self {
            columns: self.columns.clone(),
            data: self.data.clone(),
            actions: self.actions.clone(),
            export_enabled: self.export_enabled,
            export_filename: self.export_filename.clone(),
            selection_enabled: self.selection_enabled,
            rows_per_page: self.rows_per_page,
            paginator: self.paginator,
            global_filter: self.global_filter,
        }
    }
}

impl<M> fmt::Debug for TableConfig<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableConfig")
            .field("columns", &self.columns)
            .field("rows", &self.data.len())
            .field("actions", &self.actions)
            .field("export_enabled", &self.export_enabled)
            .field("export_filename", &self.export_filename)
            .field("selection_enabled", &self.selection_enabled)
            .field("paginator", &self.paginator)
            .finish()
    }
}

#[cfg(test)]
#[path = "model_test.rs"]
mod tests;
