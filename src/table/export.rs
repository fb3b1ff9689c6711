//! エクスポート処理
//!
//! 現在の表示行（または選択行）を設定カラム順に射影し、
//! CSV または XLSX のバイト列に変換する。

mod xlsx;

use super::model::{Column, ExportFormat, ExportScope, Row};
use crate::error::{PaydashError, Result};
use serde_json::Value;

/// XLSX のシート名
pub const SHEET_NAME: &str = "Data";

/// エクスポート設定（ダイアログを開くたびにデフォルトへ戻る）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExportRequest {
    pub format: ExportFormat,
    pub scope: ExportScope,
}

/// エクスポート結果のファイル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub filename: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

/// エクスポート元になる行集合
#[derive(Debug, Clone, Copy)]
pub struct ExportSource<'a> {
    /// 論理削除を反映した表示行
    pub visible: &'a [Row],
    /// 絞り込み条件が有効な場合の絞り込み結果
    pub filtered: Option<&'a [Row]>,
    /// 選択行
    pub selection: &'a [Row],
}

impl<'a> ExportSource<'a> {
    /// 範囲に応じて出力対象の行を決める
    ///
    /// - `Selection` かつ選択ありなら選択行
    /// - それ以外は絞り込み結果（条件が無効なら表示行）
    pub fn rows(&self, scope: ExportScope) -> &'a [Row] {
        if scope == ExportScope::Selection && !self.selection.is_empty() {
            return self.selection;
        }
        self.filtered.unwrap_or(self.visible)
    }
}

/// 見出し行とデータ行（設定カラム順）
struct Projection<'a> {
    headers: Vec<&'a str>,
    records: Vec<Vec<Option<&'a Value>>>,
}

fn project<'a>(columns: &'a [Column], rows: &'a [Row]) -> Projection<'a> {
    Projection {
        headers: columns.iter().map(|c| c.header.as_str()).collect(),
        records: rows
            .iter()
            .map(|row| columns.iter().map(|c| row.get(&c.field)).collect())
            .collect(),
    }
}

/// CSV のセル文字列
fn csv_cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn write_csv(projection: &Projection<'_>) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());
    writer.write_record(&projection.headers)?;
    for record in &projection.records {
        writer.write_record(record.iter().map(|v| csv_cell(*v)))?;
    }
    writer
        .into_inner()
        .map_err(|e| PaydashError::Io(e.into_error()))
}

/// 行をエクスポートする
///
/// 0 行の場合も見出し行のみのファイルを生成する。
pub fn export(
    basename: &str,
    columns: &[Column],
    rows: &[Row],
    format: ExportFormat,
) -> Result<ExportFile> {
    let projection = project(columns, rows);

    let bytes = match format {
        ExportFormat::Csv => write_csv(&projection)?,
        ExportFormat::Excel => {
            xlsx::write_workbook(SHEET_NAME, &projection.headers, &projection.records)?
        }
    };

    log::debug!(
        "exported {} row(s) as {} ({} bytes)",
        rows.len(),
        format.label(),
        bytes.len()
    );

    Ok(ExportFile {
        filename: format!("{}.{}", basename, format.extension()),
        mime_type: format.mime_type(),
        bytes,
    })
}

#[cfg(test)]
#[path = "export_test.rs"]
mod tests;
