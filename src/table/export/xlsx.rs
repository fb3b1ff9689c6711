//! XLSX ライター
//!
//! 1シートのみのワークブックを書き出す。
//! 数値は数値セル、真偽値は真偽値セル、それ以外は文字列セルにする。
//! 値のないセルは書き込まない。

use crate::error::Result;
use rust_xlsxwriter::{ColNum, RowNum, Workbook, Worksheet};
use serde_json::Value;

fn write_cell(sheet: &mut Worksheet, row: RowNum, col: ColNum, value: &Value) -> Result<()> {
    match value {
        Value::Null => {}
        Value::Number(n) => {
            if let Some(f) = n.as_f64() {
                sheet.write_number(row, col, f)?;
            }
        }
        Value::Bool(b) => {
            sheet.write_boolean(row, col, *b)?;
        }
        Value::String(s) => {
            sheet.write_string(row, col, s.as_str())?;
        }
        other => {
            sheet.write_string(row, col, other.to_string())?;
        }
    }
    Ok(())
}

/// 1シートのワークブックを書き出す
pub(super) fn write_workbook(
    sheet_name: &str,
    headers: &[&str],
    records: &[Vec<Option<&Value>>],
) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(sheet_name)?;

    for (col, header) in (0..).zip(headers) {
        sheet.write_string(0, col, *header)?;
    }

    for (row, record) in (1..).zip(records) {
        for (col, value) in (0..).zip(record) {
            if let Some(value) = value {
                write_cell(sheet, row, col, value)?;
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}
