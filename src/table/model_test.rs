use super::*;
use serde_json::json;

fn row_from(value: Value) -> Row {
    serde_json::from_value(value).unwrap()
}

#[test]
fn row_id_distinguishes_number_and_text() {
    let numeric = row_from(json!({"id": 1}));
    let text = row_from(json!({"id": "1"}));
    assert_eq!(numeric.id(), Some(RowId::Int(1)));
    assert_eq!(text.id(), Some(RowId::Text("1".to_string())));
    assert_ne!(numeric.id(), text.id());
}

#[test]
fn row_without_id_has_no_identity() {
    assert_eq!(row_from(json!({"name": "Alice"})).id(), None);
    assert_eq!(row_from(json!({"id": null})).id(), None);
}

#[test]
fn row_id_parse_prefers_integer() {
    assert_eq!(RowId::parse("1002"), RowId::Int(1002));
    assert_eq!(RowId::parse("RET-2000"), RowId::Text("RET-2000".to_string()));
}

#[test]
fn cell_text_of_missing_field_is_empty() {
    let row = Row::new().with("id", 1).with("name", "Alice");
    assert_eq!(row.cell_text("status"), "");
    assert_eq!(row.cell_text("name"), "Alice");
    assert_eq!(row.cell_text("id"), "1");
}

#[test]
fn cell_text_formats_scalars() {
    let row = row_from(json!({"amount": 12.5, "active": true, "note": null}));
    assert_eq!(row.cell_text("amount"), "12.5");
    assert_eq!(row.cell_text("active"), "true");
    assert_eq!(row.cell_text("note"), "");
}

#[test]
fn row_preserves_field_order() {
    let row = row_from(json!({"id": 1, "date": "2024-01-01", "customer": "C", "amount": 3}));
    let fields: Vec<&str> = row.fields().collect();
    assert_eq!(fields, vec!["id", "date", "customer", "amount"]);
}

#[test]
fn export_basename_defaults_to_export() {
    let config: TableConfig = TableConfig::new(vec![], vec![]);
    assert_eq!(config.export_basename(), "export");

    let config: TableConfig = TableConfig::new(vec![], vec![]).with_export(Some("payments-export"));
    assert!(config.export_enabled);
    assert_eq!(config.export_basename(), "payments-export");
}

#[test]
fn paginator_is_on_by_default() {
    let config: TableConfig = TableConfig::default();
    assert!(config.paginator);
    assert!(!config.with_paginator(false).paginator);
}

#[test]
fn export_format_metadata() {
    assert_eq!(ExportFormat::default(), ExportFormat::Excel);
    assert_eq!(ExportFormat::Excel.extension(), "xlsx");
    assert_eq!(ExportFormat::Csv.extension(), "csv");
    assert_eq!(ExportFormat::Csv.mime_type(), "text/csv;charset=utf-8;");
    assert_eq!(ExportFormat::Excel.toggled(), ExportFormat::Csv);
    assert_eq!(ExportScope::default(), ExportScope::All);
    assert_eq!(ExportScope::All.toggled(), ExportScope::Selection);
}

#[test]
fn action_invoke_returns_callback_value() {
    let action = TableAction::new("✎", "Edit", |row: &Row| row.cell_text("name"))
        .with_severity(Severity::Info);
    let row = Row::new().with("id", 1).with("name", "Alice");
    assert_eq!(action.invoke(&row), "Alice");
    assert_eq!(action.severity, Some(Severity::Info));
}

#[test]
fn column_deserializes_with_optional_flags() {
    let column: Column = serde_json::from_value(json!({"field": "id", "header": "ID"})).unwrap();
    assert!(!column.filterable);
    assert!(!column.searchable);
}
