use super::*;

fn make_columns() -> Vec<Column> {
    vec![
        Column::new("id", "Id"),
        Column::new("customer", "Customer"),
        Column::new("status", "Status"),
    ]
}

fn make_rows() -> Vec<Row> {
    vec![
        Row::new()
            .with("status", "Pending")
            .with("id", 1)
            .with("customer", "Alice")
            .with("internal", "hidden"),
        Row::new().with("id", 2),
    ]
}

#[test]
fn projection_keeps_configured_fields_in_order() {
    let projected = project(&make_columns(), &make_rows());

    let keys: Vec<_> = projected[0].keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["id", "customer", "status"]);
    assert!(!projected[0].contains_key("internal"));
}

#[test]
fn projection_fills_missing_fields_with_null() {
    let projected = project(&make_columns(), &make_rows());
    assert_eq!(projected[1]["customer"], Value::Null);
}

#[test]
fn table_uses_headers_and_blank_missing_cells() {
    let rows = make_rows();
    let rendered = build_table(&make_columns(), rows.iter()).to_string();

    assert!(rendered.contains("Customer"));
    assert!(rendered.contains("Alice"));
    assert!(!rendered.contains("hidden"));
}
