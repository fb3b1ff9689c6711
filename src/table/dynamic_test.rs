use super::*;
use crate::sink::mock::MockSink;
use crate::table::model::{Column, Severity, TableAction};
use std::io::{Cursor, Read};

#[derive(Debug, Clone, PartialEq)]
enum PageMsg {
    Edit(Row),
    Delete(Row),
}

fn columns() -> Vec<Column> {
    vec![
        Column::new("id", "ID"),
        Column::new("name", "Name")
            .with_searchable(true)
            .with_filterable(true),
        Column::new("status", "Status")
            .with_searchable(true)
            .with_filterable(true),
    ]
}

fn data() -> Vec<Row> {
    vec![
        Row::new().with("id", 1).with("name", "Alice").with("status", "Active"),
        Row::new().with("id", 2).with("name", "Bob").with("status", "Inactive"),
        Row::new().with("id", 3).with("name", "Charlie").with("status", "Active"),
    ]
}

fn config() -> TableConfig<PageMsg> {
    TableConfig::new(columns(), data())
        .with_export(Some("test-export"))
        .with_selection(true)
        .with_actions(vec![
            TableAction::new("✎", "Edit", |row: &Row| PageMsg::Edit(row.clone()))
                .with_severity(Severity::Info),
            TableAction::new("✗", "Delete", |row: &Row| PageMsg::Delete(row.clone()))
                .with_severity(Severity::Danger),
        ])
}

fn table() -> DynamicTable<PageMsg> {
    DynamicTable::new(config())
}

fn ids(rows: &[Row]) -> Vec<RowId> {
    rows.iter().filter_map(Row::id).collect()
}

fn row(id: i64) -> Row {
    data().into_iter().find(|r| r.has_id(&RowId::Int(id))).unwrap()
}

// ============================================================================
// 派生プロパティ
// ============================================================================

#[test]
fn filter_fields_come_from_columns() {
    assert_eq!(table().filter_fields(), vec!["id", "name", "status"]);
}

#[test]
fn detects_searchable_columns() {
    assert!(table().has_searchable_columns());

    let plain: DynamicTable = DynamicTable::new(TableConfig::new(
        vec![Column::new("id", "ID"), Column::new("name", "Name")],
        vec![],
    ));
    assert!(!plain.has_searchable_columns());
}

#[test]
fn display_rows_are_a_copy_of_data() {
    let table = table();
    assert_eq!(table.display_rows(), data().as_slice());
    assert_ne!(table.display_rows().as_ptr(), table.config().data.as_ptr());
}

// ============================================================================
// 論理削除
// ============================================================================

#[test]
fn delete_row_hides_row_without_touching_data() {
    let mut table = table();
    table.delete_row(&row(2));

    assert_eq!(ids(table.display_rows()), vec![RowId::Int(1), RowId::Int(3)]);
    assert_eq!(table.config().data.len(), 3);
    assert!(table.config().data.iter().any(|r| r.has_id(&RowId::Int(2))));
}

#[test]
fn deleting_two_rows_leaves_one() {
    let mut table = table();
    table.delete_row(&row(1));
    table.delete_row(&row(3));

    assert_eq!(ids(table.display_rows()), vec![RowId::Int(2)]);
}

#[test]
fn delete_id_marks_row_as_deleted() {
    let mut table = table();
    table.delete_id(RowId::Int(2));

    assert!(table.is_deleted(&RowId::Int(2)));
    assert!(!table.is_deleted(&RowId::Int(1)));
}

#[test]
fn deleting_unknown_id_is_noop() {
    let mut table = table();
    table.delete_id(RowId::Int(99));
    assert_eq!(table.display_rows().len(), 3);
    assert_eq!(table.deleted_count(), 0);
}

#[test]
fn deleting_selected_row_removes_it_from_selection() {
    let mut table = table();
    table.toggle_selection(&row(1));
    table.toggle_selection(&row(2));

    table.delete_row(&row(1));

    assert_eq!(ids(table.selection().rows()), vec![RowId::Int(2)]);
}

#[test]
fn deleted_row_cannot_be_selected() {
    let mut table = table();
    table.delete_row(&row(1));
    assert!(!table.toggle_selection(&row(1)));
    assert!(table.selection().is_empty());
}

#[test]
fn select_row_is_idempotent() {
    let mut table = table();
    assert!(table.select_row(&row(2)));
    assert!(!table.select_row(&row(2)));

    assert_eq!(ids(table.selection().rows()), vec![RowId::Int(2)]);
}

#[test]
fn select_row_rejects_deleted_row() {
    let mut table = table();
    table.delete_row(&row(1));

    assert!(!table.select_row(&row(1)));
    assert!(table.selection().is_empty());
}

#[test]
fn select_row_requires_selection_enabled() {
    let mut table = DynamicTable::new(config().with_selection(false));

    assert!(!table.select_row(&row(1)));
    assert!(table.selection().is_empty());
}

// ============================================================================
// 検索/フィルタ
// ============================================================================

#[test]
fn column_filters_are_retained_independently() {
    let mut table = table();
    table.apply_column_filter("name", "Alice").unwrap();
    table.apply_column_filter("status", "Active").unwrap();

    assert_eq!(table.column_search_value("name"), "Alice");
    assert_eq!(table.column_search_value("status"), "Active");
    assert_eq!(ids(table.filtered_rows()), vec![RowId::Int(1)]);
}

#[test]
fn column_filter_rejects_unknown_or_unfilterable_columns() {
    let mut table = table();
    assert!(matches!(
        table.apply_column_filter("email", "x"),
        Err(PaydashError::UnknownColumn(_))
    ));
    assert!(matches!(
        table.apply_column_filter("id", "1"),
        Err(PaydashError::ColumnNotFilterable(_))
    ));
}

#[test]
fn global_filter_narrows_filtered_rows_only() {
    let mut table = table();
    assert!(table.apply_global_filter("char"));
    assert_eq!(ids(table.filtered_rows()), vec![RowId::Int(3)]);
    assert_eq!(table.display_rows().len(), 3);
}

#[test]
fn global_filter_ignored_without_searchable_columns() {
    let mut table: DynamicTable =
        DynamicTable::new(TableConfig::new(vec![Column::new("id", "ID")], data()));
    assert!(!table.apply_global_filter("1"));
    assert!(!table.filter().is_active());
}

#[test]
fn filters_apply_after_soft_delete() {
    let mut table = table();
    table.apply_column_filter("status", "Active").unwrap();
    table.delete_row(&row(1));
    assert_eq!(ids(table.filtered_rows()), vec![RowId::Int(2), RowId::Int(3)]);
}

// ============================================================================
// 選択
// ============================================================================

#[test]
fn toggle_select_all_uses_filtered_rows() {
    let mut table = table();
    table.apply_column_filter("name", "a").unwrap();
    table.toggle_select_all();
    assert_eq!(ids(table.selection().rows()), vec![RowId::Int(1), RowId::Int(3)]);

    table.toggle_select_all();
    assert!(table.selection().is_empty());
}

#[test]
fn selection_disabled_ignores_toggles() {
    let mut table: DynamicTable = DynamicTable::new(TableConfig::new(columns(), data()));
    assert!(!table.toggle_selection(&row(1)));
    table.toggle_select_all();
    assert!(table.selection().is_empty());
}

// ============================================================================
// 設定の差し替え
// ============================================================================

#[test]
fn config_replacement_keeps_surviving_deletions_and_selection() {
    let mut table = table();
    table.delete_row(&row(1));
    table.toggle_selection(&row(2));
    table.toggle_selection(&row(3));
    table.apply_global_filter("bob");

    let mut next = config();
    next.data = vec![
        Row::new().with("id", 1).with("name", "Alice"),
        Row::new().with("id", 2).with("name", "Bobby"),
        Row::new().with("id", 4).with("name", "Dana"),
    ];
    table.set_config(next);

    assert_eq!(ids(table.display_rows()), vec![RowId::Int(2), RowId::Int(4)]);
    assert_eq!(ids(table.selection().rows()), vec![RowId::Int(2)]);
    assert_eq!(table.selection().rows()[0].cell_text("name"), "Bobby");
    assert!(!table.filter().is_active());
}

#[test]
fn loading_table_becomes_ready_with_config() {
    let mut table: DynamicTable<PageMsg> =
        DynamicTable::loading(TableConfig::new(columns(), vec![]));
    assert!(table.is_loading());

    table.set_config(config());

    assert_eq!(table.phase(), TablePhase::Ready);
    assert_eq!(table.display_rows().len(), 3);
}

#[test]
fn loading_flag_toggles_phase() {
    let mut table = table();
    table.set_loading(true);
    assert_eq!(table.phase(), TablePhase::Loading);

    table.set_loading(false);
    assert_eq!(table.phase(), TablePhase::Ready);
}

// ============================================================================
// アクション
// ============================================================================

#[test]
fn action_receives_displayed_row() {
    let table = table();
    let msg = table.invoke_action(0, &table.display_rows()[1]).unwrap();
    assert_eq!(msg, PageMsg::Edit(row(2)));
}

#[test]
fn action_on_deleted_row_is_rejected() {
    let mut table = table();
    let stale = row(2);
    table.delete_row(&stale);

    assert!(matches!(
        table.invoke_action(1, &stale),
        Err(PaydashError::RowDeleted(RowId::Int(2)))
    ));
}

// ============================================================================
// エクスポート
// ============================================================================

#[test]
fn export_dialog_opens_with_defaults() {
    let mut table = table();
    table.open_export_dialog().unwrap();
    let dialog = table.export_dialog().unwrap();
    assert_eq!(dialog.request.format, ExportFormat::Excel);
    assert_eq!(dialog.request.scope, ExportScope::All);
}

#[test]
fn reopening_dialog_resets_format_and_scope() {
    let mut table = table();
    table.open_export_dialog().unwrap();
    let dialog = table.export_dialog_mut().unwrap();
    dialog.toggle_format();
    dialog.toggle_scope();
    table.cancel_export();
    assert!(!table.is_export_dialog_open());

    table.open_export_dialog().unwrap();
    assert_eq!(table.export_dialog().unwrap().request, ExportRequest::default());
}

#[test]
fn export_closes_dialog_after_writing_file() {
    let mut table = table();
    let sink = MockSink::new();
    table.open_export_dialog().unwrap();
    table
        .export_dialog_mut()
        .unwrap()
        .set_format(ExportFormat::Csv);

    let receipt = table.execute_export(&sink).unwrap();

    assert!(!table.is_export_dialog_open());
    assert_eq!(receipt.filename, "test-export.csv");
    assert_eq!(receipt.rows, 3);
    let file = sink.last().unwrap();
    let text = String::from_utf8(file.bytes).unwrap();
    assert_eq!(text.lines().count(), 4);
    assert_eq!(text.lines().next(), Some("ID,Name,Status"));
}

#[test]
fn zero_row_export_still_closes_dialog() {
    let mut table = table();
    let sink = MockSink::new();
    table.apply_global_filter("nobody");
    table.open_export_dialog().unwrap();
    table
        .export_dialog_mut()
        .unwrap()
        .set_format(ExportFormat::Csv);

    let receipt = table.execute_export(&sink).unwrap();

    assert_eq!(receipt.rows, 0);
    assert!(!table.is_export_dialog_open());
    let text = String::from_utf8(sink.last().unwrap().bytes).unwrap();
    assert_eq!(text.lines().count(), 1);
}

#[test]
fn export_selection_scope_uses_selected_rows() {
    let mut table = table();
    let sink = MockSink::new();
    table.toggle_selection(&row(3));
    table.open_export_dialog().unwrap();
    let dialog = table.export_dialog_mut().unwrap();
    dialog.set_format(ExportFormat::Csv);
    dialog.set_scope(ExportScope::Selection);

    table.execute_export(&sink).unwrap();

    let text = String::from_utf8(sink.last().unwrap().bytes).unwrap();
    assert_eq!(text.lines().collect::<Vec<_>>(), vec!["ID,Name,Status", "3,Charlie,Active"]);
}

#[test]
fn export_selection_scope_without_selection_exports_filtered_rows() {
    let mut table = table();
    let sink = MockSink::new();
    table.apply_column_filter("status", "inactive").unwrap();
    table.open_export_dialog().unwrap();
    let dialog = table.export_dialog_mut().unwrap();
    dialog.set_format(ExportFormat::Csv);
    dialog.set_scope(ExportScope::Selection);

    let receipt = table.execute_export(&sink).unwrap();
    assert_eq!(receipt.rows, 1);
}

#[test]
fn export_excludes_soft_deleted_rows() {
    let mut table = table();
    let sink = MockSink::new();
    table.delete_row(&row(1));

    let receipt = table.execute_export(&sink).unwrap();

    assert_eq!(receipt.filename, "test-export.xlsx");
    assert_eq!(receipt.rows, 2);
    let bytes = sink.last().unwrap().bytes;
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut read = |name: &str| {
        let mut content = String::new();
        archive
            .by_name(name)
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        content
    };
    assert!(read("xl/worksheets/sheet1.xml").contains(r#"<dimension ref="A1:C3"/>"#));
    assert!(!read("xl/sharedStrings.xml").contains("Alice"));
}

#[test]
fn failed_export_keeps_dialog_open() {
    let mut table = table();
    table.open_export_dialog().unwrap();

    assert!(table.execute_export(&MockSink::failing()).is_err());
    assert!(table.is_export_dialog_open());
}

#[test]
fn export_disabled_table_refuses_dialog() {
    let mut table: DynamicTable = DynamicTable::new(TableConfig::new(columns(), data()));
    assert!(matches!(
        table.open_export_dialog(),
        Err(PaydashError::ExportDisabled)
    ));
    assert!(matches!(
        table.execute_export(&MockSink::new()),
        Err(PaydashError::ExportDisabled)
    ));
}

#[test]
fn pages_split_filtered_rows() {
    let table: DynamicTable = DynamicTable::new(
        TableConfig::new(columns(), data()).with_rows_per_page(2),
    );
    assert_eq!(table.page_count(), 2);
    assert_eq!(ids(table.page(0)), vec![RowId::Int(1), RowId::Int(2)]);
    assert_eq!(ids(table.page(1)), vec![RowId::Int(3)]);
    assert!(table.page(5).is_empty());
}

#[test]
fn disabled_paginator_shows_all_rows_on_one_page() {
    let table: DynamicTable = DynamicTable::new(
        TableConfig::new(columns(), data())
            .with_rows_per_page(2)
            .with_paginator(false),
    );
    assert_eq!(table.page_count(), 1);
    assert_eq!(ids(table.page(0)).len(), 3);
    assert!(table.page(1).is_empty());
}

#[test]
fn disabled_paginator_with_no_rows_has_one_empty_page() {
    let table: DynamicTable = DynamicTable::new(
        TableConfig::new(columns(), Vec::new()).with_paginator(false),
    );
    assert_eq!(table.page_count(), 1);
    assert!(table.page(0).is_empty());
}
