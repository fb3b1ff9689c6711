//! ダイナミックテーブル画面（支払い・チャージバック）
//!
//! テーブルの状態は `DynamicTable` が持ち、この画面はキー入力の解釈と
//! 行アクションの結果（編集ダイアログ・論理削除）を扱う。

use super::edit::{self, EditDialog, Outcome};
use crate::pages::{chargebacks, payments, RowAction};
use crate::sink::DownloadSink;
use crate::table::dynamic::SKELETON_ROWS;
use crate::table::{
    DynamicTable, ExportFormat, ExportScope, Row, TableConfig,
};
use crate::tui::common::{centered_rect, severity_color, Status, SKELETON_CELL};
use crossterm::event::KeyCode;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row as TableRow, Table, TableState};

type BuildConfig = fn(Vec<Row>) -> TableConfig<RowAction>;

// ============================================================================
// Model（画面状態）
// ============================================================================

/// 入力フォーカス
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Rows,
    Search,
    /// フィルタ可能カラムの何番目か
    ColumnFilter(usize),
}

pub struct Model {
    pub title: &'static str,
    pub table: DynamicTable<RowAction>,
    pub state: TableState,
    pub page: usize,
    pub action_index: usize,
    pub focus: Focus,
    pub search_text: String,
    pub edit: Option<EditDialog>,
    build: BuildConfig,
}

impl Model {
    fn new(title: &'static str, skeleton: TableConfig<RowAction>, build: BuildConfig) -> Self {
        Self {
            title,
            table: DynamicTable::loading(skeleton),
            state: TableState::default(),
            page: 0,
            action_index: 0,
            focus: Focus::Rows,
            search_text: String::new(),
            edit: None,
            build,
        }
    }

    pub fn payments() -> Self {
        Self::new(
            "Payments",
            payments::skeleton_config(),
            payments::table_config,
        )
    }

    pub fn chargebacks() -> Self {
        Self::new(
            "Chargebacks",
            chargebacks::skeleton_config(),
            chargebacks::table_config,
        )
    }

    /// 取得データで設定を差し替える
    pub fn load(&mut self, rows: Vec<Row>) {
        self.table.set_config((self.build)(rows));
        self.page = 0;
        self.search_text.clear();
        self.focus = Focus::Rows;
        self.clamp();
    }

    /// 文字入力を画面が受け取る状態か
    pub fn captures_input(&self) -> bool {
        self.focus != Focus::Rows || self.edit.is_some() || self.table.is_export_dialog_open()
    }

    /// カーソル位置の行
    pub fn current_row(&self) -> Option<&Row> {
        self.table.page(self.page).get(self.state.selected()?)
    }

    fn filterable_fields(&self) -> Vec<String> {
        self.table
            .config()
            .columns
            .iter()
            .filter(|c| c.filterable)
            .map(|c| c.field.clone())
            .collect()
    }

    /// ページとカーソルを表示行の範囲に収める
    fn clamp(&mut self) {
        self.page = self.page.min(self.table.page_count() - 1);
        let len = self.table.page(self.page).len();
        let selected = match self.state.selected() {
            _ if len == 0 => None,
            Some(i) => Some(i.min(len - 1)),
            None => Some(0),
        };
        self.state.select(selected);
        let actions = self.table.config().actions.len();
        self.action_index = self.action_index.min(actions.saturating_sub(1));
    }
}

// ============================================================================
// Msg（メッセージ）
// ============================================================================

pub enum Msg {
    Up,
    Down,
    NextPage,
    PrevPage,
    NextAction,
    PrevAction,
    InvokeAction,
    ToggleSelect,
    ToggleSelectAll,
    FocusSearch,
    FocusFilter,
    NextFilterColumn,
    Unfocus,
    Input(char),
    Backspace,
    ClearFilters,
    OpenExport,
    ToggleFormat,
    ToggleScope,
    ConfirmExport,
    CancelExport,
    Edit(edit::Msg),
}

/// キーコードをメッセージに変換
pub fn key_to_msg(key: KeyCode, model: &Model) -> Option<Msg> {
    if model.edit.is_some() {
        return edit::key_to_msg(key).map(Msg::Edit);
    }
    if model.table.is_export_dialog_open() {
        return match key {
            KeyCode::Left | KeyCode::Right | KeyCode::Char('f') => Some(Msg::ToggleFormat),
            KeyCode::Up | KeyCode::Down | KeyCode::Char('s') => Some(Msg::ToggleScope),
            KeyCode::Enter => Some(Msg::ConfirmExport),
            KeyCode::Esc => Some(Msg::CancelExport),
            _ => None,
        };
    }
    match model.focus {
        Focus::Search | Focus::ColumnFilter(_) => match key {
            KeyCode::Esc | KeyCode::Enter => Some(Msg::Unfocus),
            KeyCode::Tab if matches!(model.focus, Focus::ColumnFilter(_)) => {
                Some(Msg::NextFilterColumn)
            }
            KeyCode::Backspace => Some(Msg::Backspace),
            KeyCode::Char(c) => Some(Msg::Input(c)),
            _ => None,
        },
        Focus::Rows => match key {
            KeyCode::Up | KeyCode::Char('k') => Some(Msg::Up),
            KeyCode::Down | KeyCode::Char('j') => Some(Msg::Down),
            KeyCode::PageDown | KeyCode::Char('n') => Some(Msg::NextPage),
            KeyCode::PageUp | KeyCode::Char('p') => Some(Msg::PrevPage),
            KeyCode::Right | KeyCode::Char('l') => Some(Msg::NextAction),
            KeyCode::Left | KeyCode::Char('h') => Some(Msg::PrevAction),
            KeyCode::Enter => Some(Msg::InvokeAction),
            KeyCode::Char(' ') => Some(Msg::ToggleSelect),
            KeyCode::Char('a') => Some(Msg::ToggleSelectAll),
            KeyCode::Char('/') => Some(Msg::FocusSearch),
            KeyCode::Char('f') => Some(Msg::FocusFilter),
            KeyCode::Char('c') => Some(Msg::ClearFilters),
            KeyCode::Char('x') => Some(Msg::OpenExport),
            _ => None,
        },
    }
}

// ============================================================================
// update（状態更新）
// ============================================================================

/// メッセージに応じて状態を更新し、ステータス行に出すメッセージを返す
pub fn update(model: &mut Model, msg: Msg, sink: &dyn DownloadSink) -> Option<Status> {
    if model.table.is_loading() {
        return None;
    }

    match msg {
        Msg::Up => {
            let i = model.state.selected().unwrap_or(0);
            model.state.select(Some(i.saturating_sub(1)));
            model.clamp();
            None
        }
        Msg::Down => {
            let i = model.state.selected().map_or(0, |i| i + 1);
            model.state.select(Some(i));
            model.clamp();
            None
        }
        Msg::NextPage => {
            model.page += 1;
            model.clamp();
            None
        }
        Msg::PrevPage => {
            model.page = model.page.saturating_sub(1);
            model.clamp();
            None
        }
        Msg::NextAction => {
            model.action_index += 1;
            model.clamp();
            None
        }
        Msg::PrevAction => {
            model.action_index = model.action_index.saturating_sub(1);
            None
        }
        Msg::InvokeAction => invoke_action(model),
        Msg::ToggleSelect => {
            let row = model.current_row()?.clone();
            model.table.toggle_selection(&row);
            None
        }
        Msg::ToggleSelectAll => {
            model.table.toggle_select_all();
            None
        }
        Msg::FocusSearch => {
            if !model.table.config().global_filter || !model.table.has_searchable_columns() {
                return Some(Status::error("Search is not available on this table"));
            }
            model.focus = Focus::Search;
            None
        }
        Msg::FocusFilter => {
            if model.filterable_fields().is_empty() {
                return Some(Status::error("No filterable columns on this table"));
            }
            model.focus = Focus::ColumnFilter(0);
            None
        }
        Msg::NextFilterColumn => {
            if let Focus::ColumnFilter(i) = model.focus {
                let count = model.filterable_fields().len().max(1);
                model.focus = Focus::ColumnFilter((i + 1) % count);
            }
            None
        }
        Msg::Unfocus => {
            model.focus = Focus::Rows;
            None
        }
        Msg::Input(c) => edit_query(model, |text| text.push(c)),
        Msg::Backspace => edit_query(model, |text| {
            text.pop();
        }),
        Msg::ClearFilters => {
            model.table.clear_filters();
            model.search_text.clear();
            model.clamp();
            Some(Status::info("Filters cleared"))
        }
        Msg::OpenExport => match model.table.open_export_dialog() {
            Ok(()) => None,
            Err(e) => Some(Status::error(e.to_string())),
        },
        Msg::ToggleFormat => {
            if let Some(dialog) = model.table.export_dialog_mut() {
                dialog.toggle_format();
            }
            None
        }
        Msg::ToggleScope => {
            if let Some(dialog) = model.table.export_dialog_mut() {
                dialog.toggle_scope();
            }
            None
        }
        Msg::ConfirmExport => match model.table.execute_export(sink) {
            Ok(receipt) => Some(Status::info(format!(
                "Exported {} row(s) to {}",
                receipt.rows, receipt.filename
            ))),
            Err(e) => {
                log::error!("export failed: {e}");
                Some(Status::error(format!("Export failed: {e}")))
            }
        },
        Msg::CancelExport => {
            model.table.cancel_export();
            None
        }
        Msg::Edit(msg) => {
            let outcome = model.edit.as_mut()?.update(msg)?;
            model.edit = None;
            match outcome {
                Outcome::Saved(row) => {
                    // 保存先の API はないため記録のみ
                    log::info!("saved {} {}: {:?}", model.title, row.cell_text("id"), row);
                    Some(Status::info(format!("Saved {}", row.cell_text("id"))))
                }
                Outcome::Cancelled => None,
            }
        }
    }
}

fn invoke_action(model: &mut Model) -> Option<Status> {
    let row = model.current_row()?.clone();
    match model.table.invoke_action(model.action_index, &row) {
        Ok(RowAction::Edit(row)) => {
            model.edit = Some(EditDialog::new(row, &model.table.config().columns));
            None
        }
        Ok(RowAction::Delete(row)) => {
            model.table.delete_row(&row);
            model.clamp();
            Some(Status::info(format!("Deleted {}", row.cell_text("id"))))
        }
        Err(e) => Some(Status::error(e.to_string())),
    }
}

/// フォーカス中の検索欄を編集して再適用する
fn edit_query(model: &mut Model, edit: impl FnOnce(&mut String)) -> Option<Status> {
    let status = match model.focus {
        Focus::Rows => return None,
        Focus::Search => {
            edit(&mut model.search_text);
            let text = model.search_text.clone();
            model.table.apply_global_filter(&text);
            None
        }
        Focus::ColumnFilter(i) => {
            let fields = model.filterable_fields();
            let field = fields.get(i)?;
            let mut text = model.table.column_search_value(field).to_string();
            edit(&mut text);
            model
                .table
                .apply_column_filter(field, &text)
                .err()
                .map(|e| Status::error(e.to_string()))
        }
    };
    model.state.select(Some(0));
    model.page = 0;
    model.clamp();
    status
}

// ============================================================================
// view（描画）
// ============================================================================

/// 画面を描画
pub fn view(f: &mut Frame, area: Rect, model: &Model) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // 検索欄
            Constraint::Min(3),    // テーブル
            Constraint::Length(1), // フッター
        ])
        .split(area);

    render_query_line(f, chunks[0], model);
    render_table(f, chunks[1], model);
    render_footer(f, chunks[2], model);

    if let Some(dialog) = model.table.export_dialog() {
        render_export_dialog(f, area, dialog.request.format, dialog.request.scope);
    }
    if let Some(dialog) = &model.edit {
        edit::view(f, area, dialog, &format!("Edit {}", model.title));
    }
}

fn render_query_line(f: &mut Frame, area: Rect, model: &Model) {
    let focused = Style::default().fg(Color::Yellow);
    let dim = Style::default().fg(Color::DarkGray);

    let mut spans = Vec::new();
    if model.table.has_searchable_columns() {
        let style = if model.focus == Focus::Search { focused } else { dim };
        spans.push(Span::styled(format!(" / {}", model.search_text), style));
        if model.focus == Focus::Search {
            spans.push(Span::styled("_", focused));
        }
    }

    let fields = model.filterable_fields();
    for (i, field) in fields.iter().enumerate() {
        let value = model.table.column_search_value(field);
        let active = model.focus == Focus::ColumnFilter(i);
        if value.is_empty() && !active {
            continue;
        }
        let style = if active { focused } else { dim };
        let cursor = if active { "_" } else { "" };
        spans.push(Span::styled(format!("  {}~{}{}", field, value, cursor), style));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_table(f: &mut Frame, area: Rect, model: &Model) {
    let config = model.table.config();
    let selectable = config.selection_enabled;
    let has_actions = !config.actions.is_empty();

    let mut header: Vec<Cell> = Vec::new();
    let mut widths = Vec::new();
    if selectable {
        header.push(Cell::from(" "));
        widths.push(Constraint::Length(3));
    }
    for column in &config.columns {
        header.push(Cell::from(column.header.clone()));
        widths.push(Constraint::Fill(1));
    }
    if has_actions {
        header.push(Cell::from("Actions"));
        widths.push(Constraint::Length(8));
    }

    let rows: Vec<TableRow> = if model.table.is_loading() {
        (0..SKELETON_ROWS)
            .map(|_| {
                TableRow::new(vec![Cell::from(SKELETON_CELL); header.len()])
                    .style(Style::default().fg(Color::DarkGray))
            })
            .collect()
    } else {
        model
            .table
            .page(model.page)
            .iter()
            .map(|row| {
                let mut cells = Vec::new();
                if selectable {
                    let checked = row
                        .id()
                        .is_some_and(|id| model.table.selection().is_selected(&id));
                    cells.push(Cell::from(if checked { "[x]" } else { "[ ]" }));
                }
                for column in &config.columns {
                    cells.push(Cell::from(row.cell_text(&column.field)));
                }
                if has_actions {
                    let icons: Vec<Span> = config
                        .actions
                        .iter()
                        .map(|a| {
                            Span::styled(
                                format!("{} ", a.icon),
                                Style::default().fg(severity_color(a.severity)),
                            )
                        })
                        .collect();
                    cells.push(Cell::from(Line::from(icons)));
                }
                TableRow::new(cells)
            })
            .collect()
    };

    let title = if model.table.is_loading() {
        format!(" {} (loading...) ", model.title)
    } else {
        format!(
            " {} ({}/{}) ",
            model.title,
            model.table.filtered_rows().len(),
            model.table.display_rows().len()
        )
    };

    let table = Table::new(rows, widths)
        .header(TableRow::new(header).style(Style::default().add_modifier(Modifier::BOLD)))
        .block(Block::default().title(title).borders(Borders::ALL))
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    let mut state = model.state.clone();
    f.render_stateful_widget(table, area, &mut state);
}

fn render_footer(f: &mut Frame, area: Rect, model: &Model) {
    let dim = Style::default().fg(Color::DarkGray);
    let config = model.table.config();

    let position = if config.paginator {
        format!(" page {}/{}", model.page + 1, model.table.page_count())
    } else {
        format!(" {} rows", model.table.page(0).len())
    };
    let mut spans = vec![Span::styled(position, dim)];
    if config.selection_enabled {
        spans.push(Span::styled(
            format!(" · {} selected", model.table.selection().len()),
            dim,
        ));
    }
    if model.table.deleted_count() > 0 {
        spans.push(Span::styled(
            format!(" · {} deleted", model.table.deleted_count()),
            dim,
        ));
    }
    if let Some(action) = config.actions.get(model.action_index) {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("◀ {} {} ▶", action.icon, action.tooltip),
            Style::default()
                .fg(severity_color(action.severity))
                .add_modifier(Modifier::BOLD),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_export_dialog(f: &mut Frame, area: Rect, format: ExportFormat, scope: ExportScope) {
    let dialog_area = centered_rect(60, 7, area);
    f.render_widget(Clear, dialog_area);

    let radio = |on: bool| if on { "(•)" } else { "( )" };
    let lines = vec![
        Line::from(format!(
            " Format: {} {}  {} {}",
            radio(format == ExportFormat::Excel),
            ExportFormat::Excel.label(),
            radio(format == ExportFormat::Csv),
            ExportFormat::Csv.label(),
        )),
        Line::from(format!(
            " Scope:  {} {}  {} {}",
            radio(scope == ExportScope::All),
            ExportScope::All.label(),
            radio(scope == ExportScope::Selection),
            ExportScope::Selection.label(),
        )),
        Line::from(""),
        Line::styled(
            " ←/→: format · ↑/↓: scope · Enter: export · Esc: cancel",
            Style::default().fg(Color::DarkGray),
        ),
    ];

    let content =
        Paragraph::new(lines).block(Block::default().title(" Export ").borders(Borders::ALL));
    f.render_widget(content, dialog_area);
}

#[cfg(test)]
#[path = "table_page_test.rs"]
mod tests;
