//! 返品画面（ツリーテーブル）

use super::edit::{self, EditDialog, Outcome};
use crate::pages::returns::{self, ReturnNode, ReturnTree};
use crate::table::dynamic::SKELETON_ROWS;
use crate::table::Row;
use crate::tui::common::{Status, SKELETON_CELL};
use crossterm::event::KeyCode;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row as TableRow, Table, TableState};

// ============================================================================
// Model（画面状態）
// ============================================================================

#[derive(Default)]
pub struct Model {
    /// 読み込み中は None
    pub tree: Option<ReturnTree>,
    pub state: TableState,
    pub edit: Option<EditDialog>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&mut self, nodes: Vec<ReturnNode>) {
        self.tree = Some(ReturnTree::new(nodes));
        self.state.select(Some(0));
        self.clamp();
    }

    pub fn captures_input(&self) -> bool {
        self.edit.is_some()
    }

    /// カーソル位置の行と、それが親ノードかどうか
    fn current(&self) -> Option<(Row, bool)> {
        let tree = self.tree.as_ref()?;
        let rows = tree.visible_rows();
        let row = rows.get(self.state.selected()?)?;
        Some((row.row.clone(), row.depth == 0))
    }

    fn clamp(&mut self) {
        let len = self
            .tree
            .as_ref()
            .map_or(0, |t| t.visible_rows().len());
        let selected = match self.state.selected() {
            _ if len == 0 => None,
            Some(i) => Some(i.min(len - 1)),
            None => Some(0),
        };
        self.state.select(selected);
    }
}

// ============================================================================
// Msg（メッセージ）
// ============================================================================

pub enum Msg {
    Up,
    Down,
    Toggle,
    Edit,
    Delete,
    Dialog(edit::Msg),
}

pub fn key_to_msg(key: KeyCode, model: &Model) -> Option<Msg> {
    if model.edit.is_some() {
        return edit::key_to_msg(key).map(Msg::Dialog);
    }
    match key {
        KeyCode::Up | KeyCode::Char('k') => Some(Msg::Up),
        KeyCode::Down | KeyCode::Char('j') => Some(Msg::Down),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Msg::Toggle),
        KeyCode::Char('e') => Some(Msg::Edit),
        KeyCode::Char('d') => Some(Msg::Delete),
        _ => None,
    }
}

// ============================================================================
// update（状態更新）
// ============================================================================

pub fn update(model: &mut Model, msg: Msg) -> Option<Status> {
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
        Msg::Toggle => {
            let (row, _) = model.current()?;
            let id = row.id()?;
            model.tree.as_mut()?.toggle_expanded(&id);
            model.clamp();
            None
        }
        Msg::Edit => {
            let (row, is_parent) = model.current()?;
            if !is_parent {
                return Some(Status::error("Only returns can be edited, not their items"));
            }
            model.edit = Some(EditDialog::new(row, &returns::columns()));
            None
        }
        Msg::Delete => {
            let (row, is_parent) = model.current()?;
            if !is_parent {
                return Some(Status::error("Only returns can be deleted, not their items"));
            }
            let id = row.id()?;
            model.tree.as_mut()?.delete(&id);
            model.clamp();
            Some(Status::info(format!("Deleted {id}")))
        }
        Msg::Dialog(msg) => {
            let outcome = model.edit.as_mut()?.update(msg)?;
            model.edit = None;
            match outcome {
                Outcome::Saved(row) => {
                    let label = row.cell_text("id");
                    model.tree.as_mut()?.update(row);
                    Some(Status::info(format!("Saved {label}")))
                }
                Outcome::Cancelled => None,
            }
        }
    }
}

// ============================================================================
// view（描画）
// ============================================================================

pub fn view(f: &mut Frame, area: Rect, model: &Model) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    let columns = returns::columns();
    let header = TableRow::new(columns.iter().map(|c| Cell::from(c.header.clone())))
        .style(Style::default().add_modifier(Modifier::BOLD));
    let widths = vec![Constraint::Fill(1); columns.len()];

    let (rows, title): (Vec<TableRow>, String) = match &model.tree {
        None => (
            (0..SKELETON_ROWS)
                .map(|_| {
                    TableRow::new(vec![Cell::from(SKELETON_CELL); columns.len()])
                        .style(Style::default().fg(Color::DarkGray))
                })
                .collect(),
            " Returns (loading...) ".to_string(),
        ),
        Some(tree) => {
            let rows = tree
                .visible_rows()
                .into_iter()
                .map(|r| {
                    let marker = match (r.depth, r.has_children, r.expanded) {
                        (0, true, true) => "▾ ",
                        (0, true, false) => "▸ ",
                        (0, false, _) => "  ",
                        _ => "  └ ",
                    };
                    let style = if r.depth > 0 {
                        Style::default().fg(Color::Gray)
                    } else {
                        Style::default()
                    };
                    TableRow::new(columns.iter().enumerate().map(|(i, c)| {
                        let text = r.row.cell_text(&c.field);
                        Cell::from(if i == 0 { format!("{marker}{text}") } else { text })
                    }))
                    .style(style)
                })
                .collect();
            (rows, format!(" Returns ({}) ", tree.nodes().len()))
        }
    };

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().title(title).borders(Borders::ALL))
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    let mut state = model.state.clone();
    f.render_stateful_widget(table, chunks[0], &mut state);

    let help = Paragraph::new(" Enter: expand · e: edit · d: delete")
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, chunks[1]);

    if let Some(dialog) = &model.edit {
        edit::view(f, area, dialog, "Edit return");
    }
}
