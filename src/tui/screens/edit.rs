//! 行の編集ダイアログ
//!
//! 画面ごとに保持する（テーブルは編集状態を持たない）。
//! `id` は読み取り専用。

use crate::table::model::ID_FIELD;
use crate::table::{Column, Row};
use crate::tui::common::centered_rect;
use crossterm::event::KeyCode;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use serde_json::Value;

/// 編集ダイアログの状態
#[derive(Debug, Clone, PartialEq)]
pub struct EditDialog {
    original: Row,
    /// (field, header, 入力値)
    fields: Vec<(String, String, String)>,
    focus: usize,
}

pub enum Msg {
    Up,
    Down,
    Input(char),
    Backspace,
    Save,
    Cancel,
}

/// ダイアログを閉じた結果
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Saved(Row),
    Cancelled,
}

pub fn key_to_msg(key: KeyCode) -> Option<Msg> {
    match key {
        KeyCode::Esc => Some(Msg::Cancel),
        KeyCode::Enter => Some(Msg::Save),
        KeyCode::Up | KeyCode::BackTab => Some(Msg::Up),
        KeyCode::Down | KeyCode::Tab => Some(Msg::Down),
        KeyCode::Backspace => Some(Msg::Backspace),
        KeyCode::Char(c) => Some(Msg::Input(c)),
        _ => None,
    }
}

impl EditDialog {
    /// 編集対象の行と、編集欄にするカラム
    pub fn new(row: Row, columns: &[Column]) -> Self {
        let fields = columns
            .iter()
            .filter(|c| c.field != ID_FIELD)
            .map(|c| (c.field.clone(), c.header.clone(), row.cell_text(&c.field)))
            .collect();
        Self {
            original: row,
            fields,
            focus: 0,
        }
    }

    pub fn original(&self) -> &Row {
        &self.original
    }

    /// 入力値を反映した行（元が数値の欄は数値として読めれば数値のまま）
    pub fn edited_row(&self) -> Row {
        let mut row = self.original.clone();
        for (field, _, text) in &self.fields {
            let value = match self.original.get(field) {
                Some(Value::Number(_)) => text
                    .trim()
                    .parse::<i64>()
                    .map(Value::from)
                    .or_else(|_| text.trim().parse::<f64>().map(Value::from))
                    .unwrap_or_else(|_| Value::String(text.clone())),
                _ => Value::String(text.clone()),
            };
            row.set(field.clone(), value);
        }
        row
    }

    pub fn update(&mut self, msg: Msg) -> Option<Outcome> {
        match msg {
            Msg::Up => {
                self.focus = self.focus.saturating_sub(1);
                None
            }
            Msg::Down => {
                self.focus = (self.focus + 1).min(self.fields.len().saturating_sub(1));
                None
            }
            Msg::Input(c) => {
                if let Some((_, _, value)) = self.fields.get_mut(self.focus) {
                    value.push(c);
                }
                None
            }
            Msg::Backspace => {
                if let Some((_, _, value)) = self.fields.get_mut(self.focus) {
                    value.pop();
                }
                None
            }
            Msg::Save => Some(Outcome::Saved(self.edited_row())),
            Msg::Cancel => Some(Outcome::Cancelled),
        }
    }
}

/// ダイアログを描画
pub fn view(f: &mut Frame, area: Rect, dialog: &EditDialog, title: &str) {
    let height = dialog.fields.len() as u16 + 5;
    let dialog_area = centered_rect(60, height, area);
    f.render_widget(Clear, dialog_area);

    let mut lines = vec![Line::from(vec![
        Span::styled("ID: ", Style::default().fg(Color::DarkGray)),
        Span::raw(dialog.original.cell_text(ID_FIELD)),
    ])];
    for (i, (_, header, value)) in dialog.fields.iter().enumerate() {
        let style = if i == dialog.focus {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let cursor = if i == dialog.focus { "_" } else { "" };
        lines.push(Line::from(vec![
            Span::styled(format!("{:>16}: ", header), style),
            Span::raw(format!("{}{}", value, cursor)),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::styled(
        "↑/↓: field · Enter: save · Esc: cancel",
        Style::default().fg(Color::DarkGray),
    ));

    let content = Paragraph::new(lines).block(
        Block::default()
            .title(format!(" {} ", title))
            .borders(Borders::ALL),
    );
    f.render_widget(content, dialog_area);
}
