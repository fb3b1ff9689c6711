//! ダッシュボード TUI の Elm Architecture ベースのアプリケーション構造
//!
//! - `Model`: アプリケーション全体の状態（設定 + 画面 + ステータス）
//! - `Screen`: アクティブ画面の状態
//! - `Msg`: アプリケーションへのメッセージ
//!
//! データ取得は `tui::event_loop` が持ち、`update` は取得すべき
//! エンドポイントを `AppUpdateEffect` で返すだけ。

use super::common::Status;
use super::screens::{dashboard, returns, table_page};
use crate::config::Settings;
use crate::error::Result;
use crate::pages::dashboard::DashboardSegment;
use crate::pages::returns::ReturnNode;
use crate::sink::DirectorySink;
use crate::source::{self, Endpoint};
use crate::table::Row;
use crossterm::event::KeyCode;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use serde_json::Value;
use std::path::PathBuf;

// ============================================================================
// Page（サイドバーの項目）
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Dashboard,
    Payments,
    Chargebacks,
    Returns,
}

impl Page {
    pub fn all() -> &'static [Page] {
        &[
            Page::Dashboard,
            Page::Payments,
            Page::Chargebacks,
            Page::Returns,
        ]
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Payments => "Payments",
            Page::Chargebacks => "Chargebacks",
            Page::Returns => "Returns",
        }
    }

    /// 折りたたみ時に表示するアイコン
    pub fn icon(&self) -> &'static str {
        match self {
            Page::Dashboard => "▤",
            Page::Payments => "$",
            Page::Chargebacks => "⚠",
            Page::Returns => "↺",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Page::Dashboard => 0,
            Page::Payments => 1,
            Page::Chargebacks => 2,
            Page::Returns => 3,
        }
    }

    pub fn from_index(index: usize) -> Self {
        match index % 4 {
            0 => Page::Dashboard,
            1 => Page::Payments,
            2 => Page::Chargebacks,
            _ => Page::Returns,
        }
    }

    pub fn next(&self) -> Self {
        Self::from_index(self.index() + 1)
    }

    pub fn prev(&self) -> Self {
        Self::from_index(self.index() + 3)
    }

    pub fn endpoint(&self) -> Endpoint {
        match self {
            Page::Dashboard => Endpoint::Dashboard,
            Page::Payments => Endpoint::Payments,
            Page::Chargebacks => Endpoint::Chargebacks,
            Page::Returns => Endpoint::Returns,
        }
    }
}

// ============================================================================
// Screen（アクティブ画面の状態）
// ============================================================================

pub enum Screen {
    Dashboard(dashboard::Model),
    Payments(table_page::Model),
    Chargebacks(table_page::Model),
    Returns(returns::Model),
}

impl Screen {
    /// 読み込み中の画面を生成
    pub fn loading(page: Page) -> Self {
        match page {
            Page::Dashboard => Screen::Dashboard(dashboard::Model::new()),
            Page::Payments => Screen::Payments(table_page::Model::payments()),
            Page::Chargebacks => Screen::Chargebacks(table_page::Model::chargebacks()),
            Page::Returns => Screen::Returns(returns::Model::new()),
        }
    }

    pub fn page(&self) -> Page {
        match self {
            Screen::Dashboard(_) => Page::Dashboard,
            Screen::Payments(_) => Page::Payments,
            Screen::Chargebacks(_) => Page::Chargebacks,
            Screen::Returns(_) => Page::Returns,
        }
    }

    /// 文字入力中（グローバルキーを画面に渡すべき）かどうか
    pub fn captures_input(&self) -> bool {
        match self {
            Screen::Dashboard(_) => false,
            Screen::Payments(m) | Screen::Chargebacks(m) => m.captures_input(),
            Screen::Returns(m) => m.captures_input(),
        }
    }

    /// 取得した JSON を画面に反映する
    pub fn apply_data(&mut self, value: Value) -> Result<()> {
        let endpoint = self.page().endpoint();
        match self {
            Screen::Dashboard(m) => m.load(source::decode::<Vec<DashboardSegment>>(endpoint, value)?),
            Screen::Payments(m) | Screen::Chargebacks(m) => {
                m.load(source::decode::<Vec<Row>>(endpoint, value)?)
            }
            Screen::Returns(m) => m.load(source::decode::<Vec<ReturnNode>>(endpoint, value)?),
        }
        Ok(())
    }
}

// ============================================================================
// Model（アプリケーション全体の状態）
// ============================================================================

pub struct Model {
    pub screen: Screen,
    pub settings: Settings,
    settings_path: Option<PathBuf>,
    pub sink: DirectorySink,
    pub status: Option<Status>,
    pub should_quit: bool,
}

impl Model {
    pub fn new(settings: Settings, settings_path: Option<PathBuf>, sink: DirectorySink) -> Self {
        Self {
            screen: Screen::loading(Page::default()),
            settings,
            settings_path,
            sink,
            status: None,
            should_quit: false,
        }
    }

    /// キー入力をメッセージに変換
    pub fn key_to_msg(&self, key: KeyCode) -> Option<Msg> {
        if !self.screen.captures_input() {
            match key {
                KeyCode::Char('q') => return Some(Msg::Quit),
                KeyCode::Tab => return Some(Msg::NextPage),
                KeyCode::BackTab => return Some(Msg::PrevPage),
                KeyCode::Char('b') => return Some(Msg::ToggleSidebar),
                KeyCode::Char(c @ '1'..='4') => {
                    let index = c as usize - '1' as usize;
                    return Some(Msg::GoTo(Page::from_index(index)));
                }
                _ => {}
            }
        }

        match &self.screen {
            Screen::Dashboard(m) => dashboard::key_to_msg(key, m).map(Msg::Dashboard),
            Screen::Payments(m) | Screen::Chargebacks(m) => {
                table_page::key_to_msg(key, m).map(Msg::Table)
            }
            Screen::Returns(m) => returns::key_to_msg(key, m).map(Msg::Returns),
        }
    }
}

// ============================================================================
// Msg（メッセージ）
// ============================================================================

pub enum Msg {
    Quit,
    NextPage,
    PrevPage,
    GoTo(Page),
    ToggleSidebar,
    /// データ取得の完了
    Loaded(Endpoint, Result<Value>),
    Dashboard(dashboard::Msg),
    Table(table_page::Msg),
    Returns(returns::Msg),
}

// ============================================================================
// update（状態更新）
// ============================================================================

/// app::update() の戻り値
#[derive(Debug, Default, PartialEq, Eq)]
pub struct AppUpdateEffect {
    /// 新しく取得を始めるべきエンドポイント
    pub fetch: Option<Endpoint>,
}

impl AppUpdateEffect {
    fn none() -> Self {
        Self::default()
    }
}

/// メッセージに応じて状態を更新
pub fn update(model: &mut Model, msg: Msg) -> AppUpdateEffect {
    match msg {
        Msg::Quit => {
            model.should_quit = true;
            AppUpdateEffect::none()
        }
        Msg::NextPage => switch_page(model, model.screen.page().next()),
        Msg::PrevPage => switch_page(model, model.screen.page().prev()),
        Msg::GoTo(page) => switch_page(model, page),
        Msg::ToggleSidebar => {
            let collapsed = model.settings.toggle_sidebar();
            // model.settings はコマンドライン・環境変数の上書きを含むため、保存はファイル側のみ
            if let Some(path) = &model.settings_path {
                if let Err(e) = Settings::persist_sidebar(path, collapsed) {
                    log::warn!("failed to save settings: {e}");
                    model.status = Some(Status::error(format!("Failed to save settings: {e}")));
                }
            }
            log::debug!("sidebar collapsed: {collapsed}");
            AppUpdateEffect::none()
        }
        Msg::Loaded(endpoint, result) => {
            // 画面を離れた後に届いた結果は捨てる
            if endpoint != model.screen.page().endpoint() {
                log::debug!("dropping stale response for {endpoint}");
                return AppUpdateEffect::none();
            }
            match result.and_then(|value| model.screen.apply_data(value)) {
                Ok(()) => {
                    log::info!("loaded {endpoint}");
                    model.status = None;
                }
                Err(e) => {
                    log::error!("failed to load {endpoint}: {e}");
                    model.status = Some(Status::error(format!("Failed to load {endpoint}: {e}")));
                }
            }
            AppUpdateEffect::none()
        }
        Msg::Dashboard(msg) => {
            if let Screen::Dashboard(m) = &mut model.screen {
                dashboard::update(m, msg);
            }
            AppUpdateEffect::none()
        }
        Msg::Table(msg) => {
            if let Screen::Payments(m) | Screen::Chargebacks(m) = &mut model.screen {
                if let Some(status) = table_page::update(m, msg, &model.sink) {
                    model.status = Some(status);
                }
            }
            AppUpdateEffect::none()
        }
        Msg::Returns(msg) => {
            if let Screen::Returns(m) = &mut model.screen {
                if let Some(status) = returns::update(m, msg) {
                    model.status = Some(status);
                }
            }
            AppUpdateEffect::none()
        }
    }
}

/// 画面を切り替え、新しい画面のデータ取得を要求する
fn switch_page(model: &mut Model, page: Page) -> AppUpdateEffect {
    if model.screen.page() == page {
        return AppUpdateEffect::none();
    }
    model.screen = Screen::loading(page);
    model.status = None;
    AppUpdateEffect {
        fetch: Some(page.endpoint()),
    }
}

// ============================================================================
// view（描画）
// ============================================================================

pub fn view(f: &mut Frame, model: &Model) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(f.area());

    let sidebar_width = if model.settings.sidebar_collapsed { 5 } else { 18 };
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(sidebar_width), Constraint::Min(20)])
        .split(rows[0]);

    render_sidebar(f, model, columns[0]);

    let content = columns[1];
    match &model.screen {
        Screen::Dashboard(m) => dashboard::view(f, content, m),
        Screen::Payments(m) | Screen::Chargebacks(m) => table_page::view(f, content, m),
        Screen::Returns(m) => returns::view(f, content, m),
    }

    if let Some(status) = &model.status {
        f.render_widget(
            Paragraph::new(format!(" {}", status.text)).style(status.style()),
            rows[1],
        );
    }

    let help = Paragraph::new(" Tab/1-4: page · b: sidebar · q: quit")
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, rows[2]);
}

fn render_sidebar(f: &mut Frame, model: &Model, area: Rect) {
    let collapsed = model.settings.sidebar_collapsed;
    let items: Vec<ListItem> = Page::all()
        .iter()
        .map(|page| {
            let text = if collapsed {
                page.icon().to_string()
            } else {
                format!("{} {}", page.icon(), page.title())
            };
            ListItem::new(text)
        })
        .collect();

    let title = if collapsed { "" } else { " paydash " };
    let list = List::new(items)
        .block(Block::default().title(title).borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        );
    let mut state = ListState::default().with_selected(Some(model.screen.page().index()));
    f.render_stateful_widget(list, area, &mut state);
}

#[cfg(test)]
#[path = "app_test.rs"]
mod tests;
