//! TUI (Terminal User Interface)
//!
//! ratatui/crossterm によるダッシュボード。サイドバーで画面を切り替え、
//! 各画面のデータは tokio タスクで取得する。
//!
//! ## モジュール構成
//!
//! - `app`: Model/Page/Screen/Msg/update/view
//! - `fetch`: 画面ごとのデータ取得タスク
//! - `common`: 共通 UI ユーティリティ
//! - `screens`: 各画面の Model/Msg/update/view

mod app;
mod common;
mod fetch;
mod screens;

use crate::config::Settings;
use crate::sink::DirectorySink;
use crate::source::DataSource;
use app::{update, view, Model, Msg};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use fetch::PendingFetch;
use ratatui::prelude::*;
use std::io::{self, stdout, Stdout};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// キー入力を待つ間隔（取得結果の確認もこの間隔で行う）
const TICK: Duration = Duration::from_millis(50);

/// TUI を実行
///
/// tokio ランタイム上（`block_in_place` 内）から呼び出す。
pub fn run(
    settings: Settings,
    settings_path: Option<PathBuf>,
    source: Arc<dyn DataSource>,
    export_dir: PathBuf,
) -> io::Result<()> {
    // ターミナル設定
    terminal::enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;

    let mut model = Model::new(settings, settings_path, DirectorySink::new(export_dir));
    log::info!("tui started with {} data source", source.name());

    let result = event_loop(&mut terminal, &mut model, &source);

    // ターミナルを復元
    terminal::disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    model: &mut Model,
    source: &Arc<dyn DataSource>,
) -> io::Result<()> {
    let mut pending = Some(PendingFetch::spawn(
        Arc::clone(source),
        model.screen.page().endpoint(),
    ));

    // メインループ
    while !model.should_quit {
        if let Some(fetch) = pending.as_mut() {
            if let Some(result) = fetch.poll() {
                let endpoint = fetch.endpoint();
                pending = None;
                update(model, Msg::Loaded(endpoint, result));
            }
        }

        terminal.draw(|f| view(f, model))?;

        if !event::poll(TICK)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if let Some(msg) = model.key_to_msg(key.code) {
                let effect = update(model, msg);
                if let Some(endpoint) = effect.fetch {
                    // 前の画面の取得は破棄（タスクは中断される）
                    pending = Some(PendingFetch::spawn(Arc::clone(source), endpoint));
                }
            }
        }
    }

    Ok(())
}
