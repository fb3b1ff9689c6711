//! paydash browse コマンド
//!
//! TUI でダッシュボードを開く。

use crate::config::Settings;
use crate::source;
use crate::tui;
use clap::Parser;
use std::sync::Arc;

#[derive(Debug, Parser)]
pub struct Args {
    /// Directory for exported files
    #[arg(long, short, default_value = ".")]
    pub output: std::path::PathBuf,
}

pub async fn run(args: Args, settings: Settings) -> Result<(), String> {
    let source: Arc<dyn source::DataSource> = Arc::from(source::from_settings(&settings));
    let settings_path = Settings::default_path().ok();

    // 端末イベントの待機はブロッキングのため、ランタイムのワーカーを明け渡して実行する
    tokio::task::block_in_place(|| tui::run(settings, settings_path, source, args.output))
        .map_err(|e| e.to_string())
}
