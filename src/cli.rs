use clap::{Parser, Subcommand};

use crate::commands::{browse, export, list, summary};
use crate::config::Settings;

#[derive(Debug, Parser)]
#[command(name = "paydash")]
#[command(about = "Payments admin dashboard CLI", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// データソースの指定（全サブコマンド共通）
#[derive(Debug, Clone, clap::Args)]
pub struct SourceArgs {
    /// Fetch data from this API base URL instead of the built-in mock [env: PAYDASH_API_BASE_URL]
    #[arg(long, global = true, value_name = "URL")]
    pub api_base_url: Option<String>,

    /// Fixed mock latency in milliseconds (default: random 200-399)
    #[arg(long, global = true, value_name = "N")]
    pub latency_ms: Option<u64>,
}

impl SourceArgs {
    /// 設定ファイル < 環境変数 < コマンドライン引数 の順で解決する
    pub fn settings(&self) -> Settings {
        let mut settings = Settings::load()
            .unwrap_or_else(|e| {
                log::warn!("settings ignored: {e}");
                Settings::default()
            })
            .with_env_overrides();
        self.apply(&mut settings);
        settings
    }

    pub fn apply(&self, settings: &mut Settings) {
        if let Some(url) = &self.api_base_url {
            settings.api_base_url = Some(url.clone());
        }
        if let Some(ms) = self.latency_ms {
            settings.mock_latency_ms = Some(ms);
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// 一覧を表示
    List(list::Args),

    /// テーブルを CSV / Excel にエクスポート
    Export(export::Args),

    /// ダッシュボード集計を表示
    Summary(summary::Args),

    /// TUI でダッシュボードを開く
    Browse(browse::Args),
}
