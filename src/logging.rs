//! ファイルロガー
//!
//! TUI 実行中は端末が raw モードになるため、ログは ~/.paydash/paydash.log に追記する。

use crate::config::paydash_dir;
use crate::env::EnvVar;
use simplelog::{Config, WriteLogger};
use std::fs::OpenOptions;
use std::path::PathBuf;

const LOG_FILE: &str = "paydash.log";

/// ロガーを初期化する
///
/// ログファイルを開けない場合はログを出さずに続行する。
pub fn init() -> Option<PathBuf> {
    let path = paydash_dir().ok()?.join(LOG_FILE);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).ok()?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .ok()?;

    WriteLogger::init(EnvVar::log_level(), Config::default(), file).ok()?;
    log::debug!("logging to {}", path.display());
    Some(path)
}
