//! 設定（~/.paydash/settings.json）
//!
//! 永続化するのはサイドバーの折りたたみ状態と、データソースの接続先・待ち時間のみ。

use crate::env::{self, EnvVar};
use crate::error::{PaydashError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// 設定ディレクトリ名
const DIR_NAME: &str = ".paydash";
/// 設定ファイル名
const FILE_NAME: &str = "settings.json";

/// ~/.paydash
pub fn paydash_dir() -> Result<PathBuf> {
    let home = EnvVar::get("HOME")
        .ok_or_else(|| PaydashError::Settings("HOME environment variable not set".to_string()))?;
    Ok(PathBuf::from(home).join(DIR_NAME))
}

/// 設定
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// サイドバーを折りたたむか
    pub sidebar_collapsed: bool,
    /// API のベース URL（未設定ならモック）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base_url: Option<String>,
    /// モックの待ち時間（ミリ秒、未設定ならランダム）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mock_latency_ms: Option<u64>,
}

impl Settings {
    /// Load from default path (~/.paydash/settings.json)
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path()?)
    }

    pub fn default_path() -> Result<PathBuf> {
        Ok(paydash_dir()?.join(FILE_NAME))
    }

    /// ファイルが無ければデフォルト値
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            PaydashError::Settings(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::debug!("settings saved to {}", path.display());
        Ok(())
    }

    /// ファイル上の設定のサイドバー状態だけを書き換える
    ///
    /// 他の項目はファイルの内容のまま保存する。
    pub fn persist_sidebar(path: &Path, collapsed: bool) -> Result<()> {
        let mut stored = Self::load_from(path)?;
        stored.sidebar_collapsed = collapsed;
        stored.save_to(path)
    }

    /// 環境変数で上書きする
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(url) = EnvVar::get(env::API_BASE_URL) {
            self.api_base_url = Some(url);
        }
        self
    }

    /// モックの待ち時間（`None` はランダム）
    pub fn mock_latency(&self) -> Option<Duration> {
        self.mock_latency_ms.map(Duration::from_millis)
    }

    /// サイドバーの折りたたみ状態を反転し、新しい状態を返す
    pub fn toggle_sidebar(&mut self) -> bool {
        self.sidebar_collapsed = !self.sidebar_collapsed;
        self.sidebar_collapsed
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
