//! コマンド結果の要約行

use owo_colors::OwoColorize;
use std::fmt;
use std::path::Path;

pub struct CommandSummary {
    pub prefix: String,
    pub message: String,
}

impl CommandSummary {
    /// 一覧表示の件数
    pub fn rows(shown: usize, total: usize) -> Self {
        match (shown, total) {
            (_, 0) => Self {
                prefix: "•".yellow().to_string(),
                message: "No rows available".to_string(),
            },
            (0, _) => Self {
                prefix: "•".yellow().to_string(),
                message: format!("No rows matched ({} total)", total),
            },
            (s, t) => Self {
                prefix: "✓".green().to_string(),
                message: format!("{} of {} row(s) shown", s.green(), t),
            },
        }
    }

    /// エクスポート結果
    pub fn exported(rows: usize, path: &Path) -> Self {
        Self {
            prefix: "✓".green().to_string(),
            message: format!("{} row(s) exported to {}", rows.green(), path.display()),
        }
    }

    /// 警告
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            prefix: "!".yellow().to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for CommandSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.prefix, self.message)
    }
}
