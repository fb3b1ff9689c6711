//! 環境変数

/// API のベース URL（設定すると HTTP データソースを使う）
pub const API_BASE_URL: &str = "PAYDASH_API_BASE_URL";
/// ログレベル（error|warn|info|debug|trace）
pub const LOG_LEVEL: &str = "PAYDASH_LOG";

/// 環境変数ユーティリティ
pub struct EnvVar;

impl EnvVar {
    /// 環境変数を取得（空文字列はNoneとして扱う）
    pub fn get(key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|s| !s.trim().is_empty())
    }

    /// ログレベル（未設定や不正値は info）
    pub fn log_level() -> log::LevelFilter {
        Self::get(LOG_LEVEL)
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(log::LevelFilter::Info)
    }
}

#[cfg(test)]
#[path = "env_test.rs"]
mod tests;
