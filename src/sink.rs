//! ダウンロード先の抽象化
//!
//! エクスポート処理はファイル名・MIME タイプ・バイト列を生成するだけで、
//! 保存はシンクに委譲する。テスト時は MockSink を注入する。

use crate::error::Result;
use crate::table::ExportFile;
use std::fs;
use std::path::PathBuf;

/// ダウンロード先
pub trait DownloadSink {
    /// ファイルを保存する
    fn save(&self, file: &ExportFile) -> Result<()>;
}

/// 指定ディレクトリにファイルを書き出すシンク
///
/// 同名ファイルは上書きする。
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// 保存先のパス
    pub fn path_for(&self, filename: &str) -> PathBuf {
        self.dir.join(filename)
    }
}

impl DownloadSink for DirectorySink {
    fn save(&self, file: &ExportFile) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(&file.filename);
        fs::write(&path, &file.bytes)?;
        log::info!(
            "saved {} ({}, {} bytes)",
            path.display(),
            file.mime_type,
            file.bytes.len()
        );
        Ok(())
    }
}

#[cfg(test)]
pub mod mock;
