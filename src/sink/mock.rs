//! テスト用モックシンク

use super::*;
use crate::error::PaydashError;
use std::sync::RwLock;

/// 保存されたファイルをメモリに保持するシンク
pub struct MockSink {
    files: RwLock<Vec<ExportFile>>,
    fail: bool,
}

impl MockSink {
    pub fn new() -> Self {
        Self {
            files: RwLock::new(Vec::new()),
            fail: false,
        }
    }

    /// 常に保存に失敗するシンク
    pub fn failing() -> Self {
        Self {
            files: RwLock::new(Vec::new()),
            fail: true,
        }
    }

    /// 保存されたファイル一覧
    pub fn files(&self) -> Vec<ExportFile> {
        self.files.read().unwrap().clone()
    }

    /// 最後に保存されたファイル
    pub fn last(&self) -> Option<ExportFile> {
        self.files.read().unwrap().last().cloned()
    }
}

impl DownloadSink for MockSink {
    fn save(&self, file: &ExportFile) -> Result<()> {
        if self.fail {
            return Err(PaydashError::Io(std::io::Error::other("disk full")));
        }
        self.files.write().unwrap().push(file.clone());
        Ok(())
    }
}
