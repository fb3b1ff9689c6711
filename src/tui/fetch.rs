//! 画面ごとのデータ取得タスク
//!
//! 取得は tokio タスクで実行し、結果は oneshot チャネルで受け取る。
//! `PendingFetch` を破棄するとタスクは中断され、遅れて届いた応答は捨てられる。

use crate::error::{PaydashError, Result};
use crate::source::{DataSource, Endpoint};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::oneshot::{self, error::TryRecvError};
use tokio::task::JoinHandle;

/// 実行中の取得
pub struct PendingFetch {
    endpoint: Endpoint,
    rx: oneshot::Receiver<Result<Value>>,
    handle: JoinHandle<()>,
}

impl PendingFetch {
    /// 取得タスクを開始する（tokio ランタイム上で呼ぶ）
    pub fn spawn(source: Arc<dyn DataSource>, endpoint: Endpoint) -> Self {
        let (tx, rx) = oneshot::channel();
        let handle = tokio::spawn(async move {
            let result = source.fetch(endpoint).await;
            if tx.send(result).is_err() {
                log::debug!("fetch {endpoint} finished after the page was left");
            }
        });
        log::debug!("fetch {endpoint} started");

        Self {
            endpoint,
            rx,
            handle,
        }
    }

    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    /// 完了していれば結果を取り出す
    pub fn poll(&mut self) -> Option<Result<Value>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Closed) => {
                Some(Err(PaydashError::FetchAborted(self.endpoint.to_string())))
            }
        }
    }
}

impl Drop for PendingFetch {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
