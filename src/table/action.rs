//! 行アクションの呼び出し

use super::model::{Row, TableAction};
use super::view::SoftDeleteSet;
use crate::error::{PaydashError, Result};

/// 設定されたアクションを行に対して呼び出す
///
/// コールバックは呼び出しごとにちょうど1回実行され、戻り値はそのまま返す。
/// リトライもエラーの握りつぶしも行わない。
pub struct ActionDispatcher<'a, M> {
    actions: &'a [TableAction<M>],
    deleted: &'a SoftDeleteSet,
}

impl<'a, M> ActionDispatcher<'a, M> {
    pub fn new(actions: &'a [TableAction<M>], deleted: &'a SoftDeleteSet) -> Self {
        Self { actions, deleted }
    }

    /// `index` 番目のアクションを `row` に対して呼び出す
    ///
    /// 論理削除済みの行に対する呼び出しは拒否する。
    pub fn invoke(&self, index: usize, row: &Row) -> Result<M> {
        let action = self
            .actions
            .get(index)
            .ok_or(PaydashError::UnknownAction(index))?;

        if let Some(id) = row.id() {
            if self.deleted.contains(&id) {
                return Err(PaydashError::RowDeleted(id));
            }
        }

        log::debug!("invoking action '{}' on row {:?}", action.tooltip, row.id());
        Ok(action.invoke(row))
    }
}
