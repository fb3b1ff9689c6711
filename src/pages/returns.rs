//! 返品画面（ツリーテーブル）
//!
//! 親ノードが返品、子ノードが返品明細。削除と編集は親ノード単位で
//! ローカルにのみ反映する。

use crate::table::{Column, Row, RowId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// ツリーのノード
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnNode {
    pub data: Row,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ReturnNode>,
}

impl ReturnNode {
    pub fn leaf(data: Row) -> Self {
        Self {
            data,
            children: Vec::new(),
        }
    }
}

/// 固定カラム
pub fn columns() -> Vec<Column> {
    [
        ("id", "ID"),
        ("date", "Date"),
        ("customer", "Customer"),
        ("totalAmount", "Amount"),
        ("status", "Status"),
        ("reason", "Reason"),
        ("refundMethod", "Refund Method"),
    ]
    .into_iter()
    .map(|(field, header)| Column::new(field, header))
    .collect()
}

/// 画面に表示する 1 行
#[derive(Debug, Clone, PartialEq)]
pub struct TreeRow<'a> {
    pub row: &'a Row,
    pub depth: usize,
    pub has_children: bool,
    pub expanded: bool,
}

/// 返品ツリーの状態
#[derive(Debug, Clone, Default)]
pub struct ReturnTree {
    nodes: Vec<ReturnNode>,
    expanded: HashSet<RowId>,
}

impl ReturnTree {
    pub fn new(nodes: Vec<ReturnNode>) -> Self {
        Self {
            nodes,
            expanded: HashSet::new(),
        }
    }

    pub fn nodes(&self) -> &[ReturnNode] {
        &self.nodes
    }

    pub fn is_expanded(&self, id: &RowId) -> bool {
        self.expanded.contains(id)
    }

    /// 親ノードの展開状態を反転（子を持たないノードは無視）
    pub fn toggle_expanded(&mut self, id: &RowId) -> bool {
        let has_children = self
            .nodes
            .iter()
            .any(|n| n.data.has_id(id) && !n.children.is_empty());
        if !has_children {
            return false;
        }
        if !self.expanded.remove(id) {
            self.expanded.insert(id.clone());
        }
        true
    }

    pub fn expand_all(&mut self) {
        self.expanded = self.nodes.iter().filter_map(|n| n.data.id()).collect();
    }

    /// 親ノードを削除する（存在しない ID は無視）
    pub fn delete(&mut self, id: &RowId) -> bool {
        let before = self.nodes.len();
        self.nodes.retain(|n| !n.data.has_id(id));
        self.expanded.remove(id);
        let removed = self.nodes.len() != before;
        if removed {
            log::info!("return {id} deleted locally");
        }
        removed
    }

    /// 同じ ID の親ノードのデータを置き換える
    pub fn update(&mut self, row: Row) -> bool {
        let Some(id) = row.id() else {
            return false;
        };
        match self.nodes.iter_mut().find(|n| n.data.has_id(&id)) {
            Some(node) => {
                node.data = row;
                log::info!("return {id} updated locally");
                true
            }
            None => false,
        }
    }

    /// 展開状態を反映した表示行
    pub fn visible_rows(&self) -> Vec<TreeRow<'_>> {
        let mut rows = Vec::new();
        for node in &self.nodes {
            let expanded = node.data.id().is_some_and(|id| self.is_expanded(&id));
            rows.push(TreeRow {
                row: &node.data,
                depth: 0,
                has_children: !node.children.is_empty(),
                expanded,
            });
            if expanded {
                rows.extend(node.children.iter().map(|child| TreeRow {
                    row: &child.data,
                    depth: 1,
                    has_children: false,
                    expanded: false,
                }));
            }
        }
        rows
    }
}
