//! ダッシュボード（カテゴリ別集計）

use serde::{Deserialize, Serialize};

/// グラフの 1 区分
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSegment {
    pub label: String,
    pub value: u64,
}

/// 全体に占める割合（%）
pub fn share(segments: &[DashboardSegment], segment: &DashboardSegment) -> f64 {
    let total: u64 = segments.iter().map(|s| s.value).sum();
    if total == 0 {
        return 0.0;
    }
    segment.value as f64 * 100.0 / total as f64
}

/// 区分の詳細画面の識別子（ラベルの小文字）
pub fn segment_slug(segment: &DashboardSegment) -> String {
    segment.label.to_lowercase()
}

/// 識別子またはラベルで区分を探す（大文字小文字は区別しない）
pub fn find_segment<'a>(
    segments: &'a [DashboardSegment],
    name: &str,
) -> Option<&'a DashboardSegment> {
    segments.iter().find(|s| s.label.eq_ignore_ascii_case(name.trim()))
}

/// 区分ごとの色相（0..360 を均等に割り当てる）
pub fn segment_hue(index: usize, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    (index as f64 * 360.0) / count as f64
}
