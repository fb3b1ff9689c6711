//! 共通 UI ユーティリティ

use crate::table::Severity;
use ratatui::prelude::*;

/// 読み込み中のセル
pub const SKELETON_CELL: &str = "░░░░░░░░";

/// ステータス行に表示するメッセージ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub text: String,
    pub is_error: bool,
}

impl Status {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }

    pub fn style(&self) -> Style {
        if self.is_error {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::Green)
        }
    }
}

/// 領域の中央に配置したダイアログ領域
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// アクションの重要度に対応する色
pub fn severity_color(severity: Option<Severity>) -> Color {
    match severity {
        Some(Severity::Success) => Color::Green,
        Some(Severity::Info) => Color::Cyan,
        Some(Severity::Warn) => Color::Yellow,
        Some(Severity::Danger) => Color::Red,
        Some(Severity::Secondary) => Color::Gray,
        Some(Severity::Contrast) => Color::White,
        None => Color::Reset,
    }
}

/// HSL（h: 0..360, s/l: 0..1）を RGB に変換
pub fn hsl_color(h: f64, s: f64, l: f64) -> Color {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let hp = (h.rem_euclid(360.0)) / 60.0;
    let x = c * (1.0 - (hp % 2.0 - 1.0).abs());
    let (r, g, b) = match hp as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = l - c / 2.0;
    let to_u8 = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    Color::Rgb(to_u8(r), to_u8(g), to_u8(b))
}
