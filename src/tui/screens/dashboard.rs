//! ダッシュボード画面（カテゴリ別の棒グラフ）

use crate::pages::dashboard::{self, DashboardSegment};
use crate::table::dynamic::SKELETON_ROWS;
use crate::tui::common::{hsl_color, SKELETON_CELL};
use crossterm::event::KeyCode;
use ratatui::prelude::*;
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, List, ListItem, ListState, Paragraph};

// ============================================================================
// Model（画面状態）
// ============================================================================

#[derive(Debug, Default)]
pub struct Model {
    /// 読み込み中は None
    pub segments: Option<Vec<DashboardSegment>>,
    pub selected: usize,
    /// 詳細表示中の区分
    pub detail: Option<usize>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&mut self, segments: Vec<DashboardSegment>) {
        self.segments = Some(segments);
        self.selected = 0;
        self.detail = None;
    }

    fn len(&self) -> usize {
        self.segments.as_ref().map_or(0, Vec::len)
    }

    pub fn detail_segment(&self) -> Option<&DashboardSegment> {
        self.segments.as_ref()?.get(self.detail?)
    }
}

// ============================================================================
// Msg（メッセージ）
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Msg {
    Up,
    Down,
    OpenDetail,
    CloseDetail,
}

pub fn key_to_msg(key: KeyCode, model: &Model) -> Option<Msg> {
    if model.detail.is_some() {
        return match key {
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Enter => Some(Msg::CloseDetail),
            _ => None,
        };
    }
    match key {
        KeyCode::Up | KeyCode::Char('k') => Some(Msg::Up),
        KeyCode::Down | KeyCode::Char('j') => Some(Msg::Down),
        KeyCode::Enter => Some(Msg::OpenDetail),
        _ => None,
    }
}

// ============================================================================
// update（状態更新）
// ============================================================================

pub fn update(model: &mut Model, msg: Msg) {
    let len = model.len();
    match msg {
        Msg::Up => model.selected = model.selected.saturating_sub(1),
        Msg::Down => {
            if model.selected + 1 < len {
                model.selected += 1;
            }
        }
        Msg::OpenDetail => {
            if model.selected < len {
                model.detail = Some(model.selected);
            }
        }
        Msg::CloseDetail => model.detail = None,
    }
}

// ============================================================================
// view（描画）
// ============================================================================

pub fn view(f: &mut Frame, area: Rect, model: &Model) {
    let Some(segments) = &model.segments else {
        render_skeleton(f, area);
        return;
    };

    if let Some(segment) = model.detail_segment() {
        render_detail(f, area, segments, segment, model.selected);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(28), Constraint::Min(20)])
        .split(area);

    let items: Vec<ListItem> = segments
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let color = hsl_color(dashboard::segment_hue(i, segments.len()), 0.7, 0.5);
            ListItem::new(Line::from(vec![
                Span::styled("■ ", Style::default().fg(color)),
                Span::raw(format!("{:<14} {:>6}", s.label, s.value)),
            ]))
        })
        .collect();
    let list = List::new(items)
        .block(Block::default().title(" Categories ").borders(Borders::ALL))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut state = ListState::default().with_selected(Some(model.selected));
    f.render_stateful_widget(list, chunks[0], &mut state);

    let bars: Vec<Bar> = segments
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let color = hsl_color(dashboard::segment_hue(i, segments.len()), 0.7, 0.5);
            let style = if i == model.selected {
                Style::default().fg(color).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(color)
            };
            Bar::default()
                .value(s.value)
                .label(Line::from(s.label.chars().take(3).collect::<String>()))
                .style(style)
        })
        .collect();
    let chart = BarChart::default()
        .block(
            Block::default()
                .title(" Sales by category (Enter: detail) ")
                .borders(Borders::ALL),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_width(3)
        .bar_gap(1);
    f.render_widget(chart, chunks[1]);
}

fn render_skeleton(f: &mut Frame, area: Rect) {
    let lines: Vec<Line> = (0..SKELETON_ROWS)
        .map(|_| Line::styled(SKELETON_CELL.repeat(3), Style::default().fg(Color::DarkGray)))
        .collect();
    let content = Paragraph::new(lines).block(
        Block::default()
            .title(" Dashboard (loading...) ")
            .borders(Borders::ALL),
    );
    f.render_widget(content, area);
}

fn render_detail(
    f: &mut Frame,
    area: Rect,
    segments: &[DashboardSegment],
    segment: &DashboardSegment,
    index: usize,
) {
    let color = hsl_color(dashboard::segment_hue(index, segments.len()), 0.7, 0.5);
    let lines = vec![
        Line::styled(
            segment.label.clone(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::from(format!("Value: {}", segment.value)),
        Line::from(format!("Share: {:.1}%", dashboard::share(segments, segment))),
        Line::from(format!("Rank:  {} of {}", index + 1, segments.len())),
        Line::from(""),
        Line::styled("Esc: back", Style::default().fg(Color::DarkGray)),
    ];
    let content = Paragraph::new(lines).block(
        Block::default()
            .title(format!(" dashboard/{} ", dashboard::segment_slug(segment)))
            .borders(Borders::ALL),
    );
    f.render_widget(content, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_model() -> Model {
        let mut model = Model::new();
        model.load(vec![
            DashboardSegment {
                label: "Books".to_string(),
                value: 10,
            },
            DashboardSegment {
                label: "Games".to_string(),
                value: 30,
            },
        ]);
        model
    }

    #[test]
    fn cursor_stays_in_range() {
        let mut model = make_model();
        update(&mut model, Msg::Up);
        assert_eq!(model.selected, 0);

        update(&mut model, Msg::Down);
        update(&mut model, Msg::Down);
        assert_eq!(model.selected, 1);
    }

    #[test]
    fn detail_opens_selected_segment() {
        let mut model = make_model();
        update(&mut model, Msg::Down);
        update(&mut model, Msg::OpenDetail);

        assert_eq!(model.detail_segment().map(|s| s.label.as_str()), Some("Games"));
        assert!(matches!(
            key_to_msg(KeyCode::Esc, &model),
            Some(Msg::CloseDetail)
        ));

        update(&mut model, Msg::CloseDetail);
        assert_eq!(model.detail_segment(), None);
    }

    #[test]
    fn loading_model_ignores_detail() {
        let mut model = Model::new();
        update(&mut model, Msg::OpenDetail);
        assert_eq!(model.detail, None);
    }
}
