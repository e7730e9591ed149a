//! Gantt panel: a date header built from the layout axis and one bar per
//! task placed from its percentage position.
//!
//! Bars are coloured from the mapping's colour map when the task's colour
//! field has an entry there, otherwise by progress.

use gantry_core::{FieldMapping, Layout, NormalizedTask, PositionResult, TimelineAxis, resolve_color};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::zoom::Zoom;

/// Cell for the completed part of a bar
const FILLED_CELL: char = '\u{2588}';

/// Cell for the remaining part of a bar with progress
const REMAINING_CELL: char = '\u{2592}';

/// Rows used by the date header and separator
pub const HEADER_ROWS: usize = 2;

/// Maps layout percentages onto terminal columns.
///
/// The zoomed timeline is `virtual_width` columns wide; `scroll` columns of
/// it are hidden to the left of the visible `bar_width`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    bar_width: usize,
    virtual_width: usize,
    scroll: usize,
}

impl Viewport {
    /// `horizontal_offset` is a percentage (0-100) of the hidden overflow.
    pub fn new(bar_width: u16, zoom: Zoom, horizontal_offset: u16) -> Self {
        let bar_width = bar_width as usize;
        let virtual_width = (bar_width as f64 * zoom.factor()).round() as usize;
        let overflow = virtual_width.saturating_sub(bar_width);
        let scroll = overflow * horizontal_offset.min(100) as usize / 100;
        Self {
            bar_width,
            virtual_width,
            scroll,
        }
    }

    pub fn bar_width(&self) -> usize {
        self.bar_width
    }

    /// Visible column (possibly negative or past the edge) for a percentage.
    fn column(&self, percent: f64) -> f64 {
        percent / 100.0 * self.virtual_width as f64 - self.scroll as f64
    }

    /// Visible cells `[start, end)` of a bar, or `None` when the position
    /// is not renderable or lies entirely outside the view.
    pub fn bar_cells(&self, pos: &PositionResult) -> Option<(usize, usize)> {
        if !pos.is_renderable() || self.bar_width == 0 {
            return None;
        }
        let width = self.bar_width as f64;
        let start = self.column(pos.left).floor();
        let end = self.column(pos.right()).ceil().max(start + 1.0);
        if end <= 0.0 || start >= width {
            return None;
        }
        Some((start.max(0.0) as usize, end.min(width) as usize))
    }
}

/// Parse a colour token: a name (`red`, `lightblue`), `#rrggbb`, or an
/// indexed colour number.
pub fn parse_color(token: &str) -> Option<Color> {
    token.trim().parse::<Color>().ok()
}

/// Fallback colour when the colour map has nothing for a task.
fn progress_color(progress: Option<f64>) -> Color {
    match progress {
        None => Color::Cyan,
        Some(p) if p >= 100.0 => Color::Green,
        Some(p) if p > 0.0 => Color::Yellow,
        Some(_) => Color::DarkGray,
    }
}

/// Colour for a task's bar.
pub fn bar_color(task: &NormalizedTask, mapping: &FieldMapping) -> Color {
    resolve_color(task, mapping)
        .and_then(parse_color)
        .unwrap_or_else(|| progress_color(task.progress))
}

/// Date labels placed at their day's column, skipping any that would
/// overlap the previous label.
fn header_text(axis: &TimelineAxis, viewport: &Viewport) -> String {
    let width = viewport.bar_width();
    let mut chars = vec![' '; width];
    let last_index = axis.len().saturating_sub(1).max(1) as f64;
    let mut next_free = 0usize;

    for (i, date) in axis.iter().enumerate() {
        let col = viewport.column(i as f64 / last_index * 100.0).round();
        if col < 0.0 {
            continue;
        }
        let col = col as usize;
        let label = date.format("%m/%d").to_string();
        if col < next_free || col + label.len() > width {
            continue;
        }
        for (offset, c) in label.chars().enumerate() {
            chars[col + offset] = c;
        }
        next_free = col + label.len() + 1;
    }

    chars.into_iter().collect()
}

/// Separator under the header, with a tick at every visible day.
fn separator_text(axis: &TimelineAxis, viewport: &Viewport) -> String {
    let width = viewport.bar_width();
    let mut chars = vec!['\u{2500}'; width];
    let last_index = axis.len().saturating_sub(1).max(1) as f64;

    for i in 0..axis.len() {
        let col = viewport.column(i as f64 / last_index * 100.0).round();
        if col >= 0.0 && (col as usize) < width {
            chars[col as usize] = '\u{252C}';
        }
    }

    chars.into_iter().collect()
}

fn build_date_header(axis: &TimelineAxis, viewport: &Viewport) -> Line<'static> {
    Line::from(Span::styled(
        header_text(axis, viewport),
        Style::default().fg(Color::DarkGray),
    ))
}

fn build_separator(axis: &TimelineAxis, viewport: &Viewport) -> Line<'static> {
    Line::from(Span::styled(
        separator_text(axis, viewport),
        Style::default().fg(Color::DarkGray),
    ))
}

/// Build one bar row.
///
/// With progress, the first `progress%` of the bar is solid and the rest
/// shaded. Rows whose position cannot be drawn show `(no dates)`.
fn build_task_line(
    task: &NormalizedTask,
    pos: &PositionResult,
    color: Color,
    viewport: &Viewport,
    is_selected: bool,
) -> Line<'static> {
    let width = viewport.bar_width();

    if !pos.is_renderable() {
        return Line::from(Span::styled(
            format!("{:<width$}", "(no dates)", width = width),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let Some((start, end)) = viewport.bar_cells(pos) else {
        return Line::from(" ".repeat(width));
    };

    let len = end - start;
    let filled = match task.progress {
        Some(p) => ((len as f64) * p.clamp(0.0, 100.0) / 100.0).round() as usize,
        None => len,
    };

    let bar_style = if is_selected {
        Style::default()
            .fg(color)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    } else {
        Style::default().fg(color)
    };

    let mut spans = Vec::with_capacity(4);
    if start > 0 {
        spans.push(Span::raw(" ".repeat(start)));
    }
    if filled > 0 {
        spans.push(Span::styled(
            FILLED_CELL.to_string().repeat(filled),
            bar_style,
        ));
    }
    if len > filled {
        spans.push(Span::styled(
            REMAINING_CELL.to_string().repeat(len - filled),
            bar_style,
        ));
    }
    if end < width {
        spans.push(Span::raw(" ".repeat(width - end)));
    }

    Line::from(spans)
}

/// Panel title naming the axis range and zoom.
fn panel_title(axis: &TimelineAxis, zoom: Zoom) -> String {
    match (axis.first(), axis.last()) {
        (Some(first), Some(last)) => format!(
            " Timeline {} .. {}  zoom {}% ",
            first.format("%Y-%m-%d"),
            last.format("%Y-%m-%d"),
            zoom.percent()
        ),
        _ => format!(" Timeline  zoom {}% ", zoom.percent()),
    }
}

/// Vertical/horizontal view state for the Gantt panel.
#[derive(Debug, Clone, Copy, Default)]
pub struct GanttViewState {
    /// First task row shown.
    pub scroll_offset: usize,
    /// Horizontal scroll offset (0-100 percentage).
    pub horizontal_offset: u16,
    /// Index of the selected task for highlighting.
    pub selected_index: usize,
    pub zoom: Zoom,
}

/// Render the Gantt panel.
pub fn render_gantt_panel(
    frame: &mut Frame,
    area: Rect,
    layout: &Layout,
    mapping: &FieldMapping,
    state: GanttViewState,
) {
    let block = Block::default()
        .title(panel_title(layout.axis(), state.zoom))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if layout.is_empty() {
        let paragraph = Paragraph::new("No tasks found")
            .block(block)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(paragraph, area);
        return;
    }

    let viewport = Viewport::new(area.width.saturating_sub(2), state.zoom, state.horizontal_offset);

    let mut lines = Vec::with_capacity(layout.len() + HEADER_ROWS);
    if layout.axis().is_empty() {
        lines.push(Line::from(Span::styled(
            "Timeline unavailable: some tasks have invalid dates",
            Style::default().fg(Color::Red),
        )));
        lines.push(Line::from(""));
    } else {
        lines.push(build_date_header(layout.axis(), &viewport));
        lines.push(build_separator(layout.axis(), &viewport));
    }

    for (index, (task, pos)) in layout.rows().enumerate().skip(state.scroll_offset) {
        lines.push(build_task_line(
            task,
            pos,
            bar_color(task, mapping),
            &viewport,
            index == state.selected_index,
        ));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use gantry_core::{RawRecord, SequentialIdGenerator};

    fn layout_of(records: &[RawRecord]) -> Layout {
        let mut ids = SequentialIdGenerator::default();
        Layout::compute(records, &FieldMapping::default(), &mut ids)
    }

    fn record(name: &str, start: &str, end: &str) -> RawRecord {
        RawRecord::new()
            .with("name", name)
            .with("startDate", start)
            .with("endDate", end)
    }

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.to_string()).collect()
    }

    fn pos(left: f64, width: f64) -> PositionResult {
        PositionResult { left, width }
    }

    #[test]
    fn test_viewport_unzoomed_has_no_scroll() {
        let viewport = Viewport::new(100, Zoom::default(), 50);
        assert_eq!(viewport.bar_cells(&pos(10.0, 20.0)), Some((10, 30)));
    }

    #[test]
    fn test_viewport_zoom_widens_bars() {
        let mut zoom = Zoom::default();
        zoom.zoom_in();
        let viewport = Viewport::new(100, zoom, 0);
        // 120 virtual columns
        assert_eq!(viewport.bar_cells(&pos(10.0, 20.0)), Some((12, 36)));
    }

    #[test]
    fn test_viewport_scroll_shifts_bars_left() {
        let mut zoom = Zoom::default();
        for _ in 0..10 {
            zoom.zoom_in();
        }
        // 300 virtual columns, 200 hidden, half of them scrolled past
        let viewport = Viewport::new(100, zoom, 50);
        assert_eq!(viewport.bar_cells(&pos(50.0, 10.0)), Some((50, 80)));
        assert_eq!(viewport.bar_cells(&pos(0.0, 10.0)), None);
    }

    #[test]
    fn test_viewport_clips_partially_visible_bar() {
        let viewport = Viewport::new(50, Zoom::default(), 0);
        assert_eq!(viewport.bar_cells(&pos(90.0, 40.0)), Some((45, 50)));
    }

    #[test]
    fn test_viewport_minimum_one_cell() {
        let viewport = Viewport::new(10, Zoom::default(), 0);
        assert_eq!(viewport.bar_cells(&pos(55.0, 0.0)), Some((5, 6)));
    }

    #[test]
    fn test_viewport_rejects_nan() {
        let viewport = Viewport::new(10, Zoom::default(), 0);
        assert_eq!(viewport.bar_cells(&PositionResult::degenerate()), None);
        assert_eq!(Viewport::new(0, Zoom::default(), 0).bar_cells(&pos(0.0, 10.0)), None);
    }

    #[test]
    fn test_parse_color_tokens() {
        assert_eq!(parse_color("red"), Some(Color::Red));
        assert_eq!(parse_color("#ff8000"), Some(Color::Rgb(0xff, 0x80, 0x00)));
        assert_eq!(parse_color("not-a-colour"), None);
    }

    #[test]
    fn test_progress_color() {
        assert_eq!(progress_color(None), Color::Cyan);
        assert_eq!(progress_color(Some(0.0)), Color::DarkGray);
        assert_eq!(progress_color(Some(40.0)), Color::Yellow);
        assert_eq!(progress_color(Some(100.0)), Color::Green);
    }

    #[test]
    fn test_bar_color_prefers_color_map() {
        let layout = layout_of(&[record("A", "2024-01-01", "2024-01-02")
            .with("status", "late")
            .with("progress", 100)]);
        let task = &layout.tasks()[0];

        let mapping = FieldMapping::default().with_color("late", "magenta");
        assert_eq!(bar_color(task, &mapping), Color::Magenta);

        // Unparsable token falls back to progress colour
        let mapping = FieldMapping::default().with_color("late", "???");
        assert_eq!(bar_color(task, &mapping), Color::Green);
    }

    #[test]
    fn test_header_starts_with_first_date() {
        let layout = layout_of(&[record("A", "2024-01-01", "2024-01-05")]);
        let viewport = Viewport::new(80, Zoom::default(), 0);
        let text = header_text(layout.axis(), &viewport);
        assert!(text.starts_with("12/30"));
        assert_eq!(text.chars().count(), 80);
    }

    #[test]
    fn test_header_labels_do_not_overlap() {
        let layout = layout_of(&[record("A", "2024-01-01", "2024-03-01")]);
        let viewport = Viewport::new(40, Zoom::default(), 0);
        let text = header_text(layout.axis(), &viewport);
        for word in text.split_whitespace() {
            assert_eq!(word.len(), 5, "label '{}' was overwritten", word);
        }
    }

    #[test]
    fn test_separator_ticks() {
        let layout = layout_of(&[record("A", "2024-01-01", "2024-01-01")]);
        let viewport = Viewport::new(40, Zoom::default(), 0);
        let text = separator_text(layout.axis(), &viewport);
        // 5 axis days, ticks at 0, 10, 20, 30, 40 (last one off the edge)
        assert_eq!(text.chars().filter(|c| *c == '\u{252C}').count(), 4);
        assert_eq!(text.chars().next(), Some('\u{252C}'));
    }

    #[test]
    fn test_build_task_line_without_progress_is_solid() {
        let layout = layout_of(&[record("A", "2024-01-01", "2024-01-05")]);
        let (task, p) = layout.rows().next().unwrap();
        let viewport = Viewport::new(60, Zoom::default(), 0);
        let line = build_task_line(task, p, Color::Cyan, &viewport, false);
        let text = line_text(&line);
        assert_eq!(text.chars().count(), 60);
        assert!(text.contains(FILLED_CELL));
        assert!(!text.contains(REMAINING_CELL));
    }

    #[test]
    fn test_build_task_line_progress_split() {
        let layout = layout_of(&[record("A", "2024-01-01", "2024-01-05").with("progress", 50)]);
        let (task, p) = layout.rows().next().unwrap();
        let viewport = Viewport::new(80, Zoom::default(), 0);
        let text = line_text(&build_task_line(task, p, Color::Cyan, &viewport, false));

        let filled = text.chars().filter(|c| *c == FILLED_CELL).count();
        let remaining = text.chars().filter(|c| *c == REMAINING_CELL).count();
        assert!(filled > 0 && remaining > 0);
        assert!(filled.abs_diff(remaining) <= 1);
    }

    #[test]
    fn test_selected_bar_is_reversed() {
        let layout = layout_of(&[record("A", "2024-01-01", "2024-01-05")]);
        let (task, p) = layout.rows().next().unwrap();
        let viewport = Viewport::new(60, Zoom::default(), 0);
        let line = build_task_line(task, p, Color::Cyan, &viewport, true);

        let bar_span = line
            .spans
            .iter()
            .find(|s| s.content.contains(FILLED_CELL))
            .expect("Should have a bar span");
        assert!(bar_span.style.add_modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn test_invalid_dates_row() {
        let layout = layout_of(&[record("A", "nope", "2024-01-05")]);
        let (task, p) = layout.rows().next().unwrap();
        let viewport = Viewport::new(30, Zoom::default(), 0);
        let text = line_text(&build_task_line(task, p, Color::Cyan, &viewport, false));
        assert!(text.starts_with("(no dates)"));
    }

    #[test]
    fn test_panel_title() {
        let layout = layout_of(&[record("A", "2024-01-01", "2024-01-05")]);
        let title = panel_title(layout.axis(), Zoom::default());
        assert_eq!(title, " Timeline 2023-12-30 .. 2024-01-07  zoom 100% ");
        assert_eq!(
            panel_title(&TimelineAxis::empty(), Zoom::default()),
            " Timeline  zoom 100% "
        );
    }
}
