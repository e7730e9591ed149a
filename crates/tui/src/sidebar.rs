//! Task list shown beside the Gantt panel.
//!
//! Rows line up with the Gantt bars: the list reserves the same header rows
//! and honours the same vertical scroll.

use gantry_core::{Layout, NormalizedTask};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::gantt::HEADER_ROWS;

/// Truncate to `max` characters, marking the cut with `~`.
fn fit(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else if max == 0 {
        String::new()
    } else {
        let mut cut: String = text.chars().take(max - 1).collect();
        cut.push('~');
        cut
    }
}

/// Build one list row: selection marker and task name.
fn build_row(task: &NormalizedTask, is_selected: bool, width: usize) -> Line<'static> {
    let marker = if is_selected { "> " } else { "  " };
    let name = fit(&task.name, width.saturating_sub(marker.len()));

    let style = if is_selected {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
            .bg(Color::DarkGray)
    } else if task.has_valid_dates() {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::Red)
    };

    Line::from(Span::styled(format!("{}{}", marker, name), style))
}

/// Render the task list.
pub fn render_task_list(
    frame: &mut Frame,
    area: Rect,
    layout: &Layout,
    selected_index: usize,
    scroll_offset: usize,
) {
    let block = Block::default()
        .title(format!(" Tasks ({}) ", layout.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if layout.is_empty() {
        let paragraph = Paragraph::new("No tasks found")
            .block(block)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(paragraph, area);
        return;
    }

    let width = area.width.saturating_sub(2) as usize;
    let mut lines: Vec<Line> = vec![Line::from(""); HEADER_ROWS];
    lines.extend(
        layout
            .tasks()
            .iter()
            .enumerate()
            .skip(scroll_offset)
            .map(|(i, task)| build_row(task, i == selected_index, width)),
    );

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
