//! Details pane: the tooltip text for the selected task.

use gantry_core::{FieldMapping, NormalizedTask, tooltip_lines};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Style a `label: value` line, leaving other text plain.
fn build_field_line(text: String) -> Line<'static> {
    match text.split_once(": ") {
        Some((label, value)) => Line::from(vec![
            Span::styled(format!("{}: ", label), Style::default().fg(Color::Cyan)),
            Span::raw(value.to_string()),
        ]),
        None => Line::from(text),
    }
}

/// Build the lines for a task: its name as a heading, then one line per
/// tooltip entry.
fn build_details_lines(task: &NormalizedTask, mapping: &FieldMapping) -> Vec<Line<'static>> {
    let mut entries = tooltip_lines(task, mapping).into_iter();
    let mut lines = Vec::new();

    if let Some(name) = entries.next() {
        lines.push(Line::from(Span::styled(
            name,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
    }
    lines.extend(entries.map(build_field_line));
    lines.push(Line::from(Span::styled(
        format!("id: {}", task.id),
        Style::default().fg(Color::DarkGray),
    )));

    lines
}

/// Render the details pane, or a placeholder when nothing is selected.
pub fn render_details_pane(
    frame: &mut Frame,
    area: Rect,
    task: Option<&NormalizedTask>,
    mapping: &FieldMapping,
) {
    let block = Block::default()
        .title(" Details ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    match task {
        Some(task) => {
            let paragraph = Paragraph::new(build_details_lines(task, mapping))
                .block(block)
                .wrap(Wrap { trim: false });
            frame.render_widget(paragraph, area);
        }
        None => {
            let paragraph = Paragraph::new("No task selected")
                .block(block)
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(paragraph, area);
        }
    }
}
