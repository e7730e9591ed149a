//! Output formatting module for Gantry
//!
//! Provides the layout table, axis listing and text chart renderings.

use gantry_core::{FieldMapping, Layout, NormalizedTask, PositionResult, TaskDate, TimelineAxis};

/// Maximum width for the name column before truncation
const MAX_NAME_WIDTH: usize = 30;

/// Width of the label column in the text chart
const CHART_LABEL_WIDTH: usize = 24;

/// Cell used for filled bar segments
const BAR_CELL: char = '\u{2588}';

/// Truncate a string to the specified maximum width, adding ellipsis if needed.
fn truncate(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else if max_width <= 3 {
        s.chars().take(max_width).collect()
    } else {
        let head: String = s.chars().take(max_width - 3).collect();
        format!("{}...", head)
    }
}

/// Format a date as `YYYY-MM-DD`, or `invalid` when it did not parse.
fn format_date(date: &TaskDate) -> String {
    date.get()
        .map(|at| at.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "invalid".to_string())
}

/// Format a percentage with one decimal, or `-` for NaN/infinite values.
fn format_percent(value: f64) -> String {
    if value.is_finite() {
        format!("{:.1}", value)
    } else {
        "-".to_string()
    }
}

fn format_progress(progress: Option<f64>) -> String {
    progress.map_or_else(|| "-".to_string(), |p| format!("{}%", p))
}

/// List axis dates one per line.
pub fn format_axis(axis: &TimelineAxis) -> String {
    if axis.is_empty() {
        return "Timeline is empty.".to_string();
    }
    axis.iter()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format the layout into an aligned table.
///
/// Produces output in the format:
/// ```text
/// ID  Name    Start       End         Progress  Left%  Width%
/// --  ------  ----------  ----------  --------  -----  ------
/// 1   Design  2024-01-01  2024-01-05  40%       13.3   26.7
/// ```
pub fn format_layout_table(layout: &Layout) -> String {
    if layout.is_empty() {
        return "No tasks found.".to_string();
    }

    let headers = ["ID", "Name", "Start", "End", "Progress", "Left%", "Width%"];

    let rows: Vec<[String; 7]> = layout
        .rows()
        .map(|(task, pos)| {
            [
                task.id.clone(),
                truncate(&task.name, MAX_NAME_WIDTH),
                format_date(&task.start_date),
                format_date(&task.end_date),
                format_progress(task.progress),
                format_percent(pos.left),
                format_percent(pos.width),
            ]
        })
        .collect();

    let mut widths = headers.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(join_row(headers.iter().copied(), &widths));
    lines.push(join_row(widths.iter().map(|w| "-".repeat(*w)), &widths));
    for row in &rows {
        lines.push(join_row(row.iter().map(String::as_str), &widths));
    }

    lines.join("\n")
}

/// Pad cells to their column widths and join with two spaces.
fn join_row<S: AsRef<str>>(cells: impl Iterator<Item = S>, widths: &[usize]) -> String {
    cells
        .zip(widths.iter())
        .map(|(cell, width)| format!("{:<width$}", cell.as_ref(), width = width))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

/// Column range `[start, end)` covered by a bar in a chart `width` columns wide.
///
/// Returns `None` for positions that are not renderable. Always covers at
/// least one column, and never extends past the chart.
fn bar_columns(pos: &PositionResult, width: usize) -> Option<(usize, usize)> {
    if !pos.is_renderable() || width == 0 {
        return None;
    }
    let scale = width as f64 / 100.0;
    let start = ((pos.left * scale).floor() as usize).min(width - 1);
    let end = ((pos.right() * scale).ceil() as usize).clamp(start + 1, width);
    Some((start, end))
}

fn chart_row(task: &NormalizedTask, pos: &PositionResult, width: usize) -> String {
    let label = format!(
        "{:<w$}",
        truncate(&task.name, CHART_LABEL_WIDTH),
        w = CHART_LABEL_WIDTH
    );

    let bar: String = match bar_columns(pos, width) {
        Some((start, end)) => (0..width)
            .map(|col| if col >= start && col < end { BAR_CELL } else { ' ' })
            .collect(),
        None => format!("{:<width$}", "(no dates)", width = width),
    };

    match task.progress {
        Some(progress) => format!("{} |{}| {}%", label, bar, progress),
        None => format!("{} |{}|", label, bar),
    }
}

/// Draw the layout as a text Gantt chart with `width` bar columns.
pub fn format_chart(layout: &Layout, mapping: &FieldMapping, width: usize) -> String {
    if layout.is_empty() {
        return "No tasks found.".to_string();
    }

    let header = match (layout.axis().first(), layout.axis().last()) {
        (Some(first), Some(last)) => format!(
            "Timeline {} .. {} ({} days)",
            first.format("%Y-%m-%d"),
            last.format("%Y-%m-%d"),
            layout.axis().len()
        ),
        _ => "Timeline is empty (some tasks have invalid dates).".to_string(),
    };

    let mut lines = vec![header];
    for (task, pos) in layout.rows() {
        let mut line = chart_row(task, pos, width);
        if let Some(color) = gantry_core::resolve_color(task, mapping) {
            line.push_str(&format!(" [{}]", color));
        }
        lines.push(line);
    }
    lines.join("\n")
}
