//! UI rendering for the TUI.
//!
//! Lays out the task list, Gantt panel, details pane and legend.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
};

use crate::app::App;
use crate::details::render_details_pane;
use crate::gantt::{GanttViewState, HEADER_ROWS, render_gantt_panel};
use crate::sidebar::render_task_list;

/// Legend text for keyboard shortcuts.
const LEGEND: &str =
    " [j/k] Select  [h/l] Scroll  [+/-] Zoom  [0] Reset zoom  [r] Reload  [q] Quit ";

/// Height of the details pane, borders included
const DETAILS_HEIGHT: u16 = 8;

/// Screen regions, top to bottom and left to right.
struct Regions {
    sidebar: Rect,
    gantt: Rect,
    details: Rect,
    legend: Rect,
}

/// Split the screen: list and Gantt side by side, details below, legend at
/// the bottom.
fn create_main_layout(area: Rect) -> Regions {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),                 // List + Gantt
            Constraint::Length(DETAILS_HEIGHT), // Details pane
            Constraint::Length(1),              // Legend bar
        ])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(25), Constraint::Percentage(75)])
        .split(rows[0]);

    Regions {
        sidebar: columns[0],
        gantt: columns[1],
        details: rows[1],
        legend: rows[2],
    }
}

/// First row to show so the selected row stays visible.
fn scroll_for(selected: usize, panel_height: u16) -> usize {
    let visible = (panel_height as usize)
        .saturating_sub(2 + HEADER_ROWS)
        .max(1);
    selected.saturating_sub(visible - 1)
}

/// Draw the entire UI.
pub fn draw(frame: &mut Frame, app: &App) {
    let regions = create_main_layout(frame.area());
    let scroll_offset = scroll_for(app.selected_index(), regions.gantt.height);

    render_task_list(
        frame,
        regions.sidebar,
        app.layout(),
        app.selected_index(),
        scroll_offset,
    );

    render_gantt_panel(
        frame,
        regions.gantt,
        app.layout(),
        app.mapping(),
        GanttViewState {
            scroll_offset,
            horizontal_offset: app.horizontal_offset(),
            selected_index: app.selected_index(),
            zoom: app.zoom(),
        },
    );

    render_details_pane(frame, regions.details, app.selected_task(), app.mapping());

    draw_legend(frame, regions.legend, app.status());
}

/// Draw the legend bar, followed by the status message if there is one.
fn draw_legend(frame: &mut Frame, area: Rect, status: Option<&str>) {
    let text = match status {
        Some(status) => format!("{}| {} ", LEGEND, status),
        None => LEGEND.to_string(),
    };
    let legend = Paragraph::new(text).style(Style::default().fg(Color::Black).bg(Color::Cyan));

    frame.render_widget(legend, area);
}
