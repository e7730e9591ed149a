//! Main application state and event loop.

use std::io::{self, Stdout};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::{
    event::KeyEvent,
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::Terminal;
use ratatui::prelude::*;

use gantry_core::{
    FieldMapping, IdStrategy, Layout, NormalizedTask, TimelineState, load_effective_mapping,
    load_records,
};

use crate::error::TuiResult;
use crate::event::{
    is_down, is_left, is_quit, is_reload, is_right, is_up, is_zoom_in, is_zoom_out,
    is_zoom_reset, poll_key,
};
use crate::ui;
use crate::zoom::Zoom;

/// Horizontal scroll step, in percent of the hidden overflow
const SCROLL_STEP: u16 = 10;

/// Main application state.
pub struct App {
    /// Records, mapping and the layout computed from them.
    state: TimelineState,
    /// File the records are (re)loaded from.
    records_path: PathBuf,
    /// Mapping file given on the command line, if any.
    mapping_path: Option<PathBuf>,
    /// Index of the selected task.
    selected_index: usize,
    /// Horizontal scroll offset (0-100 percentage).
    horizontal_offset: u16,
    zoom: Zoom,
    /// Whether the application is still running.
    running: bool,
    /// One-line message for the legend bar, e.g. the last reload result.
    status: Option<String>,
}

impl App {
    /// Load records and mapping from disk and lay them out.
    ///
    /// # Errors
    ///
    /// Returns `TuiError::Input` if the records or mapping cannot be read.
    pub fn new(records_path: PathBuf, mapping_path: Option<PathBuf>) -> TuiResult<Self> {
        let (mapping, _) = load_effective_mapping(mapping_path.as_deref())?;
        let records = load_records(&records_path)?;

        let mut state = TimelineState::new(mapping, IdStrategy::default().generator());
        state.set_records(records);

        Ok(Self::with_state(state, records_path, mapping_path))
    }

    /// Wrap an already-populated timeline state.
    pub fn with_state(
        state: TimelineState,
        records_path: PathBuf,
        mapping_path: Option<PathBuf>,
    ) -> Self {
        Self {
            state,
            records_path,
            mapping_path,
            selected_index: 0,
            horizontal_offset: 0,
            zoom: Zoom::default(),
            running: true,
            status: None,
        }
    }

    /// Re-read records and mapping from disk and recompute the layout.
    ///
    /// Selection is kept where possible and clamped to the new task count.
    pub fn reload(&mut self) -> TuiResult<()> {
        let (mapping, _) = load_effective_mapping(self.mapping_path.as_deref())?;
        let records = load_records(&self.records_path)?;

        self.state.set_inputs(records, mapping);
        self.clamp_selection();
        Ok(())
    }

    fn clamp_selection(&mut self) {
        let count = self.layout().len();
        if count == 0 {
            self.selected_index = 0;
        } else if self.selected_index >= count {
            self.selected_index = count - 1;
        }
    }

    pub fn layout(&self) -> &Layout {
        self.state.layout()
    }

    pub fn mapping(&self) -> &FieldMapping {
        self.state.mapping()
    }

    pub fn records_path(&self) -> &Path {
        &self.records_path
    }

    /// Get the currently selected task index.
    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    /// The selected task, if there are any tasks.
    pub fn selected_task(&self) -> Option<&NormalizedTask> {
        self.layout().tasks().get(self.selected_index)
    }

    pub fn horizontal_offset(&self) -> u16 {
        self.horizontal_offset
    }

    pub fn zoom(&self) -> Zoom {
        self.zoom
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Check if the application is still running.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Request the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Move selection down. Clamps to the last task (does not wrap).
    pub fn select_next(&mut self) {
        let count = self.layout().len();
        if count > 0 && self.selected_index < count - 1 {
            self.selected_index += 1;
        }
    }

    /// Move selection up. Clamps to the first task (does not wrap).
    pub fn select_previous(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn scroll_left(&mut self) {
        self.horizontal_offset = self.horizontal_offset.saturating_sub(SCROLL_STEP);
    }

    /// Scroll right; 100 means the right end of the timeline is visible.
    pub fn scroll_right(&mut self) {
        self.horizontal_offset = (self.horizontal_offset + SCROLL_STEP).min(100);
    }

    pub fn zoom_in(&mut self) {
        self.zoom.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.zoom.zoom_out();
    }

    pub fn reset_zoom(&mut self) {
        self.zoom.reset();
    }

    /// Run the main application loop.
    ///
    /// This initializes the terminal, runs the event loop, and ensures
    /// the terminal is restored on exit (even on panic).
    pub fn run(&mut self) -> TuiResult<()> {
        let mut terminal = init_terminal()?;

        // Restores the terminal even if the loop panics
        let guard = scopeguard::guard((), |()| {
            let _ = restore_terminal();
        });

        let result = self.event_loop(&mut terminal);

        drop(guard);

        result
    }

    /// The main event loop.
    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> TuiResult<()> {
        while self.running {
            terminal.draw(|frame| ui::draw(frame, self))?;

            if let Some(key) = poll_key(Duration::from_millis(100))? {
                self.handle_key(&key);
            }
        }
        Ok(())
    }

    /// Handle a keyboard event.
    fn handle_key(&mut self, key: &KeyEvent) {
        if is_quit(key) {
            self.quit();
        } else if is_down(key) {
            self.select_next();
        } else if is_up(key) {
            self.select_previous();
        } else if is_left(key) {
            self.scroll_left();
        } else if is_right(key) {
            self.scroll_right();
        } else if is_zoom_in(key) {
            self.zoom_in();
        } else if is_zoom_out(key) {
            self.zoom_out();
        } else if is_zoom_reset(key) {
            self.reset_zoom();
        } else if is_reload(key) {
            // A failed reload keeps the previous layout on screen
            self.status = Some(match self.reload() {
                Ok(()) => format!("Reloaded {} tasks", self.layout().len()),
                Err(e) => format!("Reload failed: {}", e.full_message()),
            });
        }
    }
}

/// Initialize the terminal for TUI rendering.
fn init_terminal() -> TuiResult<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to its original state.
fn restore_terminal() -> TuiResult<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventKind, KeyEventState, KeyModifiers};
    use gantry_core::{FieldRole, RawRecord, SequentialIdGenerator};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn record(name: &str, start: &str, end: &str) -> RawRecord {
        RawRecord::new()
            .with("name", name)
            .with("startDate", start)
            .with("endDate", end)
    }

    fn app_with(records: Vec<RawRecord>) -> App {
        let mut state = TimelineState::new(
            FieldMapping::default(),
            Box::new(SequentialIdGenerator::default()),
        );
        state.set_records(records);
        App::with_state(state, PathBuf::from("unused.json"), None)
    }

    fn three_tasks() -> App {
        app_with(vec![
            record("A", "2024-01-01", "2024-01-03"),
            record("B", "2024-01-02", "2024-01-04"),
            record("C", "2024-01-03", "2024-01-05"),
        ])
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "gantry-tui-app-{}-{:?}-{}-{}",
            std::process::id(),
            std::thread::current().id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos(),
            name
        ))
    }

    #[test]
    fn test_selection_moves_and_clamps() {
        let mut app = three_tasks();
        assert_eq!(app.selected_task().unwrap().name, "A");

        app.handle_key(&key(KeyCode::Char('j')));
        app.handle_key(&key(KeyCode::Down));
        app.handle_key(&key(KeyCode::Down));
        assert_eq!(app.selected_index(), 2);

        app.handle_key(&key(KeyCode::Char('k')));
        assert_eq!(app.selected_task().unwrap().name, "B");

        app.handle_key(&key(KeyCode::Up));
        app.handle_key(&key(KeyCode::Up));
        assert_eq!(app.selected_index(), 0);
    }

    #[test]
    fn test_selection_on_empty_layout() {
        let mut app = app_with(Vec::new());
        app.select_next();
        assert_eq!(app.selected_index(), 0);
        assert!(app.selected_task().is_none());
    }

    #[test]
    fn test_horizontal_scroll_clamps() {
        let mut app = three_tasks();
        app.handle_key(&key(KeyCode::Char('h')));
        assert_eq!(app.horizontal_offset(), 0);

        for _ in 0..15 {
            app.handle_key(&key(KeyCode::Char('l')));
        }
        assert_eq!(app.horizontal_offset(), 100);

        app.handle_key(&key(KeyCode::Left));
        assert_eq!(app.horizontal_offset(), 90);
    }

    #[test]
    fn test_zoom_keys() {
        let mut app = three_tasks();
        app.handle_key(&key(KeyCode::Char('+')));
        app.handle_key(&key(KeyCode::Char('=')));
        assert_eq!(app.zoom().percent(), 144);

        app.handle_key(&key(KeyCode::Char('-')));
        assert_eq!(app.zoom().percent(), 120);

        app.handle_key(&key(KeyCode::Char('0')));
        assert_eq!(app.zoom(), Zoom::default());
    }

    #[test]
    fn test_quit() {
        let mut app = three_tasks();
        assert!(app.is_running());
        app.handle_key(&key(KeyCode::Char('q')));
        assert!(!app.is_running());
    }

    #[test]
    fn test_reload_failure_keeps_layout() {
        let mut app = three_tasks();
        app.handle_key(&key(KeyCode::Char('r')));
        assert_eq!(app.layout().len(), 3);
        assert!(app.status().unwrap().starts_with("Reload failed"));
    }

    #[test]
    fn test_new_and_reload_from_disk() {
        let records = temp_path("records.json");
        let mapping = temp_path("mapping.json");
        std::fs::write(
            &records,
            r#"[{"title":"One","startDate":"2024-01-01","endDate":"2024-01-02"},
                {"title":"Two","startDate":"2024-01-03","endDate":"2024-01-04"}]"#,
        )
        .unwrap();
        std::fs::write(&mapping, r#"{"taskName":"title"}"#).unwrap();

        let mut app = App::new(records.clone(), Some(mapping.clone())).unwrap();
        assert_eq!(app.layout().len(), 2);
        assert_eq!(app.layout().tasks()[1].name, "Two");
        app.select_next();

        std::fs::write(
            &records,
            r#"[{"title":"Only","startDate":"2024-02-01","endDate":"2024-02-02"}]"#,
        )
        .unwrap();
        app.handle_key(&key(KeyCode::Char('r')));

        assert_eq!(app.status(), Some("Reloaded 1 tasks"));
        assert_eq!(app.selected_index(), 0);
        assert_eq!(app.selected_task().unwrap().name, "Only");

        let _ = std::fs::remove_file(&records);
        let _ = std::fs::remove_file(&mapping);
    }

    #[test]
    fn test_reload_applies_changed_mapping() {
        let records = temp_path("records.json");
        let mapping = temp_path("mapping.json");
        std::fs::write(
            &records,
            r#"[{"title":"T","label":"L","startDate":"2024-01-01","endDate":"2024-01-02"}]"#,
        )
        .unwrap();
        std::fs::write(&mapping, r#"{"taskName":"title"}"#).unwrap();

        let mut app = App::new(records.clone(), Some(mapping.clone())).unwrap();
        assert_eq!(app.selected_task().unwrap().name, "T");

        std::fs::write(&mapping, r#"{"taskName":"label"}"#).unwrap();
        app.reload().unwrap();
        assert_eq!(app.selected_task().unwrap().name, "L");
        assert_eq!(app.mapping().field_name(FieldRole::TaskName), "label");

        let _ = std::fs::remove_file(&records);
        let _ = std::fs::remove_file(&mapping);
    }

    #[test]
    fn test_new_with_missing_records_fails() {
        let result = App::new(temp_path("missing.json"), None);
        assert!(result.is_err());
    }
}
