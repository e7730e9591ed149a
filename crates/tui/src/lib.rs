//! TUI module for Gantry
//!
//! Provides a terminal Gantt viewer for task records using ratatui and
//! crossterm.

pub mod app;
pub mod details;
pub mod error;
pub mod event;
pub mod gantt;
pub mod sidebar;
pub mod ui;
pub mod zoom;

use clap::Parser;
use std::path::PathBuf;

pub use app::App;
pub use error::{TuiError, TuiResult};
pub use gantt::{GanttViewState, Viewport, render_gantt_panel};
pub use zoom::Zoom;

/// Gantry TUI - Browse a task timeline in the terminal
#[derive(Parser, Debug)]
#[command(name = "gantry-tui")]
#[command(version = "0.1.0")]
#[command(about = "Browse task records on an interactive Gantt timeline", long_about = None)]
pub struct Args {
    /// Records file (JSON array or JSON Lines)
    pub records: PathBuf,

    /// Field mapping JSON file (can also be set via GANTRY_MAPPING env var)
    #[arg(long, env = "GANTRY_MAPPING")]
    pub mapping: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_args_records_only() {
        let args = Args::try_parse_from(["gantry-tui", "tasks.json"]).unwrap();
        assert_eq!(args.records, PathBuf::from("tasks.json"));
    }

    #[test]
    fn test_args_with_mapping() {
        let args =
            Args::try_parse_from(["gantry-tui", "tasks.json", "--mapping", "map.json"]).unwrap();
        assert_eq!(args.mapping, Some(PathBuf::from("map.json")));
    }

    #[test]
    fn test_args_missing_records() {
        let err = Args::try_parse_from(["gantry-tui"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_args_too_many() {
        let err = Args::try_parse_from(["gantry-tui", "a", "b"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_args_help_is_not_a_records_path() {
        let err = Args::try_parse_from(["gantry-tui", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);

        let err = Args::try_parse_from(["gantry-tui", "--version"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayVersion);
    }
}
