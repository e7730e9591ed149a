//! Layout command
//!
//! Implements `gantry layout`: prints every task with its bar position, as
//! an aligned table or as a JSON document holding tasks, axis and positions.

use clap::Args;

use super::{InputArgs, OutputArgs, RunContext};
use crate::error::CliResult;
use crate::output::format_layout_table;

/// Output format for the layout command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Table => "table",
            OutputFormat::Json => "json",
        }
    }
}

/// Parse a format string into an OutputFormat
fn parse_format(s: &str) -> Result<OutputFormat, String> {
    match s.to_lowercase().as_str() {
        "table" => Ok(OutputFormat::Table),
        "json" => Ok(OutputFormat::Json),
        _ => Err(format!("invalid format '{}'. Valid values: table, json", s)),
    }
}

/// Print tasks with their bar positions
#[derive(Debug, Args)]
pub struct LayoutCommand {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", value_parser = parse_format)]
    pub format: OutputFormat,
}

impl LayoutCommand {
    /// Execute the layout command.
    ///
    /// # Errors
    ///
    /// Returns `CliError` if the records cannot be read, JSON encoding fails,
    /// or the output cannot be written.
    pub fn execute(&self, ctx: &RunContext) -> CliResult<String> {
        let records = self.input.read_records()?;
        let layout = ctx.layout(&records);

        let text = match self.format {
            OutputFormat::Table => format_layout_table(&layout),
            OutputFormat::Json => serde_json::to_string_pretty(&layout)?,
        };
        self.output.emit(text)
    }
}
