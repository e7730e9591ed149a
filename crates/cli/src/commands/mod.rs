//! CLI commands for Gantry
//!
//! This module contains all subcommand implementations for the gantry CLI.

pub mod axis;
pub mod chart;
pub mod layout;
pub mod mapping;
pub mod normalize;

pub use axis::AxisCommand;
pub use chart::ChartCommand;
pub use layout::{LayoutCommand, OutputFormat};
pub use mapping::MappingCommand;
pub use normalize::NormalizeCommand;

use clap::{Args, Subcommand};
use std::io::Write;
use std::path::PathBuf;

use gantry_core::{FieldMapping, IdStrategy, Layout, MappingSource, RawRecord};

use crate::error::{CliError, CliResult};

/// Everything a command needs besides its own arguments.
pub struct RunContext {
    /// Field mapping in effect
    pub mapping: FieldMapping,
    /// Where the mapping was loaded from
    pub mapping_source: MappingSource,
    /// How ids are generated for records without one
    pub id_strategy: IdStrategy,
}

impl RunContext {
    pub fn new(mapping: FieldMapping, mapping_source: MappingSource, id_strategy: IdStrategy) -> Self {
        Self {
            mapping,
            mapping_source,
            id_strategy,
        }
    }

    /// Built-in mapping with content-hash ids.
    pub fn with_defaults() -> Self {
        Self::new(
            FieldMapping::default(),
            MappingSource::BuiltIn,
            IdStrategy::default(),
        )
    }

    /// Normalize records and compute their layout.
    pub fn layout(&self, records: &[RawRecord]) -> Layout {
        let mut ids = self.id_strategy.generator();
        Layout::compute(records, &self.mapping, ids.as_mut())
    }
}

/// Where records are read from
#[derive(Debug, Clone, Default, Args)]
pub struct InputArgs {
    /// Input file: JSON array or JSON Lines (reads stdin if not specified)
    #[arg(short, long)]
    pub input: Option<PathBuf>,
}

impl InputArgs {
    /// Read records from the input file or stdin.
    pub fn read_records(&self) -> CliResult<Vec<RawRecord>> {
        let records = match &self.input {
            Some(path) => gantry_core::load_records(path)?,
            None => gantry_core::read_stdin_records()?,
        };
        tracing::debug!(count = records.len(), "read records");
        Ok(records)
    }
}

/// Where command output goes
#[derive(Debug, Clone, Default, Args)]
pub struct OutputArgs {
    /// Output file path (prints to stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl OutputArgs {
    /// Write `text` to the output file, or hand it back for printing.
    ///
    /// Returns the text to print: the rendered output itself for stdout, or
    /// a short confirmation when a file was written.
    pub fn emit(&self, text: String) -> CliResult<String> {
        match &self.output {
            Some(path) => {
                let mut file = std::fs::File::create(path).map_err(|e| CliError::Write {
                    path: path.clone(),
                    source: e,
                })?;
                writeln!(file, "{}", text).map_err(|e| CliError::Write {
                    path: path.clone(),
                    source: e,
                })?;
                Ok(format!("Wrote {}", path.display()))
            }
            None => Ok(text),
        }
    }
}

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print normalized tasks as JSON
    Normalize(NormalizeCommand),
    /// Print the timeline axis, one date per line
    Axis(AxisCommand),
    /// Print tasks with their bar positions
    Layout(LayoutCommand),
    /// Draw a text Gantt chart
    Chart(ChartCommand),
    /// Show the field mapping in effect
    Mapping(MappingCommand),
}

impl Command {
    /// Execute the command.
    ///
    /// # Errors
    ///
    /// Returns `CliError` if input cannot be read or output cannot be written.
    pub fn execute(&self, ctx: &RunContext) -> CliResult<String> {
        match self {
            Command::Normalize(cmd) => cmd.execute(ctx),
            Command::Axis(cmd) => cmd.execute(ctx),
            Command::Layout(cmd) => cmd.execute(ctx),
            Command::Chart(cmd) => cmd.execute(ctx),
            Command::Mapping(cmd) => cmd.execute(ctx),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    /// Test struct to parse commands
    #[derive(Parser)]
    struct TestCli {
        #[command(subcommand)]
        command: Command,
    }

    #[test]
    fn test_command_layout_parses() {
        let cli = TestCli::try_parse_from(["test", "layout", "-i", "tasks.json"]).unwrap();
        match cli.command {
            Command::Layout(cmd) => {
                assert_eq!(cmd.input.input, Some(PathBuf::from("tasks.json")));
                assert_eq!(cmd.format, OutputFormat::Table);
            }
            _ => panic!("Expected Layout command"),
        }
    }

    #[test]
    fn test_command_layout_json_format() {
        let cli = TestCli::try_parse_from(["test", "layout", "--format", "json"]).unwrap();
        match cli.command {
            Command::Layout(cmd) => assert_eq!(cmd.format, OutputFormat::Json),
            _ => panic!("Expected Layout command"),
        }
    }

    #[test]
    fn test_command_layout_invalid_format() {
        let result = TestCli::try_parse_from(["test", "layout", "--format", "xml"]);
        match result {
            Err(e) => assert!(e.to_string().contains("xml")),
            Ok(_) => panic!("Expected error for invalid format"),
        }
    }

    #[test]
    fn test_command_chart_width() {
        let cli = TestCli::try_parse_from(["test", "chart", "--width", "80"]).unwrap();
        match cli.command {
            Command::Chart(cmd) => assert_eq!(cmd.width, 80),
            _ => panic!("Expected Chart command"),
        }
    }

    #[test]
    fn test_command_chart_default_width() {
        let cli = TestCli::try_parse_from(["test", "chart"]).unwrap();
        match cli.command {
            Command::Chart(cmd) => assert_eq!(cmd.width, chart::DEFAULT_CHART_WIDTH),
            _ => panic!("Expected Chart command"),
        }
    }

    #[test]
    fn test_command_axis_and_normalize_parse() {
        assert!(TestCli::try_parse_from(["test", "axis"]).is_ok());
        assert!(TestCli::try_parse_from(["test", "normalize", "-o", "out.json"]).is_ok());
        assert!(TestCli::try_parse_from(["test", "mapping"]).is_ok());
    }

    #[test]
    fn test_unknown_command_fails() {
        assert!(TestCli::try_parse_from(["test", "schedule"]).is_err());
    }

    #[test]
    fn test_output_args_stdout_passthrough() {
        let out = OutputArgs::default();
        assert_eq!(out.emit("hello".to_string()).unwrap(), "hello");
    }

    #[test]
    fn test_run_context_layout_uses_mapping() {
        let ctx = RunContext::new(
            FieldMapping::default().with_field(gantry_core::FieldRole::TaskName, "title"),
            MappingSource::BuiltIn,
            IdStrategy::Sequential,
        );
        let layout = ctx.layout(&[RawRecord::new().with("title", "Mapped")]);
        assert_eq!(layout.tasks()[0].name, "Mapped");
        assert_eq!(layout.tasks()[0].id, "task-1");
    }
}
