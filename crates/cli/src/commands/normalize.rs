//! Normalize command
//!
//! Implements `gantry normalize`: applies the field mapping to each record
//! and prints the canonical tasks as JSON.

use clap::Args;

use super::{InputArgs, OutputArgs, RunContext};
use crate::error::CliResult;

/// Print normalized tasks as JSON
#[derive(Debug, Args)]
pub struct NormalizeCommand {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl NormalizeCommand {
    /// Execute the normalize command.
    ///
    /// # Errors
    ///
    /// Returns `CliError` if the records cannot be read or the output cannot
    /// be written.
    pub fn execute(&self, ctx: &RunContext) -> CliResult<String> {
        let records = self.input.read_records()?;
        let layout = ctx.layout(&records);
        let json = serde_json::to_string_pretty(layout.tasks())?;
        self.output.emit(json)
    }
}
