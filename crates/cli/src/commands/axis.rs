//! Axis command
//!
//! Implements `gantry axis`: prints the padded, day-stepped timeline axis.

use clap::Args;

use super::{InputArgs, OutputArgs, RunContext};
use crate::error::CliResult;
use crate::output::format_axis;

/// Print the timeline axis
#[derive(Debug, Args)]
pub struct AxisCommand {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl AxisCommand {
    /// Execute the axis command.
    ///
    /// # Errors
    ///
    /// Returns `CliError` if the records cannot be read or the output cannot
    /// be written.
    pub fn execute(&self, ctx: &RunContext) -> CliResult<String> {
        let records = self.input.read_records()?;
        let layout = ctx.layout(&records);
        self.output.emit(format_axis(layout.axis()))
    }
}
