//! Chart command
//!
//! Implements `gantry chart`: draws the layout as a text Gantt chart.

use clap::Args;

use super::{InputArgs, OutputArgs, RunContext};
use crate::error::CliResult;
use crate::output::format_chart;

/// Default number of columns for the bar area
pub const DEFAULT_CHART_WIDTH: u16 = 60;

/// Draw a text Gantt chart
#[derive(Debug, Args)]
pub struct ChartCommand {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Width of the bar area in characters
    #[arg(short, long, default_value_t = DEFAULT_CHART_WIDTH)]
    pub width: u16,
}

impl ChartCommand {
    /// Execute the chart command.
    ///
    /// # Errors
    ///
    /// Returns `CliError` if the records cannot be read or the output cannot
    /// be written.
    pub fn execute(&self, ctx: &RunContext) -> CliResult<String> {
        let records = self.input.read_records()?;
        let layout = ctx.layout(&records);
        self.output
            .emit(format_chart(&layout, &ctx.mapping, self.width as usize))
    }
}
