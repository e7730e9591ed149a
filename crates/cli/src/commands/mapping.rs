//! Mapping command
//!
//! Implements `gantry mapping`: shows which record fields each role reads,
//! with defaults filled in, and where the mapping came from.

use clap::Args;

use super::RunContext;
use crate::error::CliResult;

/// Show the field mapping in effect
#[derive(Debug, Args)]
pub struct MappingCommand {
    /// Print only the mapping JSON, without the source line
    #[arg(long, default_value = "false")]
    pub json: bool,
}

impl MappingCommand {
    /// Execute the mapping command.
    ///
    /// # Errors
    ///
    /// Returns `CliError` if the mapping cannot be encoded.
    pub fn execute(&self, ctx: &RunContext) -> CliResult<String> {
        let effective = ctx.mapping.effective();
        let body = serde_json::to_string_pretty(&effective)?;

        if self.json {
            return Ok(body);
        }

        Ok(format!(
            "Source: {}\nIds: {}\n{}",
            ctx.mapping_source, ctx.id_strategy, body
        ))
    }
}
