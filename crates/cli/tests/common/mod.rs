//! Test infrastructure for integration tests
//!
//! Provides isolated temp directories holding record and mapping files, and
//! helpers for building and running CLI commands against them.

use std::path::{Path, PathBuf};

use gantry_cli::commands::{
    AxisCommand, ChartCommand, InputArgs, LayoutCommand, MappingCommand, NormalizeCommand,
    OutputArgs, OutputFormat, RunContext,
};
use gantry_core::{FieldMapping, IdStrategy, MappingSource};

/// Test context owning a unique temp directory
pub struct TestContext {
    pub temp_dir: PathBuf,
}

impl TestContext {
    /// Create a new test context.
    ///
    /// Each call creates a uniquely named temp directory using process ID,
    /// thread ID, and nanosecond timestamp to guarantee isolation.
    pub fn new() -> Self {
        let temp_dir = std::env::temp_dir().join(format!(
            "gantry-integration-test-{}-{:?}-{}",
            std::process::id(),
            std::thread::current().id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        std::fs::create_dir_all(&temp_dir).unwrap();

        Self { temp_dir }
    }

    /// Write `contents` to a file in the temp directory and return its path.
    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    /// Write records as a JSON array file.
    pub fn write_records(&self, records: serde_json::Value) -> PathBuf {
        self.write_file("records.json", &records.to_string())
    }

    #[allow(dead_code)]
    pub fn path(&self, name: &str) -> PathBuf {
        self.temp_dir.join(name)
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        // Auto-cleanup on drop
        let _ = std::fs::remove_dir_all(&self.temp_dir);
    }
}

// =============================================================================
// Run Context Helpers
// =============================================================================

/// Built-in mapping with sequential ids, so generated ids are predictable.
pub fn seq_ctx() -> RunContext {
    ctx_with(FieldMapping::default())
}

/// The given mapping with sequential ids.
pub fn ctx_with(mapping: FieldMapping) -> RunContext {
    RunContext::new(mapping, MappingSource::BuiltIn, IdStrategy::Sequential)
}

// =============================================================================
// Command Builder Helpers
// =============================================================================

fn input(path: &Path) -> InputArgs {
    InputArgs {
        input: Some(path.to_path_buf()),
    }
}

pub fn layout_cmd(path: &Path, format: OutputFormat) -> LayoutCommand {
    LayoutCommand {
        input: input(path),
        output: OutputArgs::default(),
        format,
    }
}

pub fn axis_cmd(path: &Path) -> AxisCommand {
    AxisCommand {
        input: input(path),
        output: OutputArgs::default(),
    }
}

pub fn chart_cmd(path: &Path, width: u16) -> ChartCommand {
    ChartCommand {
        input: input(path),
        output: OutputArgs::default(),
        width,
    }
}

pub fn normalize_cmd(path: &Path) -> NormalizeCommand {
    NormalizeCommand {
        input: input(path),
        output: OutputArgs::default(),
    }
}

#[allow(dead_code)]
pub fn mapping_cmd(json: bool) -> MappingCommand {
    MappingCommand { json }
}

/// Run `layout --format json` and parse the result.
pub fn layout_json(ctx: &RunContext, path: &Path) -> serde_json::Value {
    let text = layout_cmd(path, OutputFormat::Json).execute(ctx).unwrap();
    serde_json::from_str(&text).unwrap()
}
