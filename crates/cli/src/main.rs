use clap::Parser;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

use gantry_cli::commands::{Command, RunContext};
use gantry_cli::error::CliResult;
use gantry_core::{IdStrategy, load_effective_mapping};

/// Gantry - Lay out task records on a timeline
#[derive(Parser)]
#[command(name = "gantry")]
#[command(version = "0.1.0")]
#[command(about = "Lay out task records on a Gantt timeline", long_about = None)]
struct Args {
    /// Field mapping JSON file (can also be set via GANTRY_MAPPING env var)
    #[arg(long, global = true)]
    mapping: Option<PathBuf>,

    /// How ids are generated for records without one (hash, sequential, random)
    #[arg(long, global = true, default_value = "hash", value_parser = parse_id_strategy)]
    id_strategy: IdStrategy,

    /// Subcommand to execute
    #[command(subcommand)]
    command: Option<Command>,
}

fn parse_id_strategy(s: &str) -> Result<IdStrategy, String> {
    s.parse()
}

/// Initialize logging from the RUST_LOG environment variable
///
/// Logs go to stderr so they never mix with command output.
///
/// Examples:
/// - `RUST_LOG=debug` - show record counts and layout summaries
/// - `RUST_LOG=warn` - show skipped or defaulted fields (the default)
fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .init();
}

fn main() {
    init_logging();

    if let Err(e) = run_app() {
        eprintln!("error: {}", e.full_message());
        process::exit(1);
    }
}

/// Main application logic - separated for testability
fn run_app() -> CliResult<()> {
    let args = Args::parse();
    let output = run_with_args(&args)?;
    println!("{}", output);
    Ok(())
}

/// Run the application with the given arguments, returning what to print
fn run_with_args(args: &Args) -> CliResult<String> {
    // Mapping priority: --mapping > GANTRY_MAPPING > config file > built-in
    let (mapping, source) = load_effective_mapping(args.mapping.as_deref())?;
    tracing::debug!(%source, id_strategy = %args.id_strategy, "resolved mapping");

    let ctx = RunContext::new(mapping, source, args.id_strategy);

    match &args.command {
        Some(cmd) => cmd.execute(&ctx),
        None => Ok("Welcome to Gantry!\nUse 'gantry --help' for usage information.".to_string()),
    }
}
