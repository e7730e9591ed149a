//! Entry point for the Gantry TUI application.
//!
//! Usage: `gantry-tui <records-file> [--mapping <file>]`

use clap::Parser;
use std::process;

use gantry_tui::{App, Args};

fn main() {
    let args = Args::parse();
    let result = App::new(args.records, args.mapping).and_then(|mut app| app.run());

    if let Err(e) = result {
        eprintln!("error: {}", e.full_message());
        process::exit(1);
    }
}
