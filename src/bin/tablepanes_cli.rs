//! CLI tool for tablepanes - splits a grid definition and outputs the panes
//!
//! Usage:
//!   tablepanes_cli <grid.json> <col> <row>                      # Snapshot JSON to stdout
//!   tablepanes_cli <grid.json> <col> <row> --options opts.json  # With split options
//!   tablepanes_cli <grid.json> <col> <row> --html -o out.html   # Container HTML to a file
//!
//! Logging follows `RUST_LOG` (for example `RUST_LOG=tablepanes=debug`).

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs;
use std::io::{self, Write};

use tablepanes::{split_table_html, split_table_value, GridDef, SplitOptions};
use tracing_subscriber::EnvFilter;

const USAGE: &str =
    "Usage: tablepanes_cli <grid.json> <col> <row> [--options options.json] [--html] [-o output]";

fn fail(message: &str) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}

fn read(path: &str) -> String {
    match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => fail(&format!("Error reading {path}: {e}")),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 4 {
        fail(USAGE);
    }

    let grid_path = &args[1];
    let col_cut: i64 = args[2]
        .parse()
        .unwrap_or_else(|_| fail(&format!("Invalid column cut: {}", args[2])));
    let row_cut: i64 = args[3]
        .parse()
        .unwrap_or_else(|_| fail(&format!("Invalid row cut: {}", args[3])));

    let mut options_path = None;
    let mut output_path = None;
    let mut html = false;
    let mut rest = args[4..].iter();
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "--options" => options_path = Some(rest.next().unwrap_or_else(|| fail(USAGE))),
            "-o" => output_path = Some(rest.next().unwrap_or_else(|| fail(USAGE))),
            "--html" => html = true,
            other => fail(&format!("Unknown argument: {other}\n{USAGE}")),
        }
    }

    let grid = match GridDef::from_json(&read(grid_path)) {
        Ok(g) => g,
        Err(e) => fail(&format!("Error parsing grid: {e}")),
    };
    let options = match options_path {
        Some(path) => match SplitOptions::from_json(&read(path)) {
            Ok(o) => o,
            Err(e) => fail(&format!("Error parsing options: {e}")),
        },
        None => SplitOptions::default(),
    };

    let output = if html {
        split_table_html(&grid, col_cut, row_cut, &options)
    } else {
        split_table_value(&grid, col_cut, row_cut, &options).and_then(|snapshot| {
            serde_json::to_string_pretty(&snapshot).map_err(Into::into)
        })
    };
    let output = match output {
        Ok(o) => o,
        Err(e) => fail(&format!("Error splitting grid: {e}")),
    };

    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(path, &output) {
                fail(&format!("Error writing {path}: {e}"));
            }
            eprintln!("Written: {path}");
        }
        None => {
            io::stdout().write_all(output.as_bytes()).unwrap();
            println!();
        }
    }
}
