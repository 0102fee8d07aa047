//! # imgcompare CLI
//!
//! Command-line interface for the split-view comparator.
//!
//! ## Usage
//! ```bash
//! imgcompare before.jpg after.jpg
//! imgcompare before.jpg after.jpg --threshold 0.95 --output json
//! ```

mod cli;

use console::style;
use std::process::ExitCode;

fn main() -> ExitCode {
    split_view_compare::init_tracing();

    match cli::run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {}", style("error:").red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
