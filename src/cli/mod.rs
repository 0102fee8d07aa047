//! # CLI Module
//!
//! Command-line interface for the split-view comparator.
//!
//! ## Usage
//! ```bash
//! # Score two images and review them when they differ
//! imgcompare before.jpg after.jpg
//!
//! # Score only, as JSON
//! imgcompare before.jpg after.jpg --no-interactive --output json
//!
//! # Replay a fixed key sequence
//! imgcompare before.jpg after.jpg --keys "+++d--"
//! ```

use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};
use console::{style, Term};
use split_view_compare::core::buffer::{PixelBuffer, PixelFormat};
use split_view_compare::core::codec;
use split_view_compare::core::display::{FileSurface, KeySource, ScriptedKeys, TerminalKeys};
use split_view_compare::core::session::{
    CompareConfig, Comparison, Session, SessionOutcome, DEFAULT_WINDOW_NAME,
};
use split_view_compare::error::{CodecError, Result};
use split_view_compare::events::EventChannel;
use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;

/// Split View Compare - score two images and inspect where they differ
#[derive(Parser, Debug)]
#[command(name = "imgcompare")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// First image
    image1: PathBuf,

    /// Second image
    image2: PathBuf,

    /// Byte differences below this count as similar
    #[arg(long, default_value_t = 10)]
    tolerance: u8,

    /// Similarity (0-1) at or above which no review is started
    #[arg(short, long, default_value_t = 0.90)]
    threshold: f64,

    /// Cut movement per +/- key press
    #[arg(long, default_value_t = 0.01)]
    step: f64,

    /// Name of the review window (frames go to <NAME>.out.jpg)
    #[arg(long, default_value = DEFAULT_WINDOW_NAME)]
    window: String,

    /// Directory the review frames are written to
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// JPEG quality of review frames
    #[arg(long, default_value_t = 90)]
    quality: u8,

    /// Output format of the score report
    #[arg(short, long, default_value = "pretty")]
    output: OutputFormat,

    /// Print the score and exit without reviewing
    #[arg(long)]
    no_interactive: bool,

    /// Replay these keys instead of reading the terminal
    #[arg(long)]
    keys: Option<String>,

    /// Trace every frame and key press
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Pretty,
    /// JSON output for scripting
    Json,
}

impl Cli {
    fn config(&self) -> CompareConfig {
        CompareConfig::new()
            .tolerance(self.tolerance)
            .acceptance_threshold(self.threshold)
            .step(self.step)
            .window_name(self.window.clone())
            .output_dir(self.output_dir.clone())
            .jpeg_quality(self.quality)
    }
}

/// Run the CLI
pub fn run() -> Result<ExitCode> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.print().ok();
            return Ok(ExitCode::SUCCESS);
        }
        Err(e) => {
            e.print().ok();
            return Ok(ExitCode::from(1));
        }
    };

    let session = Session::new(cli.config())?;
    let term = Term::stderr();

    if matches!(cli.output, OutputFormat::Pretty) && !cli.no_interactive {
        term.write_line("Key + : Increase clipping value").ok();
        term.write_line("Key - : Decrease clipping value").ok();
        term.write_line("Key d : Change direction of clipping").ok();
        term.write_line("Key ESC : Quit").ok();
    }

    let (first, second) = match load_pair(&cli) {
        Ok(pair) => pair,
        Err(e) => {
            term.write_line(&format!(
                "{} One or both images failed to load: {}",
                style("✗").red().bold(),
                e
            ))
            .ok();
            return Ok(ExitCode::FAILURE);
        }
    };

    let comparison = session.compare(&first, &second);
    match cli.output {
        OutputFormat::Pretty => print_pretty_score(&comparison),
        OutputFormat::Json => print_json_score(&cli, &comparison),
    }

    if cli.no_interactive || comparison.is_acceptable() {
        return Ok(ExitCode::SUCCESS);
    }

    let outcome = match &cli.keys {
        Some(script) => review(&cli, &session, &comparison, ScriptedKeys::from_script(script))?,
        None => review(&cli, &session, &comparison, TerminalKeys::new())?,
    };

    if let SessionOutcome::Reviewed {
        frames,
        final_state,
        ..
    } = outcome
    {
        term.write_line(&format!(
            "{} Reviewed {} frames, last cut {} at {:.0}%",
            style("✓").green().bold(),
            frames,
            final_state.orientation(),
            final_state.cut_fraction() * 100.0
        ))
        .ok();
    }

    Ok(ExitCode::SUCCESS)
}

fn load_pair(cli: &Cli) -> std::result::Result<(PixelBuffer, PixelBuffer), CodecError> {
    let first = codec::decode(&cli.image1, PixelFormat::Rgb8)?;
    let second = codec::decode(&cli.image2, PixelFormat::Rgb8)?;
    Ok((first, second))
}

fn review<K: KeySource>(
    cli: &Cli,
    session: &Session,
    comparison: &Comparison,
    keys: K,
) -> Result<SessionOutcome> {
    let config = session.config();
    let mut surface = FileSurface::from_config(config, keys);
    let frame_path = surface.frame_path(&config.window_name);

    Term::stderr()
        .write_line(&format!(
            "Review frames are written to {}",
            style(frame_path.display()).cyan()
        ))
        .ok();

    let (sender, receiver) = EventChannel::new();
    let verbose = cli.verbose;

    // Handle events in a separate thread
    let event_thread = thread::spawn(move || {
        let term = Term::stderr();
        for event in receiver.iter() {
            if verbose {
                term.write_line(&format!("  {}", style(event).dim())).ok();
            }
        }
    });

    let outcome = session.review(comparison, &mut surface, &sender);

    // Drop sender to signal event thread to finish
    drop(sender);
    event_thread.join().ok();

    outcome
}

fn print_pretty_score(comparison: &Comparison) {
    let report = &comparison.report;
    println!("Image similarity: {}%", report.similarity_percent);

    let term = Term::stdout();
    if report.verdict.is_acceptable() {
        term.write_line(&format!(
            "{} Images are sufficiently similar (>= {:.0}%).",
            style("✓").green().bold(),
            report.threshold * 100.0
        ))
        .ok();
    } else {
        term.write_line(&format!(
            "{} {} on a {}x{} grid",
            style("!").yellow().bold(),
            style(report.verdict).yellow(),
            report.compared_width,
            report.compared_height
        ))
        .ok();
    }
}

fn print_json_score(cli: &Cli, comparison: &Comparison) {
    let output = serde_json::json!({
        "image1": cli.image1,
        "image2": cli.image2,
        "report": comparison.report,
        "review_needed": !comparison.is_acceptable(),
    });

    match serde_json::to_string_pretty(&output) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize report: {}", e),
    }
}
