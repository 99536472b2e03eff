#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for parsing transcripts and course-offering schedules.
//!
//! Reads a PDF (or already-extracted text with `--text`) and prints the
//! parsed records as JSON on stdout. Set `RUST_LOG=debug` to see skipped
//! rows and segmentation decisions.

use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::time::Instant;

use academic_ingest_parser::{OfferingParser, ParseReport, ParserConfig, TranscriptParser};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

#[derive(Parser)]
#[command(
    name = "academic_ingest",
    about = "Parse academic transcripts and course-offering schedules"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse an academic transcript into approved-subject records
    Transcript(InputArgs),
    /// Parse a course-offering schedule into one slot per weekly meeting
    Offering(InputArgs),
}

#[derive(Args)]
struct InputArgs {
    /// Transcript or schedule file (PDF unless `--text` is given)
    file: PathBuf,
    /// Treat the input as already-extracted text instead of a PDF
    #[arg(long)]
    text: bool,
    /// TOML file with extra noise patterns and campus keywords
    #[arg(long)]
    config: Option<PathBuf>,
    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
    /// Emit `{ records, skipped }` instead of only the records
    #[arg(long)]
    report: bool,
}

impl InputArgs {
    fn config(&self) -> Result<ParserConfig, Box<dyn std::error::Error>> {
        Ok(match &self.config {
            Some(path) => ParserConfig::from_path(path)?,
            None => ParserConfig::default(),
        })
    }

    fn read_text(&self) -> Result<String, Box<dyn std::error::Error>> {
        if self.text {
            return Ok(std::fs::read_to_string(&self.file)?);
        }
        Ok(academic_ingest_pdf::extract_text_from_path(&self.file)?)
    }

    fn emit<T: Serialize>(&self, report: &ParseReport<T>) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = std::io::stdout().lock();
        match (self.report, self.pretty) {
            (true, true) => serde_json::to_writer_pretty(&mut stdout, report)?,
            (true, false) => serde_json::to_writer(&mut stdout, report)?,
            (false, true) => serde_json::to_writer_pretty(&mut stdout, &report.records)?,
            (false, false) => serde_json::to_writer(&mut stdout, &report.records)?,
        }
        writeln!(stdout)?;
        Ok(())
    }
}

fn log_totals<T>(kind: &str, path: &Path, report: &ParseReport<T>, start: Instant) {
    let unexpected = report.skipped.iter().filter(|s| !s.is_expected()).count();
    log::info!(
        "{kind} {}: {} record(s), {} skipped ({unexpected} malformed) in {:.2?}",
        path.display(),
        report.records.len(),
        report.skipped.len(),
        start.elapsed()
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Transcript(args) => {
            let start = Instant::now();
            let parser = TranscriptParser::new(&args.config()?)?;
            let report = parser.parse_report(&args.read_text()?);
            log_totals("Transcript", &args.file, &report, start);
            args.emit(&report)?;
        }
        Commands::Offering(args) => {
            let start = Instant::now();
            let parser = OfferingParser::new(&args.config()?)?;
            let report = parser.parse_report(&args.read_text()?);
            log_totals("Offering", &args.file, &report, start);
            args.emit(&report)?;
        }
    }

    Ok(())
}
