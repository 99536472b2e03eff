//! Transcript segmentation.
//!
//! A transcript row is printed as `{sequence}{origin}{plan}{name}{acta}
//! {date}{grade}` with no delimiters, and long subject names wrap onto
//! following lines:
//!
//! ```text
//! 26Equivalencia03624
//! INTRODUCCION A LOS SISTEMAS DE
//! INFORMACION
//! 0431/202221/12/20229
//! ```
//!
//! The segmenter is a two-state machine. A record-start line always opens a
//! new block; the first line containing a date closes it. Lines in between
//! are name fragments. A block that never reaches a date is discarded,
//! never emitted partially.

use academic_ingest_records_models::{Origin, ParsedTranscriptRecord};

use crate::anchors::{self, RecordStart};
use crate::config::{ConfigError, ParserConfig};
use crate::normalize::{collapse_whitespace, normalize_plan_code};
use crate::preprocess::{LinePreprocessor, RawLine};
use crate::report::{ParseReport, RowOutcome, SkipReason};
use crate::tail;

/// Parses transcript text into records.
#[derive(Debug, Clone)]
pub struct TranscriptParser {
    preprocessor: LinePreprocessor,
}

impl Default for TranscriptParser {
    fn default() -> Self {
        Self {
            preprocessor: LinePreprocessor::transcript(&[])
                .expect("built-in transcript noise patterns are valid"),
        }
    }
}

impl TranscriptParser {
    /// Builds a parser using the config's extra transcript noise patterns.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Pattern`] if an extra pattern fails to
    /// compile.
    pub fn new(config: &ParserConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            preprocessor: LinePreprocessor::transcript(&config.transcript_noise_patterns)?,
        })
    }

    /// Parses `text`, returning only the records.
    #[must_use]
    pub fn parse(&self, text: &str) -> Vec<ParsedTranscriptRecord> {
        self.parse_report(text).into_records()
    }

    /// Parses `text`, returning the records and the skipped rows.
    #[must_use]
    pub fn parse_report(&self, text: &str) -> ParseReport<ParsedTranscriptRecord> {
        let mut segmenter = Segmenter::default();
        for line in self.preprocessor.lines(text) {
            segmenter.step(line);
        }
        let report = segmenter.finish();

        log::debug!(
            "Transcript: {} record(s), {} skipped",
            report.records.len(),
            report.skipped.len()
        );

        report
    }
}

/// A transcript record being assembled.
#[derive(Debug)]
struct Block {
    start_line: usize,
    sequence: u32,
    origin: Origin,
    plan_code: String,
    fragments: Vec<String>,
}

impl Block {
    fn open(line: usize, start: &RecordStart<'_>) -> Self {
        Self {
            start_line: line,
            sequence: start.sequence,
            origin: start.origin,
            plan_code: normalize_plan_code(start.plan_code),
            fragments: Vec::new(),
        }
    }

    fn push_fragment(&mut self, text: &str) {
        let fragment = collapse_whitespace(text);
        if !fragment.is_empty() {
            self.fragments.push(fragment);
        }
    }

    fn summary(&self) -> String {
        format!(
            "{}{}{} {}",
            self.sequence,
            self.origin,
            self.plan_code,
            self.fragments.join(" ")
        )
    }

    /// Decodes `tail` and builds the final record.
    fn close(self, tail: &str, line: usize) -> RowOutcome<ParsedTranscriptRecord> {
        let Some(decoded) = tail::decode(tail) else {
            return RowOutcome::Skipped(SkipReason::missing_date(line, tail));
        };

        RowOutcome::Parsed(ParsedTranscriptRecord {
            sequence: self.sequence,
            origin: self.origin,
            plan_code: self.plan_code,
            name: self.fragments.join(" "),
            date: decoded.date.to_string(),
            receipt: decoded.receipt.to_string(),
            grade: decoded.grade,
            status: self.origin.status(),
        })
    }
}

#[derive(Debug, Default)]
enum State {
    #[default]
    Outside,
    Accumulating(Block),
}

#[derive(Default)]
struct Segmenter {
    state: State,
    report: ParseReport<ParsedTranscriptRecord>,
}

impl Segmenter {
    fn step(&mut self, line: RawLine<'_>) {
        if let Some(start) = anchors::record_start(line.text) {
            self.start_block(line.number, &start);
            return;
        }

        match std::mem::take(&mut self.state) {
            State::Outside => {
                log::trace!("Ignoring line {} outside a record: {}", line.number, line.text);
            }
            State::Accumulating(mut block) => {
                if let Some(date) = anchors::find_date(line.text) {
                    let (name, tail) = anchors::split_name_and_tail(line.text, date.start());
                    block.push_fragment(name);
                    self.report.push(block.close(tail, line.number));
                } else {
                    block.push_fragment(line.text);
                    self.state = State::Accumulating(block);
                }
            }
        }
    }

    fn start_block(&mut self, line: usize, start: &RecordStart<'_>) {
        if let State::Accumulating(open) = std::mem::take(&mut self.state) {
            self.report.push(RowOutcome::Skipped(SkipReason::superseded(
                open.start_line,
                &open.summary(),
            )));
        }

        let mut block = Block::open(line, start);

        if let Some(date) = anchors::find_date(start.rest) {
            let (name, tail) = anchors::split_name_and_tail(start.rest, date.start());
            block.push_fragment(name);
            self.report.push(block.close(tail, line));
        } else {
            block.push_fragment(start.rest);
            log::trace!("Opened record at line {line}, accumulating name");
            self.state = State::Accumulating(block);
        }
    }

    fn finish(mut self) -> ParseReport<ParsedTranscriptRecord> {
        if let State::Accumulating(open) = std::mem::take(&mut self.state) {
            self.report.push(RowOutcome::Skipped(SkipReason::unterminated(
                open.start_line,
                &open.summary(),
            )));
        }
        self.report
    }
}
