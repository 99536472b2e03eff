//! Row-level outcomes.
//!
//! A malformed row is never an error: it is recorded as a [`SkipReason`],
//! logged, and scanning continues. Call-level failures (the document could
//! not be read at all) use [`academic_ingest_pdf::DocumentError`] instead.

use serde::Serialize;

/// Maximum number of characters of source text kept in a skip diagnostic.
const EXCERPT_CHARS: usize = 80;

/// Why a row produced no output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    /// A transcript block was still open when the input ended.
    UnterminatedBlock { line: usize, excerpt: String },
    /// A transcript block was still open when the next record started.
    SupersededBlock { line: usize, excerpt: String },
    /// A transcript tail's `DD/MM/YYYY` date is not a real calendar day
    /// (e.g. `31/02/2022`). Blocks only close on a line with a date-shaped
    /// match, so a tail with no date at all cannot reach this.
    MissingDate { line: usize, excerpt: String },
    /// An offering row had no explicit header and none could be inherited.
    UnresolvedHeader { line: usize, excerpt: String },
    /// An offering row's commission is flagged as not offered.
    NotOffered { line: usize, excerpt: String },
}

impl SkipReason {
    pub(crate) fn unterminated(line: usize, text: &str) -> Self {
        Self::UnterminatedBlock {
            line,
            excerpt: excerpt(text),
        }
    }

    pub(crate) fn superseded(line: usize, text: &str) -> Self {
        Self::SupersededBlock {
            line,
            excerpt: excerpt(text),
        }
    }

    pub(crate) fn missing_date(line: usize, text: &str) -> Self {
        Self::MissingDate {
            line,
            excerpt: excerpt(text),
        }
    }

    pub(crate) fn unresolved_header(line: usize, text: &str) -> Self {
        Self::UnresolvedHeader {
            line,
            excerpt: excerpt(text),
        }
    }

    pub(crate) fn not_offered(line: usize, text: &str) -> Self {
        Self::NotOffered {
            line,
            excerpt: excerpt(text),
        }
    }

    /// 1-based line number the skipped row started on.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UnterminatedBlock { line, .. }
            | Self::SupersededBlock { line, .. }
            | Self::MissingDate { line, .. }
            | Self::UnresolvedHeader { line, .. }
            | Self::NotOffered { line, .. } => *line,
        }
    }

    /// Source text of the skipped row, truncated.
    #[must_use]
    pub fn excerpt(&self) -> &str {
        match self {
            Self::UnterminatedBlock { excerpt, .. }
            | Self::SupersededBlock { excerpt, .. }
            | Self::MissingDate { excerpt, .. }
            | Self::UnresolvedHeader { excerpt, .. }
            | Self::NotOffered { excerpt, .. } => excerpt,
        }
    }

    /// Whether this skip is a normal feature of the document rather than a
    /// sign of malformed input.
    #[must_use]
    pub const fn is_expected(&self) -> bool {
        matches!(self, Self::NotOffered { .. })
    }
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let what = match self {
            Self::UnterminatedBlock { .. } => "record never reached a dated tail",
            Self::SupersededBlock { .. } => "record interrupted by the next record",
            Self::MissingDate { .. } => "tail has no valid DD/MM/YYYY date",
            Self::UnresolvedHeader { .. } => "no subject header to attach row to",
            Self::NotOffered { .. } => "commission not offered",
        };
        write!(f, "line {}: {what}: {}", self.line(), self.excerpt())
    }
}

/// The result of decoding one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome<T> {
    Parsed(T),
    Skipped(SkipReason),
}

/// Everything a parse call produced: records in document order plus the
/// rows that were skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseReport<T> {
    pub records: Vec<T>,
    pub skipped: Vec<SkipReason>,
}

impl<T> Default for ParseReport<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

impl<T> ParseReport<T> {
    /// Records an outcome, logging skips.
    pub fn push(&mut self, outcome: RowOutcome<T>) {
        match outcome {
            RowOutcome::Parsed(record) => self.records.push(record),
            RowOutcome::Skipped(reason) => {
                if reason.is_expected() {
                    log::debug!("Skipping row: {reason}");
                } else {
                    log::warn!("Skipping malformed row: {reason}");
                }
                self.skipped.push(reason);
            }
        }
    }

    /// Drops the diagnostics and returns only the records.
    #[must_use]
    pub fn into_records(self) -> Vec<T> {
        self.records
    }
}

fn excerpt(text: &str) -> String {
    let text = text.trim();
    match text.char_indices().nth(EXCERPT_CHARS) {
        Some((cut, _)) => format!("{}…", &text[..cut]),
        None => text.to_string(),
    }
}
