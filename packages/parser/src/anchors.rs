//! Structural anchors used to segment undelimited text.
//!
//! The extractor fuses table cells into a single string, so fields can only
//! be separated around patterns that cannot be confused with anything
//! else: a fixed-width numeric code, a `DD/MM/YYYY` date, a day/time token.
//! Each anchor is a named matcher here so it can be tested on its own.

use std::sync::LazyLock;

use academic_ingest_records_models::Origin;
use regex::{Match, Regex};

use crate::normalize::fold;

/// `{sequence}{origin}{5-digit plan code}{rest}` at the start of a
/// transcript row.
static RECORD_START_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?P<sequence>\d{1,6})\s*(?P<origin>examen|equivalencia|promoci[oó]n)\s*(?P<plan>\d{5})(?P<rest>.*)$",
    )
    .expect("valid regex")
});

/// Two digits, slash, two digits, slash, four digits.
static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{2}/\d{2}/\d{4}").expect("valid regex"));

/// Trailing run of digits and slashes (the acta reference before a date).
static TRAILING_ACTA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9/]+$").expect("valid regex"));

/// A composite day/time token (`Lu08a12`, `MaVi12a14`) or the remote
/// marker (`A distancia`).
static DAY_TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:[A-Z][a-z]){1,6}\d{1,2}\s?a\s?\d{1,2}|(?i:a\s*distancia\b)")
        .expect("valid regex")
});

/// A commission code, possibly flagged as not offered, ending the text in
/// front of a day/time token.
static COMMISSION_END_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\d{4}(?:\s*\(?\s*(?:no\s+se\s+dicta|no\s+ofertada)\s*\)?)?\s*$")
        .expect("valid regex")
});

/// A 4-digit plan code immediately followed by a letter.
static SUBJECT_START_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<code>\d{4})(?P<description>\p{L}.*)$").expect("valid regex")
});

/// `{code}{description}{commission}` in front of a day/time token.
static OFFERING_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?P<code>\d{4})\s*(?P<description>.+?)\s*(?P<commission>\d{4})(?:\s*\(?\s*(?P<marker>no\s+se\s+dicta|no\s+ofertada)\s*\)?)?$",
    )
    .expect("valid regex")
});

/// A commission with nothing in front of it (merged-cell rows).
static COMMISSION_ONLY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?P<commission>\d{4})(?:\s*\(?\s*(?P<marker>no\s+se\s+dicta|no\s+ofertada)\s*\)?)?$",
    )
    .expect("valid regex")
});

/// A line holding nothing but a 4-digit code.
static BARE_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}$").expect("valid regex"));

/// The start of a transcript row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordStart<'a> {
    pub sequence: u32,
    pub origin: Origin,
    /// Zero-padded, exactly as printed.
    pub plan_code: &'a str,
    /// Everything after the plan code, untrimmed.
    pub rest: &'a str,
}

/// Matches the start of a transcript row: leading digits, an origin
/// keyword, and a 5-digit plan code.
#[must_use]
pub fn record_start(line: &str) -> Option<RecordStart<'_>> {
    let caps = RECORD_START_RE.captures(line)?;
    let origin = match fold(&caps["origin"]).as_str() {
        "examen" => Origin::Examination,
        "equivalencia" => Origin::Equivalency,
        "promocion" => Origin::Promotion,
        _ => return None,
    };

    Some(RecordStart {
        sequence: caps["sequence"].parse().ok()?,
        origin,
        plan_code: caps.name("plan")?.as_str(),
        rest: caps.name("rest").map_or("", |m| m.as_str()),
    })
}

/// Finds the first `DD/MM/YYYY` date in `text`.
#[must_use]
pub fn find_date(text: &str) -> Option<Match<'_>> {
    DATE_RE.find(text)
}

/// Splits the text of a row that contains a date at `date_start` into the
/// name part and the tail (acta reference plus everything from the date
/// onward).
///
/// The acta is the trailing run of digits and slashes immediately before
/// the date. When there is none, the whole pre-date text is the name and
/// the tail starts at the date.
#[must_use]
pub fn split_name_and_tail(text: &str, date_start: usize) -> (&str, &str) {
    let before = text[..date_start].trim_end();
    let acta_start = TRAILING_ACTA_RE
        .find(before)
        .map_or(date_start, |m| m.start());
    (text[..acta_start.min(before.len())].trim(), &text[acta_start..])
}

/// Finds the first day/time token in an offering line.
///
/// A token only counts when it directly follows a commission code. The
/// same shapes can appear inside a description (`EDUCACION A DISTANCIA`),
/// where they are plain text.
#[must_use]
pub fn find_day_time(line: &str) -> Option<Match<'_>> {
    DAY_TIME_RE
        .find_iter(line)
        .find(|m| COMMISSION_END_RE.is_match(&line[..m.start()]))
}

/// Finds a weekday schedule token (`Lu08a12`) anywhere in the line,
/// regardless of what precedes it. Remote markers are not reported.
#[must_use]
pub fn find_loose_schedule(line: &str) -> Option<Match<'_>> {
    DAY_TIME_RE
        .find_iter(line)
        .find(|m| !fold(m.as_str()).contains("distancia"))
}

/// An explicit subject header: a 4-digit plan code followed by a letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubjectStart<'a> {
    pub plan_code: &'a str,
    pub description: &'a str,
}

/// Matches a line starting with a 4-digit plan code followed by a letter.
#[must_use]
pub fn subject_start(line: &str) -> Option<SubjectStart<'_>> {
    let caps = SUBJECT_START_RE.captures(line)?;
    Some(SubjectStart {
        plan_code: caps.name("code")?.as_str(),
        description: caps.name("description")?.as_str(),
    })
}

/// A commission code and whether it is flagged as not offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Commission<'a> {
    pub code: &'a str,
    pub not_offered: bool,
}

/// The header portion of an offering line (text before the day/time
/// token) when it states the subject explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OfferingPrefix<'a> {
    pub plan_code: &'a str,
    pub description: &'a str,
    pub commission: Commission<'a>,
}

/// Parses `{code}{description}{commission}`.
#[must_use]
pub fn offering_prefix(prefix: &str) -> Option<OfferingPrefix<'_>> {
    let caps = OFFERING_PREFIX_RE.captures(prefix.trim())?;
    Some(OfferingPrefix {
        plan_code: caps.name("code")?.as_str(),
        description: caps.name("description")?.as_str(),
        commission: Commission {
            code: caps.name("commission")?.as_str(),
            not_offered: caps.name("marker").is_some(),
        },
    })
}

/// Parses a prefix made only of a commission code.
#[must_use]
pub fn commission_only(prefix: &str) -> Option<Commission<'_>> {
    let caps = COMMISSION_ONLY_RE.captures(prefix.trim())?;
    Some(Commission {
        code: caps.name("commission")?.as_str(),
        not_offered: caps.name("marker").is_some(),
    })
}

/// Whether the line is nothing but a 4-digit code.
#[must_use]
pub fn is_bare_code(line: &str) -> bool {
    BARE_CODE_RE.is_match(line.trim())
}

/// Whether the line looks like a (possibly wrapped) URL printed by the
/// browser the schedule was saved from.
#[must_use]
pub fn is_url_fragment(line: &str) -> bool {
    let lower = line.to_ascii_lowercase();
    ["http", "www.", "://", ".edu", ".com", ".php", ".html", "?id="]
        .iter()
        .any(|needle| lower.contains(needle))
}
