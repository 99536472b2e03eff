//! Offering schedule segmentation.
//!
//! Each schedule row is printed as `{plan}{description}{commission}
//! {day/time}{modality and campus}` with no delimiters. The source table
//! uses merged cells, so a subject is usually stated once and the rows for
//! its other commissions start directly with the commission code:
//!
//! ```text
//! 0902INGLES NIVEL II1300Lu08a12 Semipresencial
//! 1600Ma14a18 Semipresencial
//! ```
//!
//! The segmenter carries the last resolved subject header across lines and
//! a separate pending header for descriptions that wrap before the first
//! commission row.

use academic_ingest_records_models::{
    DayLabel, Modality, ParsedOfferingSlot, PeriodLabel, UNKNOWN_LOCATION,
};

use crate::anchors::{self, Commission};
use crate::config::{Campus, ConfigError, ParserConfig};
use crate::day_time::{self, DayTime};
use crate::normalize::{collapse_whitespace, fold, normalize_plan_code, strip_folded_suffix};
use crate::preprocess::{LinePreprocessor, RawLine};
use crate::report::{ParseReport, RowOutcome, SkipReason};

/// Parses offering schedule text into slots.
#[derive(Debug, Clone)]
pub struct OfferingParser {
    preprocessor: LinePreprocessor,
    campuses: Vec<Campus>,
}

impl Default for OfferingParser {
    fn default() -> Self {
        Self {
            preprocessor: LinePreprocessor::offering(&[])
                .expect("built-in offering noise patterns are valid"),
            campuses: ParserConfig::default().campuses,
        }
    }
}

impl OfferingParser {
    /// Builds a parser using the config's extra offering noise patterns and
    /// campus list.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Pattern`] if an extra pattern fails to
    /// compile.
    pub fn new(config: &ParserConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            preprocessor: LinePreprocessor::offering(&config.offering_noise_patterns)?,
            campuses: config.campuses.clone(),
        })
    }

    /// Parses `text`, returning only the slots.
    #[must_use]
    pub fn parse(&self, text: &str) -> Vec<ParsedOfferingSlot> {
        self.parse_report(text).into_records()
    }

    /// Parses `text`, returning the slots and the skipped rows.
    #[must_use]
    pub fn parse_report(&self, text: &str) -> ParseReport<ParsedOfferingSlot> {
        let mut segmenter = Segmenter::new(&self.campuses);
        for line in self.preprocessor.lines(text) {
            segmenter.step(line);
        }

        log::debug!(
            "Offering: {} slot(s), {} skipped",
            segmenter.report.records.len(),
            segmenter.report.skipped.len()
        );

        segmenter.report
    }
}

/// A subject's plan code and description.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SubjectHeader {
    plan_code: String,
    description: String,
}

impl SubjectHeader {
    fn new(plan_code: &str, description: &str, campuses: &[Campus]) -> Self {
        Self {
            plan_code: normalize_plan_code(plan_code),
            description: clean_description(description, campuses),
        }
    }

    fn append(&mut self, text: &str, campuses: &[Campus]) {
        let joined = format!("{} {text}", self.description);
        self.description = clean_description(&joined, campuses);
    }
}

/// Header context carried from line to line within one document.
#[derive(Debug, Default)]
struct HeaderState {
    /// Header inherited by commission-only rows.
    last: Option<SubjectHeader>,
    /// Header whose description may still continue on the next line.
    pending: Option<SubjectHeader>,
}

struct Segmenter<'c> {
    campuses: &'c [Campus],
    headers: HeaderState,
    report: ParseReport<ParsedOfferingSlot>,
}

impl<'c> Segmenter<'c> {
    fn new(campuses: &'c [Campus]) -> Self {
        Self {
            campuses,
            headers: HeaderState::default(),
            report: ParseReport::default(),
        }
    }

    fn step(&mut self, line: RawLine<'_>) {
        if let Some(token) = anchors::find_day_time(line.text) {
            self.schedule_row(
                line,
                &line.text[..token.start()],
                token.as_str(),
                &line.text[token.end()..],
            );
        } else if anchors::find_loose_schedule(line.text).is_some() {
            // A schedule with no commission in front of it cannot be placed.
            self.headers.pending = None;
            self.report.push(RowOutcome::Skipped(SkipReason::unresolved_header(
                line.number,
                line.text,
            )));
        } else {
            self.header_row(line);
        }
    }

    /// A line without a day/time token: either a new subject header or the
    /// continuation of a wrapped description.
    fn header_row(&mut self, line: RawLine<'_>) {
        if let Some(start) = anchors::subject_start(line.text) {
            let header = SubjectHeader::new(start.plan_code, start.description, self.campuses);
            log::trace!(
                "Line {}: header {} {:?}",
                line.number,
                header.plan_code,
                header.description
            );
            self.headers.last = Some(header.clone());
            self.headers.pending = Some(header);
            return;
        }

        match &mut self.headers.pending {
            Some(pending)
                if !anchors::is_bare_code(line.text) && !anchors::is_url_fragment(line.text) =>
            {
                pending.append(line.text, self.campuses);
                self.headers.last = Some(pending.clone());
            }
            _ => log::trace!("Ignoring line {}: {}", line.number, line.text),
        }
    }

    /// A line with a day/time token: resolve its header, then emit one slot
    /// per meeting.
    fn schedule_row(&mut self, line: RawLine<'_>, prefix: &str, token: &str, suffix: &str) {
        self.headers.pending = None;

        let Some((header, commission)) = self.resolve_header(prefix) else {
            self.report.push(RowOutcome::Skipped(SkipReason::unresolved_header(
                line.number,
                line.text,
            )));
            return;
        };
        self.headers.last = Some(header.clone());

        if commission.not_offered {
            self.report.push(RowOutcome::Skipped(SkipReason::not_offered(
                line.number,
                line.text,
            )));
            return;
        }

        let decoded = day_time::decode(token);
        let mut modality = classify_modality(suffix);
        if decoded == DayTime::Remote && modality == Modality::Unknown {
            modality = Modality::Remote;
        }
        let location = classify_location(suffix, self.campuses);

        let meetings = match decoded {
            DayTime::Remote => vec![(DayLabel::Remote, PeriodLabel::Unscheduled)],
            DayTime::Scheduled(meetings) if meetings.is_empty() => {
                log::debug!(
                    "Line {}: undecodable day/time token {token:?}, emitting placeholder",
                    line.number
                );
                vec![(DayLabel::Unknown, PeriodLabel::Unknown)]
            }
            DayTime::Scheduled(meetings) => meetings.iter().map(|m| (m.day, m.period)).collect(),
        };

        for (day, period) in meetings {
            self.report.push(RowOutcome::Parsed(ParsedOfferingSlot {
                plan_code: header.plan_code.clone(),
                description: header.description.clone(),
                day,
                period,
                commission: commission.code.to_string(),
                modality,
                location: location.clone(),
                raw_token: token.to_string(),
            }));
        }
    }

    /// Resolves the header for a schedule row from its own prefix, or from
    /// the carried header when the prefix is only a commission code.
    fn resolve_header<'p>(&self, prefix: &'p str) -> Option<(SubjectHeader, Commission<'p>)> {
        if let Some(explicit) = anchors::offering_prefix(prefix) {
            let header =
                SubjectHeader::new(explicit.plan_code, explicit.description, self.campuses);
            return Some((header, explicit.commission));
        }

        let commission = anchors::commission_only(prefix)?;
        let inherited = self.headers.last.clone()?;
        Some((inherited, commission))
    }
}

/// Collapses whitespace and removes a trailing campus name.
fn clean_description(description: &str, campuses: &[Campus]) -> String {
    let collapsed = collapse_whitespace(description);
    campuses
        .iter()
        .find_map(|campus| strip_folded_suffix(&collapsed, &campus.keyword))
        .map_or_else(|| collapsed.clone(), str::to_string)
}

/// Maps the text after a day/time token to a modality.
///
/// Only letters are compared, so `Semi-presencial` and `Semi presencial`
/// classify the same as `Semipresencial`.
fn classify_modality(suffix: &str) -> Modality {
    let folded: String = fold(suffix)
        .chars()
        .filter(char::is_ascii_alphabetic)
        .collect();
    if folded.contains("semipresencial") {
        Modality::Hybrid
    } else if folded.contains("presencial") {
        Modality::InPerson
    } else if folded.contains("virtual") {
        Modality::Virtual
    } else if folded.contains("distancia") || folded.contains("remot") {
        Modality::Remote
    } else {
        Modality::Unknown
    }
}

/// Maps the text after a day/time token to a campus label.
fn classify_location(suffix: &str, campuses: &[Campus]) -> String {
    let folded = fold(suffix);
    campuses
        .iter()
        .find(|campus| folded.contains(&fold(&campus.keyword)))
        .map_or_else(|| UNKNOWN_LOCATION.to_string(), |campus| campus.label.clone())
}
