#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Segmentation and decoding engine for extracted transcript and
//! course-offering text.
//!
//! PDF extraction flattens the tables of both documents into lines with no
//! field delimiters and unpredictable wrapping. This crate recovers
//! structured records from that text:
//!
//! - [`transcript`] turns an academic transcript into
//!   [`ParsedTranscriptRecord`]s.
//! - [`offering`] turns a course-offering schedule into
//!   [`ParsedOfferingSlot`]s, one per weekly meeting.
//!
//! Both pipelines are pure functions of their input text. All state lives
//! inside a single call, so parsers can be shared across threads freely.
//! Malformed rows are skipped and reported (see [`report`]); only a
//! document that cannot be extracted at all is an error.

pub mod anchors;
pub mod config;
pub mod day_time;
pub mod normalize;
pub mod offering;
pub mod preprocess;
pub mod report;
pub mod tail;
pub mod transcript;

pub use academic_ingest_pdf::DocumentError;
pub use academic_ingest_records_models::{ParsedOfferingSlot, ParsedTranscriptRecord};
pub use config::{ConfigError, ParserConfig};
pub use offering::OfferingParser;
pub use report::{ParseReport, RowOutcome, SkipReason};
pub use transcript::TranscriptParser;

/// Parses transcript text with the built-in configuration.
#[must_use]
pub fn parse_transcript(text: &str) -> Vec<ParsedTranscriptRecord> {
    TranscriptParser::default().parse(text)
}

/// Parses transcript text, keeping the skipped-row diagnostics.
#[must_use]
pub fn parse_transcript_report(text: &str) -> ParseReport<ParsedTranscriptRecord> {
    TranscriptParser::default().parse_report(text)
}

/// Parses offering schedule text with the built-in configuration.
#[must_use]
pub fn parse_offering(text: &str) -> Vec<ParsedOfferingSlot> {
    OfferingParser::default().parse(text)
}

/// Parses offering schedule text, keeping the skipped-row diagnostics.
#[must_use]
pub fn parse_offering_report(text: &str) -> ParseReport<ParsedOfferingSlot> {
    OfferingParser::default().parse_report(text)
}

/// Extracts a transcript PDF and parses it.
///
/// # Errors
///
/// Returns [`DocumentError`] if the PDF cannot be extracted. No partial
/// output is returned in that case.
pub fn parse_transcript_pdf(bytes: &[u8]) -> Result<Vec<ParsedTranscriptRecord>, DocumentError> {
    let text = academic_ingest_pdf::extract_text(bytes)?;
    Ok(parse_transcript(&text))
}

/// Extracts an offering schedule PDF and parses it.
///
/// # Errors
///
/// Returns [`DocumentError`] if the PDF cannot be extracted. No partial
/// output is returned in that case.
pub fn parse_offering_pdf(bytes: &[u8]) -> Result<Vec<ParsedOfferingSlot>, DocumentError> {
    let text = academic_ingest_pdf::extract_text(bytes)?;
    Ok(parse_offering(&text))
}

#[cfg(test)]
mod tests {
    use academic_ingest_records_models::{DayLabel, PeriodLabel};

    use super::*;

    const TRANSCRIPT: &str = "\
UNIVERSIDAD TECNOLÓGICA NACIONAL
Facultad Regional Buenos Aires
Alumno: PEREZ, JUAN    Legajo: 123456-7
Nro Origen Código Materia Acta Fecha Nota
2Promocion01026TECNOLOGIA INGENIERIA Y SOCIEDAD3899202029/08/20208
Página 1 de 2
UNIVERSIDAD TECNOLÓGICA NACIONAL
10Equivalencia00901INGLES NIVEL I0372/202111/08/2021
26Equivalencia03624
INTRODUCCION A LOS SISTEMAS DE
INFORMACION
0431/202221/12/20229
Página 2 de 2
";

    const OFFERING: &str = "\
16/10/2026, 10:23 Oferta de materias
Inicio
Oferta académica
Código Materia Comisión Horario Modalidad
0902INGLES NIVEL II1300Lu08a12 Semipresencial
1600Ma14a18 Semipresencial
0951ANALISIS MATEMATICO I2100MaVi12a14 Presencial Medrano
0950QUIMICA GENERAL1100A distancia
1/1
";

    #[test]
    fn boilerplate_between_records_yields_only_records() {
        let records = parse_transcript(
            "1Examen00950QUIMICA1100/202001/03/20209\n\
             Página 1 de 2\n\
             UNIVERSIDAD TECNOLÓGICA NACIONAL\n\
             Facultad Regional Buenos Aires\n\
             2Examen00951ANALISIS MATEMATICO I1300/202101/03/20215\n",
        );
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].plan_code, "950");
        assert_eq!(records[1].plan_code, "951");
    }

    #[test]
    fn full_transcript_in_document_order() {
        let report = parse_transcript_report(TRANSCRIPT);
        assert!(report.skipped.is_empty(), "{:?}", report.skipped);

        let codes: Vec<&str> = report.records.iter().map(|r| r.plan_code.as_str()).collect();
        assert_eq!(codes, vec!["1026", "901", "3624"]);
        assert_eq!(report.records[1].grade, None);
        assert_eq!(
            report.records[2].name,
            "INTRODUCCION A LOS SISTEMAS DE INFORMACION"
        );
    }

    #[test]
    fn full_offering_schedule() {
        let slots = parse_offering(OFFERING);
        let summary: Vec<(&str, &str, DayLabel, PeriodLabel)> = slots
            .iter()
            .map(|s| (s.plan_code.as_str(), s.commission.as_str(), s.day, s.period))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("902", "1300", DayLabel::Monday, PeriodLabel::Morning),
                ("902", "1600", DayLabel::Tuesday, PeriodLabel::Afternoon),
                ("951", "2100", DayLabel::Tuesday, PeriodLabel::Afternoon),
                ("951", "2100", DayLabel::Friday, PeriodLabel::Afternoon),
                ("950", "1100", DayLabel::Remote, PeriodLabel::Unscheduled),
            ]
        );
    }

    #[test]
    fn parsing_is_idempotent() {
        assert_eq!(parse_transcript(TRANSCRIPT), parse_transcript(TRANSCRIPT));
        assert_eq!(parse_offering(OFFERING), parse_offering(OFFERING));
    }

    #[test]
    fn parsers_are_shareable_across_threads() {
        let parser = std::sync::Arc::new(TranscriptParser::default());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let parser = std::sync::Arc::clone(&parser);
                std::thread::spawn(move || parser.parse(TRANSCRIPT))
            })
            .collect();
        let expected = parse_transcript(TRANSCRIPT);
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    }

    #[test]
    fn unrecognizable_text_is_empty_not_error() {
        assert!(parse_transcript("Hola\nnada que ver aqui\n").is_empty());
        assert!(parse_offering("Página 1 de 1\n").is_empty());
    }

    #[test]
    fn invalid_pdf_is_a_document_error() {
        assert!(matches!(
            parse_transcript_pdf(b"%PDF-garbage"),
            Err(DocumentError::InvalidDocument { .. })
        ));
        assert!(matches!(
            parse_offering_pdf(&[]),
            Err(DocumentError::InvalidDocument { .. })
        ));
    }
}
