#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Structured transcript and course-offering record types.
//!
//! These are the output units of the segmentation engine in
//! `academic_ingest_parser`. Every label set is closed and modelled as an
//! enum whose display and serialized form is the label printed in the
//! source documents (e.g. [`PeriodLabel::Morning`] is `"Mañana"`).

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// How a transcript entry was recorded.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum Origin {
    /// Passed through a final examination (`Examen`).
    #[serde(rename = "Examen")]
    #[strum(serialize = "Examen")]
    Examination,
    /// Credited from another plan or institution (`Equivalencia`).
    #[serde(rename = "Equivalencia")]
    #[strum(serialize = "Equivalencia")]
    Equivalency,
    /// Passed by course promotion, without a final exam (`Promocion`).
    #[serde(rename = "Promocion")]
    #[strum(serialize = "Promocion")]
    Promotion,
}

impl Origin {
    /// Returns the explicit status this origin maps to, if any.
    ///
    /// Only equivalencies carry a status; every other origin is `None`.
    #[must_use]
    pub const fn status(self) -> Option<TranscriptStatus> {
        match self {
            Self::Equivalency => Some(TranscriptStatus::Equivalency),
            Self::Examination | Self::Promotion => None,
        }
    }
}

/// Explicit status attached to a transcript record.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum TranscriptStatus {
    #[strum(serialize = "EQUIVALENCIA")]
    #[serde(rename = "EQUIVALENCIA")]
    Equivalency,
}

/// A single decoded transcript entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedTranscriptRecord {
    /// Row number printed in front of the entry.
    pub sequence: u32,
    /// How the entry was recorded.
    pub origin: Origin,
    /// Plan code with leading zeros stripped (never empty).
    pub plan_code: String,
    /// Full subject name, wrapped fragments joined with single spaces.
    pub name: String,
    /// Date exactly as printed, `DD/MM/YYYY`.
    pub date: String,
    /// Acta / receipt reference preceding the date. May contain a slash
    /// and may be empty.
    pub receipt: String,
    /// Final grade, absent when the document prints none.
    pub grade: Option<u32>,
    /// Only present for equivalencies.
    pub status: Option<TranscriptStatus>,
}

/// Weekday an offering slot takes place on.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum DayLabel {
    #[serde(rename = "Lunes")]
    #[strum(serialize = "Lunes")]
    Monday,
    #[serde(rename = "Martes")]
    #[strum(serialize = "Martes")]
    Tuesday,
    #[serde(rename = "Miércoles")]
    #[strum(serialize = "Miércoles")]
    Wednesday,
    #[serde(rename = "Jueves")]
    #[strum(serialize = "Jueves")]
    Thursday,
    #[serde(rename = "Viernes")]
    #[strum(serialize = "Viernes")]
    Friday,
    #[serde(rename = "Sábado")]
    #[strum(serialize = "Sábado")]
    Saturday,
    /// Remote course with no weekly meeting.
    #[serde(rename = "A distancia")]
    #[strum(serialize = "A distancia")]
    Remote,
    /// The day/time token could not be decoded.
    #[serde(rename = "Desconocido")]
    #[strum(serialize = "Desconocido")]
    Unknown,
}

impl DayLabel {
    /// Maps a two-letter weekday abbreviation (`Lu`, `Ma`, `Mi`, `Ju`,
    /// `Vi`, `Sa`) to its day.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "Lu" => Some(Self::Monday),
            "Ma" => Some(Self::Tuesday),
            "Mi" => Some(Self::Wednesday),
            "Ju" => Some(Self::Thursday),
            "Vi" => Some(Self::Friday),
            "Sa" => Some(Self::Saturday),
            _ => None,
        }
    }

}

/// Part of the day an offering slot starts in.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum PeriodLabel {
    #[serde(rename = "Mañana")]
    #[strum(serialize = "Mañana")]
    Morning,
    #[serde(rename = "Tarde")]
    #[strum(serialize = "Tarde")]
    Afternoon,
    #[serde(rename = "Noche")]
    #[strum(serialize = "Noche")]
    Evening,
    /// Remote course with no schedule.
    #[serde(rename = "Sin horario")]
    #[strum(serialize = "Sin horario")]
    Unscheduled,
    #[serde(rename = "Desconocido")]
    #[strum(serialize = "Desconocido")]
    Unknown,
}

impl PeriodLabel {
    /// Classifies a period from the hour a class starts at.
    ///
    /// Before 12 is morning, before 19 is afternoon, anything later is
    /// evening.
    #[must_use]
    pub const fn from_start_hour(hour: u32) -> Self {
        if hour < 12 {
            Self::Morning
        } else if hour < 19 {
            Self::Afternoon
        } else {
            Self::Evening
        }
    }
}

/// How an offering slot is delivered.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum Modality {
    #[serde(rename = "Presencial")]
    #[strum(serialize = "Presencial")]
    InPerson,
    #[serde(rename = "Semipresencial")]
    #[strum(serialize = "Semipresencial")]
    Hybrid,
    #[serde(rename = "Virtual")]
    #[strum(serialize = "Virtual")]
    Virtual,
    #[serde(rename = "A distancia")]
    #[strum(serialize = "A distancia")]
    Remote,
    #[serde(rename = "Desconocida")]
    #[strum(serialize = "Desconocida")]
    Unknown,
}

/// Location label used when no campus keyword matches.
pub const UNKNOWN_LOCATION: &str = "Desconocida";

/// A single weekly meeting of a commission, as listed in the offering
/// schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedOfferingSlot {
    /// Plan code with leading zeros stripped (never empty).
    pub plan_code: String,
    /// Subject description with whitespace collapsed and any trailing
    /// campus name removed.
    pub description: String,
    pub day: DayLabel,
    pub period: PeriodLabel,
    /// Commission (section) code.
    pub commission: String,
    pub modality: Modality,
    /// Campus label, or [`UNKNOWN_LOCATION`].
    pub location: String,
    /// The day/time token this slot was decoded from, verbatim.
    pub raw_token: String,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr as _;

    use super::*;

    #[test]
    fn only_equivalency_has_status() {
        for origin in [Origin::Examination, Origin::Equivalency, Origin::Promotion] {
            let expected = matches!(origin, Origin::Equivalency);
            assert_eq!(origin.status().is_some(), expected, "{origin:?}");
        }
        assert_eq!(
            Origin::Equivalency.status().map(|s| s.to_string()),
            Some("EQUIVALENCIA".to_string())
        );
    }

    #[test]
    fn day_codes_map_to_weekdays() {
        let codes = ["Lu", "Ma", "Mi", "Ju", "Vi", "Sa"];
        let days: Vec<DayLabel> = codes.iter().filter_map(|c| DayLabel::from_code(c)).collect();
        assert_eq!(
            days,
            vec![
                DayLabel::Monday,
                DayLabel::Tuesday,
                DayLabel::Wednesday,
                DayLabel::Thursday,
                DayLabel::Friday,
                DayLabel::Saturday,
            ]
        );
        assert!(DayLabel::from_code("Do").is_none());
        assert!(DayLabel::from_code("lu").is_none());
    }

    #[test]
    fn labels_display_in_spanish() {
        assert_eq!(DayLabel::Wednesday.to_string(), "Miércoles");
        assert_eq!(DayLabel::Remote.to_string(), "A distancia");
        assert_eq!(PeriodLabel::Morning.to_string(), "Mañana");
        assert_eq!(PeriodLabel::Unscheduled.to_string(), "Sin horario");
        assert_eq!(Modality::Hybrid.to_string(), "Semipresencial");
        assert_eq!(DayLabel::from_str("Sábado").unwrap(), DayLabel::Saturday);
    }

    #[test]
    fn period_boundaries() {
        assert_eq!(PeriodLabel::from_start_hour(0), PeriodLabel::Morning);
        assert_eq!(PeriodLabel::from_start_hour(11), PeriodLabel::Morning);
        assert_eq!(PeriodLabel::from_start_hour(12), PeriodLabel::Afternoon);
        assert_eq!(PeriodLabel::from_start_hour(18), PeriodLabel::Afternoon);
        assert_eq!(PeriodLabel::from_start_hour(19), PeriodLabel::Evening);
        assert_eq!(PeriodLabel::from_start_hour(23), PeriodLabel::Evening);
    }

    #[test]
    fn slot_serializes_with_labels() {
        let slot = ParsedOfferingSlot {
            plan_code: "902".to_string(),
            description: "INGLES NIVEL II".to_string(),
            day: DayLabel::Tuesday,
            period: PeriodLabel::Afternoon,
            commission: "1600".to_string(),
            modality: Modality::Hybrid,
            location: UNKNOWN_LOCATION.to_string(),
            raw_token: "Ma14a18".to_string(),
        };
        let json = serde_json::to_value(&slot).unwrap();
        assert_eq!(json["planCode"], "902");
        assert_eq!(json["day"], "Martes");
        assert_eq!(json["period"], "Tarde");
        assert_eq!(json["modality"], "Semipresencial");
        assert_eq!(json["rawToken"], "Ma14a18");
    }
}
