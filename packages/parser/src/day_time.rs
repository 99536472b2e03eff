//! Composite day/time token decoding.
//!
//! Offering schedules print a meeting as a run of two-letter weekday codes
//! followed by an hour range, all fused together: `MaVi12a14` means
//! Tuesday and Friday from 12 to 14. Remote courses print `A distancia`
//! instead.

use std::sync::LazyLock;

use academic_ingest_records_models::{DayLabel, PeriodLabel};
use regex::Regex;

/// `(dayCode)+ startHour "a" endHour`, on a token with whitespace removed.
static SCHEDULE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<days>(?:[A-Za-z]{2})+)(?P<start>\d{1,2})a(?P<end>\d{1,2})$")
        .expect("valid regex")
});

/// One weekly meeting decoded from a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Meeting {
    pub day: DayLabel,
    pub period: PeriodLabel,
}

/// What a day/time token means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayTime {
    /// `A distancia`: no weekly meeting.
    Remote,
    /// One meeting per recognized day code, all sharing the same period.
    /// Empty when the token has no recognizable shape.
    Scheduled(Vec<Meeting>),
}

/// Decodes a day/time token.
#[must_use]
pub fn decode(token: &str) -> DayTime {
    let compact: String = token.chars().filter(|c| !c.is_whitespace()).collect();

    if compact.eq_ignore_ascii_case("adistancia") {
        return DayTime::Remote;
    }

    let Some(caps) = SCHEDULE_RE.captures(&compact) else {
        log::debug!("Day/time token {token:?} has no recognizable shape");
        return DayTime::Scheduled(Vec::new());
    };
    let Ok(start) = caps["start"].parse::<u32>() else {
        return DayTime::Scheduled(Vec::new());
    };
    let period = PeriodLabel::from_start_hour(start);

    let days = &caps["days"];
    let meetings = (0..days.len())
        .step_by(2)
        .filter_map(|i| {
            let code = &days[i..i + 2];
            let day = DayLabel::from_code(code);
            if day.is_none() {
                log::debug!("Unrecognized day code {code:?} in token {token:?}");
            }
            day
        })
        .map(|day| Meeting { day, period })
        .collect();

    DayTime::Scheduled(meetings)
}
