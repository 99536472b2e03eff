//! Transcript tail decoding.
//!
//! A tail is the fused `{acta}{DD/MM/YYYY}{grade}` end of a transcript row,
//! e.g. `0431/202221/12/20229`. The date is the only unambiguous anchor:
//! the acta may itself contain a slash and the grade is optional.

use chrono::NaiveDate;

use crate::anchors;

/// The fields recovered from a tail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedTail<'a> {
    /// Acta / receipt reference, trimmed. May be empty.
    pub receipt: &'a str,
    /// The date exactly as printed.
    pub date: &'a str,
    /// Grade, when the text after the date is a number.
    pub grade: Option<u32>,
}

/// Decodes a tail around its first `DD/MM/YYYY` date.
///
/// Returns `None` when the tail contains no date, or when the date does not
/// name a real calendar day (`31/02/2022`).
#[must_use]
pub fn decode(tail: &str) -> Option<DecodedTail<'_>> {
    let date = anchors::find_date(tail)?;
    if NaiveDate::parse_from_str(date.as_str(), "%d/%m/%Y").is_err() {
        log::debug!("Tail {tail:?} has an impossible date {:?}", date.as_str());
        return None;
    }
    let after = tail[date.end()..].trim();

    let grade = if !after.is_empty() && after.bytes().all(|b| b.is_ascii_digit()) {
        after.parse().ok()
    } else {
        None
    };

    Some(DecodedTail {
        receipt: tail[..date.start()].trim(),
        date: date.as_str(),
        grade,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_slashed_acta_and_grade() {
        let tail = decode("0431/202221/12/20229").unwrap();
        assert_eq!(tail.receipt, "0431/2022");
        assert_eq!(tail.date, "21/12/2022");
        assert_eq!(tail.grade, Some(9));
    }

    #[test]
    fn decodes_plain_acta() {
        let tail = decode("3899202029/08/20208").unwrap();
        assert_eq!(tail.receipt, "38992020");
        assert_eq!(tail.date, "29/08/2020");
        assert_eq!(tail.grade, Some(8));
    }

    #[test]
    fn missing_grade_is_absent_not_zero() {
        let tail = decode("0372/202111/08/2021").unwrap();
        assert_eq!(tail.receipt, "0372/2021");
        assert_eq!(tail.date, "11/08/2021");
        assert_eq!(tail.grade, None);
    }

    #[test]
    fn zero_is_a_valid_grade() {
        assert_eq!(decode("1234 01/03/2019 0").unwrap().grade, Some(0));
    }

    #[test]
    fn two_digit_grade() {
        assert_eq!(decode("5512/202315/07/202310").unwrap().grade, Some(10));
    }

    #[test]
    fn non_numeric_trailer_is_not_a_grade() {
        let tail = decode("0431/2022 21/12/2022 Aprobado").unwrap();
        assert_eq!(tail.grade, None);
        assert_eq!(tail.receipt, "0431/2022");
    }

    #[test]
    fn empty_acta() {
        let tail = decode("21/12/2022 7").unwrap();
        assert_eq!(tail.receipt, "");
        assert_eq!(tail.grade, Some(7));
    }

    #[test]
    fn date_is_returned_verbatim() {
        for date in ["01/01/2000", "31/12/1999", "29/02/2024", "15/06/2023"] {
            let tail = format!("  9999/2020 {date} 6 ");
            assert_eq!(decode(&tail).unwrap().date, date);
        }
    }

    #[test]
    fn impossible_calendar_date_fails() {
        assert!(decode("0431/202231/02/20229").is_none());
        assert!(decode("0431/2022 00/13/2022 9").is_none());
        assert!(decode("1234 29/02/2023 7").is_none());
        assert!(decode("1234 29/02/2024 7").is_some());
    }

    #[test]
    fn no_date_fails() {
        assert!(decode("0431/2022 9").is_none());
        assert!(decode("").is_none());
    }
}
