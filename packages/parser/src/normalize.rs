//! Text normalization shared by both pipelines.

use std::sync::LazyLock;

use regex::Regex;

/// Regex to collapse runs of whitespace into a single space.
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Strips leading zeros from a plan code.
///
/// A code made only of zeros (or an empty one) normalizes to `"0"`, never
/// to an empty string.
#[must_use]
pub fn normalize_plan_code(raw: &str) -> String {
    let stripped = raw.trim().trim_start_matches('0');
    if stripped.is_empty() {
        "0".to_string()
    } else {
        stripped.to_string()
    }
}

/// Collapses every whitespace run to a single space and trims the ends.
#[must_use]
pub fn collapse_whitespace(input: &str) -> String {
    WHITESPACE_RE.replace_all(input.trim(), " ").into_owned()
}

/// Lowercases `input` and strips Spanish diacritics so that matching is
/// accent-tolerant (`"Página"` folds to `"pagina"`).
#[must_use]
pub fn fold(input: &str) -> String {
    input
        .chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' | 'à' | 'ä' | 'â' => 'a',
            'é' | 'è' | 'ë' | 'ê' => 'e',
            'í' | 'ì' | 'ï' | 'î' => 'i',
            'ó' | 'ò' | 'ö' | 'ô' => 'o',
            'ú' | 'ù' | 'ü' | 'û' => 'u',
            'ñ' => 'n',
            other => other,
        })
        .collect()
}

/// Removes `suffix` from the end of `text` when it matches after folding.
///
/// Returns `None` if `text` does not end with `suffix` or nothing but
/// whitespace would remain.
#[must_use]
pub fn strip_folded_suffix<'a>(text: &'a str, suffix: &str) -> Option<&'a str> {
    let wanted = fold(suffix.trim());
    let len = wanted.chars().count();
    if len == 0 {
        return None;
    }

    let (cut, _) = text.char_indices().rev().nth(len - 1)?;
    if fold(&text[cut..]) != wanted {
        return None;
    }

    let rest = text[..cut].trim_end();
    if rest.is_empty() { None } else { Some(rest) }
}
