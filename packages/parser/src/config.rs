//! Parser configuration.
//!
//! Everything the engine needs is built in; a TOML file can add noise
//! patterns for documents with unusual boilerplate and replace the campus
//! list used to classify offering locations:
//!
//! ```toml
//! transcript_noise_patterns = ["^confidencial$"]
//!
//! [[campuses]]
//! keyword = "Medrano"
//! label = "Sede Medrano"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Errors raised while loading or compiling a [`ParserConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid TOML for [`ParserConfig`].
    #[error("Invalid config: {0}")]
    Toml(#[from] toml::de::Error),

    /// An extra noise pattern failed to compile.
    #[error("Invalid noise pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// A campus keyword and the location label it maps to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Campus {
    /// Matched case- and accent-insensitively against the text after an
    /// offering's day/time token, and stripped from the end of subject
    /// descriptions.
    pub keyword: String,
    /// Location reported for slots that mention `keyword`.
    pub label: String,
}

impl Campus {
    fn new(keyword: &str, label: &str) -> Self {
        Self {
            keyword: keyword.to_string(),
            label: label.to_string(),
        }
    }
}

/// Tunable parts of the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParserConfig {
    /// Extra noise regexes for transcripts, written against lowercase,
    /// accent-free text.
    pub transcript_noise_patterns: Vec<String>,
    /// Extra noise regexes for offering schedules.
    pub offering_noise_patterns: Vec<String>,
    /// Campus keywords, checked in order. Replaces the built-in list when
    /// set.
    pub campuses: Vec<Campus>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            transcript_noise_patterns: Vec::new(),
            offering_noise_patterns: Vec::new(),
            campuses: vec![
                Campus::new("Medrano", "Medrano"),
                Campus::new("Campus", "Campus"),
                Campus::new("Lugano", "Lugano"),
            ],
        }
    }
}

impl ParserConfig {
    /// Parses a TOML document. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] if the document is malformed or has
    /// unknown keys.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Reads and parses a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Toml`] if it cannot be parsed.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        log::debug!("Loaded parser config from {}", path.display());
        Self::from_toml_str(&source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        assert_eq!(ParserConfig::from_toml_str("").unwrap(), ParserConfig::default());
    }

    #[test]
    fn extra_patterns_keep_default_campuses() {
        let config =
            ParserConfig::from_toml_str(r#"offering_noise_patterns = ["^ciclo lectivo"]"#).unwrap();
        assert_eq!(config.offering_noise_patterns, vec!["^ciclo lectivo"]);
        assert_eq!(config.campuses, ParserConfig::default().campuses);
    }

    #[test]
    fn campuses_replace_builtin_list() {
        let config = ParserConfig::from_toml_str(
            r#"
            [[campuses]]
            keyword = "Sede Norte"
            label = "Norte"
            "#,
        )
        .unwrap();
        assert_eq!(config.campuses, vec![Campus::new("Sede Norte", "Norte")]);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = ParserConfig::from_toml_str("campus = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }
}
