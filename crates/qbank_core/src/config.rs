//! Matching configuration.
//!
//! # Responsibility
//! - Hold the two classification thresholds and the normalization policy.
//! - Reject threshold combinations that cannot classify consistently.
//!
//! # Invariants
//! - Both thresholds are finite and inside `[0.0, 1.0]`.
//! - `similar_threshold <= existing_threshold`.

use crate::text::normalize::NormalizationPolicy;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Default score at or above which a question is `existing`.
pub const DEFAULT_EXISTING_THRESHOLD: f64 = 0.92;
/// Default score at or above which a question is `similar`.
pub const DEFAULT_SIMILAR_THRESHOLD: f64 = 0.78;

const SURVEY_EXISTING_THRESHOLD: f64 = 0.95;
const SURVEY_SIMILAR_THRESHOLD: f64 = 0.80;

/// Overridable matcher parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub existing_threshold: f64,
    pub similar_threshold: f64,
    /// Applied to incoming lines before masking; bank text is used as stored.
    pub normalization: NormalizationPolicy,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            existing_threshold: DEFAULT_EXISTING_THRESHOLD,
            similar_threshold: DEFAULT_SIMILAR_THRESHOLD,
            normalization: NormalizationPolicy::EnumerationPrefix,
        }
    }
}

impl MatchConfig {
    /// Stricter profile used by the survey upload screen (0.95 / 0.80).
    pub fn survey_profile() -> Self {
        Self {
            existing_threshold: SURVEY_EXISTING_THRESHOLD,
            similar_threshold: SURVEY_SIMILAR_THRESHOLD,
            normalization: NormalizationPolicy::StripDigitsAndSymbols,
        }
    }

    /// Returns a copy with both thresholds replaced.
    pub fn with_thresholds(mut self, existing: f64, similar: f64) -> Self {
        self.existing_threshold = existing;
        self.similar_threshold = similar;
        self
    }

    /// Parses a JSON object and validates it; absent keys keep defaults.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(raw).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks threshold range and ordering.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("existing_threshold", self.existing_threshold)?;
        check_range("similar_threshold", self.similar_threshold)?;
        if self.similar_threshold > self.existing_threshold {
            return Err(ConfigError::ThresholdOrder {
                existing: self.existing_threshold,
                similar: self.similar_threshold,
            });
        }
        Ok(())
    }
}

fn check_range(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::ThresholdOutOfRange { name, value })
    }
}

/// Invalid matcher configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    ThresholdOutOfRange { name: &'static str, value: f64 },
    ThresholdOrder { existing: f64, similar: f64 },
    Parse(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ThresholdOutOfRange { name, value } => {
                write!(f, "{name} must be within [0, 1], got {value}")
            }
            Self::ThresholdOrder { existing, similar } => write!(
                f,
                "similar_threshold ({similar}) must not exceed existing_threshold ({existing})"
            ),
            Self::Parse(message) => write!(f, "invalid match config: {message}"),
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::{ConfigError, MatchConfig};
    use crate::text::normalize::NormalizationPolicy;

    #[test]
    fn defaults_match_reference_thresholds() {
        let config = MatchConfig::default();
        assert_eq!(config.existing_threshold, 0.92);
        assert_eq!(config.similar_threshold, 0.78);
        assert_eq!(config.normalization, NormalizationPolicy::EnumerationPrefix);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn survey_profile_uses_stricter_thresholds() {
        let config = MatchConfig::survey_profile();
        assert_eq!(config.existing_threshold, 0.95);
        assert_eq!(config.similar_threshold, 0.80);
    }

    #[test]
    fn validate_rejects_out_of_range_and_inverted_thresholds() {
        let err = MatchConfig::default()
            .with_thresholds(1.5, 0.5)
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ThresholdOutOfRange {
                name: "existing_threshold",
                ..
            }
        ));

        let err = MatchConfig::default()
            .with_thresholds(0.5, f64::NAN)
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ThresholdOutOfRange {
                name: "similar_threshold",
                ..
            }
        ));

        let err = MatchConfig::default()
            .with_thresholds(0.7, 0.8)
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::ThresholdOrder { .. }));
    }

    #[test]
    fn from_json_keeps_defaults_for_absent_keys() {
        let config =
            MatchConfig::from_json_str(r#"{"existing_threshold": 0.9, "normalization": "strip_digits_and_symbols"}"#)
                .unwrap();
        assert_eq!(config.existing_threshold, 0.9);
        assert_eq!(config.similar_threshold, 0.78);
        assert_eq!(
            config.normalization,
            NormalizationPolicy::StripDigitsAndSymbols
        );
    }

    #[test]
    fn from_json_reports_parse_errors() {
        let err = MatchConfig::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
