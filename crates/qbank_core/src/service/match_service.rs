//! Question matcher.
//!
//! # Responsibility
//! - Score every incoming question against every bank entry.
//! - Classify the best match as `existing`, `similar` or `new`.
//!
//! # Invariants
//! - One result per input question, in input order.
//! - Best match uses strict `>`; on equal scores the first bank entry wins.
//! - Classification compares the unrounded score; only the reported
//!   `score` is rounded to three decimals.
//! - The bank is read-only here.

use crate::config::{ConfigError, MatchConfig};
use crate::model::question::{
    BankRecord, EntryValidationError, MatchResult, MatchStatus, QuestionBankEntry,
};
use crate::similarity::levenshtein::similarity;
use log::{debug, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type MatchOutcome<T> = Result<T, MatchError>;

/// Matcher failure.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchError {
    /// Bank record at `index` lacks a usable `id` or `text`.
    MalformedEntry {
        index: usize,
        source: EntryValidationError,
    },
    Config(ConfigError),
}

impl Display for MatchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedEntry { index, source } => {
                write!(f, "malformed bank entry at index {index}: {source}")
            }
            Self::Config(err) => write!(f, "{err}"),
        }
    }
}

impl Error for MatchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MalformedEntry { source, .. } => Some(source),
            Self::Config(err) => Some(err),
        }
    }
}

impl From<ConfigError> for MatchError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

#[derive(Debug, Clone, Copy)]
struct Candidate<'a> {
    id: &'a str,
    text: &'a str,
}

/// Matches questions against loosely shaped bank records.
///
/// # Errors
/// - `MalformedEntry` for the first record missing `id` or `text`; nothing
///   is scored in that case.
/// - `Config` when thresholds are invalid.
pub fn match_questions<S: AsRef<str>>(
    questions: &[S],
    bank: &[BankRecord],
    config: &MatchConfig,
) -> MatchOutcome<Vec<MatchResult>> {
    let mut candidates = Vec::with_capacity(bank.len());
    for (index, record) in bank.iter().enumerate() {
        match candidate_from_record(record) {
            Ok(candidate) => candidates.push(candidate),
            Err(source) => {
                warn!(
                    "event=match_questions module=matcher status=error error_code=malformed_entry index={} field_error={}",
                    index, source
                );
                return Err(MatchError::MalformedEntry { index, source });
            }
        }
    }
    run_match(questions, &candidates, config)
}

/// Matches questions against typed bank entries.
///
/// # Errors
/// - `Config` when thresholds are invalid.
pub fn match_entries<S: AsRef<str>>(
    questions: &[S],
    bank: &[QuestionBankEntry],
    config: &MatchConfig,
) -> MatchOutcome<Vec<MatchResult>> {
    let candidates: Vec<Candidate<'_>> = bank
        .iter()
        .map(|entry| Candidate {
            id: entry.question_id.as_str(),
            text: entry.question_text.as_str(),
        })
        .collect();
    run_match(questions, &candidates, config)
}

/// Maps a score to a status using the configured thresholds.
///
/// `has_match` is false when no bank entry scored above zero.
pub fn classify(has_match: bool, score: f64, config: &MatchConfig) -> MatchStatus {
    if has_match && score >= config.existing_threshold {
        MatchStatus::Existing
    } else if has_match && score >= config.similar_threshold {
        MatchStatus::Similar
    } else {
        MatchStatus::New
    }
}

/// Rounds to three decimals for display.
pub fn round_score(score: f64) -> f64 {
    // Formatting rounds the exact binary value with ties to even.
    format!("{score:.3}").parse().unwrap_or(score)
}

fn run_match<S: AsRef<str>>(
    questions: &[S],
    candidates: &[Candidate<'_>],
    config: &MatchConfig,
) -> MatchOutcome<Vec<MatchResult>> {
    config.validate()?;
    let started_at = Instant::now();

    let results: Vec<MatchResult> = questions
        .iter()
        .map(|question| match_one(question.as_ref(), candidates, config))
        .collect();

    let count = |status: MatchStatus| results.iter().filter(|r| r.status == status).count();
    debug!(
        "event=match_questions module=matcher status=ok questions={} bank_size={} existing={} similar={} new={} duration_ms={}",
        results.len(),
        candidates.len(),
        count(MatchStatus::Existing),
        count(MatchStatus::Similar),
        count(MatchStatus::New),
        started_at.elapsed().as_millis()
    );
    Ok(results)
}

fn match_one(question: &str, candidates: &[Candidate<'_>], config: &MatchConfig) -> MatchResult {
    let mut best: Option<Candidate<'_>> = None;
    let mut best_score = 0.0;
    for candidate in candidates {
        let score = similarity(question, candidate.text);
        if score > best_score {
            best_score = score;
            best = Some(*candidate);
        }
    }

    MatchResult {
        status: classify(best.is_some(), best_score, config),
        question: question.to_string(),
        match_text: best.map(|c| c.text.to_string()).unwrap_or_default(),
        match_id: best.map(|c| c.id.to_string()),
        score: round_score(best_score),
        raw_score: best_score,
    }
}

fn candidate_from_record(record: &BankRecord) -> Result<Candidate<'_>, EntryValidationError> {
    let id = non_blank(record.id.as_deref()).ok_or(EntryValidationError::MissingField("id"))?;
    let text =
        non_blank(record.text.as_deref()).ok_or(EntryValidationError::MissingField("text"))?;
    Ok(Candidate { id, text })
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|raw| !raw.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::{classify, round_score};
    use crate::config::MatchConfig;
    use crate::model::question::MatchStatus;

    #[test]
    fn classify_boundaries_are_inclusive() {
        let config = MatchConfig::default();
        assert_eq!(classify(true, 0.92, &config), MatchStatus::Existing);
        assert_eq!(classify(true, 0.78, &config), MatchStatus::Similar);
        assert_eq!(classify(true, 0.7799, &config), MatchStatus::New);
        assert_eq!(classify(false, 1.0, &config), MatchStatus::New);
    }

    #[test]
    fn round_score_keeps_three_decimals() {
        assert_eq!(round_score(0.57142857), 0.571);
        assert_eq!(round_score(1.0), 1.0);
        assert_eq!(round_score(0.0), 0.0);
    }

    #[test]
    fn round_score_sends_exact_halves_to_even() {
        assert_eq!(round_score(0.8125), 0.812);
        assert_eq!(round_score(0.5625), 0.562);
        assert_eq!(round_score(0.3125), 0.312);
        assert_eq!(round_score(0.0625), 0.062);
        assert_eq!(round_score(0.6875), 0.688);
    }
}
