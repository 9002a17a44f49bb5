//! Question bank entry and match result types.
//!
//! # Responsibility
//! - Define the one explicit shape for canonical bank questions.
//! - Accept legacy key names (`id`/`question_id`, `text`/`question_text`)
//!   only at the deserialization boundary.
//!
//! # Invariants
//! - A decoded `QuestionBankEntry` always has non-blank `question_id` and
//!   `question_text`.
//! - `MatchResult.score` is display-rounded; `raw_score` is what the
//!   classification used.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Canonical question stored in the bank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BankRecord")]
pub struct QuestionBankEntry {
    /// Stable identifier, typically `QB-###`.
    pub question_id: String,
    /// Normalized, masked question text.
    pub question_text: String,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// How many later questions were merged into this one.
    pub merged_count: u32,
    /// Free-form grouping label carried through untouched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl QuestionBankEntry {
    /// Creates a fresh entry with `merged_count = 0` and no category.
    pub fn new(
        question_id: impl Into<String>,
        question_text: impl Into<String>,
        created_at: i64,
    ) -> Self {
        Self {
            question_id: question_id.into(),
            question_text: question_text.into(),
            created_at,
            merged_count: 0,
            category: None,
        }
    }
}

/// Loosely shaped bank row as supplied by external stores.
///
/// Every field is optional here; [`BankRecord::into_entry`] decides what is
/// acceptable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BankRecord {
    #[serde(default, alias = "question_id")]
    pub id: Option<String>,
    #[serde(default, alias = "question_text")]
    pub text: Option<String>,
    #[serde(default)]
    pub created_at: Option<i64>,
    #[serde(default)]
    pub merged_count: Option<u32>,
    #[serde(default)]
    pub category: Option<String>,
}

impl BankRecord {
    /// Builds a record carrying only an id/text pair.
    pub fn pair(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Validates required fields and converts into a typed entry.
    ///
    /// Missing `created_at` decodes as `0`, missing `merged_count` as `0`.
    pub fn into_entry(self) -> Result<QuestionBankEntry, EntryValidationError> {
        let question_id = required(self.id, "id")?;
        let question_text = required(self.text, "text")?;
        Ok(QuestionBankEntry {
            question_id,
            question_text,
            created_at: self.created_at.unwrap_or(0),
            merged_count: self.merged_count.unwrap_or(0),
            category: self.category,
        })
    }
}

impl TryFrom<BankRecord> for QuestionBankEntry {
    type Error = EntryValidationError;

    fn try_from(value: BankRecord) -> Result<Self, Self::Error> {
        value.into_entry()
    }
}

impl From<QuestionBankEntry> for BankRecord {
    fn from(value: QuestionBankEntry) -> Self {
        Self {
            id: Some(value.question_id),
            text: Some(value.question_text),
            created_at: Some(value.created_at),
            merged_count: Some(value.merged_count),
            category: value.category,
        }
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, EntryValidationError> {
    match value {
        Some(raw) if !raw.trim().is_empty() => Ok(raw),
        _ => Err(EntryValidationError::MissingField(field)),
    }
}

/// Validation failure for one bank record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryValidationError {
    /// Named field is absent or blank.
    MissingField(&'static str),
}

impl Display for EntryValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "bank entry field `{field}` is missing or blank"),
        }
    }
}

impl Error for EntryValidationError {}

/// Classification outcome for one incoming question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    /// Same question already in the bank.
    Existing,
    /// Close enough to merge into an existing question.
    Similar,
    /// Needs a fresh bank entry.
    New,
}

impl MatchStatus {
    /// Wire name used by presentation surfaces.
    pub fn label(self) -> &'static str {
        match self {
            Self::Existing => "existing",
            Self::Similar => "similar",
            Self::New => "new",
        }
    }

    /// Whether reconciliation should bump the matched entry.
    pub fn is_merge(self) -> bool {
        matches!(self, Self::Existing | Self::Similar)
    }
}

/// Immutable per-question match outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub status: MatchStatus,
    /// Incoming (normalized, masked) question.
    pub question: String,
    /// Best bank text, or empty when the bank had no candidate.
    pub match_text: String,
    pub match_id: Option<String>,
    /// Best score rounded to three decimals.
    pub score: f64,
    /// Unrounded best score used for classification.
    #[serde(default)]
    pub raw_score: f64,
}

/// Counts produced by one reconciliation call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileSummary {
    pub new_count: usize,
    pub merged_count: usize,
}
