//! Question bank repository contract and in-memory implementation.
//!
//! # Responsibility
//! - Hand out versioned bank snapshots.
//! - Accept full replacement snapshots guarded by optimistic versioning.
//!
//! # Invariants
//! - Every successful replace bumps the version by exactly one.
//! - `replace_bank` with a stale `expected_version` changes nothing.

use crate::model::question::{BankRecord, QuestionBankEntry};
use crate::seed::default_question_bank;
use crate::service::reconcile_service::Clock;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Mutex;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for bank load/replace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    /// Snapshot changed since the caller loaded it.
    VersionConflict { expected: u64, actual: u64 },
    /// Stored data failed boundary validation.
    InvalidData(String),
    /// Underlying store failure.
    Backend(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::VersionConflict { expected, actual } => write!(
                f,
                "question bank version conflict: expected {expected}, found {actual}"
            ),
            Self::InvalidData(message) => write!(f, "invalid question bank data: {message}"),
            Self::Backend(message) => write!(f, "question bank store failure: {message}"),
        }
    }
}

impl Error for RepoError {}

/// Versioned bank contents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BankSnapshot {
    pub version: u64,
    pub entries: Vec<QuestionBankEntry>,
}

/// Storage contract implemented by external bank stores.
pub trait QuestionBankRepository {
    fn load_bank(&self) -> RepoResult<BankSnapshot>;
    /// Replaces the whole bank and returns the new version.
    fn replace_bank(
        &self,
        expected_version: u64,
        entries: Vec<QuestionBankEntry>,
    ) -> RepoResult<u64>;
}

/// Process-local bank store.
#[derive(Debug, Default)]
pub struct InMemoryQuestionBankRepository {
    state: Mutex<BankSnapshot>,
}

impl InMemoryQuestionBankRepository {
    /// Creates an empty store at version 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `entries` at version 0.
    pub fn with_entries(entries: Vec<QuestionBankEntry>) -> Self {
        Self {
            state: Mutex::new(BankSnapshot {
                version: 0,
                entries,
            }),
        }
    }

    /// Creates a store holding the default seed questions.
    pub fn seeded(clock: &dyn Clock) -> Self {
        Self::with_entries(default_question_bank(clock))
    }
}

impl QuestionBankRepository for InMemoryQuestionBankRepository {
    fn load_bank(&self) -> RepoResult<BankSnapshot> {
        let state = self
            .state
            .lock()
            .map_err(|_| RepoError::Backend("bank lock poisoned".to_string()))?;
        Ok(state.clone())
    }

    fn replace_bank(
        &self,
        expected_version: u64,
        entries: Vec<QuestionBankEntry>,
    ) -> RepoResult<u64> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| RepoError::Backend("bank lock poisoned".to_string()))?;
        if state.version != expected_version {
            warn!(
                "event=bank_replace module=repo status=error error_code=version_conflict expected={} actual={}",
                expected_version, state.version
            );
            return Err(RepoError::VersionConflict {
                expected: expected_version,
                actual: state.version,
            });
        }
        state.version += 1;
        state.entries = entries;
        info!(
            "event=bank_replace module=repo status=ok version={} bank_size={}",
            state.version,
            state.entries.len()
        );
        Ok(state.version)
    }
}

/// Decodes a JSON array of bank rows, accepting legacy key names.
///
/// # Errors
/// - `InvalidData` when the payload is not an array of objects or a row
///   lacks `id`/`text`; the message names the failing row index.
pub fn parse_bank_json(raw: &str) -> RepoResult<Vec<QuestionBankEntry>> {
    let records: Vec<BankRecord> =
        serde_json::from_str(raw).map_err(|err| RepoError::InvalidData(err.to_string()))?;
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            record
                .into_entry()
                .map_err(|err| RepoError::InvalidData(format!("row {index}: {err}")))
        })
        .collect()
}

/// Encodes a bank snapshot as a pretty JSON array.
pub fn bank_to_json(entries: &[QuestionBankEntry]) -> RepoResult<String> {
    serde_json::to_string_pretty(entries).map_err(|err| RepoError::InvalidData(err.to_string()))
}
