//! Question bank reconciliation.
//!
//! # Responsibility
//! - Append `new` questions with sequential `QB-###` IDs.
//! - Bump `merged_count` on entries matched as `existing`/`similar`.
//!
//! # Invariants
//! - The input bank is never mutated; callers get an independent snapshot.
//! - IDs handed out by one allocator never collide.
//! - Merges pointing at unknown or absent IDs are skipped, not errors.
//! - Merge targets are looked up in the input bank only; IDs generated in
//!   the same call are never merge targets.

use crate::model::question::{MatchResult, QuestionBankEntry, ReconcileSummary};
use log::{debug, error, info};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

/// Prefix for generated question IDs.
pub const QUESTION_ID_PREFIX: &str = "QB-";

static TRAILING_DIGITS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]+)$").expect("valid trailing digits regex"));

pub type ReconcileResult<T> = Result<T, ReconcileError>;

/// Reconciliation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileError {
    /// Input bank already holds the same `question_id` twice.
    DuplicateBankId(String),
    /// ID generation produced a value that was already taken.
    InvariantViolation(String),
}

impl Display for ReconcileError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateBankId(id) => write!(f, "duplicate question id in bank: {id}"),
            Self::InvariantViolation(details) => {
                write!(f, "question bank invariant violated: {details}")
            }
        }
    }
}

impl Error for ReconcileError {}

/// Time source for `created_at` stamps.
pub trait Clock {
    /// Current time in Unix epoch milliseconds.
    fn now_epoch_ms(&self) -> i64;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_epoch_ms(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
            .unwrap_or(0)
    }
}

/// Clock frozen at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_epoch_ms(&self) -> i64 {
        self.0
    }
}

/// Pool of question IDs already taken within one request.
///
/// Share one allocator across nested reconciliation calls of the same
/// request so IDs stay unique across all of them.
#[derive(Debug, Clone, Default)]
pub struct QuestionIdAllocator {
    used: HashSet<String>,
    max_suffix: u64,
}

impl QuestionIdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the pool with existing IDs.
    pub fn from_ids<'a>(ids: impl IntoIterator<Item = &'a str>) -> Self {
        let mut allocator = Self::new();
        for id in ids {
            allocator.reserve(id);
        }
        allocator
    }

    /// Marks `id` as taken and folds its numeric suffix into the maximum.
    ///
    /// IDs without a parseable trailing number are tracked but do not move
    /// the maximum.
    pub fn reserve(&mut self, id: &str) {
        if let Some(suffix) = numeric_suffix(id) {
            self.max_suffix = self.max_suffix.max(suffix);
        }
        self.used.insert(id.to_string());
    }

    /// Highest numeric suffix seen so far (0 when none).
    pub fn max_suffix(&self) -> u64 {
        self.max_suffix
    }

    /// Hands out `QB-{max+1:03}` and records it.
    ///
    /// # Errors
    /// - `InvariantViolation` if the suffix overflows or the generated ID is
    ///   already taken.
    pub fn next_id(&mut self) -> ReconcileResult<String> {
        let next = self.max_suffix.checked_add(1).ok_or_else(|| {
            ReconcileError::InvariantViolation("question id suffix overflow".to_string())
        })?;
        let id = format!("{QUESTION_ID_PREFIX}{next:03}");
        if !self.used.insert(id.clone()) {
            return Err(ReconcileError::InvariantViolation(format!(
                "generated question id `{id}` is already in use"
            )));
        }
        self.max_suffix = next;
        Ok(id)
    }
}

/// Extracts the trailing ASCII digit run of `id` as a number.
///
/// Returns `None` when there is no trailing digit run or it overflows `u64`.
pub fn numeric_suffix(id: &str) -> Option<u64> {
    TRAILING_DIGITS_RE
        .captures(id)
        .and_then(|caps| caps.get(1))
        .and_then(|digits| digits.as_str().parse::<u64>().ok())
}

/// New bank snapshot plus change counts.
#[derive(Debug, Clone, PartialEq)]
pub struct BankUpdate {
    pub bank: Vec<QuestionBankEntry>,
    pub summary: ReconcileSummary,
}

/// Applies match results to a copy of `bank`.
pub fn update_question_bank(
    bank: &[QuestionBankEntry],
    results: &[MatchResult],
    clock: &dyn Clock,
) -> ReconcileResult<BankUpdate> {
    let mut allocator = QuestionIdAllocator::new();
    update_question_bank_with(bank, results, clock, &mut allocator)
}

/// Like [`update_question_bank`], drawing IDs from a caller-owned pool.
///
/// Bank IDs are reserved into `allocator` before any new ID is generated.
pub fn update_question_bank_with(
    bank: &[QuestionBankEntry],
    results: &[MatchResult],
    clock: &dyn Clock,
    allocator: &mut QuestionIdAllocator,
) -> ReconcileResult<BankUpdate> {
    let mut updated = bank.to_vec();
    let mut index = HashMap::with_capacity(updated.len());
    for (position, entry) in updated.iter().enumerate() {
        if index.insert(entry.question_id.clone(), position).is_some() {
            error!(
                "event=bank_reconcile module=reconcile status=error error_code=duplicate_bank_id question_id={}",
                entry.question_id
            );
            return Err(ReconcileError::DuplicateBankId(entry.question_id.clone()));
        }
        allocator.reserve(&entry.question_id);
    }

    let mut summary = ReconcileSummary::default();
    let mut skipped = 0usize;
    for result in results {
        if result.status.is_merge() {
            let position = result
                .match_id
                .as_deref()
                .filter(|id| !id.is_empty())
                .and_then(|id| index.get(id).copied());
            match position {
                Some(position) => {
                    let entry = &mut updated[position];
                    entry.merged_count = entry.merged_count.saturating_add(1);
                    summary.merged_count += 1;
                }
                None => skipped += 1,
            }
        } else {
            let question_id = allocator.next_id()?;
            updated.push(QuestionBankEntry::new(
                question_id,
                result.question.clone(),
                clock.now_epoch_ms(),
            ));
            summary.new_count += 1;
        }
    }

    if skipped > 0 {
        debug!(
            "event=bank_reconcile module=reconcile status=skip reason=unknown_match_id skipped={}",
            skipped
        );
    }
    info!(
        "event=bank_reconcile module=reconcile status=ok new_count={} merged_count={} bank_size={}",
        summary.new_count,
        summary.merged_count,
        updated.len()
    );

    Ok(BankUpdate {
        bank: updated,
        summary,
    })
}
