//! Question bank use-case service.
//!
//! # Responsibility
//! - Preview classification of a pasted question block against the stored
//!   bank without writing anything.
//! - Commit confirmed results by reconciling against the latest snapshot and
//!   replacing it through the repository.
//!
//! # Invariants
//! - Service APIs never mutate a loaded snapshot in place.
//! - A commit either replaces the whole bank or changes nothing.

use crate::config::{ConfigError, MatchConfig};
use crate::model::question::{MatchResult, ReconcileSummary};
use crate::repo::bank_repo::{QuestionBankRepository, RepoError};
use crate::service::intake_service::{classify_block, MaskNames};
use crate::service::match_service::MatchError;
use crate::service::reconcile_service::{update_question_bank, Clock, ReconcileError};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for bank use-cases.
#[derive(Debug)]
pub enum BankServiceError {
    Config(ConfigError),
    Match(MatchError),
    Reconcile(ReconcileError),
    Repo(RepoError),
}

impl Display for BankServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::Match(err) => write!(f, "{err}"),
            Self::Reconcile(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for BankServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Match(err) => Some(err),
            Self::Reconcile(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<ConfigError> for BankServiceError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<MatchError> for BankServiceError {
    fn from(value: MatchError) -> Self {
        Self::Match(value)
    }
}

impl From<ReconcileError> for BankServiceError {
    fn from(value: ReconcileError) -> Self {
        Self::Reconcile(value)
    }
}

impl From<RepoError> for BankServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Classification preview for one pasted block.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewResult {
    /// Bank version the results were computed against.
    pub bank_version: u64,
    pub results: Vec<MatchResult>,
}

/// Outcome of a successful commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitResult {
    pub bank_version: u64,
    pub summary: ReconcileSummary,
}

/// Bank service facade over repository implementations.
pub struct BankService<R: QuestionBankRepository, C: Clock> {
    repo: R,
    clock: C,
    config: MatchConfig,
}

impl<R: QuestionBankRepository, C: Clock> BankService<R, C> {
    /// Creates a service after validating `config`.
    pub fn new(repo: R, clock: C, config: MatchConfig) -> Result<Self, BankServiceError> {
        config.validate()?;
        Ok(Self {
            repo,
            clock,
            config,
        })
    }

    /// Active matcher configuration.
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Underlying repository, e.g. for reading back the stored bank.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Classifies `raw_block` against the current bank without writing.
    pub fn preview(
        &self,
        raw_block: &str,
        names: &MaskNames,
    ) -> Result<PreviewResult, BankServiceError> {
        let snapshot = self.repo.load_bank()?;
        let results = classify_block(raw_block, names, &snapshot.entries, &self.config)?;
        Ok(PreviewResult {
            bank_version: snapshot.version,
            results,
        })
    }

    /// Applies `results` to the latest bank and stores the new snapshot.
    ///
    /// Returns `Repo(VersionConflict)` when another writer replaced the bank
    /// between load and replace; nothing is written in that case.
    pub fn commit(&self, results: &[MatchResult]) -> Result<CommitResult, BankServiceError> {
        let snapshot = self.repo.load_bank()?;
        let update = update_question_bank(&snapshot.entries, results, &self.clock)?;
        let bank_version = self.repo.replace_bank(snapshot.version, update.bank)?;
        Ok(CommitResult {
            bank_version,
            summary: update.summary,
        })
    }
}
