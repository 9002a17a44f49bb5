//! Core question bank logic for survey intake.
//! This crate is the single source of truth for normalization, matching and
//! bank reconciliation rules.

pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod seed;
pub mod service;
pub mod similarity;
pub mod text;

pub use config::{ConfigError, MatchConfig, DEFAULT_EXISTING_THRESHOLD, DEFAULT_SIMILAR_THRESHOLD};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::question::{
    BankRecord, EntryValidationError, MatchResult, MatchStatus, QuestionBankEntry,
    ReconcileSummary,
};
pub use repo::bank_repo::{
    bank_to_json, parse_bank_json, BankSnapshot, InMemoryQuestionBankRepository,
    QuestionBankRepository, RepoError, RepoResult,
};
pub use seed::default_question_bank;
pub use service::bank_service::{BankService, BankServiceError, CommitResult, PreviewResult};
pub use service::intake_service::{classify_block, prepare_questions, MaskNames};
pub use service::match_service::{match_entries, match_questions, MatchError, MatchOutcome};
pub use service::reconcile_service::{
    update_question_bank, update_question_bank_with, BankUpdate, Clock, FixedClock,
    QuestionIdAllocator, ReconcileError, ReconcileResult, SystemClock,
};
pub use similarity::levenshtein::{distance, similarity};
pub use text::normalize::{
    clean, mask_entities, normalize_with, split_lines, split_lines_with, NormalizationPolicy,
    COURSE_TOKEN, INSTRUCTOR_TOKEN,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
