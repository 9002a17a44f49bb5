//! Question bank domain model.
//!
//! # Responsibility
//! - Define the canonical bank entry and per-question match outcome.
//! - Validate loosely shaped bank records at the boundary.
//!
//! # Invariants
//! - `question_id` is unique within one bank and never reused.
//! - Entries are never deleted by core; only `merged_count` changes.

pub mod question;
