//! Persistence seam for the question bank.
//!
//! # Responsibility
//! - Define the contract external stores implement to load and replace
//!   whole bank snapshots.
//!
//! # Invariants
//! - Writes replace the full snapshot; there are no partial diffs.
//! - A write against a stale version is rejected, never merged.

pub mod bank_repo;
