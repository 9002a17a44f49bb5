//! Use-case services over the question bank.
//!
//! # Responsibility
//! - Match incoming questions and reconcile the bank with the outcome.
//! - Keep business rules independent from any storage backend.

pub mod bank_service;
pub mod intake_service;
pub mod match_service;
pub mod reconcile_service;
