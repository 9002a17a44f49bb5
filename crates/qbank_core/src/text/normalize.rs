//! Question line cleanup and proper-noun masking.
//!
//! # Responsibility
//! - Strip enumeration noise and collapse whitespace in submitted lines.
//! - Replace course/instructor names with stable placeholder tokens.
//!
//! # Invariants
//! - Every function here is pure and never fails; degenerate input yields
//!   empty output.
//! - Masking is a literal, case-sensitive substring replacement. It is not
//!   entity recognition and has no word-boundary logic.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Placeholder substituted for the course name.
pub const COURSE_TOKEN: &str = "{{COURSE}}";
/// Placeholder substituted for the instructor name.
pub const INSTRUCTOR_TOKEN: &str = "{{INSTRUCTOR}}";

static LEADING_ENUMERATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\d\W]+").expect("valid enumeration regex"));
static DIGIT_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("valid digit regex"));
static SYMBOL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s가-힣]").expect("valid symbol regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));
// CRLF, LF, lone CR, VT, FF, FS/GS/RS, NEL, LS and PS all end a line.
static LINE_BREAK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\r\n|[\n\r\x0b\x0c\x1c-\x1e\x{85}\x{2028}\x{2029}]")
        .expect("valid line break regex")
});

/// Normalization order applied to incoming question lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalizationPolicy {
    /// Strip the leading run of digits/non-word characters only.
    ///
    /// Digits and punctuation inside the sentence are kept.
    #[default]
    EnumerationPrefix,
    /// Blank out every digit run and every symbol, wherever it appears.
    StripDigitsAndSymbols,
}

/// Cleans one raw line with the canonical `EnumerationPrefix` policy.
///
/// `"  1.  과정에 대해   만족하십니까?  "` becomes `"과정에 대해 만족하십니까?"`.
/// A prefix like `"Q2)"` starts with a word character and is left intact.
pub fn clean(raw: &str) -> String {
    let stripped = LEADING_ENUMERATION_RE.replace(raw.trim(), "");
    collapse_whitespace(&stripped)
}

/// Normalizes one line using the given policy.
pub fn normalize_with(policy: NormalizationPolicy, raw: &str) -> String {
    match policy {
        NormalizationPolicy::EnumerationPrefix => clean(raw),
        NormalizationPolicy::StripDigitsAndSymbols => strip_digits_and_symbols(raw),
    }
}

/// Splits a pasted block into cleaned question lines.
///
/// Any Unicode line boundary separates questions, including a lone `\r`.
/// Blank lines and lines that clean to nothing are dropped; input order is
/// preserved.
pub fn split_lines(raw_block: &str) -> Vec<String> {
    split_lines_with(NormalizationPolicy::EnumerationPrefix, raw_block)
}

/// Policy-aware variant of [`split_lines`].
pub fn split_lines_with(policy: NormalizationPolicy, raw_block: &str) -> Vec<String> {
    LINE_BREAK_RE
        .split(raw_block)
        .filter(|line| !line.trim().is_empty())
        .map(|line| normalize_with(policy, line))
        .filter(|cleaned| !cleaned.is_empty())
        .collect()
}

/// Replaces literal occurrences of the course and instructor names.
///
/// An empty name disables its replacement. Course is replaced first, so an
/// instructor name that only appears inside the course name is not masked.
pub fn mask_entities(text: &str, course_name: &str, instructor_name: &str) -> String {
    let mut masked = text.to_string();
    if !course_name.is_empty() {
        masked = masked.replace(course_name, COURSE_TOKEN);
    }
    if !instructor_name.is_empty() {
        masked = masked.replace(instructor_name, INSTRUCTOR_TOKEN);
    }
    masked
}

fn strip_digits_and_symbols(raw: &str) -> String {
    let without_digits = DIGIT_RUN_RE.replace_all(raw, " ");
    let without_symbols = SYMBOL_RE.replace_all(&without_digits, " ");
    let without_underscores = without_symbols.replace('_', " ");
    collapse_whitespace(&without_underscores)
}

fn collapse_whitespace(value: &str) -> String {
    WHITESPACE_RE.replace_all(value, " ").trim().to_string()
}
