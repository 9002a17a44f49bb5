//! Survey question intake pipeline.
//!
//! Splits a pasted block into lines, normalizes and masks each line, then
//! matches the result against the bank. Nothing is written.

use crate::config::MatchConfig;
use crate::model::question::{MatchResult, QuestionBankEntry};
use crate::service::match_service::{match_entries, MatchOutcome};
use crate::text::normalize::{mask_entities, split_lines_with};

/// Names masked out of every incoming line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaskNames {
    pub course_name: String,
    pub instructor_name: String,
}

impl MaskNames {
    pub fn new(course_name: impl Into<String>, instructor_name: impl Into<String>) -> Self {
        Self {
            course_name: course_name.into(),
            instructor_name: instructor_name.into(),
        }
    }
}

/// Normalizes and masks every usable line of `raw_block`.
///
/// Masking runs after normalization so placeholder braces are kept.
pub fn prepare_questions(raw_block: &str, names: &MaskNames, config: &MatchConfig) -> Vec<String> {
    split_lines_with(config.normalization, raw_block)
        .into_iter()
        .map(|line| mask_entities(&line, &names.course_name, &names.instructor_name))
        .collect()
}

/// Classifies every usable line of `raw_block` against `bank`.
pub fn classify_block(
    raw_block: &str,
    names: &MaskNames,
    bank: &[QuestionBankEntry],
    config: &MatchConfig,
) -> MatchOutcome<Vec<MatchResult>> {
    let questions = prepare_questions(raw_block, names, config);
    match_entries(&questions, bank, config)
}

#[cfg(test)]
mod tests {
    use super::{prepare_questions, MaskNames};
    use crate::config::MatchConfig;

    #[test]
    fn prepare_masks_after_normalizing() {
        let names = MaskNames::new("신임팀장과정", "김철수");
        let questions = prepare_questions(
            "1. 신임팀장과정 과정에 대해 만족하십니까?\n\n2) 김철수 강사의 강의는 어땠나요?",
            &names,
            &MatchConfig::survey_profile(),
        );
        assert_eq!(
            questions,
            vec![
                "{{COURSE}} 과정에 대해 만족하십니까".to_string(),
                "{{INSTRUCTOR}} 강사의 강의는 어땠나요".to_string(),
            ]
        );
    }
}
