//! Starter questions used when storage holds no bank yet.

use crate::model::question::QuestionBankEntry;
use crate::service::reconcile_service::Clock;

const SEED_QUESTIONS: &[(&str, &str, &str)] = &[
    ("L-001", "{{COURSE}} 과정에 대해 만족하십니까?", "전략"),
    ("L-002", "{{INSTRUCTOR}} 강사의 강의는 어땠나요?", "소통"),
    ("L-003", "강의 시간은 적절했나요?", "운영"),
    ("L-004", "교육 시간 배분은 적절했나요?", "운영"),
    ("L-005", "향후 추천할 의향이 있나요?", "NPS"),
];

/// Returns the default bank stamped with the clock's current time.
pub fn default_question_bank(clock: &dyn Clock) -> Vec<QuestionBankEntry> {
    let created_at = clock.now_epoch_ms();
    SEED_QUESTIONS
        .iter()
        .map(|(id, text, category)| {
            let mut entry = QuestionBankEntry::new(*id, *text, created_at);
            entry.category = Some((*category).to_string());
            entry
        })
        .collect()
}
