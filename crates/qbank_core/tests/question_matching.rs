use qbank_core::{
    classify_block, default_question_bank, match_entries, match_questions, BankRecord,
    EntryValidationError, FixedClock, MaskNames, MatchConfig, MatchError, MatchStatus,
    QuestionBankEntry,
};

fn bank_of(pairs: &[(&str, &str)]) -> Vec<QuestionBankEntry> {
    pairs
        .iter()
        .map(|(id, text)| QuestionBankEntry::new(*id, *text, 0))
        .collect()
}

#[test]
fn exact_match_is_existing_with_full_score() {
    let bank = vec![BankRecord::pair(
        "QB-001",
        "{{COURSE}} 과정의 난이도는 적절했나요?",
    )];
    let results = match_questions(
        &["{{COURSE}} 과정의 난이도는 적절했나요?"],
        &bank,
        &MatchConfig::default(),
    )
    .unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].status, MatchStatus::Existing);
    assert_eq!(results[0].score, 1.0);
    assert_eq!(results[0].match_id.as_deref(), Some("QB-001"));
    assert_eq!(
        results[0].match_text,
        "{{COURSE}} 과정의 난이도는 적절했나요?"
    );
}

#[test]
fn empty_bank_classifies_everything_as_new() {
    let questions = ["첫 질문", "두 번째 질문", ""];
    let results = match_entries(&questions, &[], &MatchConfig::default()).unwrap();

    assert_eq!(results.len(), 3);
    for (result, question) in results.iter().zip(questions) {
        assert_eq!(result.status, MatchStatus::New);
        assert_eq!(result.score, 0.0);
        assert_eq!(result.match_id, None);
        assert_eq!(result.match_text, "");
        assert_eq!(result.question, question);
    }
}

#[test]
fn threshold_boundaries_are_inclusive() {
    let bank = bank_of(&[("QB-001", "abce")]);
    // similarity("abcd", "abce") is exactly 0.75.
    let at_existing = MatchConfig::default().with_thresholds(0.75, 0.5);
    let at_similar = MatchConfig::default().with_thresholds(0.9, 0.75);
    let above_similar = MatchConfig::default().with_thresholds(0.9, 0.76);

    let status = |config: &MatchConfig| match_entries(&["abcd"], &bank, config).unwrap()[0].status;
    assert_eq!(status(&at_existing), MatchStatus::Existing);
    assert_eq!(status(&at_similar), MatchStatus::Similar);
    assert_eq!(status(&above_similar), MatchStatus::New);
}

#[test]
fn ties_keep_first_bank_entry() {
    let bank = bank_of(&[("QB-001", "abcx"), ("QB-002", "abcy")]);
    let results = match_entries(&["abcd"], &bank, &MatchConfig::default()).unwrap();
    assert_eq!(results[0].match_id.as_deref(), Some("QB-001"));
    assert_eq!(results[0].raw_score, 0.75);
}

#[test]
fn classification_uses_unrounded_score() {
    let bank = bank_of(&[("QB-001", "sitting")]);
    // raw score 0.5714..., displayed 0.571
    let config = MatchConfig::default().with_thresholds(0.9, 0.5714);
    let results = match_entries(&["kitten"], &bank, &config).unwrap();
    assert_eq!(results[0].score, 0.571);
    assert!(results[0].raw_score > 0.5714);
    assert_eq!(results[0].status, MatchStatus::Similar);

    let strict = MatchConfig::default().with_thresholds(0.9, 0.5715);
    let results = match_entries(&["kitten"], &bank, &strict).unwrap();
    assert_eq!(results[0].score, 0.571);
    assert_eq!(results[0].status, MatchStatus::New);
}

#[test]
fn displayed_score_rounds_exact_halves_to_even() {
    let bank = bank_of(&[("QB-001", "abcdefghijklmnop")]);
    // Three substitutions over sixteen chars: exactly 0.8125.
    let results = match_entries(&["abcdefghijklmxyz"], &bank, &MatchConfig::default()).unwrap();
    assert_eq!(results[0].raw_score, 0.8125);
    assert_eq!(results[0].score, 0.812);
    assert_eq!(results[0].status, MatchStatus::Similar);
}

#[test]
fn low_scoring_best_match_is_new_but_still_reported() {
    let bank = default_question_bank(&FixedClock(0));
    let results =
        match_entries(&["식사 메뉴는 맛있었나요?"], &bank, &MatchConfig::default()).unwrap();
    assert_eq!(results[0].status, MatchStatus::New);
    assert_eq!(results[0].match_id.as_deref(), Some("L-003"));
    assert_eq!(results[0].score, 0.385);
}

#[test]
fn malformed_record_is_reported_with_index() {
    let bank = vec![
        BankRecord::pair("QB-001", "정상 문항"),
        BankRecord {
            id: Some("QB-002".to_string()),
            text: None,
            ..BankRecord::default()
        },
    ];
    let err = match_questions(&["정상 문항"], &bank, &MatchConfig::default()).unwrap_err();
    assert_eq!(
        err,
        MatchError::MalformedEntry {
            index: 1,
            source: EntryValidationError::MissingField("text"),
        }
    );
    assert!(err.to_string().contains("index 1"));
}

#[test]
fn invalid_thresholds_are_rejected_before_scoring() {
    let config = MatchConfig::default().with_thresholds(0.5, 0.9);
    let err = match_entries(&["질문"], &[], &config).unwrap_err();
    assert!(matches!(err, MatchError::Config(_)));
}

#[test]
fn classify_block_masks_and_matches_against_seed_bank() {
    let bank = default_question_bank(&FixedClock(0));
    let names = MaskNames::new("신임팀장과정", "김철수");
    let block = "1. 신임팀장과정 과정에 대해 만족하십니까?\n\n\
                 2. 김철수 강사의 강의는 어떠셨나요?\n\
                 3) 강의 시간은 적절하였나요?\n\
                 4. 식사 메뉴는 맛있었나요?\n";

    let results = classify_block(block, &names, &bank, &MatchConfig::default()).unwrap();

    let summary: Vec<(MatchStatus, Option<&str>, f64)> = results
        .iter()
        .map(|r| (r.status, r.match_id.as_deref(), r.score))
        .collect();
    assert_eq!(
        summary,
        vec![
            (MatchStatus::Existing, Some("L-001"), 1.0),
            (MatchStatus::Existing, Some("L-002"), 0.931),
            (MatchStatus::Similar, Some("L-003"), 0.857),
            (MatchStatus::New, Some("L-003"), 0.385),
        ]
    );
    assert_eq!(results[1].question, "{{INSTRUCTOR}} 강사의 강의는 어떠셨나요?");
}

#[test]
fn survey_profile_is_stricter_than_default() {
    let bank = default_question_bank(&FixedClock(0));
    // 0.923 against L-003: existing by default, only similar at 0.95.
    let question = ["강의 시간이 적절했나요?"];

    let default_results = match_entries(&question, &bank, &MatchConfig::default()).unwrap();
    assert_eq!(default_results[0].status, MatchStatus::Existing);

    let survey_results = match_entries(&question, &bank, &MatchConfig::survey_profile()).unwrap();
    assert_eq!(survey_results[0].status, MatchStatus::Similar);
    assert_eq!(survey_results[0].score, 0.923);
}

#[test]
fn match_result_serializes_with_snake_case_status() {
    let results = match_entries(&["새 문항"], &[], &MatchConfig::default()).unwrap();
    let json = serde_json::to_value(&results[0]).unwrap();
    assert_eq!(json["status"], "new");
    assert_eq!(json["match_id"], serde_json::Value::Null);
    assert_eq!(json["score"], 0.0);
}
