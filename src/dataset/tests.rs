use super::*;
use tempfile::TempDir;

#[test]
fn test_parse_numeric_ids() {
    let json = r#"[
        {"Question_Id": 1, "Questions": "What is the capital of France?"},
        {"Question_Id": 2, "Questions": "Who wrote Hamlet?"}
    ]"#;

    let records = parse_records(json).expect("should parse");

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].question_id, QuestionId::from(1));
    assert_eq!(records[0].question, "What is the capital of France?");
    assert_eq!(records[1].question_id.to_string(), "2");
}

#[test]
fn test_parse_string_ids_and_extra_fields() {
    let json = r#"[
        {"Question_Id": "q-001", "Questions": "Why?", "Answers": "Because."}
    ]"#;

    let records = parse_records(json).expect("should parse");

    assert_eq!(records[0].question_id, QuestionId::Text("q-001".to_string()));
    assert_eq!(records[0].question_id.to_string(), "q-001");
}

#[test]
fn test_parse_empty_array() {
    let records = parse_records("[]").expect("empty array is valid");
    assert!(records.is_empty());
}

#[test]
fn test_parse_missing_field() {
    let result = parse_records(r#"[{"Question_Id": 1}]"#);
    assert!(matches!(result, Err(DatasetError::Malformed(_))));
}

#[test]
fn test_parse_not_an_array() {
    let result = parse_records(r#"{"Question_Id": 1, "Questions": "x"}"#);
    assert!(matches!(result, Err(DatasetError::Malformed(_))));
}

#[test]
fn test_rejects_path_like_ids() {
    for bad in ["../escape", "a/b", "..", "", "   "] {
        let json = serde_json::to_string(&vec![QaRecord::new(bad, "q")]).expect("serialize");
        let result = parse_records(&json);
        assert!(
            matches!(result, Err(DatasetError::InvalidQuestionId { index: 0, .. })),
            "id {bad:?} should be rejected"
        );
    }
}

#[test]
fn test_duplicate_ids_are_allowed() {
    let json = r#"[
        {"Question_Id": 7, "Questions": "first"},
        {"Question_Id": "7", "Questions": "second"}
    ]"#;

    let records = parse_records(json).expect("duplicates only warn");
    assert_eq!(records.len(), 2);
}

#[test]
fn test_negative_numeric_id() {
    let id = QuestionId::from(-3);
    assert!(id.is_valid_file_stem());
    assert_eq!(id.to_string(), "-3");
}

#[test]
fn test_numeric_ids_beyond_i64_and_floats() {
    let json = r#"[
        {"Question_Id": 18446744073709551615, "Questions": "largest u64"},
        {"Question_Id": 1.0, "Questions": "float id"},
        {"Question_Id": 1, "Questions": "integer id"}
    ]"#;

    let records = parse_records(json).expect("any JSON number is an id");

    assert_eq!(records[0].question_id.to_string(), "18446744073709551615");
    assert_eq!(records[1].question_id.to_string(), "1.0");
    assert_eq!(records[2].question_id.to_string(), "1");
    // 1.0 and 1 name different files.
    assert_ne!(records[1].question_id, records[2].question_id);
}

#[test]
fn test_load_records_from_file() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("QA.json");
    std::fs::write(
        &path,
        r#"[{"Question_Id": 10, "Questions": "Ça va ?"}]"#,
    )
    .expect("write");

    let records = load_records(&path).expect("should load");

    assert_eq!(records, vec![QaRecord::new(10, "Ça va ?")]);
}

#[test]
fn test_load_records_missing_file() {
    let dir = TempDir::new().expect("temp dir");
    let result = load_records(&dir.path().join("missing.json"));
    assert!(matches!(result, Err(DatasetError::Read { .. })));
}
