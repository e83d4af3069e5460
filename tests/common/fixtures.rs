//! Test fixtures for integration tests.

use std::path::{Path, PathBuf};

use qembed::QaRecord;

/// Small embedding width keeps stub arrays tiny.
pub const STUB_DIM: usize = 8;

/// Questions with known stub token counts (words + punctuation).
pub fn sample_records() -> Vec<QaRecord> {
    vec![
        QaRecord::new(101, "What is the capital of France?"),
        QaRecord::new(102, "Who wrote Hamlet?"),
        QaRecord::new(103, "How many legs does a spider have, and why?"),
    ]
}

/// Stub token count of the longest sample question.
pub const SAMPLE_MAX_LEN: usize = 11;

/// Writes `records` as a QA JSON file under `dir` and returns its path.
pub fn write_qa_file(dir: &Path, records: &[QaRecord]) -> PathBuf {
    let path = dir.join("QA.json");
    let json = serde_json::to_string_pretty(records).expect("serialize records");
    std::fs::write(&path, json).expect("write QA file");
    path
}
