//! QA record loading.
//!
//! Input is a JSON array of objects carrying `Question_Id` and `Questions`; any other field is
//! ignored.

mod error;

#[cfg(test)]
mod tests;

pub use error::DatasetError;

use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Identifier of a question; doubles as the file stem of its saved array.
///
/// Any JSON number is accepted (`u64` beyond `i64::MAX`, and floats such as `1.0`, which keep
/// their JSON spelling in the file name).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuestionId {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionId::Number(n) => write!(f, "{n}"),
            QuestionId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for QuestionId {
    fn from(value: i64) -> Self {
        QuestionId::Number(value.into())
    }
}

impl From<&str> for QuestionId {
    fn from(value: &str) -> Self {
        QuestionId::Text(value.to_string())
    }
}

impl QuestionId {
    /// Returns `true` if the id names exactly one file inside a directory.
    pub fn is_valid_file_stem(&self) -> bool {
        match self {
            QuestionId::Number(_) => true,
            QuestionId::Text(s) => {
                !s.trim().is_empty()
                    && s != "."
                    && s != ".."
                    && !s.contains(['/', '\\', '\0'])
            }
        }
    }
}

/// One question to embed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaRecord {
    #[serde(rename = "Question_Id")]
    pub question_id: QuestionId,

    #[serde(rename = "Questions")]
    pub question: String,
}

impl QaRecord {
    pub fn new(question_id: impl Into<QuestionId>, question: impl Into<String>) -> Self {
        Self {
            question_id: question_id.into(),
            question: question.into(),
        }
    }
}

/// Reads and checks QA records from a UTF-8 JSON file.
pub fn load_records(path: &Path) -> Result<Vec<QaRecord>, DatasetError> {
    let file = File::open(path).map_err(|source| DatasetError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let records: Vec<QaRecord> = serde_json::from_reader(BufReader::new(file))?;
    check_records(&records)?;

    info!(
        path = %path.display(),
        count = records.len(),
        "Loaded QA records"
    );

    Ok(records)
}

/// Parses and checks QA records from an in-memory JSON document.
pub fn parse_records(json: &str) -> Result<Vec<QaRecord>, DatasetError> {
    let records: Vec<QaRecord> = serde_json::from_str(json)?;
    check_records(&records)?;
    Ok(records)
}

fn check_records(records: &[QaRecord]) -> Result<(), DatasetError> {
    let mut seen = HashSet::with_capacity(records.len());

    for (index, record) in records.iter().enumerate() {
        if !record.question_id.is_valid_file_stem() {
            return Err(DatasetError::InvalidQuestionId {
                index,
                id: record.question_id.to_string(),
            });
        }

        // Number(7) and Text("7") share a file, so compare display forms.
        if !seen.insert(record.question_id.to_string()) {
            warn!(
                question_id = %record.question_id,
                index,
                "Duplicate question id; later record overwrites the earlier file"
            );
        }
    }

    debug!(unique = seen.len(), total = records.len(), "Checked QA records");
    Ok(())
}
