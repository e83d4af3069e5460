//! Binary tests (stub mode, no model files).

mod common;

use assert_cmd::Command;
use common::fixtures::{SAMPLE_MAX_LEN, sample_records, write_qa_file};
use predicates::prelude::*;
use tempfile::TempDir;

fn qembed() -> Command {
    let mut cmd = Command::cargo_bin("qembed").expect("binary");
    for var in [
        "QEMBED_INPUT_PATH",
        "QEMBED_OUTPUT_DIR",
        "QEMBED_MODEL_DIR",
        "QEMBED_MAX_SEQ_LEN",
        "QEMBED_KEEP_SPECIAL_TOKENS",
        "QEMBED_FORCE_CPU",
    ] {
        cmd.env_remove(var);
    }
    cmd.env("RUST_LOG", "warn");
    cmd
}

#[test]
fn run_in_stub_mode_reports_max_len() {
    let dir = TempDir::new().expect("temp dir");
    let input = write_qa_file(dir.path(), &sample_records());
    let out = dir.path().join("out");

    qembed()
        .arg("--stub")
        .arg("--input")
        .arg(&input)
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("saved 3 embedding files"))
        .stdout(predicate::str::contains(format!(
            "max sequence length: {SAMPLE_MAX_LEN}"
        )));

    assert!(out.join("101.npy").is_file());
    assert!(out.join("102.npy").is_file());
    assert!(out.join("103.npy").is_file());
}

#[test]
fn generate_then_validate_separately() {
    let dir = TempDir::new().expect("temp dir");
    let input = write_qa_file(dir.path(), &sample_records());
    let out = dir.path().join("out");

    qembed()
        .args(["generate", "--stub", "--keep-special-tokens"])
        .arg("--input")
        .arg(&input)
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("max sequence length").not());

    qembed()
        .arg("validate")
        .arg("--input")
        .arg(&input)
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "max sequence length: {}",
            SAMPLE_MAX_LEN + 2
        )));
}

#[test]
fn validate_without_generated_files_fails() {
    let dir = TempDir::new().expect("temp dir");
    let input = write_qa_file(dir.path(), &sample_records());

    qembed()
        .arg("validate")
        .arg("--input")
        .arg(&input)
        .arg("--output-dir")
        .arg(dir.path().join("empty"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("101"));
}

#[test]
fn generate_without_model_dir_fails() {
    let dir = TempDir::new().expect("temp dir");
    let input = write_qa_file(dir.path(), &sample_records());

    qembed()
        .arg("generate")
        .arg("--input")
        .arg(&input)
        .arg("--output-dir")
        .arg(dir.path().join("out"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("no model directory configured"));
}

#[test]
fn missing_input_fails() {
    let dir = TempDir::new().expect("temp dir");

    qembed()
        .args(["--stub", "--input"])
        .arg(dir.path().join("missing.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("path does not exist"));
}

#[test]
fn flag_turns_off_env_special_tokens() {
    let dir = TempDir::new().expect("temp dir");
    let input = write_qa_file(dir.path(), &sample_records());

    qembed()
        .env("QEMBED_KEEP_SPECIAL_TOKENS", "true")
        .args(["--stub", "--no-keep-special-tokens"])
        .arg("--input")
        .arg(&input)
        .arg("--output-dir")
        .arg(dir.path().join("out"))
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "max sequence length: {SAMPLE_MAX_LEN}\n"
        )));
}
