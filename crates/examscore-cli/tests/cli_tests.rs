//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn examscore() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("examscore").unwrap()
}

const QUESTIONS_TOML: &str = r#"
[question_set]
id = "listening-t1"
name = "Listening Test 1"
section = "listening"

[[questions]]
id = "q1"
number = 1
kind = "short-answer"
accepted = ["Paris"]

[[questions]]
id = "q2"
number = 2
kind = "fill-in-blank"
accepted = ["7"]

[[questions]]
id = "q3"
number = 3
kind = "short-answer"
accepted = ["big"]
"#;

const SUBMISSIONS_JSON: &str = r#"[
    {"question_id": "q1", "answer": "paris", "submitted_at": "2026-08-30T10:00:00Z"},
    {"question_id": "q2", "answer": "07", "submitted_at": "2026-08-30T10:01:00Z"},
    {"question_id": "q3", "answer": "table", "submitted_at": "2026-08-30T10:02:00Z"}
]"#;

#[test]
fn band_maps_raw_score() {
    examscore()
        .args(["band", "--section", "listening", "--raw", "32"])
        .assert()
        .success()
        .stdout(predicate::str::contains("band 7.0"));
}

#[test]
fn band_rejects_sections_without_table() {
    examscore()
        .args(["band", "--section", "writing", "--raw", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no band table"));
}

#[test]
fn band_rejects_out_of_range_raw() {
    examscore()
        .args(["band", "--section", "reading", "--raw", "41"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
}

#[test]
fn aggregate_full() {
    examscore()
        .args([
            "aggregate",
            "--listening",
            "6",
            "--reading",
            "7",
            "--writing",
            "7",
            "--speaking",
            "8",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Overall band: 7.0"));
}

#[test]
fn aggregate_partial_rounds_up() {
    examscore()
        .args(["aggregate", "--listening", "7.0", "--reading", "6.5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Partial aggregation over 2"))
        .stdout(predicate::str::contains("Overall band: 7.0"));
}

#[test]
fn aggregate_without_bands_fails() {
    examscore()
        .arg("aggregate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no section bands"));
}

#[test]
fn score_end_to_end() {
    let dir = TempDir::new().unwrap();
    let questions = dir.path().join("listening.toml");
    let submissions = dir.path().join("session.json");
    std::fs::write(&questions, QUESTIONS_TOML).unwrap();
    std::fs::write(&submissions, SUBMISSIONS_JSON).unwrap();

    // q1 exact, q2 numeric, q3 wrong -> 2/3 correct
    examscore()
        .arg("score")
        .arg("--questions")
        .arg(&questions)
        .arg("--submissions")
        .arg(&submissions)
        .assert()
        .success()
        .stdout(predicate::str::contains("Listening Test 1"))
        .stdout(predicate::str::contains("66.7%"));
}

#[test]
fn score_saves_result_json() {
    let dir = TempDir::new().unwrap();
    let questions = dir.path().join("listening.toml");
    let submissions = dir.path().join("session.json");
    let output = dir.path().join("results");
    std::fs::write(&questions, QUESTIONS_TOML).unwrap();
    std::fs::write(&submissions, SUBMISSIONS_JSON).unwrap();

    examscore()
        .arg("score")
        .arg("--questions")
        .arg(&questions)
        .arg("--submissions")
        .arg(&submissions)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved result to"));

    let saved: Vec<_> = std::fs::read_dir(&output).unwrap().collect();
    assert_eq!(saved.len(), 1);
}

#[test]
fn score_rejects_bad_dedup_policy() {
    let dir = TempDir::new().unwrap();
    let questions = dir.path().join("listening.toml");
    let submissions = dir.path().join("session.json");
    std::fs::write(&questions, QUESTIONS_TOML).unwrap();
    std::fs::write(&submissions, SUBMISSIONS_JSON).unwrap();

    examscore()
        .arg("score")
        .arg("--questions")
        .arg(&questions)
        .arg("--submissions")
        .arg(&submissions)
        .args(["--dedup", "newest"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid dedup policy"));
}

#[test]
fn validate_reports_warnings() {
    let dir = TempDir::new().unwrap();
    let questions = dir.path().join("broken.toml");
    std::fs::write(
        &questions,
        r#"
[question_set]
id = "broken"
name = "Broken"
section = "reading"

[[questions]]
id = "r1"
number = 1
kind = "short-answer"
"#,
    )
    .unwrap();

    examscore()
        .arg("validate")
        .arg("--questions")
        .arg(&questions)
        .assert()
        .success()
        .stdout(predicate::str::contains("no accepted answers"))
        .stdout(predicate::str::contains("1 warning(s) found"));
}

#[test]
fn validate_clean_set() {
    let dir = TempDir::new().unwrap();
    let questions = dir.path().join("clean.toml");
    std::fs::write(&questions, QUESTIONS_TOML).unwrap();

    examscore()
        .arg("validate")
        .arg("--questions")
        .arg(&questions)
        .assert()
        .success()
        .stdout(predicate::str::contains("3 questions"))
        .stdout(predicate::str::contains("All question sets valid"));
}

#[test]
fn validate_nonexistent_file() {
    examscore()
        .arg("validate")
        .arg("--questions")
        .arg("nonexistent.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    examscore()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created synonyms.toml"))
        .stdout(predicate::str::contains(
            "Created questions/listening-sample.toml",
        ));

    assert!(dir.path().join("synonyms.toml").exists());
    assert!(dir.path().join("questions/listening-sample.toml").exists());
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    examscore()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    examscore()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}
