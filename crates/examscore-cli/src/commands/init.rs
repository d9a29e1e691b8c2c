//! The `examscore init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create the synonym table
    if std::path::Path::new("synonyms.toml").exists() {
        println!("synonyms.toml already exists, skipping.");
    } else {
        std::fs::write("synonyms.toml", SAMPLE_SYNONYMS)?;
        println!("Created synonyms.toml");
    }

    // Create a sample question set
    std::fs::create_dir_all("questions")?;
    let sample_path = std::path::Path::new("questions/listening-sample.toml");
    if sample_path.exists() {
        println!("questions/listening-sample.toml already exists, skipping.");
    } else {
        std::fs::write(sample_path, SAMPLE_QUESTION_SET)?;
        println!("Created questions/listening-sample.toml");
    }

    println!("\nNext steps:");
    println!("  1. Run: examscore validate --questions questions/listening-sample.toml");
    println!("  2. Score a session: examscore score --questions questions/listening-sample.toml --submissions session.json");
    println!("  3. Aggregate bands: examscore aggregate --listening 7.0 --reading 6.5");

    Ok(())
}

const SAMPLE_SYNONYMS: &str = r#"# examscore synonym table
# Canonical term on the left, accepted alternatives on the right.

[synonyms]
big = ["large", "huge", "enormous", "massive"]
happy = ["glad", "pleased", "joyful", "delighted"]
fast = ["quick", "rapid", "swift"]
small = ["little", "tiny", "miniature"]
"#;

const SAMPLE_QUESTION_SET: &str = r#"[question_set]
id = "listening-sample"
name = "Listening Sample"
description = "A short listening section to get started"
section = "listening"

[[questions]]
id = "ls-q1"
number = 1
kind = "short-answer"
accepted = ["Paris", "the city of Paris"]

[[questions]]
id = "ls-q2"
number = 2
kind = "multiple-choice"
accepted = ["b"]

[[questions]]
id = "ls-q3"
number = 3
kind = "fill-in-blank"
accepted = ["7", "seven"]
"#;
