//! TOML question-set parsing and validation.
//!
//! Loads question sets from TOML files and directories, synonym tables from
//! their own TOML format, and session submissions from JSON.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::matcher::SynonymTable;
use crate::model::{Question, QuestionSet, QuestionType, Section, Submission};
use crate::normalize::normalize;

/// Intermediate TOML structure for question set files.
#[derive(Debug, Deserialize)]
struct TomlQuestionFile {
    question_set: TomlQuestionSetHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlQuestionSetHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    section: String,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    id: String,
    number: u32,
    kind: String,
    #[serde(default)]
    accepted: Vec<String>,
}

/// Parse a single TOML file into a `QuestionSet`.
pub fn parse_question_set(path: &Path) -> Result<QuestionSet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read question set file: {}", path.display()))?;

    parse_question_set_str(&content, path)
}

/// Parse a TOML string into a `QuestionSet` (useful for testing).
pub fn parse_question_set_str(content: &str, source_path: &Path) -> Result<QuestionSet> {
    let parsed: TomlQuestionFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let section: Section = parsed
        .question_set
        .section
        .parse()
        .map_err(|e: String| anyhow::anyhow!("{}", e))?;

    let questions = parsed
        .questions
        .into_iter()
        .map(|q| {
            let kind: QuestionType =
                q.kind.parse().map_err(|e: String| anyhow::anyhow!("{}", e))?;
            Ok(Question {
                id: q.id,
                number: q.number,
                kind,
                accepted: q.accepted,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(QuestionSet {
        id: parsed.question_set.id,
        name: parsed.question_set.name,
        description: parsed.question_set.description,
        section,
        questions,
    })
}

/// Recursively load all `.toml` question set files from a directory.
pub fn load_question_directory(dir: &Path) -> Result<Vec<QuestionSet>> {
    let mut sets = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            sets.extend(load_question_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_question_set(&path) {
                Ok(set) => sets.push(set),
                Err(e) => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                }
            }
        }
    }

    Ok(sets)
}

/// Load a synonym table from a TOML file with a single `[synonyms]` table of
/// canonical term to group members.
pub fn load_synonyms(path: &Path) -> Result<SynonymTable> {
    #[derive(Debug, Deserialize)]
    struct TomlSynonymFile {
        synonyms: std::collections::HashMap<String, Vec<String>>,
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read synonym file: {}", path.display()))?;
    let parsed: TomlSynonymFile = toml::from_str(&content)
        .with_context(|| format!("failed to parse synonym TOML: {}", path.display()))?;
    Ok(SynonymTable::new(parsed.synonyms))
}

/// Load one session's submissions from a JSON array.
pub fn load_submissions(path: &Path) -> Result<Vec<Submission>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read submissions from {}", path.display()))?;
    let submissions: Vec<Submission> =
        serde_json::from_str(&content).context("failed to parse submissions JSON")?;
    Ok(submissions)
}

/// A warning from question set validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question ID (if applicable).
    pub question_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a question set for common issues.
pub fn validate_question_set(set: &QuestionSet) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    // Duplicate question IDs break submission lookup.
    let mut seen_ids = std::collections::HashSet::new();
    for q in &set.questions {
        if !seen_ids.insert(&q.id) {
            warnings.push(ValidationWarning {
                question_id: Some(q.id.clone()),
                message: format!("duplicate question ID: {}", q.id),
            });
        }
    }

    // Duplicate ordinals make the exam order ambiguous.
    let mut seen_numbers = std::collections::HashSet::new();
    for q in &set.questions {
        if !seen_numbers.insert(q.number) {
            warnings.push(ValidationWarning {
                question_id: Some(q.id.clone()),
                message: format!("duplicate question number: {}", q.number),
            });
        }
    }

    for q in &set.questions {
        if q.kind.is_objective() && q.accepted.is_empty() {
            warnings.push(ValidationWarning {
                question_id: Some(q.id.clone()),
                message: format!("{} question has no accepted answers", q.kind),
            });
        }

        for a in &q.accepted {
            if normalize(a).is_empty() {
                warnings.push(ValidationWarning {
                    question_id: Some(q.id.clone()),
                    message: format!("accepted answer {a:?} normalizes to empty and can never match"),
                });
            }
        }
    }

    if set.section.has_band_table() && !set.questions.is_empty() {
        let gradable = set.questions.iter().filter(|q| !q.accepted.is_empty()).count();
        if gradable > crate::bands::MAX_RAW_SCORE as usize {
            warnings.push(ValidationWarning {
                question_id: None,
                message: format!(
                    "{gradable} gradable questions exceed the band table maximum of {}",
                    crate::bands::MAX_RAW_SCORE
                ),
            });
        }
    }

    warnings
}
