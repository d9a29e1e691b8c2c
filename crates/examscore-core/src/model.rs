//! Core data model types for examscore.
//!
//! These are the fundamental types the entire examscore system uses to
//! represent exam sections, questions, submitted answers, and externally
//! graded criteria.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::error::ScoreError;

/// One of the four exam sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Listening,
    Reading,
    Writing,
    Speaking,
}

impl Section {
    /// Sections whose raw scores map through a band table.
    /// Writing and Speaking bands come from externally graded criteria instead.
    pub fn has_band_table(&self) -> bool {
        matches!(self, Section::Listening | Section::Reading)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Section::Listening => write!(f, "listening"),
            Section::Reading => write!(f, "reading"),
            Section::Writing => write!(f, "writing"),
            Section::Speaking => write!(f, "speaking"),
        }
    }
}

impl FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "listening" => Ok(Section::Listening),
            "reading" => Ok(Section::Reading),
            "writing" => Ok(Section::Writing),
            "speaking" => Ok(Section::Speaking),
            other => Err(format!("unknown section: {other}")),
        }
    }
}

/// The kind of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    MultipleChoice,
    FillInBlank,
    ShortAnswer,
    Essay,
    SpeakingTask,
}

impl QuestionType {
    /// Whether the question is scored by answer matching.
    /// Essay and speaking-task responses are graded externally.
    pub fn is_objective(&self) -> bool {
        !matches!(self, QuestionType::Essay | QuestionType::SpeakingTask)
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionType::MultipleChoice => write!(f, "multiple-choice"),
            QuestionType::FillInBlank => write!(f, "fill-in-blank"),
            QuestionType::ShortAnswer => write!(f, "short-answer"),
            QuestionType::Essay => write!(f, "essay"),
            QuestionType::SpeakingTask => write!(f, "speaking-task"),
        }
    }
}

impl FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "multiple-choice" | "mcq" => Ok(QuestionType::MultipleChoice),
            "fill-in-blank" | "fill-blank" => Ok(QuestionType::FillInBlank),
            "short-answer" => Ok(QuestionType::ShortAnswer),
            "essay" => Ok(QuestionType::Essay),
            "speaking-task" => Ok(QuestionType::SpeakingTask),
            other => Err(format!("unknown question type: {other}")),
        }
    }
}

/// A single exam question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier for this question.
    pub id: String,
    /// Ordinal position within the section (1-based).
    pub number: u32,
    /// The kind of question.
    pub kind: QuestionType,
    /// Strings considered correct. May be empty only for non-objective kinds.
    #[serde(default)]
    pub accepted: Vec<String>,
}

/// One submitted answer. A session may hold several submissions for the
/// same question; deduplication policy is the scorer's concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    /// The question this answer is for.
    pub question_id: String,
    /// Raw answer text. For multiple-choice, a single letter.
    pub answer: String,
    /// When the answer was received.
    pub submitted_at: DateTime<Utc>,
}

/// A collection of questions for one section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionSet {
    /// Unique identifier for this question set.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Description of this question set.
    #[serde(default)]
    pub description: String,
    /// Which section the questions belong to.
    pub section: Section,
    /// The questions, in exam order.
    #[serde(default)]
    pub questions: Vec<Question>,
}

/// Criteria returned by the external grader for a Writing or Speaking
/// response. Typed per section so a payload missing a criterion fails
/// deserialization instead of silently scoring it as zero.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "section")]
pub enum SubjectiveCriteria {
    Writing {
        task_achievement: f64,
        coherence_cohesion: f64,
        lexical_resource: f64,
        grammatical_range: f64,
    },
    Speaking {
        fluency_coherence: f64,
        lexical_resource: f64,
        grammatical_range: f64,
        pronunciation: f64,
    },
}

impl SubjectiveCriteria {
    pub fn section(&self) -> Section {
        match self {
            SubjectiveCriteria::Writing { .. } => Section::Writing,
            SubjectiveCriteria::Speaking { .. } => Section::Speaking,
        }
    }

    /// Criterion names and values, in the section's published order.
    pub fn named_values(&self) -> [(&'static str, f64); 4] {
        match *self {
            SubjectiveCriteria::Writing {
                task_achievement,
                coherence_cohesion,
                lexical_resource,
                grammatical_range,
            } => [
                ("task_achievement", task_achievement),
                ("coherence_cohesion", coherence_cohesion),
                ("lexical_resource", lexical_resource),
                ("grammatical_range", grammatical_range),
            ],
            SubjectiveCriteria::Speaking {
                fluency_coherence,
                lexical_resource,
                grammatical_range,
                pronunciation,
            } => [
                ("fluency_coherence", fluency_coherence),
                ("lexical_resource", lexical_resource),
                ("grammatical_range", grammatical_range),
                ("pronunciation", pronunciation),
            ],
        }
    }

    /// Every criterion must sit on the half-band grid in `[0, 9]`.
    pub fn validate(&self) -> Result<(), ScoreError> {
        for (criterion, value) in self.named_values() {
            if !(0.0..=9.0).contains(&value) {
                return Err(ScoreError::CriterionOutOfRange {
                    section: self.section(),
                    criterion,
                    value,
                });
            }
            if ((value * 2.0) - (value * 2.0).round()).abs() > 1e-9 {
                return Err(ScoreError::CriterionOffScale {
                    section: self.section(),
                    criterion,
                    value,
                });
            }
        }
        Ok(())
    }
}
