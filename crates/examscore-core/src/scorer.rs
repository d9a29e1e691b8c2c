//! Objective section scoring.
//!
//! Dedupes a session's submissions, matches each retained answer against its
//! question's accepted-answer list, and produces a [`ScoringResult`] with the
//! raw score and accuracy. Band mapping is a separate step (see
//! [`crate::bands`]).

use std::collections::HashMap;

use crate::matcher::Matcher;
use crate::model::{Question, Submission};
use crate::normalize::normalize;
use crate::report::ScoringResult;

/// Which submission wins when a question was answered more than once.
///
/// The stored behavior keeps the first submission seen in input order, which
/// conflicts with a re-answerable exam UI where the latest answer should
/// count. Both policies are explicit so callers choose deliberately.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DedupPolicy {
    /// Keep the first submission encountered in input order.
    #[default]
    FirstWins,
    /// Keep the submission with the latest `submitted_at`.
    LatestWins,
}

/// Score one section's submissions against its question set.
///
/// Questions with no accepted answers cannot be scored and are excluded from
/// the denominator; every remaining question counts toward `total_questions`,
/// so unanswered questions lower accuracy. The returned result leaves `band`
/// unset.
pub fn score_objective(
    submissions: &[Submission],
    questions: &[Question],
    matcher: &Matcher,
    dedup: DedupPolicy,
) -> ScoringResult {
    let gradable: HashMap<&str, &Question> = questions
        .iter()
        .filter(|q| !q.accepted.is_empty())
        .map(|q| (q.id.as_str(), q))
        .collect();

    let mut retained: HashMap<&str, &Submission> = HashMap::new();
    for sub in submissions {
        match dedup {
            DedupPolicy::FirstWins => {
                retained.entry(sub.question_id.as_str()).or_insert(sub);
            }
            DedupPolicy::LatestWins => {
                retained
                    .entry(sub.question_id.as_str())
                    .and_modify(|kept| {
                        if sub.submitted_at > kept.submitted_at {
                            *kept = sub;
                        }
                    })
                    .or_insert(sub);
            }
        }
    }

    let mut correct = 0usize;
    for (question_id, sub) in &retained {
        let Some(question) = gradable.get(question_id) else {
            tracing::debug!(question_id, "submission for unscorable question, skipping");
            continue;
        };

        let candidate = normalize(&sub.answer);
        if candidate.is_empty() {
            tracing::debug!(question_id, "answer normalized to empty, scoring incorrect");
            continue;
        }

        if matcher.matches_any(&candidate, &question.accepted) {
            correct += 1;
        }
    }

    let total = gradable.len();
    let accuracy = if total == 0 {
        0.0
    } else {
        correct as f64 / total as f64 * 100.0
    };

    ScoringResult {
        total_questions: total,
        correct_answers: correct,
        raw_score: correct as u32,
        accuracy,
        band: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuestionType;
    use chrono::{Duration, Utc};

    fn question(id: &str, number: u32, accepted: &[&str]) -> Question {
        Question {
            id: id.into(),
            number,
            kind: QuestionType::ShortAnswer,
            accepted: accepted.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn submission(question_id: &str, answer: &str) -> Submission {
        Submission {
            question_id: question_id.into(),
            answer: answer.into(),
            submitted_at: Utc::now(),
        }
    }

    #[test]
    fn scores_exact_synonym_and_numeric_matches() {
        let questions = vec![
            question("q1", 1, &["Paris"]),
            question("q2", 2, &["big"]),
            question("q3", 3, &["7"]),
        ];
        let submissions = vec![
            submission("q1", "paris"),
            submission("q2", "huge"),
            submission("q3", "07"),
        ];

        let result = score_objective(
            &submissions,
            &questions,
            &Matcher::builtin(),
            DedupPolicy::FirstWins,
        );
        assert_eq!(result.total_questions, 3);
        assert_eq!(result.correct_answers, 3);
        assert_eq!(result.raw_score, 3);
        assert!((result.accuracy - 100.0).abs() < f64::EPSILON);
        assert!(result.band.is_none());
    }

    #[test]
    fn unanswered_questions_count_against_accuracy() {
        let questions = vec![question("q1", 1, &["Paris"]), question("q2", 2, &["7"])];
        let submissions = vec![submission("q1", "paris")];

        let result = score_objective(
            &submissions,
            &questions,
            &Matcher::builtin(),
            DedupPolicy::FirstWins,
        );
        assert_eq!(result.total_questions, 2);
        assert_eq!(result.correct_answers, 1);
        assert!((result.accuracy - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_answers_score_incorrect_without_panicking() {
        let questions = vec![question("q1", 1, &["seven"])];
        let submissions = vec![submission("q1", "?!")];

        let result = score_objective(
            &submissions,
            &questions,
            &Matcher::builtin(),
            DedupPolicy::FirstWins,
        );
        assert_eq!(result.correct_answers, 0);
    }

    #[test]
    fn questions_without_accepted_answers_are_excluded() {
        let questions = vec![
            question("q1", 1, &["Paris"]),
            Question {
                id: "essay-1".into(),
                number: 2,
                kind: QuestionType::Essay,
                accepted: vec![],
            },
        ];
        let submissions = vec![submission("q1", "paris"), submission("essay-1", "my essay")];

        let result = score_objective(
            &submissions,
            &questions,
            &Matcher::builtin(),
            DedupPolicy::FirstWins,
        );
        assert_eq!(result.total_questions, 1);
        assert_eq!(result.correct_answers, 1);
    }

    #[test]
    fn first_wins_keeps_input_order() {
        let questions = vec![question("q1", 1, &["paris"])];
        let now = Utc::now();
        let submissions = vec![
            Submission {
                question_id: "q1".into(),
                answer: "london".into(),
                submitted_at: now,
            },
            Submission {
                question_id: "q1".into(),
                answer: "paris".into(),
                submitted_at: now + Duration::seconds(30),
            },
        ];

        let result = score_objective(
            &submissions,
            &questions,
            &Matcher::builtin(),
            DedupPolicy::FirstWins,
        );
        assert_eq!(result.correct_answers, 0);
    }

    #[test]
    fn latest_wins_selects_by_timestamp() {
        let questions = vec![question("q1", 1, &["paris"])];
        let now = Utc::now();
        // Later answer listed first: input order must not matter.
        let submissions = vec![
            Submission {
                question_id: "q1".into(),
                answer: "paris".into(),
                submitted_at: now + Duration::seconds(30),
            },
            Submission {
                question_id: "q1".into(),
                answer: "london".into(),
                submitted_at: now,
            },
        ];

        let result = score_objective(
            &submissions,
            &questions,
            &Matcher::builtin(),
            DedupPolicy::LatestWins,
        );
        assert_eq!(result.correct_answers, 1);
    }

    #[test]
    fn empty_question_set_yields_zero_accuracy() {
        let result = score_objective(&[], &[], &Matcher::builtin(), DedupPolicy::default());
        assert_eq!(result.total_questions, 0);
        assert_eq!(result.accuracy, 0.0);
    }
}
