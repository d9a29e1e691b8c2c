//! Tolerant answer matching.
//!
//! Decides whether a normalized candidate answer matches a normalized
//! accepted answer. The rule cascade is evaluated in a fixed order and the
//! first rule that fires wins:
//!
//! 1. exact equality
//! 2. substring containment (lenient; can be disabled via [`MatchOptions`])
//! 3. numeric equivalence ("7" vs "07")
//! 4. synonym groups
//! 5. stop-word-stripped equality
//! 6. word-set containment for multi-word answers

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

/// Articles and prepositions ignored by the stop-word rule.
const STOP_WORDS: [&str; 10] = ["a", "an", "the", "in", "on", "at", "of", "for", "with", "by"];

/// Synonym groups keyed by canonical term. Injectable so test suites can
/// substitute minimal fixtures and deployments can extend the vocabulary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SynonymTable {
    groups: HashMap<String, Vec<String>>,
}

impl SynonymTable {
    pub fn new(groups: HashMap<String, Vec<String>>) -> Self {
        Self { groups }
    }

    /// The fixed production vocabulary.
    pub fn builtin() -> Self {
        let groups = [
            ("big", vec!["large", "huge", "enormous", "massive"]),
            ("happy", vec!["glad", "pleased", "joyful", "delighted"]),
            ("fast", vec!["quick", "rapid", "swift"]),
            ("smart", vec!["clever", "intelligent", "bright"]),
            ("small", vec!["little", "tiny", "miniature"]),
        ];
        Self {
            groups: groups
                .into_iter()
                .map(|(k, v)| {
                    (
                        k.to_string(),
                        v.into_iter().map(str::to_string).collect(),
                    )
                })
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Two words are synonyms when some group (canonical term included)
    /// contains both. Symmetric by construction.
    pub fn are_synonyms(&self, a: &str, b: &str) -> bool {
        if a == b {
            return false;
        }
        self.groups.iter().any(|(canonical, members)| {
            let holds = |w: &str| canonical == w || members.iter().any(|m| m == w);
            holds(a) && holds(b)
        })
    }
}

/// Matching strictness knobs.
#[derive(Debug, Clone, Copy)]
pub struct MatchOptions {
    /// Accept containment like "pari" inside "paris". Lenient and known to
    /// produce false positives ("on" matches "lion"); disable for strict
    /// marking. Single-character strings never participate.
    pub substring_containment: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            substring_containment: true,
        }
    }
}

/// Answer matcher over pre-normalized strings.
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    synonyms: SynonymTable,
    options: MatchOptions,
}

impl Matcher {
    pub fn new(synonyms: SynonymTable, options: MatchOptions) -> Self {
        Self { synonyms, options }
    }

    /// Matcher with the builtin vocabulary and default leniency.
    pub fn builtin() -> Self {
        Self::new(SynonymTable::builtin(), MatchOptions::default())
    }

    /// Whether `candidate` matches `accepted`. Both must already be
    /// normalized; empty strings never match anything.
    pub fn matches(&self, candidate: &str, accepted: &str) -> bool {
        if candidate.is_empty() || accepted.is_empty() {
            return false;
        }

        if candidate == accepted {
            return true;
        }

        if self.options.substring_containment
            && candidate.chars().count() > 1
            && accepted.chars().count() > 1
            && (candidate.contains(accepted) || accepted.contains(candidate))
        {
            return true;
        }

        if let (Ok(a), Ok(b)) = (candidate.parse::<i64>(), accepted.parse::<i64>()) {
            if a == b {
                return true;
            }
        }

        if self.synonyms.are_synonyms(candidate, accepted) {
            return true;
        }

        if strip_stop_words(candidate) == strip_stop_words(accepted) {
            return true;
        }

        let candidate_words: HashSet<&str> = candidate.split_whitespace().collect();
        let accepted_words: HashSet<&str> = accepted.split_whitespace().collect();
        if (candidate_words.len() > 1 || accepted_words.len() > 1)
            && accepted_words.is_subset(&candidate_words)
        {
            return true;
        }

        false
    }

    /// OR-fold over a question's accepted-answer list.
    pub fn matches_any(&self, candidate: &str, accepted: &[String]) -> bool {
        accepted.iter().any(|a| self.matches(candidate, a))
    }
}

fn strip_stop_words(text: &str) -> String {
    text.split_whitespace()
        .filter(|w| !STOP_WORDS.contains(w))
        .collect::<Vec<_>>()
        .join(" ")
}
