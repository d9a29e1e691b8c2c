//! Scoring error types.
//!
//! Defined in `examscore-core` so callers can classify failures without
//! string matching. Parse errors for `Section` and `QuestionType` stay
//! plain `String`s on their `FromStr` impls.

use thiserror::Error;

use crate::model::Section;

/// Errors produced by band tables and the subjective reducer.
#[derive(Debug, Error)]
pub enum ScoreError {
    /// A band table failed structural validation.
    #[error("invalid band table: {0}")]
    InvalidBandTable(String),

    /// A graded criterion fell outside the `[0, 9]` band range.
    #[error("{section} criterion '{criterion}' out of range: {value}")]
    CriterionOutOfRange {
        section: Section,
        criterion: &'static str,
        value: f64,
    },

    /// A graded criterion is not on the 0.5 grid.
    #[error("{section} criterion '{criterion}' is not a half-band step: {value}")]
    CriterionOffScale {
        section: Section,
        criterion: &'static str,
        value: f64,
    },
}
