//! Session report types with JSON persistence.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::bands::aggregate_partial;
use crate::model::Section;

/// The outcome of scoring one section's objective answers.
///
/// Immutable once produced; re-scoring a session replaces the whole value
/// rather than patching it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringResult {
    /// Gradable questions in the section.
    pub total_questions: usize,
    /// Answers the matcher accepted.
    pub correct_answers: usize,
    /// Raw score, equal to the correct count.
    pub raw_score: u32,
    /// Percentage of gradable questions answered correctly.
    pub accuracy: f64,
    /// Section band, filled in by the band-mapping step.
    pub band: Option<f64>,
}

/// The four section bands. `None` means the section has not been scored.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SectionBands {
    pub listening: Option<f64>,
    pub reading: Option<f64>,
    pub writing: Option<f64>,
    pub speaking: Option<f64>,
}

impl SectionBands {
    /// The bands present so far, in section order.
    pub fn available(&self) -> Vec<f64> {
        [self.listening, self.reading, self.writing, self.speaking]
            .into_iter()
            .flatten()
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.available().len() == 4
    }
}

/// A complete scored session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// The session this report scores.
    pub session_id: String,
    /// Per-section bands.
    pub bands: SectionBands,
    /// Overall band across the available sections.
    pub overall_band: f64,
    /// Detailed objective results for sections scored by answer matching.
    #[serde(default)]
    pub objective: BTreeMap<Section, ScoringResult>,
}

impl SessionReport {
    /// Build a report from whatever bands are available, aggregating the
    /// overall band over them.
    pub fn new(
        session_id: impl Into<String>,
        bands: SectionBands,
        objective: BTreeMap<Section, ScoringResult>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            session_id: session_id.into(),
            overall_band: aggregate_partial(&bands.available()),
            bands,
            objective,
        }
    }

    /// Save the report as pretty JSON.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: SessionReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}
