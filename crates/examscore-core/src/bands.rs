//! Band tables, subjective reduction, and overall aggregation.
//!
//! Raw scores from the objective scorer map to half-point bands through a
//! per-section lookup table; Writing and Speaking bands are unweighted means
//! of externally graded criteria; the overall band combines the four section
//! bands under the published rounding rule.

use serde::{Deserialize, Serialize};

use crate::error::ScoreError;
use crate::model::{Section, SubjectiveCriteria};

/// Highest raw score a table must cover.
pub const MAX_RAW_SCORE: u32 = 40;

/// One contiguous raw-score range mapping to a band.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BandRange {
    pub min: u32,
    pub max: u32,
    pub band: f64,
}

/// An ordered, gapless, non-overlapping set of ranges covering `[0, 40]`.
///
/// Construction validates the table; lookups on a valid table cannot miss
/// for in-range scores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BandTable {
    section: Section,
    ranges: Vec<BandRange>,
}

impl BandTable {
    pub fn new(section: Section, mut ranges: Vec<BandRange>) -> Result<Self, ScoreError> {
        if ranges.is_empty() {
            return Err(ScoreError::InvalidBandTable("table has no ranges".into()));
        }
        ranges.sort_by_key(|r| r.min);

        let mut expected_min = 0u32;
        let mut prev_band = f64::NEG_INFINITY;
        for r in &ranges {
            if r.max < r.min {
                return Err(ScoreError::InvalidBandTable(format!(
                    "range {}..={} is inverted",
                    r.min, r.max
                )));
            }
            if r.min != expected_min {
                return Err(ScoreError::InvalidBandTable(format!(
                    "gap or overlap at raw score {expected_min} (next range starts at {})",
                    r.min
                )));
            }
            if r.band < prev_band {
                return Err(ScoreError::InvalidBandTable(format!(
                    "band {} for {}..={} breaks monotonicity",
                    r.band, r.min, r.max
                )));
            }
            prev_band = r.band;
            expected_min = r.max + 1;
        }

        if expected_min != MAX_RAW_SCORE + 1 {
            return Err(ScoreError::InvalidBandTable(format!(
                "table covers 0..={} instead of 0..={MAX_RAW_SCORE}",
                expected_min.saturating_sub(1)
            )));
        }

        Ok(Self { section, ranges })
    }

    pub fn section(&self) -> Section {
        self.section
    }

    /// Map a raw score to its band by linear scan.
    ///
    /// A well-formed table covers every score in `[0, 40]`; anything outside
    /// misses every range and falls back to band 0.0. Callers are expected
    /// to validate raw scores upstream.
    pub fn map(&self, raw: u32) -> f64 {
        for r in &self.ranges {
            if (r.min..=r.max).contains(&raw) {
                return r.band;
            }
        }
        tracing::warn!(raw, section = %self.section, "raw score outside band table, returning 0.0");
        0.0
    }

    /// The published conversion for a 40-question Listening section.
    pub fn listening() -> Self {
        Self::new(Section::Listening, standard_ranges())
            .expect("builtin listening table is valid")
    }

    /// The published conversion for a 40-question Reading section.
    /// Identical to Listening today, but configured independently.
    pub fn reading() -> Self {
        Self::new(Section::Reading, standard_ranges()).expect("builtin reading table is valid")
    }

    /// The builtin table for a section, if it has one.
    pub fn for_section(section: Section) -> Option<Self> {
        match section {
            Section::Listening => Some(Self::listening()),
            Section::Reading => Some(Self::reading()),
            Section::Writing | Section::Speaking => None,
        }
    }
}

fn standard_ranges() -> Vec<BandRange> {
    [
        (39, 40, 9.0),
        (37, 38, 8.5),
        (35, 36, 8.0),
        (33, 34, 7.5),
        (30, 32, 7.0),
        (27, 29, 6.5),
        (23, 26, 6.0),
        (20, 22, 5.5),
        (16, 19, 5.0),
        (13, 15, 4.5),
        (10, 12, 4.0),
        (7, 9, 3.5),
        (5, 6, 3.0),
        (3, 4, 2.5),
        (1, 2, 1.0),
        (0, 0, 0.0),
    ]
    .into_iter()
    .map(|(min, max, band)| BandRange { min, max, band })
    .collect()
}

/// Round to the nearest half band, halves rounding up.
pub fn round_to_half(value: f64) -> f64 {
    (value * 2.0).round() / 2.0
}

/// Unweighted mean of the four graded criteria. No rounding is applied
/// here; callers round to the half-band grid before storing.
pub fn reduce_subjective(criteria: &SubjectiveCriteria) -> Result<f64, ScoreError> {
    criteria.validate()?;
    let sum: f64 = criteria.named_values().iter().map(|(_, v)| v).sum();
    Ok(sum / 4.0)
}

/// Combine all four section bands into the overall band.
pub fn aggregate_overall(listening: f64, reading: f64, writing: f64, speaking: f64) -> f64 {
    let sum: f64 = [listening, reading, writing, speaking]
        .into_iter()
        .map(clamp_band)
        .sum();
    ielts_round(sum / 4.0)
}

/// Combine however many section bands are available. Bands of zero (nothing
/// scored yet) are not counted; with no usable bands the overall is 0.0.
pub fn aggregate_partial(bands: &[f64]) -> f64 {
    let valid: Vec<f64> = bands
        .iter()
        .copied()
        .map(clamp_band)
        .filter(|b| *b > 0.0)
        .collect();
    if valid.is_empty() {
        return 0.0;
    }
    ielts_round(valid.iter().sum::<f64>() / valid.len() as f64)
}

fn clamp_band(band: f64) -> f64 {
    if !(0.0..=9.0).contains(&band) {
        tracing::warn!(band, "section band outside [0, 9], clamping");
    }
    band.clamp(0.0, 9.0)
}

/// IELTS overall rounding: decimals of .25 and above round to the next half
/// band, .75 and above to the next whole band, anything below .25 down.
fn ielts_round(average: f64) -> f64 {
    let whole = average.floor();
    let decimal = average - whole;
    if decimal >= 0.75 {
        whole + 1.0
    } else if decimal >= 0.25 {
        whole + 0.5
    } else {
        whole
    }
}
