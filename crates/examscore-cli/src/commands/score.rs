//! The `examscore score` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Cell, Table};

use examscore_core::bands::BandTable;
use examscore_core::matcher::{MatchOptions, Matcher, SynonymTable};
use examscore_core::parser;
use examscore_core::report::ScoringResult;
use examscore_core::scorer::{score_objective, DedupPolicy};

pub fn execute(
    questions_path: PathBuf,
    submissions_path: PathBuf,
    synonyms_path: Option<PathBuf>,
    dedup: String,
    strict: bool,
    output: Option<PathBuf>,
) -> Result<()> {
    let dedup = match dedup.as_str() {
        "first" => DedupPolicy::FirstWins,
        "latest" => DedupPolicy::LatestWins,
        other => anyhow::bail!("invalid dedup policy '{other}' (expected 'first' or 'latest')"),
    };

    let set = parser::parse_question_set(&questions_path)?;
    let submissions = parser::load_submissions(&submissions_path)?;

    let synonyms = match &synonyms_path {
        Some(path) => parser::load_synonyms(path)?,
        None => SynonymTable::builtin(),
    };
    let matcher = Matcher::new(
        synonyms,
        MatchOptions {
            substring_containment: !strict,
        },
    );

    let mut result = score_objective(&submissions, &set.questions, &matcher, dedup);

    if let Some(table) = BandTable::for_section(set.section) {
        result.band = Some(table.map(result.raw_score));
    } else {
        tracing::info!(
            section = %set.section,
            "section has no band table; bands come from graded criteria"
        );
    }

    print_summary(&set.name, &result);

    if let Some(output_dir) = output {
        std::fs::create_dir_all(&output_dir)?;
        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H%M%S");
        let path = output_dir.join(format!("{}-{}-{timestamp}.json", set.id, set.section));
        let json = serde_json::to_string_pretty(&result)?;
        std::fs::write(&path, json)?;
        println!("\nSaved result to {}", path.display());
    }

    Ok(())
}

fn print_summary(name: &str, result: &ScoringResult) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Question set", "Total", "Correct", "Accuracy", "Band"]);
    table.add_row(vec![
        Cell::new(name),
        Cell::new(result.total_questions),
        Cell::new(result.correct_answers),
        Cell::new(format!("{:.1}%", result.accuracy)),
        Cell::new(
            result
                .band
                .map(|b| format!("{b:.1}"))
                .unwrap_or_else(|| "-".to_string()),
        ),
    ]);
    println!("{table}");
}
