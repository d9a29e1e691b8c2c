//! The `examscore aggregate` command.

use anyhow::Result;

use examscore_core::bands::{aggregate_overall, aggregate_partial};

pub fn execute(
    listening: Option<f64>,
    reading: Option<f64>,
    writing: Option<f64>,
    speaking: Option<f64>,
) -> Result<()> {
    let sections = [listening, reading, writing, speaking];
    for band in sections.into_iter().flatten() {
        anyhow::ensure!(
            (0.0..=9.0).contains(&band),
            "section band {band} out of range 0..=9"
        );
    }

    let overall = match (listening, reading, writing, speaking) {
        (Some(l), Some(r), Some(w), Some(s)) => aggregate_overall(l, r, w, s),
        _ => {
            let available: Vec<f64> = sections.into_iter().flatten().collect();
            anyhow::ensure!(!available.is_empty(), "no section bands provided");
            println!(
                "Partial aggregation over {} section(s)",
                available.len()
            );
            aggregate_partial(&available)
        }
    };

    println!("Overall band: {overall:.1}");
    Ok(())
}
