//! The `examscore band` command.

use anyhow::Result;

use examscore_core::bands::{BandTable, MAX_RAW_SCORE};
use examscore_core::model::Section;

pub fn execute(section: String, raw: u32) -> Result<()> {
    let section: Section = section.parse().map_err(|e: String| anyhow::anyhow!("{e}"))?;

    let Some(table) = BandTable::for_section(section) else {
        anyhow::bail!("section '{section}' has no band table; bands come from graded criteria");
    };
    anyhow::ensure!(
        raw <= MAX_RAW_SCORE,
        "raw score {raw} out of range 0..={MAX_RAW_SCORE}"
    );

    println!("{section} raw {raw} -> band {:.1}", table.map(raw));
    Ok(())
}
