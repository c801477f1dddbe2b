use align_core::Alignment;
use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

#[derive(Serialize)]
struct CsvRow {
    ticks: usize,
    portal: f64,
    portal_min: f64,
    portal_max: f64,
}

impl From<&Alignment> for CsvRow {
    fn from(alignment: &Alignment) -> Self {
        Self {
            ticks: alignment.ticks_since_portal,
            portal: alignment.portal,
            portal_min: alignment.portal_min,
            portal_max: alignment.portal_max,
        }
    }
}

/// Writes one row per alignment under a `ticks,portal,portal_min,portal_max` header.
pub fn write_csv_to<W: Write>(writer: W, alignments: &[Alignment]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    if alignments.is_empty() {
        csv_writer.write_record(["ticks", "portal", "portal_min", "portal_max"])?;
    }
    for alignment in alignments {
        csv_writer.serialize(CsvRow::from(alignment))?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_csv(path: &Path, alignments: &[Alignment]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;
    write_csv_to(file, alignments)
        .with_context(|| format!("Failed to write CSV file: {}", path.display()))
}
