//! Parser for fixed-column PDB atom records.
//!
//! ESMFold writes pLDDT into the temperature-factor column as a fraction in
//! [0, 1]. Every reading is rescaled to a percentage.
//!
//! Column layout (1-based, inclusive):
//!
//! | Columns | Field |
//! |---------|-------|
//! | 1-6     | Record name (`ATOM  `) |
//! | 23-26   | Residue sequence number |
//! | 61-66   | Temperature factor (pLDDT fraction) |

use crate::core::types::{PerResidueScores, ResidueIndex};
use crate::parsing::confidence::ConfidenceAccumulator;

/// Record tag of the lines that carry per-atom confidence
pub const ATOM_RECORD: &str = "ATOM";

/// Zero-based byte range of the residue sequence number (columns 23-26)
const RESIDUE_COLUMNS: std::ops::Range<usize> = 22..26;
/// Zero-based byte range of the temperature factor (columns 61-66)
const B_FACTOR_COLUMNS: std::ops::Range<usize> = 60..66;

/// Convert a PDB temperature-factor reading to a percentage.
///
/// Always multiplies by 100: this provider stores the fraction, never the percentage.
#[must_use]
pub fn pdb_fraction_to_percent(value: f64) -> f64 {
    value * 100.0
}

/// Parse one atom line into its residue index and normalized score.
///
/// Returns `None` for non-atom lines, short lines, and malformed numeric fields.
#[must_use]
pub fn parse_atom_line(line: &str) -> Option<(ResidueIndex, f64)> {
    if !line.starts_with(ATOM_RECORD) {
        return None;
    }

    let raw_score: f64 = line.get(B_FACTOR_COLUMNS)?.trim().parse().ok()?;
    if !raw_score.is_finite() {
        return None;
    }
    let residue: i64 = line.get(RESIDUE_COLUMNS)?.trim().parse().ok()?;

    Some((ResidueIndex(residue), pdb_fraction_to_percent(raw_score)))
}

/// Collect per-atom readings from PDB text
#[must_use]
pub fn accumulate_pdb(text: &str) -> ConfidenceAccumulator {
    let mut accumulator = ConfidenceAccumulator::new();
    let mut skipped = 0usize;

    for line in text.lines() {
        if !line.starts_with(ATOM_RECORD) {
            continue;
        }
        match parse_atom_line(line) {
            Some((residue, score)) => accumulator.push(residue, score),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        tracing::debug!("Skipped {} malformed ATOM records", skipped);
    }

    accumulator
}

/// Per-residue pLDDT from PDB text, ascending by residue number
#[must_use]
pub fn extract_pdb_confidence(text: &str) -> PerResidueScores {
    accumulate_pdb(text).finish()
}
