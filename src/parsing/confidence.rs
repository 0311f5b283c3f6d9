//! Per-residue confidence aggregation shared by both structure formats.

use std::collections::BTreeMap;

use crate::core::types::{PerResidueScores, ResidueIndex, ResidueScore, StructureFormat};
use crate::parsing::format::detect_format;
use crate::parsing::{mmcif, pdb};

/// Groups atom-level confidence readings by residue and averages them
#[derive(Debug, Default, Clone)]
pub struct ConfidenceAccumulator {
    residues: BTreeMap<ResidueIndex, (f64, usize)>,
}

impl ConfidenceAccumulator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one already-normalized reading (0-100) for a residue
    pub fn push(&mut self, residue: ResidueIndex, score: f64) {
        let entry = self.residues.entry(residue).or_insert((0.0, 0));
        entry.0 += score;
        entry.1 += 1;
    }

    /// Number of distinct residues seen so far
    #[must_use]
    pub fn len(&self) -> usize {
        self.residues.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    /// Averaged scores with their residue index, ascending by index
    #[must_use]
    pub fn residue_scores(&self) -> Vec<ResidueScore> {
        self.residues
            .iter()
            .map(|(&residue, &(sum, atoms))| ResidueScore {
                residue,
                plddt: mean(sum, atoms),
                atoms,
            })
            .collect()
    }

    /// One averaged score per distinct residue, ascending by index
    #[must_use]
    pub fn finish(self) -> PerResidueScores {
        self.residues
            .into_values()
            .map(|(sum, atoms)| mean(sum, atoms))
            .collect()
    }
}

#[inline]
fn mean(sum: f64, count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        sum / count as f64
    }
}

/// Extract per-residue pLDDT from PDB or mmCIF text.
///
/// The format is detected from the leading content. Malformed records are
/// skipped; text with no usable records yields an empty sequence.
///
/// # Example
///
/// ```
/// use fold_relay::parsing::confidence::extract_confidence;
///
/// let pdb = "ATOM      1  N   MET A   1      11.104   6.134  -6.504  1.00  0.87           N\n";
/// let scores = extract_confidence(pdb);
/// assert_eq!(scores.len(), 1);
/// assert!((scores[0] - 87.0).abs() < 1e-9);
/// ```
#[must_use]
pub fn extract_confidence(structure: &str) -> PerResidueScores {
    accumulate(structure).finish()
}

/// Like [`extract_confidence`] but keeps residue numbering and atom counts
#[must_use]
pub fn extract_residue_scores(structure: &str) -> Vec<ResidueScore> {
    accumulate(structure).residue_scores()
}

fn accumulate(structure: &str) -> ConfidenceAccumulator {
    let format = detect_format(structure);
    let accumulator = match format {
        StructureFormat::Pdb => pdb::accumulate_pdb(structure),
        StructureFormat::Mmcif => mmcif::accumulate_mmcif(structure),
    };

    tracing::debug!(
        "Extracted confidence for {} residues from {} text",
        accumulator.len(),
        format
    );

    accumulator
}
