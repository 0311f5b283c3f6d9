use serde::{Deserialize, Serialize};

use crate::core::types::{mean_score, PerResidueScores, StructureFormat};

/// Final prediction record handed back to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoldResult {
    /// Structure text exactly as returned by the provider
    pub structure: String,
    pub format: StructureFormat,
    /// Per-residue pLDDT in [0, 100], ascending residue order
    pub plddt: PerResidueScores,
    /// Secondary confidence values reported by providers that supply them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_scores: Option<Vec<f64>>,
}

impl FoldResult {
    /// Mean pLDDT over all residues, or `None` when no confidence data was recovered
    #[must_use]
    pub fn mean_plddt(&self) -> Option<f64> {
        mean_score(&self.plddt)
    }
}
