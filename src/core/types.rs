use serde::{Deserialize, Serialize};

/// Residue position as numbered by the structure file itself.
///
/// Not necessarily contiguous and not necessarily starting at 1; only used as an
/// aggregation key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ResidueIndex(pub i64);

impl std::fmt::Display for ResidueIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-residue confidence values in [0, 100], ordered by ascending residue index
pub type PerResidueScores = Vec<f64>;

/// Mean of a score sequence, or `None` when it is empty
#[must_use]
pub fn mean_score(scores: &[f64]) -> Option<f64> {
    if scores.is_empty() {
        return None;
    }
    #[allow(clippy::cast_precision_loss)]
    let count = scores.len() as f64;
    Some(scores.iter().sum::<f64>() / count)
}

/// Averaged confidence for a single residue
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResidueScore {
    pub residue: ResidueIndex,
    pub plddt: f64,
    /// Number of atom records that contributed to the average
    pub atoms: usize,
}

/// Textual structure formats returned by the prediction providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StructureFormat {
    /// Fixed-column PDB records
    Pdb,
    /// Token/loop based mmCIF
    Mmcif,
}

impl StructureFormat {
    /// File extension used when writing a structure to disk
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Pdb => "pdb",
            Self::Mmcif => "cif",
        }
    }
}

impl std::fmt::Display for StructureFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pdb => write!(f, "PDB"),
            Self::Mmcif => write!(f, "mmCIF"),
        }
    }
}

/// Remote structure prediction models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoldingModel {
    EsmFold,
    Boltz2,
}

impl std::fmt::Display for FoldingModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EsmFold => write!(f, "ESMFold"),
            Self::Boltz2 => write!(f, "Boltz-2"),
        }
    }
}
