use serde::{Deserialize, Serialize};

use crate::core::types::FoldingModel;
use crate::utils::validation::{
    validate_ligand, validate_range, validate_sequence, ValidationError, DIFFUSION_SAMPLES_RANGE,
    RECYCLING_STEPS_RANGE, SAMPLING_STEPS_RANGE,
};

/// Boltz-2 diffusion tuning parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Boltz2Params {
    pub recycling_steps: u32,
    pub sampling_steps: u32,
    pub diffusion_samples: u32,
}

impl Default for Boltz2Params {
    fn default() -> Self {
        Self {
            recycling_steps: 1,
            sampling_steps: 50,
            diffusion_samples: 3,
        }
    }
}

impl Boltz2Params {
    /// Check every parameter against its inclusive range
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::OutOfRange` for the first parameter outside its range.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_range("recycling_steps", self.recycling_steps, &RECYCLING_STEPS_RANGE)?;
        validate_range("sampling_steps", self.sampling_steps, &SAMPLING_STEPS_RANGE)?;
        validate_range(
            "diffusion_samples",
            self.diffusion_samples,
            &DIFFUSION_SAMPLES_RANGE,
        )?;
        Ok(())
    }
}

/// A validated structure prediction request.
///
/// Only constructible through [`FoldingRequest::esmfold`] or [`FoldingRequest::boltz2`],
/// so a value of this type always satisfies the input contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoldingRequest {
    model: FoldingModel,
    sequence: String,
    ligand_smiles: Option<String>,
    params: Boltz2Params,
}

impl FoldingRequest {
    /// Build an ESMFold request (protein only)
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` if the sequence is empty, too long, or contains
    /// characters outside the 20-letter alphabet.
    pub fn esmfold(sequence: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            model: FoldingModel::EsmFold,
            sequence: validate_sequence(sequence)?,
            ligand_smiles: None,
            params: Boltz2Params::default(),
        })
    }

    /// Build a Boltz-2 request with an optional ligand
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` for an invalid sequence, an overlong ligand
    /// descriptor, or an out-of-range tuning parameter.
    pub fn boltz2(
        sequence: &str,
        ligand_smiles: Option<&str>,
        params: Boltz2Params,
    ) -> Result<Self, ValidationError> {
        let sequence = validate_sequence(sequence)?;
        let ligand_smiles = validate_ligand(ligand_smiles)?;
        params.validate()?;

        Ok(Self {
            model: FoldingModel::Boltz2,
            sequence,
            ligand_smiles,
            params,
        })
    }

    #[must_use]
    pub fn model(&self) -> FoldingModel {
        self.model
    }

    /// Normalized (trimmed, upper-case) sequence
    #[must_use]
    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    #[must_use]
    pub fn ligand_smiles(&self) -> Option<&str> {
        self.ligand_smiles.as_deref()
    }

    #[must_use]
    pub fn params(&self) -> Boltz2Params {
        self.params
    }
}
