//! Centralized input validation for folding requests.
//!
//! All checks here run before any network call is made.

use std::ops::RangeInclusive;

/// The 20 standard amino acids, single-letter codes
pub const AMINO_ACIDS: &str = "ACDEFGHIKLMNPQRSTVWY";

/// Maximum accepted sequence length (residues)
pub const MAX_SEQUENCE_LENGTH: usize = 10_000;

/// Maximum accepted ligand SMILES length (characters)
pub const MAX_LIGAND_LENGTH: usize = 500;

pub const RECYCLING_STEPS_RANGE: RangeInclusive<u32> = 1..=10;
pub const SAMPLING_STEPS_RANGE: RangeInclusive<u32> = 1..=100;
pub const DIFFUSION_SAMPLES_RANGE: RangeInclusive<u32> = 1..=10;

/// Input validation error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Protein sequence cannot be empty")]
    EmptySequence,
    #[error("Protein sequence too long: {0} residues exceeds maximum of {MAX_SEQUENCE_LENGTH}")]
    SequenceTooLong(usize),
    #[error(
        "Protein sequence contains invalid amino acid character '{character}' at position {position}. Only standard 20 amino acids are allowed."
    )]
    InvalidResidue { character: char, position: usize },
    #[error("Ligand SMILES too long: {0} characters exceeds maximum of {MAX_LIGAND_LENGTH}")]
    LigandTooLong(usize),
    #[error("{name} must be between {min} and {max}, got {value}")]
    OutOfRange {
        name: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },
}

/// Check if a character is one of the 20 standard amino acids (uppercase only)
#[must_use]
pub fn is_amino_acid(c: char) -> bool {
    AMINO_ACIDS.contains(c)
}

/// Validate and normalize a protein sequence.
///
/// The sequence is trimmed and ASCII upper-cased; the normalized form is returned.
///
/// # Examples
///
/// ```
/// use fold_relay::utils::validation::validate_sequence;
///
/// assert_eq!(validate_sequence(" mkta \n").unwrap(), "MKTA");
/// assert!(validate_sequence("").is_err());
/// assert!(validate_sequence("MKXA").is_err());
/// ```
///
/// # Errors
///
/// Returns `ValidationError::EmptySequence` for empty or whitespace-only input,
/// `ValidationError::SequenceTooLong` above [`MAX_SEQUENCE_LENGTH`], or
/// `ValidationError::InvalidResidue` for the first character outside the alphabet.
pub fn validate_sequence(sequence: &str) -> Result<String, ValidationError> {
    let trimmed = sequence.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::EmptySequence);
    }

    let length = trimmed.chars().count();
    if length > MAX_SEQUENCE_LENGTH {
        return Err(ValidationError::SequenceTooLong(length));
    }

    // ASCII folding only; Unicode upper-casing maps 'ß' to "SS"
    if let Some((position, character)) = trimmed
        .chars()
        .enumerate()
        .find(|(_, c)| !is_amino_acid(c.to_ascii_uppercase()))
    {
        return Err(ValidationError::InvalidResidue {
            character,
            position: position + 1,
        });
    }

    let normalized = trimmed.to_ascii_uppercase();
    Ok(normalized)
}

/// Validate an optional ligand SMILES string.
///
/// Empty or whitespace-only descriptors are treated as "no ligand".
///
/// # Errors
///
/// Returns `ValidationError::LigandTooLong` if the descriptor exceeds [`MAX_LIGAND_LENGTH`].
pub fn validate_ligand(ligand: Option<&str>) -> Result<Option<String>, ValidationError> {
    let Some(smiles) = ligand.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    let length = smiles.chars().count();
    if length > MAX_LIGAND_LENGTH {
        return Err(ValidationError::LigandTooLong(length));
    }

    Ok(Some(smiles.to_string()))
}

/// Check that a tuning parameter lies inside its inclusive range
///
/// # Errors
///
/// Returns `ValidationError::OutOfRange` naming the parameter and its bounds.
pub fn validate_range(
    name: &'static str,
    value: u32,
    range: &RangeInclusive<u32>,
) -> Result<u32, ValidationError> {
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(ValidationError::OutOfRange {
            name,
            value,
            min: *range.start(),
            max: *range.end(),
        })
    }
}
