//! Boltz-2 request payloads and response unpacking.
//!
//! Boltz-2 usually defers; the final body has the shape
//! `{"structures": [{"structure": "<mmcif>", "format": "mmcif"}], "confidence_scores": [...]}`.

use serde_json::{json, Value};

use crate::core::request::FoldingRequest;
use crate::core::result::FoldResult;
use crate::error::{FoldingError, Result};
use crate::parsing::confidence::extract_confidence;
use crate::parsing::format::detect_format;

pub const PROVIDER_NAME: &str = "Boltz-2";

/// Diffusion step scale sent with every request
pub const STEP_SCALE: f64 = 1.2;
/// Identifier of the single protein chain
pub const POLYMER_ID: &str = "A";
/// Identifier of the optional ligand
pub const LIGAND_ID: &str = "L1";

/// Request body for the Boltz-2 endpoint.
///
/// The protein is sent with a single-sequence MSA; a ligand, when present, is
/// submitted with affinity prediction enabled.
#[must_use]
pub fn build_payload(request: &FoldingRequest) -> Value {
    let sequence = request.sequence();
    let params = request.params();

    let ligands: Vec<Value> = request
        .ligand_smiles()
        .map(|smiles| {
            json!({
                "smiles": smiles,
                "id": LIGAND_ID,
                "predict_affinity": true,
            })
        })
        .into_iter()
        .collect();

    json!({
        "diffusion_samples": params.diffusion_samples,
        "ligands": ligands,
        "polymers": [{
            "id": POLYMER_ID,
            "molecule_type": "protein",
            "msa": {
                "uniref90": {
                    "a3m": {
                        "alignment": format!(">seq1\n{sequence}"),
                        "format": "a3m",
                    }
                }
            },
            "sequence": sequence,
        }],
        "recycling_steps": params.recycling_steps,
        "sampling_steps": params.sampling_steps,
        "step_scale": STEP_SCALE,
        "without_potentials": true,
    })
}

fn missing_structure(message: &str) -> FoldingError {
    FoldingError::Provider {
        status: 500,
        message: message.to_string(),
        body: None,
    }
}

/// Turn a Boltz-2 response body into a [`FoldResult`]
///
/// # Errors
///
/// Returns `FoldingError::Provider` (500) when no structure or an empty structure is returned.
pub fn unpack_response(body: &Value) -> Result<FoldResult> {
    let first = body
        .get("structures")
        .and_then(Value::as_array)
        .and_then(|structures| structures.first())
        .ok_or_else(|| missing_structure("No structures returned"))?;

    let structure = first
        .get("structure")
        .and_then(Value::as_str)
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| missing_structure("No structure content found in response"))?;

    if let Some(reported) = first.get("format").and_then(Value::as_str) {
        tracing::debug!("{} reported structure format: {}", PROVIDER_NAME, reported);
    }

    let confidence_scores = body
        .get("confidence_scores")
        .and_then(Value::as_array)
        .map(|scores| scores.iter().filter_map(Value::as_f64).collect())
        .unwrap_or_default();

    Ok(FoldResult {
        structure: structure.to_string(),
        format: detect_format(structure),
        plddt: extract_confidence(structure),
        confidence_scores: Some(confidence_scores),
    })
}
