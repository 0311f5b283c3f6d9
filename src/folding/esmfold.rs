//! ESMFold request payloads and response unpacking.
//!
//! ESMFold answers synchronously with `{"pdbs": ["<pdb text>", ...]}`.

use serde_json::{json, Value};

use crate::core::request::FoldingRequest;
use crate::core::result::FoldResult;
use crate::error::{FoldingError, Result};
use crate::parsing::confidence::extract_confidence;
use crate::parsing::format::detect_format;

pub const PROVIDER_NAME: &str = "ESMFold";

/// Request body for the ESMFold endpoint
#[must_use]
pub fn build_payload(request: &FoldingRequest) -> Value {
    json!({ "sequence": request.sequence() })
}

/// Turn an ESMFold response body into a [`FoldResult`]
///
/// # Errors
///
/// Returns `FoldingError::Provider` (500) when the body holds no structure.
pub fn unpack_response(body: &Value) -> Result<FoldResult> {
    let structure = body
        .get("pdbs")
        .and_then(Value::as_array)
        .and_then(|pdbs| pdbs.first())
        .and_then(Value::as_str)
        .filter(|pdb| !pdb.trim().is_empty())
        .ok_or_else(|| FoldingError::Provider {
            status: 500,
            message: "No structures returned".to_string(),
            body: None,
        })?;

    Ok(FoldResult {
        structure: structure.to_string(),
        format: detect_format(structure),
        plddt: extract_confidence(structure),
        confidence_scores: None,
    })
}
