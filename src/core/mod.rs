//! Core data types for structure prediction requests and results.
//!
//! - [`FoldingRequest`](request::FoldingRequest): a validated ESMFold or Boltz-2 request
//! - [`Boltz2Params`](request::Boltz2Params): diffusion tuning parameters
//! - [`FoldResult`](result::FoldResult): structure text plus per-residue pLDDT
//! - [`ResidueIndex`](types::ResidueIndex), [`StructureFormat`](types::StructureFormat),
//!   [`FoldingModel`](types::FoldingModel): shared vocabulary
//!
//! ## Parameter ranges
//!
//! | Parameter | Range | Default |
//! |-----------|-------|---------|
//! | recycling_steps   | 1-10  | 1  |
//! | sampling_steps    | 1-100 | 50 |
//! | diffusion_samples | 1-10  | 3  |

pub mod request;
pub mod result;
pub mod types;
