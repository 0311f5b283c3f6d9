//! # fold-relay
//!
//! A library for obtaining protein structure predictions from hosted models and
//! turning them into per-residue confidence profiles.
//!
//! Structure prediction is delegated to long-running remote functions. The
//! [`InvocationClient`] submits a request and transparently handles both the
//! immediate answer and the accept-then-poll path. The returned structure text
//! (PDB from ESMFold, mmCIF from Boltz-2) is parsed for the pLDDT that each
//! model writes into its B-factor field, averaged per residue.
//!
//! ## Features
//!
//! - **Submit-then-poll invocation**: bounded per-request timeouts, fixed poll delay,
//!   optional overall polling bounds
//! - **Two structure formats**: fixed-column PDB and loop-based mmCIF
//! - **Explicit normalization**: fraction-to-percent rules kept separate per format
//! - **Strict input validation**: 20-letter alphabet, length and parameter ranges
//!
//! ## Example
//!
//! ```rust,no_run
//! use fold_relay::{ClientConfig, FoldingRequest, FoldingService};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let service = FoldingService::from_config(ClientConfig::new("nvapi-..."))?;
//! let request = FoldingRequest::esmfold("MKTAYIAKQRQISFVKSHFSRQ")?;
//!
//! let result = service.fold(&request).await?;
//! println!("{} residues, mean pLDDT {:?}", result.plddt.len(), result.mean_plddt());
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`client`]: Invocation client and its configuration
//! - [`core`]: Requests, results, and shared types
//! - [`folding`]: Provider payloads and result assembly
//! - [`parsing`]: PDB/mmCIF confidence extraction
//! - [`cli`]: Command-line interface implementation
//! - [`web`]: HTTP relay

pub mod cli;
pub mod client;
pub mod core;
pub mod error;
pub mod folding;
pub mod parsing;
pub mod utils;
pub mod web;

// Re-export commonly used types for convenience
pub use client::{ClientConfig, InvocationClient};
pub use crate::core::request::{Boltz2Params, FoldingRequest};
pub use crate::core::result::FoldResult;
pub use crate::core::types::*;
pub use error::FoldingError;
pub use folding::FoldingService;
pub use parsing::confidence::extract_confidence;
